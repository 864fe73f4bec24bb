//! Product identifiers
//!
//! Ids are 12-byte ObjectIds rendered as 24 lowercase hex characters. Both
//! store backends mint and parse them the same way, so a malformed id is
//! rejected identically whichever backend is running.

use std::fmt;

use mongodb::bson::oid::ObjectId;

use super::errors::{StoreError, StoreResult};

/// A parsed, well-formed product id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(ObjectId);

impl ProductId {
    /// Mints a new id
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses a client-supplied id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidId` unless `raw` is exactly 24 hex characters.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| StoreError::InvalidId(raw.to_string()))
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ProductId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
