//! Product record types

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned when none is supplied
pub const DEFAULT_CATEGORY: &str = "General";

/// A stored product.
///
/// `id`, `created_at` and `updated_at` are owned by the store; every other
/// field has passed validation before reaching this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable part of a product, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub category: String,
}

impl Product {
    /// Builds a freshly created record; both timestamps are `now`.
    pub fn create(id: impl Into<String>, fields: ProductFields, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
            category: fields.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the editable fields of this record
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
            category: self.category.clone(),
        }
    }

    /// Replaces the editable fields and refreshes `updated_at`.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, fields: ProductFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.quantity = fields.quantity;
        self.category = fields.category;
        self.updated_at = next_update_time(self.updated_at, now);
    }
}

/// Current time truncated to the store's millisecond resolution
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(Duration::milliseconds(1)).unwrap_or(now)
}

/// Picks an update timestamp that is strictly later than `previous`.
///
/// Two updates inside the same millisecond would otherwise collide.
pub fn next_update_time(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::milliseconds(1);
    if now < floor {
        floor
    } else {
        now
    }
}
