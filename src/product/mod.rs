//! Product model for inventory
//!
//! Defines the single persisted entity and the rules every write must
//! satisfy. Validation runs before any store call; a record that fails any
//! rule is never written.

mod errors;
mod types;
mod validator;

pub use errors::{FieldViolation, ValidationErrors};
pub use types::{next_update_time, now_millis, Product, ProductFields, DEFAULT_CATEGORY};
pub use validator::{validate_new, validate_update, EDITABLE_FIELDS};
