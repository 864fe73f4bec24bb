//! Product validation
//!
//! Validation semantics:
//! - name and description are required and must be non-empty after trimming
//! - price is a required number >= 0
//! - quantity is a required whole number >= 0
//! - category is optional and falls back to `DEFAULT_CATEGORY`
//!
//! Every field is checked; violations are collected rather than returned on
//! the first failure. Validators never touch the store.

use serde_json::{Map, Number, Value};

use super::errors::{FieldViolation, ValidationErrors};
use super::types::{Product, ProductFields, DEFAULT_CATEGORY};

/// Fields a client may set. Anything else in a request body is ignored.
pub const EDITABLE_FIELDS: [&str; 5] = ["name", "description", "price", "quantity", "category"];

/// Validates a create payload.
pub fn validate_new(body: &Map<String, Value>) -> Result<ProductFields, ValidationErrors> {
    validate_fields(body)
}

/// Validates an update payload merged over `existing`.
///
/// Unsubmitted fields keep their stored values, then the merged record is
/// checked against the full rule set.
pub fn validate_update(
    existing: &Product,
    changes: &Map<String, Value>,
) -> Result<ProductFields, ValidationErrors> {
    let mut merged = fields_to_map(&existing.fields());
    for key in EDITABLE_FIELDS {
        if let Some(value) = changes.get(key) {
            merged.insert(key.to_string(), value.clone());
        }
    }
    validate_fields(&merged)
}

fn validate_fields(obj: &Map<String, Value>) -> Result<ProductFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_text(obj, "name", &mut errors);
    let description = required_text(obj, "description", &mut errors);
    let price = validate_price(obj.get("price"), &mut errors);
    let quantity = validate_quantity(obj.get("quantity"), &mut errors);
    let category = validate_category(obj.get("category"), &mut errors);

    match (name, description, price, quantity, category) {
        (Some(name), Some(description), Some(price), Some(quantity), Some(category)) => {
            errors.into_result(ProductFields {
                name,
                description,
                price,
                quantity,
                category,
            })
        }
        _ => Err(errors),
    }
}

fn required_text(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match obj.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => {
            errors.push(FieldViolation::required(field, field));
            None
        }
    }
}

fn validate_price(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<f64> {
    let price = match numeric(value) {
        Numeric::Missing => {
            errors.push(FieldViolation::required("price", "price"));
            return None;
        }
        Numeric::Invalid => {
            errors.push(FieldViolation::not_a_number("price", "Price"));
            return None;
        }
        Numeric::Value(n) => n,
    };

    if price < 0.0 {
        errors.push(FieldViolation::negative("price", "Price"));
        return None;
    }
    Some(price)
}

fn validate_quantity(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<i64> {
    let quantity = match numeric(value) {
        Numeric::Missing => {
            errors.push(FieldViolation::required("quantity", "quantity"));
            return None;
        }
        Numeric::Invalid => {
            errors.push(FieldViolation::not_a_number("quantity", "Quantity"));
            return None;
        }
        Numeric::Value(n) => n,
    };

    if quantity < 0.0 {
        errors.push(FieldViolation::negative("quantity", "Quantity"));
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, which does not fit
    if quantity.fract() != 0.0 || quantity >= i64::MAX as f64 {
        errors.push(FieldViolation::new(
            "quantity",
            "Quantity must be a whole number",
        ));
        return None;
    }
    Some(quantity as i64)
}

fn validate_category(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(DEFAULT_CATEGORY.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Some(DEFAULT_CATEGORY.to_string()),
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push(FieldViolation::new("category", "Category must be a string"));
            None
        }
    }
}

enum Numeric {
    Missing,
    Invalid,
    Value(f64),
}

/// Reads a JSON number, casting numeric strings the way form posts send them.
fn numeric(value: Option<&Value>) -> Numeric {
    match value {
        None | Some(Value::Null) => Numeric::Missing,
        Some(Value::Number(n)) => n.as_f64().map_or(Numeric::Invalid, Numeric::Value),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Numeric::Value(n),
            _ => Numeric::Invalid,
        },
        Some(_) => Numeric::Invalid,
    }
}

fn fields_to_map(fields: &ProductFields) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(fields.name.clone()));
    map.insert("description".into(), Value::String(fields.description.clone()));
    map.insert(
        "price".into(),
        Number::from_f64(fields.price).map_or(Value::Null, Value::Number),
    );
    map.insert("quantity".into(), Value::Number(fields.quantity.into()));
    map.insert("category".into(), Value::String(fields.category.clone()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn valid() -> Map<String, Value> {
        obj(json!({
            "name": "  Desk Lamp ",
            "description": "LED, adjustable",
            "price": 24.99,
            "quantity": 12
        }))
    }

    fn stored() -> Product {
        Product::create("65a1b2c3d4e5f6a7b8c9d0e1", validate_new(&valid()).unwrap(), Utc::now())
    }

    #[test]
    fn test_valid_payload_defaults_category_and_trims() {
        let fields = validate_new(&valid()).unwrap();
        assert_eq!(fields.name, "Desk Lamp");
        assert_eq!(fields.category, DEFAULT_CATEGORY);
        assert_eq!(fields.quantity, 12);
        assert_eq!(fields.price, 24.99);
    }

    #[test]
    fn test_blank_category_defaults() {
        let mut body = valid();
        body.insert("category".into(), json!(""));
        assert_eq!(validate_new(&body).unwrap().category, DEFAULT_CATEGORY);

        body.insert("category".into(), json!("Lighting"));
        assert_eq!(validate_new(&body).unwrap().category, "Lighting");
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut body = valid();
        body.insert("price".into(), json!(-1));
        let err = validate_new(&body).unwrap_err();
        assert_eq!(err.to_string(), "Price cannot be negative");
    }

    #[test]
    fn test_fractional_quantity_rejected() {
        let mut body = valid();
        body.insert("quantity".into(), json!(1.5));
        let err = validate_new(&body).unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be a whole number");
    }

    #[test]
    fn test_integral_float_quantity_accepted() {
        let mut body = valid();
        body.insert("quantity".into(), json!(4.0));
        assert_eq!(validate_new(&body).unwrap().quantity, 4);
    }

    #[test]
    fn test_numeric_strings_are_cast() {
        let mut body = valid();
        body.insert("price".into(), json!("3.25"));
        body.insert("quantity".into(), json!("7"));
        let fields = validate_new(&body).unwrap();
        assert_eq!(fields.price, 3.25);
        assert_eq!(fields.quantity, 7);

        body.insert("price".into(), json!("cheap"));
        let err = validate_new(&body).unwrap_err();
        assert_eq!(err.to_string(), "Price must be a number");
    }

    #[test]
    fn test_all_missing_fields_are_aggregated() {
        let err = validate_new(&Map::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product name is required, Product description is required, \
             Product price is required, Product quantity is required"
        );
    }

    #[test]
    fn test_whitespace_name_is_missing() {
        let mut body = valid();
        body.insert("name".into(), json!("   "));
        body.insert("quantity".into(), json!(-2));
        let err = validate_new(&body).unwrap_err();
        assert!(err.has_field("name"));
        assert_eq!(err.messages()[1], "Quantity cannot be negative");
    }

    #[test]
    fn test_update_merges_over_existing() {
        let existing = stored();
        let fields = validate_update(&existing, &obj(json!({"quantity": 40}))).unwrap();
        assert_eq!(fields.quantity, 40);
        assert_eq!(fields.name, existing.name);
        assert_eq!(fields.price, existing.price);
    }

    #[test]
    fn test_update_ignores_unknown_and_identity_keys() {
        let existing = stored();
        let fields = validate_update(
            &existing,
            &obj(json!({"_id": "other", "createdAt": "yesterday", "color": "red"})),
        )
        .unwrap();
        assert_eq!(fields, existing.fields());
    }

    #[test]
    fn test_update_revalidates_merged_record() {
        let existing = stored();
        let err = validate_update(&existing, &obj(json!({"name": "", "price": -5}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product name is required, Price cannot be negative"
        );
    }
}
