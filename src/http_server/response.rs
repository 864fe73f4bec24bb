//! # Response Envelope
//!
//! Every response body, success or failure, has the same outer shape:
//! `success` plus either `data` (and optionally `count` / `message`) or a
//! failure `message`.

use serde::Serialize;

/// Uniform JSON response body
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Success carrying a single value
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
        }
    }

    /// Success carrying a value and a confirmation message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Success carrying a collection and its size
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            count: Some(count),
            ..Self::ok(data)
        }
    }
}

impl Envelope<()> {
    /// Failure with a message and no data
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope_serialization() {
        let envelope = Envelope::list(vec![json!({"id": 1}), json!({"id": 2})]);

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 2);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_message_envelope_serialization() {
        let envelope = Envelope::with_message(json!({}), "Product deleted successfully");

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"], json!({}));
        assert_eq!(json["message"], "Product deleted successfully");
        assert!(json.get("count").is_none());
    }

    #[test]
    fn test_failure_envelope_serialization() {
        let json = serde_json::to_value(Envelope::failure("Product not found")).unwrap();
        assert_eq!(json, json!({"success": false, "message": "Product not found"}));
    }
}
