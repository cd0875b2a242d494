//! Response bodies shared across route groups

use serde::Serialize;

use crate::model::Key;

/// `{message}` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement that echoes the created record's key
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: Key,
}

/// Result of a bulk update
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedResponse {
    pub message: String,
    pub updated: usize,
}

/// Result of a bulk delete
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    pub deleted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_response_keeps_key_shape() {
        let response = CreatedResponse {
            message: "Person created".to_string(),
            id: Key::Int(1001),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"message": "Person created", "id": 1001})
        );
    }

    #[test]
    fn test_bulk_responses() {
        let updated = UpdatedResponse {
            message: "3% raise applied".to_string(),
            updated: 2,
        };
        assert_eq!(serde_json::to_value(&updated).unwrap()["updated"], 2);
        let deleted = DeletedResponse {
            message: "Inactive visitors removed".to_string(),
            deleted: 0,
        };
        assert_eq!(serde_json::to_value(&deleted).unwrap()["deleted"], 0);
    }
}
