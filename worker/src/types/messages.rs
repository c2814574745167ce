//! NATS message types

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Generic request wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request<T> {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub payload: T,
}

/// Generic success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse<T> {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub payload: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(request_id: Uuid, payload: T) -> Self {
        Self {
            id: request_id,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(request_id: Uuid, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: request_id,
            timestamp: Utc::now(),
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScheduleRequest;

    #[test]
    fn request_parses_camel_case_envelope() {
        let raw = r#"{
            "id": "6f1c4c1e-8a53-4d43-9a34-3f3cd2b7c6d1",
            "timestamp": "2026-10-18T08:00:00Z",
            "payload": {"distanceMiles": 1200, "durationHours": 23.8, "currentCycleUsed": 12}
        }"#;
        let request: Request<ScheduleRequest> = serde_json::from_str(raw).unwrap();
        assert_eq!(request.payload.distance_miles, 1200.0);
        assert_eq!(request.payload.current_cycle_used, 12.0);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let error = ErrorResponse::new(Uuid::nil(), "INFEASIBLE_TRIP", "cycle exhausted");
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["error"]["code"], "INFEASIBLE_TRIP");
        assert!(value["error"].get("details").is_none());

        let value = serde_json::to_value(error.with_details(serde_json::json!({"milesRemaining": 10.0}))).unwrap();
        assert_eq!(value["error"]["details"]["milesRemaining"], 10.0);
    }
}
