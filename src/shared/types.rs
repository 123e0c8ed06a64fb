use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response envelope produced by every endpoint.
///
/// Built once per branch and never mutated afterwards; the HTTP status of
/// the rendered response always equals `status_code`, so a failure envelope
/// cannot travel with a 2xx status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub is_success: bool,
    pub error_messages: Vec<String>,
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(status: StatusCode, result: T) -> Self {
        Self {
            status_code: status.as_u16(),
            is_success: true,
            error_messages: Vec::new(),
            result: Some(result),
        }
    }

    /// Success envelope with no payload (delete convention).
    pub fn success(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            is_success: true,
            error_messages: Vec::new(),
            result: None,
        }
    }

    pub fn error(status: StatusCode, error_messages: Vec<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            is_success: false,
            error_messages,
            result: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_is_successful_and_carries_payload() {
        let response = ApiResponse::ok(StatusCode::OK, 42);
        assert!(response.is_success);
        assert_eq!(response.status_code, 200);
        assert_eq!(response.result, Some(42));
        assert!(response.error_messages.is_empty());
    }

    #[test]
    fn error_envelope_keeps_message_order() {
        let response = ApiResponse::<()>::error(
            StatusCode::BAD_REQUEST,
            vec!["first".to_string(), "second".to_string()],
        );
        assert!(!response.is_success);
        assert_eq!(response.status_code, 400);
        assert_eq!(response.error_messages, vec!["first", "second"]);
        assert!(response.result.is_none());
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let response = ApiResponse::<()>::success(StatusCode::OK);
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("statusCode").is_some());
        assert!(value.get("isSuccess").is_some());
        assert!(value.get("errorMessages").is_some());
        assert!(value.get("result").is_some());
    }
}
