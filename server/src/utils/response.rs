use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Envelope for every successful response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

pub fn success<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    ApiResponse::ok(data, message).into_response()
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2], "Listed")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][1], 2);
        assert_eq!(body["message"], "Listed");
    }

    #[test]
    fn test_error_body_omits_missing_details() {
        let body = ApiErrorBody {
            code: "NOT_FOUND".to_string(),
            message: "Event not found".to_string(),
            details: None,
        };
        let json = serde_json::to_value(body).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_uses_given_status() {
        let response = error("CONFLICT", "Sold out", None, StatusCode::CONFLICT);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
