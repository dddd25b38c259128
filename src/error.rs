use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Display)]
pub enum ApiError {
    /// Required input absent or empty (400)
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Unique key already taken (409)
    #[display(fmt = "{}", _0)]
    Conflict(String),

    /// Referenced student or record does not exist (404)
    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Query matched nothing. Also 404, but reported under `message`
    /// rather than `error` so clients can tell it apart from a missing student.
    #[display(fmt = "{}", _0)]
    NotRecorded(String),

    #[display(fmt = "Database error: {}", _0)]
    Database(sqlx::Error),
}

impl ApiError {
    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn conflict(msg: &str) -> Self {
        Self::Conflict(msg.to_string())
    }

    pub fn not_found(msg: &str) -> Self {
        Self::NotFound(msg.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) | Self::NotRecorded(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::NotRecorded(msg) => json!({ "message": msg }),
            Self::Database(e) => {
                error!(error = %e, "Database operation failed");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Presence check shared by every operation: absent and empty are the same thing.
pub fn require(fields: &[&str], msg: &str) -> ApiResult<()> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ApiError::validation(msg));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn not_recorded_uses_message_key() {
        let (status, body) = body_of(ApiError::NotRecorded("nothing here".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "nothing here" }));
    }

    #[actix_web::test]
    async fn database_errors_hide_driver_details() {
        let (status, body) = body_of(ApiError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[actix_web::test]
    async fn client_errors_map_to_status() {
        let (status, body) = body_of(ApiError::conflict("taken")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "taken");

        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn require_rejects_any_empty_field() {
        assert!(require(&["R1", "Alice"], "msg").is_ok());
        assert!(matches!(require(&["R1", ""], "msg"), Err(ApiError::Validation(m)) if m == "msg"));
        // whitespace counts as present
        assert!(require(&[" "], "msg").is_ok());
    }
}
