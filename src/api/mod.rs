pub mod attendance;
pub mod health;
pub mod student;


use crate::error::ApiError;
use actix_web::web;

/// Absent, `null` and `""` all end up as the empty string, which the stores reject.
fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Unparseable bodies are answered in the same `{"error": ..}` shape as everything else.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(format!("Invalid JSON body: {err}")).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid query string: {err}")).into()
    })
}
