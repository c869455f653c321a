use serde::Serialize;
use utoipa::ToSchema;

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorPayload {
    /// Human readable message
    pub message: String,
    /// HTTP status code
    pub code: u16,
    /// Stable identifier such as `INVALID_PAGE` or `FORBIDDEN`
    pub r#type: String,
    /// Structured context, e.g. the requested page and the page count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
