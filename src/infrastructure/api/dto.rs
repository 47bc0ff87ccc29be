use serde::Deserialize;

/// Error body some backends attach to failed responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    #[serde(alias = "error")]
    pub message: String,
}
