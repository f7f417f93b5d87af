//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the board endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Language code (`en`, `nl`, `fr`, `de`). Unknown codes fall back to English.
    pub lang: Option<String>,
}

/// Summary returned after a successful update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Board station name
    pub station: String,

    /// Number of departures on the new board
    pub departures: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Underlying problems, e.g. one entry per malformed field
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}
