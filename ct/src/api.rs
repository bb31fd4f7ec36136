//! Wire types shared by the HTTP server and the HTTP backend

use serde::{Deserialize, Serialize};

/// Path of the analysis endpoint, relative to the API base
pub const ANALYZE_PATH: &str = "/analyze";

/// Path of the example endpoint, relative to the API base
pub const EXAMPLES_PATH: &str = "/examples";

/// Body of `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Successful body of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub feedback: String,
}

/// Error body returned by both endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub configured: bool,
}
