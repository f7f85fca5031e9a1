//! REST backend connection configuration.

use serde::{Deserialize, Serialize};

/// Settings for reaching the REST backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    #[serde(default = "default_api_root")]
    pub api_root: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Header carrying the session token on authenticated requests.
    #[serde(default = "default_token_header")]
    pub token_header: String,
    /// Number of children fetched per list page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            request_timeout_seconds: default_request_timeout(),
            token_header: default_token_header(),
            page_size: default_page_size(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_api_root() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_token_header() -> String {
    "Girder-Token".to_string()
}

fn default_page_size() -> u64 {
    50
}

fn default_user_agent() -> String {
    format!("datahub/{}", env!("CARGO_PKG_VERSION"))
}
