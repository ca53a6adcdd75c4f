//! Configuration structures
//!
//! The API configuration is an explicit request context: everything a
//! data-access call needs (base URL, timeouts, retry budget) travels in
//! this struct instead of being read from ambient session state.

use serde::{Deserialize, Serialize};

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the REST backend (e.g. `https://crm.example.com`)
    pub base_url: String,
    /// Timeout for API requests in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total HTTP attempts per request (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    3
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}
