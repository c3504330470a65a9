use std::time::Duration;

use common::panl_const::RESULTS_VIEWER_URL;

pub const DEFAULT_PANL_URL: &'static str = "http://localhost:8181";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanlServerConfig {
    /// Base URL of the Panl server, without a trailing slash.
    pub panl_url: String,
    /// Path the results viewer is mounted on; prefixes every href.
    pub results_viewer_url: String,
    pub timeout: Duration,
}

impl Default for PanlServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PANL_URL)
    }
}

impl PanlServerConfig {
    pub fn new(panl_url: impl Into<String>) -> Self {
        Self {
            panl_url: panl_url.into().trim_end_matches('/').to_string(),
            results_viewer_url: RESULTS_VIEWER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `PANL_URL`, `PANL_RESULTS_VIEWER_URL` and `PANL_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new(lookup("PANL_URL").unwrap_or(DEFAULT_PANL_URL.to_string()));
        if let Some(viewer) = lookup("PANL_RESULTS_VIEWER_URL") {
            config.results_viewer_url = viewer.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("PANL_TIMEOUT_SECS").and_then(|secs| secs.parse().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}
