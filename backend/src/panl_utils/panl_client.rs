use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::PanlServerConfig;

/// One HTTP client per Panl server. Requests are single attempts, no retry.
#[derive(Debug, Clone)]
pub struct PanlClient {
    config: PanlServerConfig,
    http: reqwest::Client,
}

impl PanlClient {
    pub fn new(config: PanlServerConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(PanlServerConfig::from_env())
    }

    pub fn config(&self) -> &PanlServerConfig {
        &self.config
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.config.panl_url, path_and_query)
    }

    /// GETs `path_and_query` on the Panl server and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> anyhow::Result<T> {
        let url = self.url(path_and_query);
        info!("PANL GET {}", url);
        let t0 = std::time::Instant::now();

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Error: {}: {}", status, response_txt);
        }

        let dt_ms = t0.elapsed().as_millis() as u32;
        info!("PANL RESPONSE: {} len = {} ({}ms)", url, response_txt.len(), dt_ms);
        let response: T = serde_json::from_str(&response_txt)?;
        Ok(response)
    }
}
