//! The results side of a page: the last results that arrived, and the status
//! of the request in flight.

use serde::Serialize;
use tracing::warn;

use common::panl_response::PanlResultsResponse;
use common::viewer_links::{CollectionUrl, ResultLinks, ViewerLinks};

use crate::api::fetch_results::fetch_results;
use crate::panl_utils::panl_client::PanlClient;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    client: PanlClient,
    links: ViewerLinks,
    status: FetchStatus,
    results: Option<PanlResultsResponse>,
}

impl SearchSession {
    pub fn new(client: PanlClient, collection_url: CollectionUrl) -> Self {
        let links = ViewerLinks::new(client.config().results_viewer_url.clone(), collection_url);
        Self { client, links, status: FetchStatus::Idle, results: None }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn results(&self) -> Option<&PanlResultsResponse> {
        self.results.as_ref()
    }

    pub fn viewer_links(&self) -> &ViewerLinks {
        &self.links
    }

    /// Links of the last results page, if one arrived.
    pub fn result_links(&self) -> Option<ResultLinks> {
        self.results.as_ref().map(|results| self.links.result_links(&results.panl))
    }

    /// Fetches the page for `lpse_path`. On failure the status says so and the
    /// previous results stay in place.
    pub async fn search(&mut self, lpse_path: &str, query: Option<&str>) -> &FetchStatus {
        self.status = FetchStatus::Loading;
        match fetch_results(&self.client, self.links.collection(), lpse_path, query).await {
            Ok(results) => {
                self.results = Some(results);
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                warn!("search on {}{} failed: {:#}", self.links.collection(), lpse_path, e);
                self.status = FetchStatus::Failed(e.to_string());
            }
        }
        &self.status
    }
}
