use common::panl_response::PanlResultsResponse;
use common::viewer_links::CollectionUrl;

use crate::panl_utils::panl_client::PanlClient;

/// Runs the search for `lpse_path` on a collection's field-set. `query` is an
/// already encoded query string, with or without its leading `?`.
pub async fn fetch_results(
    client: &PanlClient,
    collection_url: &CollectionUrl,
    lpse_path: &str,
    query: Option<&str>,
) -> anyhow::Result<PanlResultsResponse> {
    client.get_json(&results_path(collection_url, lpse_path, query)).await
}

pub fn results_path(collection_url: &CollectionUrl, lpse_path: &str, query: Option<&str>) -> String {
    let lpse_path = if lpse_path.starts_with('/') { lpse_path.to_string() } else { format!("/{lpse_path}") };
    match query.map(|q| q.trim_start_matches('?')).filter(|q| !q.is_empty()) {
        Some(query) => format!("{collection_url}{lpse_path}?{query}"),
        None => format!("{collection_url}{lpse_path}"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_the_results_path() {
        let url = CollectionUrl::new("mechanical-pencils", "brandandname");
        assert_eq!(results_path(&url, "/", None), "/mechanical-pencils/brandandname/");
        assert_eq!(results_path(&url, "red/b/", Some("")), "/mechanical-pencils/brandandname/red/b/");
        assert_eq!(
            results_path(&url, "/red/b/", Some("?q=pencil")),
            "/mechanical-pencils/brandandname/red/b/?q=pencil"
        );
    }
}
