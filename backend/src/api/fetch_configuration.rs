use common::control_binder::ControlBinder;
use common::panl_const::SINGLE_PAGE_CONFIG_URL;
use common::panl_response::{PanlConfiguration, PanlConfigurationResponse};

use crate::panl_utils::panl_client::PanlClient;

/// Field-set configuration the single-page search builds its state from.
pub async fn fetch_configuration(client: &PanlClient, collection: &str) -> anyhow::Result<PanlConfiguration> {
    let path = format!("{}/{}/", SINGLE_PAGE_CONFIG_URL, collection);
    let response: PanlConfigurationResponse = client.get_json(&path).await?;
    Ok(response.panl)
}

/// A binder over a freshly loaded configuration, with an empty state.
pub async fn load_control_binder(client: &PanlClient, collection: &str) -> anyhow::Result<ControlBinder> {
    let config = fetch_configuration(client, collection).await?;
    Ok(ControlBinder::new(client.config().results_viewer_url.clone(), collection, config))
}
