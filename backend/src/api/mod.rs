pub mod fetch_configuration;
pub mod fetch_results;
