pub mod panl_client;
