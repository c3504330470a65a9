//! Common library exports shared between the search page logic and the backend client.

extern crate serde;


pub mod panl_const;
pub mod path_codec;
pub mod facet_descriptor;
pub mod panl_response;
pub mod lpse_state;
pub mod lpse_path;
pub mod range_control;
pub mod date_range;
pub mod viewer_links;
pub mod control_binder;
