//! Client side of the Panl server: configuration, HTTP calls and the state of
//! an ongoing search.

pub mod api;
pub mod config;
pub mod panl_utils;
pub mod session;
