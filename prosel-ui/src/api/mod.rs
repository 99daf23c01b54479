//! API Client
//!
//! Browser transport for the hospital REST API.

pub mod client;

pub use client::{get_api_base, set_api_base, FetchClient};
