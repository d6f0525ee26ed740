//! API clients for external services
//!
//! - CCloud: catalog listings, search, genre and country directories

pub mod ccloud;

pub use ccloud::{CcloudClient, CcloudError};
