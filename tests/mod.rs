//! Integration tests for ccloud-browse
//!
//! Tests are organized by component:
//! - ccloud_test: Catalog API client tests
//! - list_controller_test: Paginated list controller against a scripted source
//! - home_search_test: Home feed and search controller tests
//! - cli_test: Argument parsing and JSON output
//! - e2e_test: Controllers wired to the client against a mock server

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
