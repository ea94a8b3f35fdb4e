//! Mock Rollbar API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Rollbar
//! API for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing: it serves the envelope response
//! shape, paginates invite listings by the `page` query parameter, checks
//! `access_token` query authentication when configured, and records the
//! page numbers it has served.
//!
//! # Example
//!
//! ```ignore
//! use rollbar_api::mock_server::MockServer;
//! use rollbar_api::{client_options, Get, Project, RollbarClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = RollbarClient::with_options(
//!         "test-token",
//!         [client_options::with_base_url(server.url())],
//!     )
//!     .unwrap();
//!
//!     // Server comes with default fixtures
//!     let project = Project::get(&client, 106671).await.unwrap();
//!     assert_eq!(project.name, "Client-Config");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
