//! Rollbar API client library.
//!
//! A Rust library for interacting with the Rollbar REST API using a
//! trait-based architecture where each operation (Get, List, Create,
//! Delete) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use rollbar_api::{list_invites, list_projects, Get, Invite, RollbarClient};
//!
//! #[tokio::main]
//! async fn main() -> rollbar_api::Result<()> {
//!     // Create client from environment variables
//!     let client = RollbarClient::from_env()?;
//!
//!     // List all projects
//!     let projects = list_projects(&client).await?;
//!     println!("Found {} projects", projects.len());
//!
//!     // List all invites for a team, walking every page
//!     let invites = list_invites(&client, 666).await?;
//!     println!("Found {} invites", invites.len());
//!
//!     // Get a single invite
//!     let invite = Invite::get(&client, 125522).await?;
//!     println!("Invite for {}", invite.to_email);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around four core traits:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch paginated collections of entities
//! - [`Create`] - Register a new entity
//! - [`Delete`] - Remove an entity
//!
//! Each entity type (like [`Invite`] or [`Project`]) implements the traits
//! that are supported by its API endpoints. [`List::list_all`] walks a
//! paginated endpoint page by page until the service returns an empty page,
//! which is the only end-of-list signal the Rollbar protocol provides.
//!
//! # Configuration
//!
//! [`RollbarClient::from_env`] reads configuration from environment
//! variables:
//!
//! - `ROLLBAR_ACCESS_TOKEN` (required) - Your Rollbar access token
//! - `ROLLBAR_API_URL` (optional) - Base URL (defaults to
//!   `https://api.rollbar.com/api/1`)
//!
//! [`RollbarClient::with_options`] accepts [`client_options`] applied in
//! order, last write winning per field; tests use
//! [`client_options::with_base_url`] to point the client at a local
//! stand-in server.

mod client;
mod error;
mod models;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ClientConfig, ClientOption, RollbarClient};
pub use error::{Result, RollbarError};
pub use pagination::{Envelope, Page};

// Re-export traits
pub use traits::{Create, Delete, Get, List};

// Re-export models
pub use models::{Invite, InviteCreateParams, InviteListQuery, Project, ProjectCreateParams};

// Re-export convenience functions
pub use models::{list_invites, list_projects};

/// Configuration options for [`RollbarClient::with_options`].
pub mod client_options {
    pub use crate::client::{
        with_access_token, with_base_path, with_base_url, with_host, with_page_limit, with_scheme,
    };
}
