//! Request handlers for the mock Rollbar API server.

mod invites;
mod projects;

pub use invites::{create_invite, delete_invite, get_invite, list_invites};
pub use projects::{create_project, delete_project, get_project, list_projects};
