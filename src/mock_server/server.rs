//! Mock Rollbar API server.
//!
//! Provides an axum-based HTTP server that simulates the Rollbar API,
//! including the envelope response shape and the paged invite listing.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock Rollbar API server for testing.
///
/// The server runs in the background and can be used to test the Rollbar
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL with
    /// [`with_base_url`](crate::client_options::with_base_url) when creating
    /// a `RollbarClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test, and reading the
    /// recorded invite page sequence afterwards.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        let mut state = MockState::new();

        for project in scenario.projects {
            state.projects.insert(project.id, project);
        }

        for invite in scenario.invites {
            state.invites.insert(invite.id, invite);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Project routes
            .route("/projects", get(handlers::list_projects))
            .route("/projects", post(handlers::create_project))
            .route("/project/:id", get(handlers::get_project))
            .route("/project/:id", delete(handlers::delete_project))
            // Invite routes
            .route("/team/:team_id/invites", get(handlers::list_invites))
            .route("/team/:team_id/invites", post(handlers::create_invite))
            .route("/invite/:id", get(handlers::get_invite))
            .route("/invite/:id", delete(handlers::delete_invite))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{client_options, Get, Project, RollbarClient};

    fn test_client(server: &MockServer) -> RollbarClient {
        RollbarClient::with_options("test-token", [client_options::with_base_url(server.url())])
            .unwrap()
    }

    #[tokio::test]
    async fn server_starts_and_responds() {
        let server = MockServer::start().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn get_project_with_rollbar_client() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let project = Project::get(&client, 106671)
            .await
            .expect("Failed to get project");

        assert_eq!(project.name, "Client-Config");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn empty_server_has_no_projects() {
        let server = MockServer::start_empty().await;
        let client = test_client(&server);

        let result = Project::get(&client, 1).await;

        assert!(result.is_err());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn custom_state_is_served() {
        let state = MockState::new().with_project(Fixtures::project(42, "My Custom Project"));

        let server = MockServer::with_state(state).await;
        let client = test_client(&server);

        let project = Project::get(&client, 42)
            .await
            .expect("Failed to get project");

        assert_eq!(project.name, "My Custom Project");

        server.shutdown().await;
    }
}
