//! Project endpoint handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// Query parameters for authenticated project requests.
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub access_token: Option<String>,
}

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    pub name: String,
}

/// GET /projects
pub async fn list_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<AuthQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    if !state.token_accepted(query.access_token.as_deref()) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"err": 0, "result": state.list_projects()})),
    )
        .into_response()
}

/// GET /project/{id}
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
    Query(query): Query<AuthQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    if !state.token_accepted(query.access_token.as_deref()) {
        return unauthorized();
    }

    match state.get_project(id) {
        Some(project) => (
            StatusCode::OK,
            Json(serde_json::json!({"err": 0, "result": project})),
        )
            .into_response(),
        None => not_found(&format!("no project with ID {id}")),
    }
}

/// POST /projects
///
/// The access token is not read from the query string here; POST requests
/// carry auth in the body on the live service. The body is parsed from raw
/// bytes because clients do not necessarily send a content-type header.
pub async fn create_project(
    State(state): State<Arc<RwLock<MockState>>>,
    body: Bytes,
) -> impl IntoResponse {
    let body: CreateProjectBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(_) => return bad_request("malformed request body"),
    };

    let mut state = state.write().await;

    let project = state.create_project(body.name);
    (
        StatusCode::OK,
        Json(serde_json::json!({"err": 0, "result": project})),
    )
        .into_response()
}

/// DELETE /project/{id}
pub async fn delete_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
    Query(query): Query<AuthQuery>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if !state.token_accepted(query.access_token.as_deref()) {
        return unauthorized();
    }

    if state.delete_project(id) {
        (StatusCode::OK, Json(serde_json::json!({"err": 0}))).into_response()
    } else {
        not_found(&format!("no project with ID {id}"))
    }
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"err": 1, "message": message})),
    )
        .into_response()
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"err": 1, "message": "invalid access token"})),
    )
        .into_response()
}

fn not_found(message: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"err": 1, "message": message})),
    )
        .into_response()
}
