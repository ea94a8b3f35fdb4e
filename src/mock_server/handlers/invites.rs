//! Invite endpoint handlers.

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

/// Query parameters for listing invites.
#[derive(Debug, Default, Deserialize)]
pub struct ListInvitesQuery {
    pub page: Option<u32>,
    pub access_token: Option<String>,
}

/// Query parameters for single-invite requests.
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub access_token: Option<String>,
}

/// Request body for creating an invite.
#[derive(Debug, Deserialize)]
pub struct CreateInviteBody {
    pub email: String,
}

/// GET /team/{team_id}/invites
///
/// Serves one page per request, selected by the 1-based `page` query
/// parameter (page 0 is served as page 1). Every served page number is
/// recorded so tests can assert on the request sequence.
pub async fn list_invites(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(team_id): Path<u64>,
    Query(query): Query<ListInvitesQuery>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if !state.token_accepted(query.access_token.as_deref()) {
        return unauthorized();
    }

    let page = query.page.unwrap_or(1).max(1);
    state.invite_pages_served.push(page);

    if let Some(failing_from) = state.invites_failing_from_page {
        if page >= failing_from {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"err": 1, "message": "internal server error"})),
            )
                .into_response();
        }
    }

    let invites = state.list_invites_page(team_id, page);
    (
        StatusCode::OK,
        Json(serde_json::json!({"err": 0, "result": invites})),
    )
        .into_response()
}

/// GET /invite/{id}
pub async fn get_invite(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
    Query(query): Query<AuthQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    if !state.token_accepted(query.access_token.as_deref()) {
        return unauthorized();
    }

    match state.get_invite(id) {
        Some(invite) => (
            StatusCode::OK,
            Json(serde_json::json!({"err": 0, "result": invite})),
        )
            .into_response(),
        None => not_found(&format!("no invite with ID {id}")),
    }
}

/// POST /team/{team_id}/invites
///
/// The access token is not read from the query string here; POST requests
/// carry auth in the body on the live service. The body is parsed from raw
/// bytes because clients do not necessarily send a content-type header.
pub async fn create_invite(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(team_id): Path<u64>,
    body: Bytes,
) -> impl IntoResponse {
    let body: CreateInviteBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(_) => return bad_request("malformed request body"),
    };

    let mut state = state.write().await;

    let invite = state.create_invite(team_id, body.email);
    (
        StatusCode::OK,
        Json(serde_json::json!({"err": 0, "result": invite})),
    )
        .into_response()
}

/// DELETE /invite/{id}
pub async fn delete_invite(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
    Query(query): Query<AuthQuery>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if !state.token_accepted(query.access_token.as_deref()) {
        return unauthorized();
    }

    if state.delete_invite(id) {
        (StatusCode::OK, Json(serde_json::json!({"err": 0}))).into_response()
    } else {
        not_found(&format!("no invite with ID {id}"))
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
