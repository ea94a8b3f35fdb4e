//! Invite model and trait implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::RollbarClient;
use crate::error::Result;
use crate::pagination::{Envelope, Page};
use crate::traits::{Create, Delete, Get, List};

/// A pending or redeemed invitation of an email address into a team.
///
/// Invitations are the paginated resource: a team accumulates them without
/// bound (there is an open feature request on the service side to expire
/// them), so listings must walk every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    /// Invitation ID.
    pub id: u64,

    /// ID of the user who sent the invitation.
    pub from_user_id: u64,

    /// ID of the team the invitation is for.
    pub team_id: u64,

    /// Email address the invitation was sent to.
    pub to_email: String,

    /// Invitation status (e.g. "pending", "accepted", "rejected").
    pub status: String,

    /// Creation time as a Unix timestamp.
    pub date_created: i64,

    /// Redemption time as a Unix timestamp, `0` while unredeemed.
    #[serde(default)]
    pub date_redeemed: i64,
}

impl Invite {
    /// Whether the invitation has been redeemed.
    pub fn is_redeemed(&self) -> bool {
        self.date_redeemed != 0
    }
}

/// Query parameters for listing invitations.
#[derive(Debug, Clone, Default)]
pub struct InviteListQuery {
    /// The team whose invitations to list.
    pub team_id: u64,
}

/// Parameters for creating an invitation.
///
/// Only the email lands in the request body; POST endpoints that require a
/// token in the body receive it from the caller, not from the client.
#[derive(Debug, Clone, Serialize)]
pub struct InviteCreateParams {
    /// The team to invite into. Carried in the path, not the body.
    #[serde(skip)]
    pub team_id: u64,

    /// Email address to invite.
    pub email: String,
}

#[async_trait]
impl Get for Invite {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &RollbarClient, id: u64) -> Result<Self> {
        let bytes = client.get(&["invite", &id.to_string()]).await?;
        let envelope: Envelope<Invite> = serde_json::from_slice(&bytes)?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl List for Invite {
    type Query = InviteListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &RollbarClient,
        query: &Self::Query,
        page: u32,
    ) -> Result<Page<Self>> {
        let mut params = BTreeMap::new();
        params.insert("page".to_string(), page.to_string());

        let bytes = client
            .get_with_query(&params, &["team", &query.team_id.to_string(), "invites"])
            .await?;
        let envelope: Envelope<Vec<Invite>> = serde_json::from_slice(&bytes)?;
        Ok(Page::from_envelope(envelope, page))
    }
}

#[async_trait]
impl Create for Invite {
    type Params = InviteCreateParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &RollbarClient, params: Self::Params) -> Result<Self> {
        let body = serde_json::to_vec(&params)?;
        let bytes = client
            .post(body, &["team", &params.team_id.to_string(), "invites"])
            .await?;
        let envelope: Envelope<Invite> = serde_json::from_slice(&bytes)?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl Delete for Invite {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &RollbarClient, id: u64) -> Result<()> {
        client.delete(&["invite", &id.to_string()]).await
    }
}

/// List every invitation for a team, walking all pages.
///
/// # Errors
///
/// Returns an error if any page request fails; no partial list is returned.
pub async fn list_invites(client: &RollbarClient, team_id: u64) -> Result<Vec<Invite>> {
    Invite::list_all(client, &InviteListQuery { team_id }).await
}
