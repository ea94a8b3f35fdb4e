//! Create trait for registering new entities.

use async_trait::async_trait;

use crate::client::RollbarClient;
use crate::error::Result;

/// Create a new entity.
///
/// Implement this trait for entity types that can be created via a POST
/// endpoint. The parameters carry both the target location (e.g. a team ID)
/// and the request body fields.
///
/// # Example
///
/// ```ignore
/// use rollbar_api::{RollbarClient, Invite, Create, InviteCreateParams};
///
/// let client = RollbarClient::from_env()?;
/// let invite = Invite::create(
///     &client,
///     InviteCreateParams {
///         team_id: 666,
///         email: "dev@example.com".to_string(),
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the creation request.
    type Params;

    /// Create the entity and return the created version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn create(client: &RollbarClient, params: Self::Params) -> Result<Self>;
}
