//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::RollbarClient;
use crate::error::Result;

/// Delete an entity by ID.
///
/// The success payload, if any, is discarded; only the error path carries
/// information.
///
/// # Example
///
/// ```ignore
/// use rollbar_api::{RollbarClient, Invite, Delete};
///
/// let client = RollbarClient::from_env()?;
/// Invite::delete(&client, 125522).await?;
/// ```
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn delete(client: &RollbarClient, id: Self::Id) -> Result<()>;
}
