//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::RollbarClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier.
///
/// # Example
///
/// ```ignore
/// use rollbar_api::{RollbarClient, Invite, Get};
///
/// let client = RollbarClient::from_env()?;
/// let invite = Invite::get(&client, 125522).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &RollbarClient, id: Self::Id) -> Result<Self>;
}
