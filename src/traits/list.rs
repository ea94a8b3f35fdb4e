//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::RollbarClient;
use crate::error::Result;
use crate::pagination::Page;

/// List entities with pagination support.
///
/// Rollbar list endpoints return one page at a time, selected by a 1-based
/// `page` query parameter; an empty page is the only end-of-list signal.
/// `list_all` presents such an endpoint as a single aggregated sequence.
///
/// # Example
///
/// ```ignore
/// use rollbar_api::{RollbarClient, Invite, InviteListQuery, List};
///
/// let client = RollbarClient::from_env()?;
///
/// // Fetch a single page
/// let page = Invite::list_page(&client, &InviteListQuery { team_id: 666 }, 1).await?;
///
/// // Fetch all pages
/// let invites = Invite::list_all(&client, &InviteListQuery { team_id: 666 }).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters identifying the listing (e.g. the owning team).
    type Query: Send + Sync;

    /// Fetch a single page of entities.
    ///
    /// # Arguments
    ///
    /// * `client` - The Rollbar API client
    /// * `query` - Parameters identifying the listing
    /// * `page` - Page number (1-indexed; the service treats page 0 and
    ///   page 1 as identical)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    async fn list_page(client: &RollbarClient, query: &Self::Query, page: u32)
        -> Result<Page<Self>>;

    /// Fetch every page and return the concatenated items.
    ///
    /// Pages are requested strictly sequentially starting at 1, and the
    /// loop terminates on the first empty page. An endpoint that never
    /// returns an empty page iterates unboundedly unless the client was
    /// configured with a page limit
    /// ([`with_page_limit`](crate::client_options::with_page_limit)).
    ///
    /// # Errors
    ///
    /// Any page failing fails the whole operation; items accumulated from
    /// earlier pages are discarded, never returned alongside an error.
    async fn list_all(client: &RollbarClient, query: &Self::Query) -> Result<Vec<Self>> {
        let page_limit = client.config().page_limit;
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page).await?;
            let exhausted = result.is_empty();
            all_items.extend(result.items);

            if exhausted {
                break;
            }

            if let Some(limit) = page_limit {
                if page >= limit {
                    tracing::warn!("reached configured page limit of {limit}, stopping");
                    break;
                }
            }

            page += 1;
        }

        Ok(all_items)
    }
}
