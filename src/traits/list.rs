//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::Entity;
use crate::error::Result;
use crate::pagination::ListOptions;

/// List entities below a scope (the organizer, or an event).
///
/// # Example
///
/// ```ignore
/// use pretixapi::{List, ListOptions, PretixClient, Quota};
///
/// let client = PretixClient::from_env()?;
///
/// // First page only
/// let quotas = Quota::list(&client, "summer-fest".to_string(), &ListOptions::default()).await?;
///
/// // Every page
/// let quotas = Quota::list(&client, "summer-fest".to_string(), &ListOptions::all_pages()).await?;
/// ```
#[async_trait]
pub trait List: Entity {
    /// What the collection lives under.
    type Scope: Send + Sync;

    /// Whether the endpoint supports following `next` links.
    const PAGINATED: bool = false;

    /// Path of the collection, relative to the API base.
    ///
    /// # Errors
    ///
    /// Returns an error if the scope cannot be resolved.
    fn collection_path(client: &PretixClient, scope: &Self::Scope) -> Result<String>;

    /// List entities.
    ///
    /// `options.fetch_all` is honored only when [`List::PAGINATED`] is set.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list(
        client: &PretixClient,
        scope: Self::Scope,
        options: &ListOptions,
    ) -> Result<EntityCollection<Self>> {
        let path = Self::collection_path(client, &scope)?;
        client
            .fetch_collection(&path, options, Self::PAGINATED)
            .await
    }
}
