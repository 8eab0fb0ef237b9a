//! Get trait for fetching single entities.

use async_trait::async_trait;
use reqwest::Method;

use crate::client::PretixClient;
use crate::entity::Entity;
use crate::error::Result;

/// Fetch a single entity by key.
///
/// # Example
///
/// ```ignore
/// use pretixapi::{Event, Get, PretixClient};
///
/// let client = PretixClient::from_env()?;
/// let event = Event::fetch(&client, "summer-fest".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Entity {
    /// What addresses one entity (a slug, an id, or a slug/id pair).
    type Key: Send + Sync;

    /// Path of the entity, relative to the API base.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be resolved.
    fn path(client: &PretixClient, key: &Self::Key) -> Result<String>;

    /// Fetch the entity by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn fetch(client: &PretixClient, key: Self::Key) -> Result<Self> {
        let path = Self::path(client, &key)?;
        client.request_entity(Method::GET, &path, None).await
    }
}
