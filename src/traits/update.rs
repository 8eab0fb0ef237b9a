//! Update trait for modifying entities.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::client::PretixClient;
use crate::error::Result;
use crate::traits::Get;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use pretixapi::{Event, PretixClient, Update};
/// use serde_json::json;
///
/// let client = PretixClient::from_env()?;
/// let updated = Event::update(
///     &client,
///     "summer-fest".to_string(),
///     &json!({"is_public": false}),
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Get {
    /// PATCH the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &PretixClient, key: Self::Key, data: &Value) -> Result<Self> {
        let path = Self::path(client, &key)?;
        client.request_entity(Method::PATCH, &path, Some(data)).await
    }
}
