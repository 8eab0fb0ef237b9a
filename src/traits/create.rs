//! Create trait for adding entities.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::client::PretixClient;
use crate::error::Result;
use crate::traits::List;

/// Create an entity in a collection.
#[async_trait]
pub trait Create: List {
    /// POST `data` to the collection and return the created entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected.
    async fn create(client: &PretixClient, scope: Self::Scope, data: &Value) -> Result<Self> {
        let path = Self::collection_path(client, &scope)?;
        client.request_entity(Method::POST, &path, Some(data)).await
    }
}
