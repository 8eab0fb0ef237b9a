//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::PretixClient;
use crate::error::Result;
use crate::traits::Get;

/// Delete an entity.
#[async_trait]
pub trait Delete: Get {
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn delete(client: &PretixClient, key: Self::Key) -> Result<()> {
        let path = Self::path(client, &key)?;
        client.delete(&path).await
    }
}
