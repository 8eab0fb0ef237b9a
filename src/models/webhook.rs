//! Webhook model and trait implementations.

use serde_json::Value;

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::pagination::ListOptions;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::entity_fields;
use crate::traits::{Create, Get, List, Update};

plain_entity!(
    /// An organizer-level webhook.
    Webhook,
    "Webhook"
);

entity_fields! {
    Webhook {
        id: Integer,
        /// If false, the webhook receives no notifications.
        enabled: Boolean,
        target_url: String,
        /// Whether the webhook fires for every event of the organizer.
        all_events: Boolean,
        /// Event slugs the webhook is limited to unless `all_events` is set.
        limit_events: ListOfStrings,
        action_types: ListOfStrings,
    }
}

impl_ref_from!(Webhook);

impl Identify for Webhook {
    fn identifier(&self) -> Result<Identifier> {
        super::by_id(self)
    }
}

impl Get for Webhook {
    type Key = i64;

    fn path(client: &PretixClient, id: &i64) -> Result<String> {
        Ok(format!("{}webhooks/{id}/", client.organizer_path()))
    }
}

impl List for Webhook {
    type Scope = ();

    fn collection_path(client: &PretixClient, _scope: &()) -> Result<String> {
        Ok(format!("{}webhooks/", client.organizer_path()))
    }
}

impl Create for Webhook {}
impl Update for Webhook {}

impl PretixClient {
    pub async fn get_webhooks(&self) -> Result<EntityCollection<Webhook>> {
        Webhook::list(self, (), &ListOptions::default()).await
    }

    pub async fn get_webhook(&self, id: i64) -> Result<Webhook> {
        Webhook::fetch(self, id).await
    }

    #[tracing::instrument(skip(self, data))]
    pub async fn create_webhook(&self, data: &Value) -> Result<Webhook> {
        Webhook::create(self, (), data).await
    }

    pub async fn update_webhook<'a>(
        &self,
        webhook: impl Into<Ref<&'a Webhook>>,
        data: &Value,
    ) -> Result<Webhook> {
        let id = webhook.into().id()?;
        Webhook::update(self, id, data).await
    }
}
