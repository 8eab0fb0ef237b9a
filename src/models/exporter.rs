//! Data exporters available for an event.

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::{plain_entity, Entity};
use crate::error::Result;
use crate::models::Event;
use crate::pagination::ListOptions;
use crate::reference::Ref;
use crate::schema::{FieldSpec, NO_FIELDS};
use crate::traits::List;

pub const FIELDS: &[FieldSpec] = NO_FIELDS;

plain_entity!(
    /// One export format offered by an event.
    Exporter,
    "Exporter"
);

impl Exporter {
    /// Human-readable name of the exporter.
    pub fn name(&self) -> Result<Option<&str>> {
        self.view().get_str("verbose_name")
    }

    pub fn identifier(&self) -> Result<Option<&str>> {
        self.view().get_str("identifier")
    }
}

impl List for Exporter {
    /// Slug of the event.
    type Scope = String;

    fn collection_path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}exporters/", client.event_path(event)))
    }
}

impl PretixClient {
    pub async fn get_exporters<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
    ) -> Result<EntityCollection<Exporter>> {
        let slug = event.into().slug()?;
        Exporter::list(self, slug, &ListOptions::default()).await
    }
}
