//! Organizer model and trait implementations.

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::pagination::ListOptions;
use crate::reference::{impl_ref_from, Identifier, Identify};
use crate::schema::entity_fields;
use crate::traits::{Get, List};

plain_entity!(
    /// A pretix organizer: the company or organization running events.
    Organizer,
    "Organizer"
);

entity_fields! {
    Organizer {
        /// The organizer's full name.
        name: String,
        /// Short form of the name, used in URLs.
        slug: String,
    }
}

impl_ref_from!(Organizer);

impl Identify for Organizer {
    fn identifier(&self) -> Result<Identifier> {
        super::by_slug(self)
    }
}

impl Get for Organizer {
    type Key = String;

    fn path(_client: &PretixClient, slug: &String) -> Result<String> {
        Ok(format!("organizers/{}/", urlencoding::encode(slug)))
    }
}

impl List for Organizer {
    type Scope = ();

    fn collection_path(_client: &PretixClient, _scope: &()) -> Result<String> {
        Ok("organizers/".to_string())
    }
}

impl PretixClient {
    /// Raw index of the API endpoints.
    #[tracing::instrument(skip(self))]
    pub async fn api_endpoints(&self) -> Result<serde_json::Value> {
        self.request_json(reqwest::Method::GET, "", None).await
    }

    /// Organizers the token has access to.
    pub async fn get_organizers(&self) -> Result<EntityCollection<Organizer>> {
        Organizer::list(self, (), &ListOptions::default()).await
    }

    /// Fetch an organizer by slug or instance.
    pub async fn get_organizer<'a>(
        &self,
        organizer: impl Into<crate::Ref<&'a Organizer>>,
    ) -> Result<Organizer> {
        let slug = organizer.into().slug()?;
        Organizer::fetch(self, slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, ToPlain};
    use crate::Ref;
    use serde_json::json;

    #[test]
    fn test_organizer_accessors() {
        let organizer = Organizer::from_value(json!({"name": "ACME", "slug": "acme"})).unwrap();
        assert_eq!(organizer.name().unwrap(), Some("ACME"));
        assert_eq!(organizer.slug().unwrap(), Some("acme"));
        assert_eq!(organizer.to_plain(), json!({"name": "ACME", "slug": "acme"}));
    }

    #[test]
    fn test_organizer_reference_resolves_to_slug() {
        let organizer = Organizer::from_value(json!({"name": "ACME", "slug": "acme"})).unwrap();
        let by_instance: Ref<&Organizer> = (&organizer).into();
        assert_eq!(by_instance.slug().unwrap(), "acme");
    }
}
