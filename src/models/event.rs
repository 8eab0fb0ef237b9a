//! Event model and trait implementations.

use serde_json::Value;

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::pagination::ListOptions;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::entity_fields;
use crate::traits::{Create, Delete, Get, List, Update};

plain_entity!(
    /// A pretix event.
    ///
    /// `name` and `location` are multi-lingual: their accessors return the
    /// whole locale map, which resolves to a single string on request.
    ///
    /// ```
    /// use pretixapi::{Entity, Event};
    /// use serde_json::json;
    ///
    /// let event = Event::from_value(json!({
    ///     "slug": "summer-fest",
    ///     "name": {"da": "Sommerfest", "en": "Summer fest"},
    /// }))?;
    ///
    /// let name = event.name()?.unwrap();
    /// assert_eq!(name.get("da")?, "Sommerfest");
    /// assert!(name.get("fr").is_err());
    /// # Ok::<(), pretixapi::PretixError>(())
    /// ```
    Event,
    "Event"
);

entity_fields! {
    Event {
        /// The event's full name.
        name: MultiLingual,
        /// Short form of the name, used in URLs.
        slug: String,
        /// Whether the ticket shop is publicly available.
        live: Boolean,
        testmode: Boolean,
        currency: String,
        date_from: DateTime,
        date_to: DateTime,
        date_admission: DateTime,
        /// Whether the event shows up in the organizer's public list.
        is_public: Boolean,
        presale_start: DateTime,
        presale_end: DateTime,
        location: MultiLingual,
        geo_lat: Float,
        geo_lon: Float,
        /// Whether this event is a series with sub-events.
        has_subevents: Boolean,
        /// Values of organizer-specific meta data parameters.
        meta_data: Object,
        /// Package names of the enabled plugins.
        plugins: ListOfStrings,
        seating_plan: Integer,
        seat_category_mapping: Object,
        timezone: String,
    }
}

impl_ref_from!(Event);

impl Identify for Event {
    fn identifier(&self) -> Result<Identifier> {
        super::by_slug(self)
    }
}

impl Get for Event {
    type Key = String;

    fn path(client: &PretixClient, slug: &String) -> Result<String> {
        Ok(client.event_path(slug))
    }
}

impl List for Event {
    type Scope = ();
    const PAGINATED: bool = true;

    fn collection_path(client: &PretixClient, _scope: &()) -> Result<String> {
        Ok(format!("{}events/", client.organizer_path()))
    }
}

impl Create for Event {}
impl Update for Event {}
impl Delete for Event {}

impl PretixClient {
    /// Events of the current organizer.
    ///
    /// Set [`ListOptions::fetch_all`] to follow every page.
    pub async fn get_events(&self, options: &ListOptions) -> Result<EntityCollection<Event>> {
        Event::list(self, (), options).await
    }

    /// Fetch an event by slug or instance.
    pub async fn get_event<'a>(&self, event: impl Into<Ref<&'a Event>>) -> Result<Event> {
        let slug = event.into().slug()?;
        Event::fetch(self, slug).await
    }

    #[tracing::instrument(skip(self, data))]
    pub async fn create_event(&self, data: &Value) -> Result<Event> {
        Event::create(self, (), data).await
    }

    /// Create a new event from an existing one.
    pub async fn clone_event<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        data: &Value,
    ) -> Result<Event> {
        let path = format!("{}clone/", self.event_path(&event.into().slug()?));
        self.request_entity(reqwest::Method::POST, &path, Some(data))
            .await
    }

    pub async fn update_event<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        data: &Value,
    ) -> Result<Event> {
        let slug = event.into().slug()?;
        Event::update(self, slug, data).await
    }

    pub async fn delete_event<'a>(&self, event: impl Into<Ref<&'a Event>>) -> Result<()> {
        let slug = event.into().slug()?;
        <Event as Delete>::delete(self, slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, ToPlain};
    use crate::error::PretixError;
    use serde_json::json;

    fn event() -> Event {
        Event::from_value(json!({
            "name": {"da": "Navn", "en": "Name"},
            "slug": "conf",
            "live": true,
            "is_public": false,
            "has_subevents": true,
            "date_from": "2020-06-01T10:00:00+02:00",
            "date_to": null,
            "geo_lat": 56.15,
            "plugins": ["pretix.plugins.banktransfer"],
        }))
        .unwrap()
    }

    #[test]
    fn test_name_returns_locale_map() {
        let event = event();
        let name = event.name().unwrap().unwrap();
        assert_eq!(name.get("da").unwrap(), "Navn");
        assert_eq!(name.as_map().len(), 2);
        assert!(matches!(name.get("fr"), Err(PretixError::InvalidLocale { .. })));
    }

    #[test]
    fn test_get_with_and_without_locale() {
        let event = event();
        assert_eq!(event.get("name").unwrap(), &json!({"da": "Navn", "en": "Name"}));
        assert_eq!(event.get_localized("name", Some("da")).unwrap(), "Navn");

        let err = event.get_localized("name", Some("fr")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid locale: fr");
    }

    #[test]
    fn test_dynamic_accessors() {
        let event = event();
        assert_eq!(event.call("hasSubevents", None).unwrap(), &json!(true));
        assert_eq!(event.call("isPublic", None).unwrap(), &json!(false));
        assert_eq!(event.call("getDateFrom", None).unwrap(), "2020-06-01T10:00:00+02:00");
        assert_eq!(event.call("getName", Some("en")).unwrap(), "Name");

        // Declared but absent from this payload.
        assert!(matches!(
            event.call("getCurrency", None),
            Err(PretixError::UnknownField { .. })
        ));
        assert!(matches!(
            event.call("getFooBar", None),
            Err(PretixError::UndefinedAccessor { .. })
        ));
    }

    #[test]
    fn test_typed_accessors() {
        let event = event();
        assert_eq!(event.live().unwrap(), Some(true));
        assert_eq!(event.is_public().unwrap(), Some(false));
        assert_eq!(event.date_to().unwrap(), None);
        assert_eq!(event.geo_lat().unwrap(), Some(56.15));
        assert_eq!(event.plugins().unwrap(), Some(vec!["pretix.plugins.banktransfer"]));
        assert!(matches!(event.currency(), Err(PretixError::UnknownField { .. })));

        let starts = event.view().get_datetime("date_from").unwrap().unwrap();
        assert_eq!(starts.to_rfc3339(), "2020-06-01T10:00:00+02:00");
    }

    #[test]
    fn test_to_plain_round_trips() {
        let event = event();
        let plain = event.to_plain();
        assert_eq!(Event::from_value(plain.clone()).unwrap().to_plain(), plain);
        assert_eq!(plain["slug"], "conf");
    }
}
