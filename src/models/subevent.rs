//! Sub-event (event series date) model.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::{self, Entity, FieldRef, ToPlain};
use crate::error::Result;
use crate::models::Event;
use crate::pagination::ListOptions;
use crate::record::Record;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::{entity_fields, field_table, FieldSpec};
use crate::traits::{Create, Delete, Get, List, Update};

/// Price override for an item on one date.
pub const ITEM_PRICE_OVERRIDE: &[FieldSpec] = field_table! {
    item: Integer,
    price: Money,
};

/// Price override for a variation on one date.
pub const VARIATION_PRICE_OVERRIDE: &[FieldSpec] = field_table! {
    variation: Integer,
    price: Money,
};

/// One date of an event series.
///
/// The wire payload names the parent event by slug; the parent instance can
/// be attached with [`SubEvent::set_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubEvent {
    record: Record,
    event: Option<Ref<Event>>,
}

entity_fields! {
    SubEvent {
        id: Integer,
        name: MultiLingual,
        /// Slug of the parent event.
        event: Derived(String),
        /// Whether the sub-event ticket shop is available.
        active: Boolean,
        is_public: Boolean,
        date_from: DateTime,
        date_to: DateTime,
        date_admission: DateTime,
        presale_start: DateTime,
        presale_end: DateTime,
        location: MultiLingual,
        geo_lat: Float,
        geo_lon: Float,
        item_price_overrides: ObjectList(ITEM_PRICE_OVERRIDE),
        variation_price_overrides: ObjectList(VARIATION_PRICE_OVERRIDE),
        meta_data: Object,
        seating_plan: Integer,
        seat_category_mapping: Object,
    }
}

impl SubEvent {
    /// The parent event: the attached instance, else the slug from the
    /// payload.
    pub fn event(&self) -> Result<Option<Ref<&Event>>> {
        if let Some(event) = &self.event {
            return Ok(Some(event.as_ref()));
        }
        Ok(self.view().get_str("event")?.map(Ref::from))
    }

    pub fn set_event(&mut self, event: impl Into<Ref<Event>>) -> &mut Self {
        self.event = Some(event.into());
        self
    }
}

impl Entity for SubEvent {
    const TYPE: &'static str = "SubEvent";
    const FIELDS: &'static [FieldSpec] = FIELDS;

    fn from_record(record: Record) -> Result<Self> {
        Ok(Self {
            record,
            event: None,
        })
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn fields(&self) -> BTreeMap<&str, FieldRef<'_>> {
        let mut fields = entity::record_fields(&self.record);
        if let Some(event) = &self.event {
            fields.insert("event", FieldRef::Nested(event));
        }
        fields
    }
}

impl ToPlain for SubEvent {
    fn to_plain(&self) -> Value {
        entity::plain_fields(self)
    }
}

impl_ref_from!(SubEvent);

impl Identify for SubEvent {
    fn identifier(&self) -> Result<Identifier> {
        super::by_id(self)
    }
}

impl Get for SubEvent {
    /// Event slug and sub-event id.
    type Key = (String, i64);

    fn path(client: &PretixClient, (event, id): &(String, i64)) -> Result<String> {
        Ok(format!("{}subevents/{id}/", client.event_path(event)))
    }
}

impl List for SubEvent {
    /// Slug of the event.
    type Scope = String;

    fn collection_path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}subevents/", client.event_path(event)))
    }
}

impl Create for SubEvent {}
impl Update for SubEvent {}
impl Delete for SubEvent {}

impl PretixClient {
    /// Dates of an event series.
    pub async fn get_sub_events<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
    ) -> Result<EntityCollection<SubEvent>> {
        let slug = event.into().slug()?;
        SubEvent::list(self, slug, &ListOptions::default()).await
    }

    pub async fn create_sub_event<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        data: &Value,
    ) -> Result<SubEvent> {
        let slug = event.into().slug()?;
        SubEvent::create(self, slug, data).await
    }

    pub async fn update_sub_event<'a, 'b>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        sub_event: impl Into<Ref<&'b SubEvent>>,
        data: &Value,
    ) -> Result<SubEvent> {
        let key = (event.into().slug()?, sub_event.into().id()?);
        SubEvent::update(self, key, data).await
    }

    pub async fn delete_sub_event<'a, 'b>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        sub_event: impl Into<Ref<&'b SubEvent>>,
    ) -> Result<()> {
        let key = (event.into().slug()?, sub_event.into().id()?);
        <SubEvent as Delete>::delete(self, key).await
    }
}
