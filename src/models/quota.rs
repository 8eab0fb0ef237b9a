//! Quota model and trait implementations.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::{self, Entity, FieldRef, ToPlain};
use crate::error::Result;
use crate::models::{Event, QuotaAvailability};
use crate::pagination::ListOptions;
use crate::record::Record;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::entity_fields;
use crate::traits::{Create, Get, List, Update};

/// A quota limiting how many of some items can be sold.
///
/// The availability figures are fetched separately and can be attached
/// with [`Quota::set_availability`]; they then serialize under
/// `availability`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quota {
    record: Record,
    availability: Option<QuotaAvailability>,
}

entity_fields! {
    Quota {
        id: Integer,
        /// Internal name of the quota.
        name: String,
        /// Size of the quota, or null if unlimited.
        size: Integer,
        /// IDs of the items this quota acts on.
        items: ListOfIntegers,
        variations: ListOfIntegers,
        /// ID of the sub-event this quota belongs to, if any.
        subevent: Integer,
        close_when_sold_out: Boolean,
        closed: Boolean,
        /// Availability figures, once attached.
        availability: Derived(Object),
    }
}

impl Quota {
    pub fn availability(&self) -> Option<&QuotaAvailability> {
        self.availability.as_ref()
    }

    pub fn set_availability(&mut self, availability: QuotaAvailability) -> &mut Self {
        self.availability = Some(availability);
        self
    }
}

impl Entity for Quota {
    const TYPE: &'static str = "Quota";
    const FIELDS: &'static [crate::schema::FieldSpec] = FIELDS;

    fn from_record(record: Record) -> Result<Self> {
        Ok(Self {
            record,
            availability: None,
        })
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn fields(&self) -> BTreeMap<&str, FieldRef<'_>> {
        let mut fields = entity::record_fields(&self.record);
        if let Some(availability) = &self.availability {
            fields.insert("availability", FieldRef::Nested(availability));
        }
        fields
    }
}

impl ToPlain for Quota {
    fn to_plain(&self) -> Value {
        entity::plain_fields(self)
    }
}

impl_ref_from!(Quota);

impl Identify for Quota {
    fn identifier(&self) -> Result<Identifier> {
        super::by_id(self)
    }
}

impl Get for Quota {
    /// Event slug and quota id.
    type Key = (String, i64);

    fn path(client: &PretixClient, (event, id): &(String, i64)) -> Result<String> {
        Ok(format!("{}quotas/{id}/", client.event_path(event)))
    }
}

impl List for Quota {
    /// Slug of the event.
    type Scope = String;
    const PAGINATED: bool = true;

    fn collection_path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}quotas/", client.event_path(event)))
    }
}

impl Create for Quota {}
impl Update for Quota {}

impl PretixClient {
    /// Quotas of an event.
    ///
    /// Set [`ListOptions::fetch_all`] to follow every page.
    pub async fn get_quotas<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        options: &ListOptions,
    ) -> Result<EntityCollection<Quota>> {
        let slug = event.into().slug()?;
        Quota::list(self, slug, options).await
    }

    pub async fn create_quota<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        data: &Value,
    ) -> Result<Quota> {
        let slug = event.into().slug()?;
        Quota::create(self, slug, data).await
    }

    pub async fn update_quota<'a, 'b>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        quota: impl Into<Ref<&'b Quota>>,
        data: &Value,
    ) -> Result<Quota> {
        let key = (event.into().slug()?, quota.into().id()?);
        Quota::update(self, key, data).await
    }
}
