//! Check-in lists of an event.

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::models::Event;
use crate::pagination::ListOptions;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::{FieldSpec, NO_FIELDS};
use crate::traits::List;

pub const FIELDS: &[FieldSpec] = NO_FIELDS;

plain_entity!(
    /// A check-in list.
    CheckInList,
    "CheckInList"
);

impl_ref_from!(CheckInList);

impl Identify for CheckInList {
    fn identifier(&self) -> Result<Identifier> {
        super::by_id(self)
    }
}

impl List for CheckInList {
    /// Slug of the event.
    type Scope = String;

    fn collection_path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}checkinlists/", client.event_path(event)))
    }
}

impl PretixClient {
    pub async fn get_check_in_lists<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
    ) -> Result<EntityCollection<CheckInList>> {
        let slug = event.into().slug()?;
        CheckInList::list(self, slug, &ListOptions::default()).await
    }
}
