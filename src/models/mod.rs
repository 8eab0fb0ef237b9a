//! pretix API model types.
//!
//! One module per resource: its schema table, typed accessors, operation
//! trait implementations and the matching [`PretixClient`] methods.
//!
//! [`PretixClient`]: crate::PretixClient

pub mod checkin_list;
pub mod event;
pub mod exporter;
pub mod item;
pub mod order;
pub mod organizer;
pub mod position;
pub mod question;
pub mod quota;
pub mod quota_availability;
pub mod settings;
pub mod subevent;
pub mod webhook;

pub use checkin_list::CheckInList;
pub use event::Event;
pub use exporter::Exporter;
pub use item::Item;
pub use order::{Order, OrderKey};
pub use organizer::Organizer;
pub use position::Position;
pub use question::Question;
pub use quota::Quota;
pub use quota_availability::QuotaAvailability;
pub use settings::Settings;
pub use subevent::SubEvent;
pub use webhook::Webhook;

use crate::entity::Entity;
use crate::error::{PretixError, Result};
use crate::reference::Identifier;
use crate::schema::{FieldSpec, NO_FIELDS};

const REGISTRY: &[(&str, &[FieldSpec])] = &[
    (<CheckInList as Entity>::TYPE, checkin_list::FIELDS),
    (<Event as Entity>::TYPE, event::FIELDS),
    (<Exporter as Entity>::TYPE, exporter::FIELDS),
    (<Item as Entity>::TYPE, item::FIELDS),
    (<Order as Entity>::TYPE, order::FIELDS),
    (<Organizer as Entity>::TYPE, organizer::FIELDS),
    (<Position as Entity>::TYPE, position::FIELDS),
    (<Question as Entity>::TYPE, question::FIELDS),
    (<Quota as Entity>::TYPE, quota::FIELDS),
    (<QuotaAvailability as Entity>::TYPE, quota_availability::FIELDS),
    (<Settings as Entity>::TYPE, settings::FIELDS),
    (<SubEvent as Entity>::TYPE, subevent::FIELDS),
    (<Webhook as Entity>::TYPE, webhook::FIELDS),
];

/// Schema table of an entity type by name.
///
/// Unknown types get an empty table, so all their fields read as strings.
pub fn schema_for(entity_type: &str) -> &'static [FieldSpec] {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == entity_type)
        .map(|(_, fields)| *fields)
        .unwrap_or(NO_FIELDS)
}

/// Identify an entity by its numeric `id`.
pub(crate) fn by_id<E: Entity>(entity: &E) -> Result<Identifier> {
    entity
        .view()
        .get_i64("id")?
        .map(Identifier::Id)
        .ok_or_else(|| PretixError::InvalidArgument(format!("{} has no id", E::TYPE)))
}

/// Identify an entity by its `slug`.
pub(crate) fn by_slug<E: Entity>(entity: &E) -> Result<Identifier> {
    entity
        .view()
        .get_str("slug")?
        .map(|slug| Identifier::Slug(slug.to_string()))
        .ok_or_else(|| PretixError::InvalidArgument(format!("{} has no slug", E::TYPE)))
}
