//! Order position model.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::{self, Entity, FieldRef, ToPlain};
use crate::error::{PretixError, Result};
use crate::models::quota::FIELDS as QUOTA;
use crate::models::{Event, Quota, SubEvent};
use crate::pagination::ListOptions;
use crate::record::Record;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::{entity_fields, field_table, FieldSpec};
use crate::traits::List;

/// A check-in of a ticket.
pub const CHECKIN: &[FieldSpec] = field_table! {
    list: Integer,
    datetime: DateTime,
    auto_checked_in: Boolean,
};

/// A ticket download option.
pub const DOWNLOAD: &[FieldSpec] = field_table! {
    output: String,
    url: String,
};

/// An answer to a user-defined question.
pub const ANSWER: &[FieldSpec] = field_table! {
    question: Integer,
    answer: String,
    question_identifier: String,
    options: ListOfIntegers,
    option_identifiers: ListOfStrings,
};

/// An assigned seat.
pub const SEAT: &[FieldSpec] = field_table! {
    id: Integer,
    name: String,
    seat_guid: String,
};

/// One line of an order: a ticket or product.
///
/// The sub-event can be replaced by its instance with
/// [`Position::set_subevent`], and the quotas the position counts against
/// can be attached with [`Position::set_quotas`].
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    record: Record,
    subevent: Option<Ref<SubEvent>>,
    quotas: Option<EntityCollection<Quota>>,
}

entity_fields! {
    Position {
        id: Integer,
        /// Code of the order the position belongs to.
        order: String,
        /// Number of the position within the order.
        positionid: Integer,
        canceled: Boolean,
        item: Integer,
        variation: Integer,
        price: Money,
        attendee_name: String,
        attendee_name_parts: ObjectOfStrings,
        attendee_email: String,
        voucher: Integer,
        tax_rate: Decimal,
        tax_value: Money,
        tax_rule: Integer,
        /// Secret printed on the ticket for validation.
        secret: String,
        addon_to: Integer,
        subevent: Derived(Integer),
        pseudonymization_id: String,
        checkins: ObjectList(CHECKIN),
        downloads: ObjectList(DOWNLOAD),
        answers: ObjectList(ANSWER),
        seat: NestedObject(SEAT),
        /// Ticket rendering data, only present when requested with `pdf_data=true`.
        pdf_data: Object,
        /// Quotas the position counts against, once attached.
        quotas: Related(QUOTA),
    }
}

impl Position {
    /// The sub-event: the attached instance, else the id from the payload.
    pub fn subevent(&self) -> Result<Option<Ref<&SubEvent>>> {
        if let Some(subevent) = &self.subevent {
            return Ok(Some(subevent.as_ref()));
        }
        Ok(self.view().get_i64("subevent")?.map(Ref::from))
    }

    /// Id of the sub-event, whichever way it is held.
    pub fn subevent_id(&self) -> Result<Option<i64>> {
        self.subevent()?.map(|subevent| subevent.id()).transpose()
    }

    /// Attach the sub-event by id or instance.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::InvalidArgument`] for a slug.
    pub fn set_subevent(&mut self, subevent: impl Into<Ref<SubEvent>>) -> Result<&mut Self> {
        let subevent = subevent.into();
        if let Ref::Identifier(Identifier::Slug(_)) = subevent {
            return Err(PretixError::InvalidArgument(
                "Sub-event must be an integer or an instance of SubEvent".to_string(),
            ));
        }
        self.subevent = Some(subevent);
        Ok(self)
    }

    pub fn quotas(&self) -> Option<&EntityCollection<Quota>> {
        self.quotas.as_ref()
    }

    pub fn set_quotas(&mut self, quotas: impl Into<EntityCollection<Quota>>) -> &mut Self {
        self.quotas = Some(quotas.into());
        self
    }
}

impl Entity for Position {
    const TYPE: &'static str = "Position";
    const FIELDS: &'static [FieldSpec] = FIELDS;

    fn from_record(record: Record) -> Result<Self> {
        Ok(Self {
            record,
            subevent: None,
            quotas: None,
        })
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn fields(&self) -> BTreeMap<&str, FieldRef<'_>> {
        let mut fields = entity::record_fields(&self.record);
        if let Some(subevent) = &self.subevent {
            fields.insert("subevent", FieldRef::Nested(subevent));
        }
        if let Some(quotas) = &self.quotas {
            fields.insert("quotas", FieldRef::Nested(quotas));
        }
        fields
    }
}

impl ToPlain for Position {
    fn to_plain(&self) -> Value {
        entity::plain_fields(self)
    }
}

impl_ref_from!(Position);

impl Identify for Position {
    fn identifier(&self) -> Result<Identifier> {
        super::by_id(self)
    }
}

impl List for Position {
    /// Slug of the event.
    type Scope = String;
    const PAGINATED: bool = true;

    fn collection_path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}orderpositions/", client.event_path(event)))
    }
}

impl PretixClient {
    /// Order positions of an event.
    ///
    /// Query parameters in `options` (such as `subevent`) are forwarded.
    pub async fn get_order_positions<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        options: &ListOptions,
    ) -> Result<EntityCollection<Position>> {
        let slug = event.into().slug()?;
        Position::list(self, slug, options).await
    }
}
