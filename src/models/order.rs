//! Order model and trait implementations.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::{self, Entity, FieldRef, ToPlain};
use crate::error::Result;
use crate::models::position::{Position, DOWNLOAD, FIELDS as POSITION};
use crate::models::{Event, Organizer};
use crate::pagination::ListOptions;
use crate::record::Record;
use crate::reference::{impl_ref_from, Ref};
use crate::schema::{entity_fields, field_table, FieldSpec, NO_FIELDS};
use crate::traits::{Get, List};

/// Invoice address of an order.
pub const INVOICE_ADDRESS: &[FieldSpec] = field_table! {
    last_modified: DateTime,
    company: String,
    is_business: Boolean,
    name: String,
    name_parts: ObjectOfStrings,
    street: String,
    zipcode: String,
    city: String,
    country: String,
    state: String,
    internal_reference: String,
    vat_id: String,
    vat_id_validated: String,
};

/// A fee included in the order total.
pub const FEE: &[FieldSpec] = field_table! {
    fee_type: String,
    value: Money,
    description: String,
    internal_type: String,
    tax_rate: Decimal,
    tax_value: Money,
    tax_rule: Integer,
    canceled: Boolean,
};

/// An order.
///
/// The `positions` of the payload are materialized into
/// [`Position`] entities when the order is built. The event the order
/// belongs to is not part of the payload; attach it with
/// [`Order::set_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    record: Record,
    positions: Option<EntityCollection<Position>>,
    event: Option<Ref<Event>>,
}

entity_fields! {
    Order {
        /// Order code.
        code: String,
        /// One of `n` (pending), `p` (paid), `e` (expired) or `c` (canceled).
        status: String,
        testmode: Boolean,
        /// Secret contained in the link sent to the customer.
        secret: String,
        email: String,
        locale: String,
        sales_channel: String,
        datetime: DateTime,
        expires: DateTime,
        payment_date: Date,
        payment_provider: String,
        total: Money,
        comment: String,
        checkin_attention: Boolean,
        invoice_address: NestedObject(INVOICE_ADDRESS),
        positions: Related(POSITION),
        fees: ObjectList(FEE),
        downloads: ObjectList(DOWNLOAD),
        require_approval: Boolean,
        /// Full URL of the order confirmation page.
        url: String,
        payments: ObjectList(NO_FIELDS),
        refunds: ObjectList(NO_FIELDS),
        /// Slug of the event, once attached.
        event: Derived(String),
        last_modified: DateTime,
    }
}

impl Order {
    /// Positions of the order.
    ///
    /// `None` if the payload carried no position list.
    pub fn positions(&self) -> Option<&EntityCollection<Position>> {
        self.positions.as_ref()
    }

    /// Replace the positions, e.g. with a filtered subset.
    pub fn set_positions(&mut self, positions: EntityCollection<Position>) -> &mut Self {
        self.positions = Some(positions);
        self
    }

    pub fn event(&self) -> Option<Ref<&Event>> {
        self.event.as_ref().map(Ref::as_ref)
    }

    pub fn set_event(&mut self, event: impl Into<Ref<Event>>) -> &mut Self {
        self.event = Some(event.into());
        self
    }

    /// URL of the order in the pretix backend.
    ///
    /// `None` unless the order was fetched through a client and has its
    /// event attached.
    pub fn control_url(&self) -> Result<Option<String>> {
        let (Some(url), Some(organizer), Some(event)) =
            (self.pretix_url(), self.organizer_slug(), self.event())
        else {
            return Ok(None);
        };
        let code = self.code()?.unwrap_or_default();

        Ok(Some(format!(
            "{url}/control/event/{organizer}/{}/orders/{code}",
            event.slug()?
        )))
    }
}

impl Entity for Order {
    const TYPE: &'static str = "Order";
    const FIELDS: &'static [FieldSpec] = FIELDS;

    fn from_record(mut record: Record) -> Result<Self> {
        let positions = match record.take("positions") {
            Some(Value::Array(items)) => {
                let origin = record.origin().cloned();
                let positions = items
                    .into_iter()
                    .map(|item| entity::materialize(item, origin.clone()))
                    .collect::<Result<EntityCollection<Position>>>()?;
                Some(positions)
            }
            // Leave anything else untouched in the payload.
            Some(other) => {
                record.put("positions", other);
                None
            }
            None => None,
        };

        Ok(Self {
            record,
            positions,
            event: None,
        })
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn fields(&self) -> BTreeMap<&str, FieldRef<'_>> {
        let mut fields = entity::record_fields(&self.record);
        if let Some(positions) = &self.positions {
            fields.insert("positions", FieldRef::Nested(positions));
        }
        if let Some(event) = &self.event {
            fields.insert("event", FieldRef::Nested(event));
        }
        fields
    }
}

impl ToPlain for Order {
    fn to_plain(&self) -> Value {
        entity::plain_fields(self)
    }
}

impl_ref_from!(Order);

/// Address of one order, possibly under another organizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    pub organizer: String,
    pub event: String,
    pub code: String,
}

impl Get for Order {
    type Key = OrderKey;

    fn path(_client: &PretixClient, key: &OrderKey) -> Result<String> {
        Ok(format!(
            "organizers/{}/events/{}/orders/{}/",
            urlencoding::encode(&key.organizer),
            urlencoding::encode(&key.event),
            urlencoding::encode(&key.code)
        ))
    }
}

impl List for Order {
    /// Slug of the event.
    type Scope = String;
    const PAGINATED: bool = true;

    fn collection_path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}orders/", client.event_path(event)))
    }
}

impl PretixClient {
    /// Fetch an order by code.
    pub async fn get_order<'a, 'b>(
        &self,
        organizer: impl Into<Ref<&'a Organizer>>,
        event: impl Into<Ref<&'b Event>>,
        code: &str,
    ) -> Result<Order> {
        let key = OrderKey {
            organizer: organizer.into().slug()?,
            event: event.into().slug()?,
            code: code.to_string(),
        };
        Order::fetch(self, key).await
    }

    /// Orders of an event.
    ///
    /// Set [`ListOptions::fetch_all`] to follow every page.
    pub async fn get_orders<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        options: &ListOptions,
    ) -> Result<EntityCollection<Order>> {
        let slug = event.into().slug()?;
        Order::list(self, slug, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Origin;
    use serde_json::json;

    fn raw_order() -> Value {
        json!({
            "code": "ABC12",
            "status": "p",
            "total": "69.00",
            "invoice_address": {"name": "Ada Lovelace", "name_parts": {"given_name": "Ada"}},
            "fees": [],
            "positions": [
                {"id": 1, "order": "ABC12", "price": "23.00", "subevent": 3},
                {"id": 2, "order": "ABC12", "price": "23.00", "subevent": 4},
                {"id": 3, "order": "ABC12", "price": "23.00", "subevent": 3},
            ],
        })
    }

    fn order() -> Order {
        let origin = Origin {
            url: "https://pretix.eu".to_string(),
            organizer: "acme".to_string(),
        };
        entity::materialize(raw_order(), Some(origin)).unwrap()
    }

    #[test]
    fn test_positions_are_materialized() {
        let order = order();
        let positions = order.positions().unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[1].id().unwrap(), Some(2));
        assert_eq!(positions[1].organizer_slug(), Some("acme"));
        assert!(order.fields()["positions"].is_nested());
    }

    #[test]
    fn test_to_plain_serializes_positions() {
        let order = order();
        let plain = order.to_plain();
        let positions = order.positions().unwrap();

        assert_eq!(plain["positions"].as_array().unwrap().len(), 3);
        for (plain, position) in plain["positions"].as_array().unwrap().iter().zip(positions) {
            assert_eq!(plain, &position.to_plain());
        }
        assert_eq!(plain, raw_order());
    }

    #[test]
    fn test_filter_positions_by_subevent() {
        let mut order = order();
        let positions = order.positions().unwrap().clone();
        let filtered = positions.filter(|p| p.subevent_id().ok().flatten() == Some(3));

        let ids: Vec<_> = filtered.iter().map(|p| p.id().unwrap().unwrap()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(positions.len(), 3);

        order.set_positions(filtered);
        assert_eq!(order.positions().unwrap().len(), 2);
        assert_eq!(order.to_plain()["positions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_control_url_needs_event() {
        let mut order = order();
        assert_eq!(order.control_url().unwrap(), None);

        order.set_event("conf");
        assert_eq!(
            order.control_url().unwrap().as_deref(),
            Some("https://pretix.eu/control/event/acme/conf/orders/ABC12")
        );
        assert_eq!(order.to_plain()["event"], "conf");
    }

    #[test]
    fn test_control_url_with_attached_event() {
        let mut order = order();
        let event = Event::from_value(json!({"slug": "summer", "name": {"en": "Summer"}})).unwrap();
        order.set_event(event);
        assert!(order
            .control_url()
            .unwrap()
            .unwrap()
            .ends_with("/event/acme/summer/orders/ABC12"));
    }

    #[test]
    fn test_non_list_positions_stay_in_payload() {
        let order = Order::from_value(json!({"code": "X", "positions": null})).unwrap();
        assert!(order.positions().is_none());
        assert_eq!(order.to_plain(), json!({"code": "X", "positions": null}));
    }

    #[test]
    fn test_dynamic_read_of_positions() {
        let order = order();

        let positions = order.get("positions").unwrap();
        assert!(positions.is_nested());
        assert_eq!(positions, raw_order()["positions"]);
        assert_eq!(order.call("getPositions", None).unwrap(), raw_order()["positions"]);
    }

    #[test]
    fn test_dynamic_read_of_attached_event() {
        let mut order = order();
        assert!(matches!(
            order.call("getEvent", None),
            Err(crate::PretixError::UnknownField { .. })
        ));

        order.set_event("conf");
        assert_eq!(order.get("event").unwrap(), "conf");
        assert_eq!(order.call("getEvent", None).unwrap(), "conf");

        let event = Event::from_value(json!({"slug": "summer"})).unwrap();
        order.set_event(event);
        assert_eq!(order.call("getEvent", None).unwrap(), json!({"slug": "summer"}));
    }

    #[test]
    fn test_invoice_address() {
        let order = order();
        let address = order.invoice_address().unwrap().unwrap();
        assert_eq!(address.get_str("name").unwrap(), Some("Ada Lovelace"));
        assert!(address.get_str("city").is_err());
    }
}
