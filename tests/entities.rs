//! Entity behavior through the public API: field access, multi-lingual
//! resolution, collections and plain serialization.

use pretixapi::{
    schema_for, Entity, EntityCollection, Event, FieldKind, Order, Position, PretixError, Quota,
    QuotaAvailability, Ref, SubEvent, ToPlain,
};
use serde_json::{json, Value};

fn event() -> Event {
    Event::from_value(json!({
        "name": {"en": "Summer Fest", "da": "Sommerfest"},
        "slug": "summer-fest",
        "is_public": true,
        "has_subevents": true,
        "location": null,
    }))
    .unwrap()
}

#[test]
fn test_localized_read_resolves_one_locale() {
    let event = event();

    assert_eq!(event.get_localized("name", Some("da")).unwrap(), "Sommerfest");
    assert_eq!(
        event.get_localized("name", None).unwrap(),
        &json!({"en": "Summer Fest", "da": "Sommerfest"})
    );
    assert!(matches!(
        event.get_localized("name", Some("fr")),
        Err(PretixError::InvalidLocale { .. })
    ));

    // Locale is ignored for fields that are not multi-lingual.
    assert_eq!(event.get_localized("slug", Some("fr")).unwrap(), "summer-fest");
}

#[test]
fn test_accessor_names_dispatch_to_fields() {
    let event = event();

    assert_eq!(event.call("getName", Some("en")).unwrap(), "Summer Fest");
    assert_eq!(event.call("isPublic", None).unwrap(), &Value::Bool(true));
    assert_eq!(event.call("hasSubevents", None).unwrap(), &Value::Bool(true));
    assert_eq!(event.call("getLocation", None).unwrap(), &Value::Null);

    let err = event.call("getSomethingElse", None).unwrap_err();
    assert_eq!(err.to_string(), "Call to undefined method Event::getSomethingElse()");
    assert!(matches!(
        event.call("frobnicate", None),
        Err(PretixError::UndefinedAccessor { .. })
    ));
}

#[test]
fn test_missing_field_is_an_error() {
    let event = event();
    assert!(matches!(
        event.get("currency"),
        Err(PretixError::UnknownField { .. })
    ));
    assert!(matches!(
        event.currency(),
        Err(PretixError::UnknownField { .. })
    ));
}

#[test]
fn test_unknown_fields_survive_round_trip() {
    let raw = json!({
        "slug": "summer-fest",
        "sales_channels": ["web"],
        "seat_category_mapping": {},
        "name": {"en": "Summer Fest"},
    });
    let event = Event::from_value(raw.clone()).unwrap();
    assert_eq!(event.to_plain(), raw);
}

#[test]
fn test_order_positions_filter_and_serialize() {
    let raw = json!({
        "code": "ABC12",
        "positions": [
            {"id": 1, "subevent": 1, "price": "10.00"},
            {"id": 2, "subevent": 2, "price": "10.00"},
            {"id": 3, "subevent": 1, "price": "12.00"},
        ],
    });
    let mut order = Order::from_value(raw.clone()).unwrap();
    assert_eq!(order.to_plain(), raw);

    let positions = order.positions().unwrap();
    let day_one = positions.filter(|p| p.subevent_id().ok().flatten() == Some(1));
    assert_eq!(day_one.len(), 2);
    order.set_positions(day_one);

    let plain = order.to_plain();
    let ids: Vec<i64> = plain["positions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_attached_values_serialize_recursively() {
    let mut position = Position::from_value(json!({"id": 5, "subevent": 2})).unwrap();
    let sub_event = SubEvent::from_value(json!({"id": 2, "name": {"en": "Day 2"}})).unwrap();
    position.set_subevent(sub_event).unwrap();

    let quota = Quota::from_value(json!({"id": 7, "size": 10})).unwrap();
    position.set_quotas(vec![quota]);

    let plain = position.to_plain();
    assert_eq!(plain["subevent"], json!({"id": 2, "name": {"en": "Day 2"}}));
    assert_eq!(plain["quotas"], json!([{"id": 7, "size": 10}]));
    assert_eq!(position.subevent_id().unwrap(), Some(2));

    let err = position.set_subevent("day-two").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid argument: Sub-event must be an integer or an instance of SubEvent"
    );
}

#[test]
fn test_dynamic_access_sees_materialized_and_attached_fields() {
    let raw_positions = json!([{"id": 1, "subevent": 1}, {"id": 2, "subevent": 2}]);
    let mut order = Order::from_value(json!({"code": "ABC12", "positions": raw_positions})).unwrap();

    assert_eq!(order.get("positions").unwrap(), raw_positions);
    assert_eq!(order.call("getPositions", None).unwrap(), raw_positions);

    order.set_event("summer-fest");
    assert_eq!(order.call("getEvent", None).unwrap(), "summer-fest");

    let mut position = Position::from_value(json!({"id": 5, "subevent": 4})).unwrap();
    position.set_subevent(5_i64).unwrap();
    assert_eq!(position.get("subevent").unwrap(), json!(5));
    assert_eq!(position.get("subevent").unwrap(), position.to_plain()["subevent"]);
}

#[test]
fn test_quota_availability_only_when_attached() {
    let mut quota = Quota::from_value(json!({"id": 7, "size": 10})).unwrap();
    assert!(quota.to_plain().get("availability").is_none());

    let availability =
        QuotaAvailability::from_value(json!({"available": false, "available_number": 0})).unwrap();
    quota.set_availability(availability);
    assert_eq!(quota.to_plain()["availability"]["available"], false);
}

#[test]
fn test_reference_serializes_identifier_or_instance() {
    let by_slug: Ref<Event> = "summer-fest".into();
    assert_eq!(by_slug.to_plain(), json!("summer-fest"));

    let by_instance: Ref<Event> = event().into();
    assert_eq!(by_instance.to_plain()["slug"], "summer-fest");
    assert_eq!(by_instance.slug().unwrap(), "summer-fest");
}

#[test]
fn test_collection_serializes_in_order() {
    let events: EntityCollection<Event> = ["a", "b", "c"]
        .iter()
        .map(|slug| Event::from_value(json!({"slug": slug})).unwrap())
        .collect();

    assert_eq!(
        events.to_plain(),
        json!([{"slug": "a"}, {"slug": "b"}, {"slug": "c"}])
    );
    assert_eq!(events.iter().count(), events.iter().count());
}

#[test]
fn test_schema_registry() {
    let fields = schema_for("Event");
    let name = fields.iter().find(|f| f.name == "name").unwrap();
    assert_eq!(name.kind, FieldKind::MultiLingual);
    assert!(schema_for("Nonexistent").is_empty());
}
