//! CLI output formatting tests.
//!
//! JSON output is the entities' plain serialization; the default is a
//! key-value pretty print for single entities and a table for lists.

use pretixapi::output::{PrettyPrint, Summarize};
use pretixapi::{Entity, EntityCollection, Event, Order, ToPlain, Webhook};
use serde_json::json;

fn make_test_event() -> Event {
    Event::from_value(json!({
        "name": {"en": "Summer Fest", "de": "Sommerfest"},
        "slug": "summer-fest",
        "live": true,
        "is_public": true,
        "currency": "EUR",
        "date_from": "2021-07-01T18:00:00+02:00",
        "date_to": null,
        "location": {"en": "Aarhus"},
        "has_subevents": false,
    }))
    .unwrap()
}

fn make_test_order() -> Order {
    Order::from_value(json!({
        "code": "ABC12",
        "status": "p",
        "email": "ada@example.com",
        "total": "46.00",
        "datetime": "2021-05-01T12:00:00+00:00",
        "invoice_address": {"name": "Ada Lovelace"},
        "positions": [{"id": 1, "price": "23.00"}, {"id": 2, "price": "23.00"}],
    }))
    .unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_is_the_payload() {
    let event = make_test_event();
    let json_output = serde_json::to_string_pretty(&event.to_plain()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed["slug"], "summer-fest");
    assert_eq!(parsed["name"]["de"], "Sommerfest");
    assert!(parsed["date_to"].is_null());
}

#[test]
fn test_json_output_for_list_is_array() {
    let events: EntityCollection<Event> = vec![make_test_event(), make_test_event()].into();
    let parsed = events.to_plain();

    assert!(parsed.is_array());
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_output_includes_nested_positions() {
    let parsed = make_test_order().to_plain();
    assert_eq!(parsed["positions"][1]["id"], 2);
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_event_pretty_print() {
    let output = make_test_event().pretty_print(Some("de"));

    assert!(output.starts_with("Event: summer-fest"));
    assert!(output.contains("Name:           Sommerfest"));
    assert!(output.contains("Live:           yes"));
    assert!(output.contains("Location:       Aarhus"));
    assert!(output.contains("Currency:       EUR"));
    assert!(!output.contains("Ends:"));
}

#[test]
fn test_order_pretty_print() {
    let output = make_test_order().pretty_print(None);

    assert!(output.starts_with("Order ABC12"));
    assert!(output.contains("Status:         p"));
    assert!(output.contains("Positions:      2"));
    assert!(output.contains("Customer:       Ada Lovelace"));
    // No origin, so no backend link.
    assert!(!output.contains("Backend:"));
}

#[test]
fn test_webhook_pretty_print() {
    let webhook = Webhook::from_value(json!({
        "id": 4,
        "enabled": true,
        "target_url": "https://example.com/hook",
        "all_events": false,
        "limit_events": ["summer-fest", "winter-fest"],
        "action_types": ["pretix.event.order.placed"],
    }))
    .unwrap();

    let output = webhook.pretty_print(None);
    assert!(output.starts_with("Webhook #4"));
    assert!(output.contains("Events:         summer-fest, winter-fest"));
    assert!(output.contains("Actions:        pretix.event.order.placed"));
}

#[test]
fn test_summary_rows() {
    let row = make_test_order().summarize(None);
    assert_eq!(row.id, "ABC12");
    assert_eq!(row.name, "ada@example.com");
    assert_eq!(row.details, "status p, total 46.00");

    let row = make_test_event().summarize(Some("de"));
    assert_eq!(row.name, "Sommerfest");
}
