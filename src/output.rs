//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output of single
//! entities and [`Summarize`] for one table row per entity, as an
//! alternative to JSON serialization.

use tabled::Tabled;

use crate::entity::Entity;
use crate::record::LocalizedText;
use crate::{
    CheckInList, Event, Exporter, Item, Order, Organizer, Position, Question, Quota, Settings,
    SubEvent, Webhook,
};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    ///
    /// Multi-lingual values are shown in `locale` when available.
    fn pretty_print(&self, locale: Option<&str>) -> String;
}

/// One table row.
#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct EntityRow {
    pub id: String,
    pub name: String,
    pub details: String,
}

/// Condense an entity into a table row.
pub trait Summarize {
    fn summarize(&self, locale: Option<&str>) -> EntityRow;
}

fn text(value: crate::Result<Option<LocalizedText<'_>>>, locale: Option<&str>) -> String {
    value
        .ok()
        .flatten()
        .and_then(|t| t.best(locale).map(str::to_string))
        .unwrap_or_default()
}

fn string(value: crate::Result<Option<&str>>) -> String {
    value.ok().flatten().unwrap_or_default().to_string()
}

fn number(value: crate::Result<Option<i64>>) -> String {
    value
        .ok()
        .flatten()
        .map(|n| n.to_string())
        .unwrap_or_default()
}

fn flag(value: crate::Result<Option<bool>>) -> &'static str {
    match value.ok().flatten() {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

fn raw_string<E: Entity>(entity: &E, field: &str) -> String {
    string(entity.view().get_str(field))
}

impl PrettyPrint for Event {
    fn pretty_print(&self, locale: Option<&str>) -> String {
        let slug = string(self.slug());
        let divider = "─".repeat(slug.len().max(30));

        let mut lines = vec![
            format!("Event: {}", slug),
            divider,
            format!("Name:           {}", text(self.name(), locale)),
            format!("Live:           {}", flag(self.live())),
            format!("Public:         {}", flag(self.is_public())),
        ];

        if let Ok(Some(from)) = self.view().get_datetime("date_from") {
            lines.push(format!("Starts:         {}", from.format("%Y-%m-%d %H:%M %:z")));
        }

        if let Ok(Some(to)) = self.view().get_datetime("date_to") {
            lines.push(format!("Ends:           {}", to.format("%Y-%m-%d %H:%M %:z")));
        }

        let location = text(self.location(), locale);
        if !location.is_empty() {
            lines.push(format!("Location:       {}", location));
        }

        if let Ok(Some(currency)) = self.currency() {
            lines.push(format!("Currency:       {}", currency));
        }

        if self.has_subevents().ok().flatten() == Some(true) {
            lines.push("Series:         yes".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Organizer {
    fn pretty_print(&self, _locale: Option<&str>) -> String {
        let slug = string(self.slug());
        let divider = "─".repeat(slug.len().max(30));

        [
            format!("Organizer: {}", slug),
            divider,
            format!("Name:           {}", string(self.name())),
        ]
        .join("\n")
    }
}

impl PrettyPrint for Order {
    fn pretty_print(&self, _locale: Option<&str>) -> String {
        let header = format!("Order {}", string(self.code()));
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Status:         {}", string(self.status())),
            format!("Total:          {}", string(self.total())),
            format!("Email:          {}", string(self.email())),
        ];

        if let Ok(Some(created)) = self.view().get_datetime("datetime") {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S %:z")));
        }

        if let Some(positions) = self.positions() {
            lines.push(format!("Positions:      {}", positions.len()));
        }

        // Customer from the invoice address
        if let Ok(Some(address)) = self.invoice_address() {
            if let Ok(Some(name)) = address.get_str("name") {
                lines.push(format!("Customer:       {}", name));
            }
        }

        if let Ok(Some(url)) = self.control_url() {
            lines.push(format!("Backend:        {}", url));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Webhook {
    fn pretty_print(&self, _locale: Option<&str>) -> String {
        let header = format!("Webhook #{}", number(self.id()));
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Target:         {}", string(self.target_url())),
            format!("Enabled:        {}", flag(self.enabled())),
        ];

        if self.all_events().ok().flatten() == Some(true) {
            lines.push("Events:         all".to_string());
        } else if let Ok(Some(events)) = self.limit_events() {
            lines.push(format!("Events:         {}", events.join(", ")));
        }

        if let Ok(Some(actions)) = self.action_types() {
            lines.push(format!("Actions:        {}", actions.join(", ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Settings {
    fn pretty_print(&self, _locale: Option<&str>) -> String {
        let mut lines = vec!["Settings".to_string(), "─".repeat(30)];
        for (key, value) in self.record().data() {
            lines.push(format!("{:<32}{}", key, value));
        }
        lines.join("\n")
    }
}

impl Summarize for Organizer {
    fn summarize(&self, _locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: string(self.slug()),
            name: string(self.name()),
            details: String::new(),
        }
    }
}

impl Summarize for Event {
    fn summarize(&self, locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: string(self.slug()),
            name: text(self.name(), locale),
            details: format!("starts {}, live: {}", string(self.date_from()), flag(self.live())),
        }
    }
}

impl Summarize for SubEvent {
    fn summarize(&self, locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: number(self.id()),
            name: text(self.name(), locale),
            details: format!("starts {}", string(self.date_from())),
        }
    }
}

impl Summarize for Item {
    fn summarize(&self, locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: number(self.id()),
            name: text(self.name(), locale),
            details: format!("price {}, active: {}", string(self.default_price()), flag(self.active())),
        }
    }
}

impl Summarize for Quota {
    fn summarize(&self, _locale: Option<&str>) -> EntityRow {
        let size = number(self.size());
        EntityRow {
            id: number(self.id()),
            name: string(self.name()),
            details: if size.is_empty() {
                "unlimited".to_string()
            } else {
                format!("size {size}")
            },
        }
    }
}

impl Summarize for Order {
    fn summarize(&self, _locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: string(self.code()),
            name: string(self.email()),
            details: format!("status {}, total {}", string(self.status()), string(self.total())),
        }
    }
}

impl Summarize for Position {
    fn summarize(&self, _locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: number(self.id()),
            name: string(self.attendee_name()),
            details: format!("order {}, price {}", string(self.order()), string(self.price())),
        }
    }
}

impl Summarize for Webhook {
    fn summarize(&self, _locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: number(self.id()),
            name: string(self.target_url()),
            details: format!("enabled: {}", flag(self.enabled())),
        }
    }
}

impl Summarize for Question {
    fn summarize(&self, locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: number(self.id()),
            name: text(self.question(), locale),
            details: format!("type {}, required: {}", string(self.question_type()), flag(self.required())),
        }
    }
}

impl Summarize for CheckInList {
    fn summarize(&self, _locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: number(self.view().get_i64("id")),
            name: raw_string(self, "name"),
            details: String::new(),
        }
    }
}

impl Summarize for Exporter {
    fn summarize(&self, _locale: Option<&str>) -> EntityRow {
        EntityRow {
            id: string(self.identifier()),
            name: string(self.name()),
            details: String::new(),
        }
    }
}
