//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the pretixapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// pretix API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "pretixapi", about = "pretix API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    /// Organizer slug (overrides PRETIX_ORGANIZER).
    #[arg(long, global = true)]
    pub organizer: Option<String>,

    /// Locale used to display multi-lingual names.
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by slug, id or code.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Slug (organizers, events), order code, or numeric id (webhooks).
        id: String,

        /// Event slug (required for orders and settings).
        #[arg(long)]
        event: Option<String>,
    },

    /// List entities of the organizer or of an event.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Event slug (required for everything below an event).
        #[arg(long)]
        event: Option<String>,

        /// Follow pagination links on endpoints that support it.
        #[arg(long, default_value = "false")]
        all: bool,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An organizer.
    #[value(alias = "organizers")]
    Organizer,
    /// An event.
    #[value(alias = "events")]
    Event,
    /// A date of an event series.
    #[value(alias = "sub-events", alias = "subevents")]
    SubEvent,
    /// A product.
    #[value(alias = "items")]
    Item,
    /// A quota.
    #[value(alias = "quotas")]
    Quota,
    /// An order.
    #[value(alias = "orders")]
    Order,
    /// An order position.
    #[value(alias = "positions")]
    Position,
    /// An organizer webhook.
    #[value(alias = "webhooks")]
    Webhook,
    /// A user-defined question.
    #[value(alias = "questions")]
    Question,
    /// A check-in list.
    #[value(alias = "check-in-lists", alias = "checkinlists")]
    CheckInList,
    /// A data exporter.
    #[value(alias = "exporters")]
    Exporter,
    /// Event settings.
    Settings,
}

impl Entity {
    /// Whether the entity lives below an event.
    pub fn needs_event(self) -> bool {
        !matches!(self, Self::Organizer | Self::Event | Self::Webhook)
    }
}
