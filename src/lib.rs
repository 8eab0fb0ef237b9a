//! pretix API client library.
//!
//! A Rust library for the pretix ticketing REST API. Responses are wrapped
//! in typed entities whose fields are declared once per entity type; the
//! declaration drives typed accessors, multi-lingual string resolution,
//! nested object views and serialization back to plain JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use pretixapi::{Entity, ListOptions, PretixClient, ToPlain};
//!
//! #[tokio::main]
//! async fn main() -> pretixapi::Result<()> {
//!     // Create client from environment variables
//!     let client = PretixClient::from_env()?;
//!
//!     // Every page of events
//!     let events = client.get_events(&ListOptions::all_pages()).await?;
//!     for event in &events {
//!         let name = event.name()?.and_then(|n| n.best(Some("en")).map(str::to_string));
//!         println!("{:?}: {:?}", event.slug()?, name);
//!     }
//!
//!     // An order with its positions, narrowed to one sub-event
//!     let mut order = client.get_order("acme", "summer-fest", "ABC12").await?;
//!     if let Some(positions) = order.positions() {
//!         let day_one = positions.filter(|p| p.subevent_id().ok().flatten() == Some(3));
//!         order.set_positions(day_one);
//!     }
//!     println!("{}", order.to_plain());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Entity`] wraps one JSON object. Typed accessors are generated from
//!   each type's schema table; [`Entity::get`], [`Entity::get_localized`]
//!   and [`Entity::call`] give dynamic access by field or accessor name.
//! - [`EntityCollection`] is an ordered, filterable list of entities.
//! - [`ToPlain`] serializes entities and collections recursively.
//! - [`Ref`] stands for "an entity or its identifier" in arguments and
//!   back-references.
//! - The operation traits [`Get`], [`List`], [`Create`], [`Update`] and
//!   [`Delete`] are implemented by each entity type its endpoints support.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `PRETIX_API_TOKEN` (required) - API token
//! - `PRETIX_ORGANIZER` (required) - Organizer slug
//! - `PRETIX_URL` (optional) - Instance URL (defaults to `https://pretix.eu`)

mod client;
mod collection;
mod entity;
mod error;
mod pagination;
mod record;
mod reference;
mod schema;
mod traits;
mod transport;

pub mod models;

// CLI module (used by binary)
#[doc(hidden)]
pub mod cli;

// Output formatting (used by binary)
#[doc(hidden)]
pub mod output;

// Re-export core types
pub use client::PretixClient;
pub use collection::EntityCollection;
pub use entity::{materialize, Entity, FieldRef, ToPlain};
pub use error::{PretixError, Result};
pub use pagination::{ListOptions, Page};
pub use record::{accessor_to_field, LocalizedText, ObjectView, Origin, Record};
pub use reference::{Identifier, Identify, Ref};
pub use schema::{FieldKind, FieldSpec};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    schema_for, CheckInList, Event, Exporter, Item, Order, OrderKey, Organizer, Position,
    Question, Quota, QuotaAvailability, Settings, SubEvent, Webhook,
};
