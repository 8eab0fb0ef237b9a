//! Trait definitions for pretix operations.
//!
//! Each entity type implements the traits its endpoints support; the
//! default methods build the request from the entity's paths.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use update::Update;
