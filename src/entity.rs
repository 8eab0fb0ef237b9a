//! The entity abstraction shared by all pretix resources.
//!
//! An entity wraps one decoded JSON object ([`Record`]) plus whatever the
//! entity materializes from it (an order's positions) or has attached
//! afterwards (an order's event). Reading goes through the schema-aware
//! [`ObjectView`]; writing back to plain JSON goes through [`ToPlain`].

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{PretixError, Result};
use crate::record::{accessor_to_field, ObjectView, Origin, Record};
use crate::schema::{self, FieldSpec};

/// Conversion to plain JSON data.
///
/// Entities serialize their fields; collections serialize their elements in
/// order; references serialize either the identifier or the instance.
pub trait ToPlain {
    fn to_plain(&self) -> Value;
}

impl ToPlain for Value {
    fn to_plain(&self) -> Value {
        self.clone()
    }
}

/// One field of an entity's shallow view.
///
/// Wire values are borrowed as-is; materialized or attached values stay
/// typed until [`FieldRef::to_plain`] is called.
#[derive(Clone, Copy)]
pub enum FieldRef<'a> {
    Value(&'a Value),
    Nested(&'a dyn ToPlain),
}

impl FieldRef<'_> {
    pub fn to_plain(&self) -> Value {
        match self {
            Self::Value(value) => (*value).clone(),
            Self::Nested(nested) => nested.to_plain(),
        }
    }

    /// The wire value, if this field was not materialized.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

impl fmt::Display for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Nested(nested) => write!(f, "{}", nested.to_plain()),
        }
    }
}

impl PartialEq<Value> for FieldRef<'_> {
    fn eq(&self, other: &Value) -> bool {
        match self {
            Self::Value(value) => *value == other,
            Self::Nested(nested) => nested.to_plain() == *other,
        }
    }
}

impl PartialEq<&Value> for FieldRef<'_> {
    fn eq(&self, other: &&Value) -> bool {
        *self == **other
    }
}

impl PartialEq<&str> for FieldRef<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_value().and_then(Value::as_str) == Some(*other)
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Nested(nested) => f.debug_tuple("Nested").field(&nested.to_plain()).finish(),
        }
    }
}

/// A typed pretix resource backed by a JSON payload.
pub trait Entity: ToPlain + Sized + Send {
    /// Entity type name, used in error messages and the schema registry.
    const TYPE: &'static str;

    /// Schema table of the entity type.
    const FIELDS: &'static [FieldSpec];

    /// Build the entity from its payload, materializing related entities.
    ///
    /// # Errors
    ///
    /// Returns an error if a related payload cannot be materialized.
    fn from_record(record: Record) -> Result<Self>;

    fn record(&self) -> &Record;

    /// Build an entity from a raw JSON object without a client.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::InvalidPayload`] if `raw` is not an object.
    fn from_value(raw: Value) -> Result<Self> {
        materialize(raw, None)
    }

    fn view(&self) -> ObjectView<'_> {
        self.record().view()
    }

    /// Value of a field, including materialized and attached ones.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::UnknownField`] if the entity has no such field.
    fn get(&self, field: &str) -> Result<FieldRef<'_>> {
        self.fields()
            .remove(field)
            .ok_or_else(|| PretixError::UnknownField {
                entity: Self::TYPE,
                field: field.to_string(),
            })
    }

    /// Like [`Entity::get`], resolving multi-lingual wire fields to one
    /// locale; see [`ObjectView::get_localized`].
    fn get_localized(&self, field: &str, locale: Option<&str>) -> Result<FieldRef<'_>> {
        match self.get(field)? {
            FieldRef::Value(_) if locale.is_some() => {
                self.view().get_localized(field, locale).map(FieldRef::Value)
            }
            resolved => Ok(resolved),
        }
    }

    /// Resolve an accessor name such as `getDateFrom` or `hasSubevents`.
    ///
    /// # Errors
    ///
    /// [`PretixError::UnknownField`] when the accessor names a field the
    /// type declares but this entity lacks, [`PretixError::UndefinedAccessor`]
    /// when it names no field at all.
    fn call(&self, accessor: &str, locale: Option<&str>) -> Result<FieldRef<'_>> {
        let undefined = || PretixError::UndefinedAccessor {
            entity: Self::TYPE,
            accessor: accessor.to_string(),
        };

        let field = accessor_to_field(accessor).ok_or_else(undefined)?;
        if self.fields().contains_key(field.as_str()) {
            return self.get_localized(&field, locale);
        }
        if schema::declares(Self::FIELDS, &field) {
            return Err(PretixError::UnknownField {
                entity: Self::TYPE,
                field,
            });
        }
        Err(undefined())
    }

    /// Shallow view of every field.
    ///
    /// Materialized and attached fields are returned as
    /// [`FieldRef::Nested`] rather than converted.
    fn fields(&self) -> BTreeMap<&str, FieldRef<'_>> {
        record_fields(self.record())
    }

    /// URL of the pretix instance this entity was fetched from.
    fn pretix_url(&self) -> Option<&str> {
        self.record().origin().map(|o| o.url.as_str())
    }

    /// Organizer slug the fetching client was scoped to.
    fn organizer_slug(&self) -> Option<&str> {
        self.record().origin().map(|o| o.organizer.as_str())
    }
}

/// Shallow view of the wire fields of a record.
pub fn record_fields(record: &Record) -> BTreeMap<&str, FieldRef<'_>> {
    record
        .data()
        .iter()
        .map(|(key, value)| (key.as_str(), FieldRef::Value(value)))
        .collect()
}

/// Plain JSON of an entity: its shallow fields, each converted recursively.
pub fn plain_fields<E: Entity>(entity: &E) -> Value {
    let map: Map<String, Value> = entity
        .fields()
        .into_iter()
        .map(|(key, field)| (key.to_string(), field.to_plain()))
        .collect();
    Value::Object(map)
}

/// Entity factory: wrap a raw payload as an entity of type `E`.
///
/// # Errors
///
/// Returns [`PretixError::InvalidPayload`] if `raw` is not a JSON object,
/// or any error raised while materializing related entities.
pub fn materialize<E: Entity>(raw: Value, origin: Option<Origin>) -> Result<E> {
    let Value::Object(data) = raw else {
        return Err(PretixError::InvalidPayload(format!(
            "{} payload must be a JSON object",
            E::TYPE
        )));
    };

    let mut record = Record::new(E::TYPE, E::FIELDS, data);
    if let Some(origin) = origin {
        record = record.with_origin(origin);
    }
    E::from_record(record)
}

/// Declare an entity that is nothing more than its payload.
macro_rules! plain_entity {
    ($(#[$meta:meta])* $name:ident, $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            record: $crate::record::Record,
        }

        impl $crate::entity::Entity for $name {
            const TYPE: &'static str = $type_name;
            const FIELDS: &'static [$crate::schema::FieldSpec] = FIELDS;

            fn from_record(record: $crate::record::Record) -> $crate::Result<Self> {
                Ok(Self { record })
            }

            fn record(&self) -> &$crate::record::Record {
                &self.record
            }
        }

        impl $crate::entity::ToPlain for $name {
            fn to_plain(&self) -> serde_json::Value {
                $crate::entity::plain_fields(self)
            }
        }
    };
}

pub(crate) use plain_entity;
