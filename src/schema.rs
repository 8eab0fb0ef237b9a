//! Field schema tables for pretix entities.
//!
//! Every entity type declares its fields once, through [`entity_fields!`],
//! which produces both the schema table (`FIELDS`) and one typed accessor
//! per field. The table drives locale resolution, nested object views and
//! the distinction between unknown fields and undefined accessors.

/// Semantic type of a field as documented by the pretix API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Integer,
    Float,
    /// Decimal number encoded as a string (e.g. tax rates).
    Decimal,
    /// Monetary amount encoded as a string (e.g. `"23.00"`).
    Money,
    DateTime,
    Date,
    /// Mapping from locale code to string.
    MultiLingual,
    /// Free-form object.
    Object,
    ObjectOfStrings,
    ListOfStrings,
    ListOfIntegers,
    /// Object with a known nested schema.
    NestedObject(&'static [FieldSpec]),
    /// List of objects sharing a nested schema.
    ObjectList(&'static [FieldSpec]),
}

/// One `(name, kind)` entry of a schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Table of an object without documented fields.
pub const NO_FIELDS: &[FieldSpec] = &[];

/// Look up the declared kind of a field.
///
/// Fields missing from the table are treated as plain strings.
pub fn kind_of(fields: &[FieldSpec], name: &str) -> FieldKind {
    fields
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.kind)
        .unwrap_or(FieldKind::String)
}

/// Returns true if the table declares the field.
pub fn declares(fields: &[FieldSpec], name: &str) -> bool {
    fields.iter().any(|spec| spec.name == name)
}

#[doc(hidden)]
macro_rules! wire_name {
    ($name:ident) => {
        stringify!($name)
    };
    ($name:ident, $wire:literal) => {
        $wire
    };
}

#[doc(hidden)]
macro_rules! field_kind {
    (NestedObject($fields:path)) => {
        $crate::schema::FieldKind::NestedObject($fields)
    };
    (ObjectList($fields:path)) => {
        $crate::schema::FieldKind::ObjectList($fields)
    };
    (Related($fields:path)) => {
        $crate::schema::FieldKind::ObjectList($fields)
    };
    (Derived($kind:ident)) => {
        $crate::schema::FieldKind::$kind
    };
    ($kind:ident) => {
        $crate::schema::FieldKind::$kind
    };
}

/// Build a schema table for a nested object.
///
/// ```ignore
/// const SEAT_FIELDS: &[FieldSpec] = field_table! {
///     id: Integer,
///     name: String,
/// };
/// ```
macro_rules! field_table {
    ($( $name:ident $(= $wire:literal)? : $kind:ident $(($arg:tt))? ),* $(,)?) => {
        &[$(
            $crate::schema::FieldSpec::new(
                $crate::schema::wire_name!($name $(, $wire)?),
                $crate::schema::field_kind!($kind $(($arg))?),
            )
        ),*]
    };
}

#[doc(hidden)]
macro_rules! field_accessor {
    ($(#[$meta:meta])* $name:ident, $wire:expr, Boolean) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<bool>> {
            $crate::entity::Entity::view(self).get_bool($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, Integer) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<i64>> {
            $crate::entity::Entity::view(self).get_i64($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, Float) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<f64>> {
            $crate::entity::Entity::view(self).get_f64($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, MultiLingual) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<$crate::record::LocalizedText<'_>>> {
            $crate::entity::Entity::view(self).get_text($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, Object) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<&serde_json::Map<String, serde_json::Value>>> {
            $crate::entity::Entity::view(self).get_object($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, ObjectOfStrings) => {
        $crate::schema::field_accessor!($(#[$meta])* $name, $wire, Object);
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, ListOfStrings) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<Vec<&str>>> {
            $crate::entity::Entity::view(self).get_strings($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, ListOfIntegers) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<Vec<i64>>> {
            $crate::entity::Entity::view(self).get_integers($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, NestedObject($fields:path)) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<$crate::record::ObjectView<'_>>> {
            $crate::entity::Entity::view(self).get_nested($wire)
        }
    };
    ($(#[$meta:meta])* $name:ident, $wire:expr, ObjectList($fields:path)) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<Vec<$crate::record::ObjectView<'_>>>> {
            $crate::entity::Entity::view(self).get_nested_list($wire)
        }
    };
    // Materialized by the entity itself.
    ($(#[$meta:meta])* $name:ident, $wire:expr, Related($fields:path)) => {};
    // Hand-written accessor.
    ($(#[$meta:meta])* $name:ident, $wire:expr, Derived($kind:ident)) => {};
    // String, Decimal, Money, DateTime and Date are exposed as wire strings.
    ($(#[$meta:meta])* $name:ident, $wire:expr, $kind:ident) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::Result<Option<&str>> {
            $crate::entity::Entity::view(self).get_str($wire)
        }
    };
}

/// Declare the schema table and typed accessors of an entity type.
///
/// Emits a module-level `FIELDS` table and an `impl` block with one method
/// per field. A field whose wire name is not a valid method name takes an
/// explicit wire name: `question_type = "type": String`.
///
/// `Related(TABLE)` fields are materialized into other entities and
/// `Derived(Kind)` fields can be replaced after construction; neither gets a
/// generated accessor.
macro_rules! entity_fields {
    (
        $ty:ident {
            $( $(#[$meta:meta])* $name:ident $(= $wire:literal)? : $kind:ident $(($arg:tt))? ),* $(,)?
        }
    ) => {
        /// Schema table of this entity type.
        pub const FIELDS: &[$crate::schema::FieldSpec] = $crate::schema::field_table! {
            $( $name $(= $wire)? : $kind $(($arg))? ),*
        };

        impl $ty {
            $(
                $crate::schema::field_accessor!(
                    $(#[$meta])* $name,
                    $crate::schema::wire_name!($name $(, $wire)?),
                    $kind $(($arg))?
                );
            )*
        }
    };
}

pub(crate) use entity_fields;
pub(crate) use field_accessor;
pub(crate) use field_kind;
pub(crate) use field_table;
pub(crate) use wire_name;

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &[FieldSpec] = field_table! {
        id: Integer,
        label = "type": String,
    };

    const TABLE: &[FieldSpec] = field_table! {
        name: MultiLingual,
        items: ListOfIntegers,
        options: ObjectList(NESTED),
        subevent: Derived(Integer),
    };

    #[test]
    fn test_field_table_uses_wire_names() {
        assert_eq!(NESTED[0], FieldSpec::new("id", FieldKind::Integer));
        assert_eq!(NESTED[1], FieldSpec::new("type", FieldKind::String));
    }

    #[test]
    fn test_kind_of_defaults_to_string() {
        assert_eq!(kind_of(TABLE, "name"), FieldKind::MultiLingual);
        assert_eq!(kind_of(TABLE, "options"), FieldKind::ObjectList(NESTED));
        assert_eq!(kind_of(TABLE, "subevent"), FieldKind::Integer);
        assert_eq!(kind_of(TABLE, "missing"), FieldKind::String);
        assert_eq!(kind_of(&[], "anything"), FieldKind::String);
    }

    #[test]
    fn test_declares() {
        assert!(declares(TABLE, "items"));
        assert!(!declares(TABLE, "id"));
    }
}
