//! Backing data of an entity and schema-aware field resolution.
//!
//! A [`Record`] owns one JSON object exactly as the API delivered it. All
//! reads go through an [`ObjectView`], which pairs a borrowed object with its
//! schema table so that nested objects (order fees, item variations, ...)
//! resolve fields the same way as top-level entities.

use chrono::{DateTime, FixedOffset, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{PretixError, Result};
use crate::schema::{self, FieldKind, FieldSpec};

static GETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^get(?P<key>.+)$").unwrap());
static PREDICATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(is|has).+$").unwrap());
static LOWER_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());
static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^_])([A-Z][a-z])").unwrap());
static UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z])").unwrap());

/// Translate an accessor name into the snake_case field it reads.
///
/// `getDateFrom` reads `date_from`; `is`/`has` accessors keep their prefix,
/// so `hasSubevents` reads `has_subevents` and `isPublic` reads `is_public`.
/// Returns `None` for names that follow neither form.
pub fn accessor_to_field(accessor: &str) -> Option<String> {
    if let Some(caps) = GETTER.captures(accessor) {
        let key = &caps["key"];
        let key = LOWER_UPPER.replace_all(key, "${1}_${2}");
        let key = WORD_START.replace_all(&key, "${1}_${2}");
        return Some(key.to_lowercase());
    }

    if PREDICATE.is_match(accessor) {
        let key = UPPER.replace_all(accessor, |caps: &Captures| {
            format!("_{}", caps[1].to_lowercase())
        });
        return Some(key.into_owned());
    }

    None
}

/// Where an entity was fetched from.
///
/// Kept beside the payload so that serializing the entity returns exactly
/// what the API sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// pretix instance URL without trailing slash.
    pub url: String,
    /// Organizer slug the client was scoped to.
    pub organizer: String,
}

/// The wire data of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entity: &'static str,
    fields: &'static [FieldSpec],
    data: Map<String, Value>,
    origin: Option<Origin>,
}

impl Record {
    /// Wrap a decoded JSON object.
    pub fn new(entity: &'static str, fields: &'static [FieldSpec], data: Map<String, Value>) -> Self {
        Self {
            entity,
            fields,
            data,
            origin: None,
        }
    }

    /// Attach the instance this record was fetched from.
    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Entity type name.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Schema table of the entity type.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// The raw payload.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// Schema-aware read view over the payload.
    pub fn view(&self) -> ObjectView<'_> {
        ObjectView::new(self.entity, self.fields, &self.data)
    }

    /// Remove a field from the payload so the entity can hold it in
    /// materialized form.
    pub(crate) fn take(&mut self, field: &str) -> Option<Value> {
        self.data.remove(field)
    }

    pub(crate) fn put(&mut self, field: &str, value: Value) {
        self.data.insert(field.to_string(), value);
    }
}

/// Read access to one JSON object through a schema table.
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'a> {
    entity: &'static str,
    fields: &'static [FieldSpec],
    data: &'a Map<String, Value>,
}

impl<'a> ObjectView<'a> {
    pub fn new(entity: &'static str, fields: &'static [FieldSpec], data: &'a Map<String, Value>) -> Self {
        Self {
            entity,
            fields,
            data,
        }
    }

    /// The viewed object.
    pub fn data(&self) -> &'a Map<String, Value> {
        self.data
    }

    /// Declared kind of a field (plain string when undeclared).
    pub fn kind_of(&self, field: &str) -> FieldKind {
        schema::kind_of(self.fields, field)
    }

    /// Returns true if the payload contains the field (even when null).
    pub fn has(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    /// Raw value of a field.
    ///
    /// Multi-lingual fields come back as their full locale map.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::UnknownField`] if the payload lacks the field.
    pub fn get(&self, field: &str) -> Result<&'a Value> {
        self.data.get(field).ok_or_else(|| PretixError::UnknownField {
            entity: self.entity,
            field: field.to_string(),
        })
    }

    /// Raw value of a field, resolved to a single locale when one is given
    /// and the field is multi-lingual.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::InvalidLocale`] if the locale map has no
    /// value for `locale`.
    pub fn get_localized(&self, field: &str, locale: Option<&str>) -> Result<&'a Value> {
        let value = self.get(field)?;
        match (self.kind_of(field), locale) {
            (FieldKind::MultiLingual, Some(locale)) => value
                .get(locale)
                .filter(|v| !v.is_null())
                .ok_or_else(|| PretixError::InvalidLocale {
                    field: field.to_string(),
                    locale: locale.to_string(),
                }),
            _ => Ok(value),
        }
    }

    /// Resolve an accessor name (`getName`, `isPublic`, `hasSubevents`).
    ///
    /// # Errors
    ///
    /// [`PretixError::UnknownField`] when the accessor names a declared field
    /// missing from this payload, [`PretixError::UndefinedAccessor`] when it
    /// names no field at all.
    pub fn call(&self, accessor: &str, locale: Option<&str>) -> Result<&'a Value> {
        let undefined = || PretixError::UndefinedAccessor {
            entity: self.entity,
            accessor: accessor.to_string(),
        };

        let field = accessor_to_field(accessor).ok_or_else(undefined)?;
        if self.has(&field) {
            return self.get_localized(&field, locale);
        }
        if schema::declares(self.fields, &field) {
            return Err(PretixError::UnknownField {
                entity: self.entity,
                field,
            });
        }
        Err(undefined())
    }

    pub fn get_str(&self, field: &str) -> Result<Option<&'a str>> {
        self.typed(field, "a string", Value::as_str)
    }

    pub fn get_bool(&self, field: &str) -> Result<Option<bool>> {
        self.typed(field, "a boolean", Value::as_bool)
    }

    pub fn get_i64(&self, field: &str) -> Result<Option<i64>> {
        self.typed(field, "an integer", Value::as_i64)
    }

    pub fn get_f64(&self, field: &str) -> Result<Option<f64>> {
        self.typed(field, "a number", Value::as_f64)
    }

    pub fn get_object(&self, field: &str) -> Result<Option<&'a Map<String, Value>>> {
        self.typed(field, "an object", Value::as_object)
    }

    pub fn get_strings(&self, field: &str) -> Result<Option<Vec<&'a str>>> {
        self.typed(field, "a list of strings", |value| {
            value.as_array()?.iter().map(Value::as_str).collect()
        })
    }

    pub fn get_integers(&self, field: &str) -> Result<Option<Vec<i64>>> {
        self.typed(field, "a list of integers", |value| {
            value.as_array()?.iter().map(Value::as_i64).collect()
        })
    }

    /// Multi-lingual field as a locale map.
    pub fn get_text(&self, field: &str) -> Result<Option<LocalizedText<'a>>> {
        self.typed(field, "a multi-lingual string", |value| {
            value.as_object().map(|map| LocalizedText::new(field, map))
        })
    }

    /// Object field viewed through its nested schema.
    pub fn get_nested(&self, field: &str) -> Result<Option<ObjectView<'a>>> {
        let fields = self.nested_fields(field);
        self.typed(field, "an object", |value| {
            value
                .as_object()
                .map(|map| ObjectView::new(self.entity, fields, map))
        })
    }

    /// List-of-objects field, each element viewed through the nested schema.
    pub fn get_nested_list(&self, field: &str) -> Result<Option<Vec<ObjectView<'a>>>> {
        let fields = self.nested_fields(field);
        self.typed(field, "a list of objects", |value| {
            value
                .as_array()?
                .iter()
                .map(|item| {
                    item.as_object()
                        .map(|map| ObjectView::new(self.entity, fields, map))
                })
                .collect()
        })
    }

    /// Datetime field parsed as RFC 3339.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<FixedOffset>>> {
        match self.get_str(field)? {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(Some)
                .map_err(|_| self.unexpected(field, "an RFC 3339 datetime")),
            None => Ok(None),
        }
    }

    /// Date field parsed as `YYYY-MM-DD`.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>> {
        match self.get_str(field)? {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| self.unexpected(field, "a date")),
            None => Ok(None),
        }
    }

    /// Deserialize a field into any serde type.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Result<T> {
        let value = self.get(field)?;
        Ok(serde_json::from_value(value.clone())?)
    }

    fn nested_fields(&self, field: &str) -> &'static [FieldSpec] {
        match self.kind_of(field) {
            FieldKind::NestedObject(fields) | FieldKind::ObjectList(fields) => fields,
            _ => &[],
        }
    }

    fn typed<T>(
        &self,
        field: &str,
        expected: &'static str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        let value = self.get(field)?;
        if value.is_null() {
            return Ok(None);
        }
        convert(value)
            .map(Some)
            .ok_or_else(|| self.unexpected(field, expected))
    }

    fn unexpected(&self, field: &str, expected: &'static str) -> PretixError {
        PretixError::UnexpectedType {
            entity: self.entity,
            field: field.to_string(),
            expected,
        }
    }
}

/// A multi-lingual string: locale code to text.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedText<'a> {
    field: String,
    map: &'a Map<String, Value>,
}

impl<'a> LocalizedText<'a> {
    fn new(field: &str, map: &'a Map<String, Value>) -> Self {
        Self {
            field: field.to_string(),
            map,
        }
    }

    /// The full locale map.
    pub fn as_map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// Text for one locale.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::InvalidLocale`] if the locale has no text.
    pub fn get(&self, locale: &str) -> Result<&'a str> {
        self.map
            .get(locale)
            .and_then(Value::as_str)
            .ok_or_else(|| PretixError::InvalidLocale {
                field: self.field.clone(),
                locale: locale.to_string(),
            })
    }

    /// Locales that carry text.
    pub fn locales(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.map
            .iter()
            .filter(|(_, v)| v.is_string())
            .map(|(k, _)| k.as_str())
    }

    /// Text for `locale` when present, otherwise the first available text.
    pub fn best(&self, locale: Option<&str>) -> Option<&'a str> {
        locale
            .and_then(|l| self.get(l).ok())
            .or_else(|| self.map.values().find_map(Value::as_str))
    }
}
