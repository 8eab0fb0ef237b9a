//! Entity-or-identifier arguments and back-references.

use std::fmt;

use serde_json::Value;

use crate::entity::ToPlain;
use crate::error::{PretixError, Result};

/// How the API addresses a resource: by numeric id or by slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Id(i64),
    Slug(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

/// Entities that can be addressed by an [`Identifier`].
///
/// Events and organizers are addressed by slug, everything else by id.
pub trait Identify {
    /// # Errors
    ///
    /// Returns an error if the payload lacks its identifying field.
    fn identifier(&self) -> Result<Identifier>;
}

impl<T: Identify + ?Sized> Identify for &T {
    fn identifier(&self) -> Result<Identifier> {
        (**self).identifier()
    }
}

/// Either an identifier or an entity instance.
///
/// Used for "event or event slug" style arguments and for non-owning
/// back-references such as an order's event.
///
/// ```
/// use pretixapi::{Event, Ref};
///
/// let by_slug: Ref<&Event> = "summer-fest".into();
/// assert_eq!(by_slug.slug().unwrap(), "summer-fest");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Ref<T> {
    Identifier(Identifier),
    Instance(T),
}

impl<T> Ref<T> {
    pub fn instance(&self) -> Option<&T> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Identifier(_) => None,
        }
    }

    pub fn as_ref(&self) -> Ref<&T> {
        match self {
            Self::Identifier(identifier) => Ref::Identifier(identifier.clone()),
            Self::Instance(instance) => Ref::Instance(instance),
        }
    }
}

impl<T: Identify> Ref<T> {
    /// Identifier of the referenced resource.
    ///
    /// # Errors
    ///
    /// Returns an error if an instance lacks its identifying field.
    pub fn identifier(&self) -> Result<Identifier> {
        match self {
            Self::Identifier(identifier) => Ok(identifier.clone()),
            Self::Instance(instance) => instance.identifier(),
        }
    }

    /// Resolve to a slug.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::InvalidArgument`] if the reference is numeric.
    pub fn slug(&self) -> Result<String> {
        match self.identifier()? {
            Identifier::Slug(slug) => Ok(slug),
            Identifier::Id(id) => Err(PretixError::InvalidArgument(format!(
                "string expected, got {id}"
            ))),
        }
    }

    /// Resolve to a numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`PretixError::InvalidArgument`] if the reference is a slug.
    pub fn id(&self) -> Result<i64> {
        match self.identifier()? {
            Identifier::Id(id) => Ok(id),
            Identifier::Slug(slug) => Err(PretixError::InvalidArgument(format!(
                "integer expected, got '{slug}'"
            ))),
        }
    }
}

impl<T> From<&str> for Ref<T> {
    fn from(slug: &str) -> Self {
        Self::Identifier(Identifier::Slug(slug.to_string()))
    }
}

impl<T> From<String> for Ref<T> {
    fn from(slug: String) -> Self {
        Self::Identifier(Identifier::Slug(slug))
    }
}

impl<T> From<&String> for Ref<T> {
    fn from(slug: &String) -> Self {
        Self::Identifier(Identifier::Slug(slug.clone()))
    }
}

impl<T> From<i64> for Ref<T> {
    fn from(id: i64) -> Self {
        Self::Identifier(Identifier::Id(id))
    }
}

impl<T> From<Identifier> for Ref<T> {
    fn from(identifier: Identifier) -> Self {
        Self::Identifier(identifier)
    }
}

impl<T: ToPlain> ToPlain for Ref<T> {
    fn to_plain(&self) -> Value {
        match self {
            Self::Identifier(Identifier::Id(id)) => Value::from(*id),
            Self::Identifier(Identifier::Slug(slug)) => Value::from(slug.as_str()),
            Self::Instance(instance) => instance.to_plain(),
        }
    }
}

impl<T: ToPlain + ?Sized> ToPlain for &T {
    fn to_plain(&self) -> Value {
        (**self).to_plain()
    }
}

/// Let entities convert into owned and borrowed references.
macro_rules! impl_ref_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::reference::Ref<$ty> {
                fn from(instance: $ty) -> Self {
                    Self::Instance(instance)
                }
            }

            impl<'a> From<&'a $ty> for $crate::reference::Ref<&'a $ty> {
                fn from(instance: &'a $ty) -> Self {
                    Self::Instance(instance)
                }
            }
        )*
    };
}

pub(crate) use impl_ref_from;

#[cfg(test)]
mod tests {
    use super::*;

    struct Slugged(&'static str);

    impl Identify for Slugged {
        fn identifier(&self) -> Result<Identifier> {
            Ok(Identifier::Slug(self.0.to_string()))
        }
    }

    #[test]
    fn test_slug_resolution() {
        let r: Ref<Slugged> = Ref::Instance(Slugged("conf"));
        assert_eq!(r.slug().unwrap(), "conf");
        assert!(matches!(r.id(), Err(PretixError::InvalidArgument(_))));

        let r: Ref<Slugged> = "other".into();
        assert_eq!(r.slug().unwrap(), "other");
    }

    #[test]
    fn test_numeric_reference_is_not_a_slug() {
        let r: Ref<Slugged> = 42_i64.into();
        assert_eq!(r.id().unwrap(), 42);
        assert!(matches!(r.slug(), Err(PretixError::InvalidArgument(_))));
    }

    #[test]
    fn test_identifier_to_plain() {
        let r: Ref<Value> = 7_i64.into();
        assert_eq!(r.to_plain(), Value::from(7));
        let r: Ref<Value> = "conf".into();
        assert_eq!(r.to_plain(), Value::from("conf"));
    }
}
