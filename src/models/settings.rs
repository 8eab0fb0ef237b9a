//! Event settings.

use crate::client::PretixClient;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::models::Event;
use crate::reference::Ref;
use crate::schema::{FieldSpec, NO_FIELDS};
use crate::traits::Get;

/// Settings carry no documented schema; every key reads as a string.
pub const FIELDS: &[FieldSpec] = NO_FIELDS;

/// Key of the contact address setting.
pub const CONTACT_MAIL: &str = "contact_mail";

plain_entity!(
    /// The settings object of an event.
    Settings,
    "Settings"
);

impl Settings {
    /// Contact email address of the event.
    pub fn contact_mail(&self) -> Result<Option<&str>> {
        crate::entity::Entity::view(self).get_str(CONTACT_MAIL)
    }
}

impl Get for Settings {
    /// Slug of the event.
    type Key = String;

    fn path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}settings/", client.event_path(event)))
    }
}

impl PretixClient {
    pub async fn get_event_settings<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
    ) -> Result<Settings> {
        let slug = event.into().slug()?;
        Settings::fetch(self, slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use serde_json::json;

    #[test]
    fn test_contact_mail() {
        let settings = Settings::from_value(json!({
            "contact_mail": "info@example.com",
            "imprint_url": null,
        }))
        .unwrap();
        assert_eq!(settings.contact_mail().unwrap(), Some("info@example.com"));
        assert_eq!(settings.get("imprint_url").unwrap(), &serde_json::Value::Null);
    }

    #[test]
    fn test_missing_contact_mail_is_unknown_field() {
        let settings = Settings::from_value(json!({})).unwrap();
        assert!(settings.contact_mail().is_err());
    }
}
