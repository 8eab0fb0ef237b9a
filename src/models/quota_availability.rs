//! Quota availability.

use crate::client::PretixClient;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::models::{Event, Quota};
use crate::reference::Ref;
use crate::schema::entity_fields;
use crate::traits::Get;

plain_entity!(
    /// Current availability figures of a quota.
    QuotaAvailability,
    "QuotaAvailability"
);

entity_fields! {
    QuotaAvailability {
        available: Boolean,
        /// Remaining capacity, or null if unlimited.
        available_number: Integer,
        total_size: Integer,
        pending_orders: Integer,
        paid_orders: Integer,
        cart_positions: Integer,
        blocking_vouchers: Integer,
        waiting_list: Integer,
    }
}

impl Get for QuotaAvailability {
    /// Event slug and quota id.
    type Key = (String, i64);

    fn path(client: &PretixClient, (event, quota): &(String, i64)) -> Result<String> {
        Ok(format!("{}quotas/{quota}/availability/", client.event_path(event)))
    }
}

impl PretixClient {
    pub async fn get_quota_availability<'a, 'b>(
        &self,
        event: impl Into<Ref<&'a Event>>,
        quota: impl Into<Ref<&'b Quota>>,
    ) -> Result<QuotaAvailability> {
        let key = (event.into().slug()?, quota.into().id()?);
        QuotaAvailability::fetch(self, key).await
    }
}
