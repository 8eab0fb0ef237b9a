//! Item (product) model.

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::models::Event;
use crate::pagination::ListOptions;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::{entity_fields, field_table, FieldSpec};
use crate::traits::List;

/// One variation of an item.
pub const VARIATION: &[FieldSpec] = field_table! {
    id: Integer,
    value: MultiLingual,
    default_price: Money,
    price: Money,
    original_price: Money,
    active: Boolean,
    description: MultiLingual,
    position: Integer,
};

/// Add-on category offered with an item.
pub const ADDON: &[FieldSpec] = field_table! {
    addon_category: Integer,
    min_count: Integer,
    max_count: Integer,
    position: Integer,
    price_included: Boolean,
};

/// Item included in a bundle.
pub const BUNDLE: &[FieldSpec] = field_table! {
    bundled_item: Integer,
    bundled_variation: Integer,
    count: Integer,
    designated_price: Money,
};

plain_entity!(
    /// A product that can be sold for an event.
    Item,
    "Item"
);

entity_fields! {
    Item {
        id: Integer,
        /// The item's visible name.
        name: MultiLingual,
        /// Name only used in the backend.
        internal_name: String,
        default_price: Money,
        category: Integer,
        /// If false, the item is hidden and not sold.
        active: Boolean,
        description: MultiLingual,
        free_price: Boolean,
        tax_rate: Decimal,
        tax_rule: Integer,
        /// Whether the item grants admission to the event.
        admission: Boolean,
        position: Integer,
        picture: String,
        sales_channels: ListOfStrings,
        available_from: DateTime,
        available_until: DateTime,
        hidden_if_available: Integer,
        require_voucher: Boolean,
        hide_without_voucher: Boolean,
        allow_cancel: Boolean,
        min_per_order: Integer,
        max_per_order: Integer,
        checkin_attention: Boolean,
        original_price: Money,
        require_approval: Boolean,
        require_bundling: Boolean,
        generate_tickets: Boolean,
        allow_waitinglist: Boolean,
        issue_giftcard: Boolean,
        show_quota_left: Boolean,
        has_variations: Boolean,
        variations: ObjectList(VARIATION),
        addons: ObjectList(ADDON),
        bundles: ObjectList(BUNDLE),
    }
}

impl_ref_from!(Item);

impl Identify for Item {
    fn identifier(&self) -> Result<Identifier> {
        super::by_id(self)
    }
}

impl List for Item {
    /// Slug of the event.
    type Scope = String;

    fn collection_path(client: &PretixClient, event: &String) -> Result<String> {
        Ok(format!("{}items/", client.event_path(event)))
    }
}

impl PretixClient {
    /// Items (products) of an event.
    pub async fn get_items<'a>(
        &self,
        event: impl Into<Ref<&'a Event>>,
    ) -> Result<EntityCollection<Item>> {
        let slug = event.into().slug()?;
        Item::list(self, slug, &ListOptions::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use serde_json::json;

    #[test]
    fn test_variations_resolve_nested_locales() {
        let item = Item::from_value(json!({
            "id": 3,
            "name": {"en": "T-shirt"},
            "default_price": "20.00",
            "has_variations": true,
            "variations": [
                {"id": 1, "value": {"en": "S", "de": "S"}, "price": "20.00"},
                {"id": 2, "value": {"en": "XL"}, "price": "22.00"},
            ],
        }))
        .unwrap();

        assert_eq!(item.default_price().unwrap(), Some("20.00"));
        let variations = item.variations().unwrap().unwrap();
        assert_eq!(variations.len(), 2);
        assert_eq!(variations[1].get_i64("id").unwrap(), Some(2));
        assert_eq!(variations[1].get_localized("value", Some("en")).unwrap(), "XL");
        assert!(variations[1].get_localized("value", Some("de")).is_err());
        assert_eq!(variations[0].get_str("price").unwrap(), Some("20.00"));
    }
}
