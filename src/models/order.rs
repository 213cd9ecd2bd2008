//! Order records as served by the FoodieHub orders API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::timestamp::deserialize_lenient;

/// Label used for orders that arrive without a status.
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Customer attached to an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Menu entry referenced from an order line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One line of an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub menu_id: Option<i64>,
    #[serde(default)]
    pub menu: Option<MenuRef>,
}

impl OrderItem {
    /// Name of the referenced menu entry, if there is a non-empty one.
    pub fn menu_name(&self) -> Option<&str> {
        self.menu
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub order_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub user: Option<Customer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_items: Vec<OrderItem>,
}

impl Order {
    /// Status label used for grouping.
    pub fn status_label(&self) -> &str {
        self.order_status.as_deref().unwrap_or(UNKNOWN_STATUS)
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn deserializes_upstream_order() {
        let json = r#"{
            "id": 42,
            "orderDate": "2024-03-15T10:20:30.5",
            "totalAmount": 25.5,
            "orderStatus": "DELIVERED",
            "paymentStatus": "COMPLETED",
            "user": { "id": 7, "name": "Ada", "email": "ada@foodiehub.test" },
            "orderItems": [
                { "id": 1, "quantity": 2, "pricePerUnit": 10.0, "subtotal": 20.0,
                  "menuId": 3, "menu": { "id": 3, "name": "Burger", "price": 10.0 } }
            ]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 42);
        assert_eq!(order.order_date.unwrap().month(), 3);
        assert_eq!(order.status_label(), "DELIVERED");
        assert_eq!(order.customer_name(), Some("Ada"));
        assert_eq!(order.order_items[0].menu_name(), Some("Burger"));
    }

    #[test]
    fn sparse_order_defaults() {
        let order: Order = serde_json::from_str(r#"{ "id": 1 }"#).unwrap();
        assert_eq!(order.status_label(), UNKNOWN_STATUS);
        assert!(order.order_items.is_empty());
        assert!(order.customer_name().is_none());
    }

    #[test]
    fn empty_menu_name_is_unresolved() {
        let item = OrderItem {
            quantity: 1,
            menu: Some(MenuRef {
                name: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(item.menu_name().is_none());
        assert!(OrderItem::default().menu_name().is_none());
    }

    #[test]
    fn null_line_items_and_quantities_degrade_to_defaults() {
        let order: Order =
            serde_json::from_str(r#"{ "id": 5, "orderItems": null }"#).unwrap();
        assert!(order.order_items.is_empty());

        let order: Order = serde_json::from_str(
            r#"{ "id": 6, "orderItems": [ { "quantity": null, "menu": { "name": "Soda" } } ] }"#,
        )
        .unwrap();
        assert_eq!(order.order_items[0].quantity, 0);
        assert_eq!(order.order_items[0].menu_name(), Some("Soda"));
    }
}
