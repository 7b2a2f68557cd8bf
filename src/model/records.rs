//! Normalized record types for each data kind
//!
//! Every view receives strongly typed records built once from the raw tool
//! output. Fallback chains for alternative field names live here, in one
//! `from_value` per kind, so rendering code never touches raw JSON.

use super::format::{format_amount, NOT_AVAILABLE};
use super::json::{
    first_id, first_text, first_timestamp, integer, is_truthy, lookup, number, scalar_text,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Normalize every element of a JSON array; non-arrays yield an empty list
pub fn normalize_all<T>(value: Option<&Value>, normalize: fn(&Value) -> T) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize).collect())
        .unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Products
// ═══════════════════════════════════════════════════════════════════════════════

/// A product image reference
#[derive(Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub url: String,
    pub is_main: bool,
}

/// Product price as delivered: numeric, free text, or absent
#[derive(Debug, Clone, PartialEq)]
pub enum Price {
    Amount(f64),
    Text(String),
    Missing,
}

impl Price {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map(Price::Amount).unwrap_or(Price::Missing),
            Some(Value::String(s)) if !s.is_empty() => Price::Text(s.clone()),
            _ => Price::Missing,
        }
    }

    /// Dollar price used by the card and table views
    pub fn dollars(&self) -> String {
        match self {
            Price::Amount(amount) => format!("${}", format_amount(*amount)),
            Price::Text(text) => format!("${}", text),
            Price::Missing => "-".to_string(),
        }
    }

    /// Bare price used by the product list; zero and `-` render as `-`
    pub fn plain(&self) -> String {
        match self {
            Price::Amount(amount) if *amount != 0.0 => format_amount(*amount),
            Price::Text(text) if text != "-" => text.clone(),
            _ => "-".to_string(),
        }
    }
}

/// A catalog product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Row identity (`_id.$oid`, then `id`)
    pub id: Option<String>,
    /// Catalog product id (`u_product_id.$oid`)
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub price: Price,
    pub status: Option<String>,
    pub channels: Option<String>,
    pub source: Option<String>,
    pub images: Vec<ProductImage>,
    pub has_variants: bool,
}

impl Product {
    pub fn from_value(value: &Value) -> Self {
        let images = value
            .get("images")
            .and_then(Value::as_array)
            .map(|images| {
                images
                    .iter()
                    .filter_map(|img| {
                        let url = img.get("url").and_then(scalar_text)?;
                        let is_main = img.get("is_main").is_some_and(is_truthy);
                        Some(ProductImage { url, is_main })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let channels = match value.get("channels") {
            Some(Value::Array(list)) if !list.is_empty() => Some(
                list.iter()
                    .filter_map(scalar_text)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Some(other) => scalar_text(other),
            None => None,
        }
        .or_else(|| first_text(value, &["u_source"]));

        Self {
            id: first_id(value, &["_id", "id"]),
            product_id: first_id(value, &["u_product_id"]),
            title: first_text(value, &["title"]),
            sku: first_text(value, &["sku"]),
            price: Price::from_value(value.get("price")),
            status: first_text(value, &["status"]),
            channels,
            source: first_text(value, &["u_source"]),
            images,
            has_variants: value.get("variants").is_some_and(is_truthy),
        }
    }

    /// First image flagged as main, else the first image
    pub fn main_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.is_main)
            .or_else(|| self.images.first())
            .map(|img| img.url.as_str())
    }

    pub fn title_or_na(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn sku_or_na(&self) -> &str {
        self.sku.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Attributes
// ═══════════════════════════════════════════════════════════════════════════════

/// A product attribute definition
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Raw type (`type`, then `frontend_type`)
    pub kind: Option<String>,
    pub required: bool,
    pub created: Option<DateTime<Utc>>,
}

impl Attribute {
    pub fn from_value(value: &Value) -> Self {
        let required = match value.get("is_required") {
            Some(Value::Null) | None => value.get("isRequired").is_some_and(is_truthy),
            Some(flag) => is_truthy(flag),
        };

        Self {
            id: first_id(value, &["_id", "id"]),
            name: first_text(value, &["name"]),
            kind: first_text(value, &["type", "frontend_type"]),
            required,
            created: first_timestamp(value, &["created_at", "createdAt"]),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Channel accounts
// ═══════════════════════════════════════════════════════════════════════════════

/// A connected marketplace account
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelAccount {
    pub id: Option<String>,
    pub name: Option<String>,
    pub channel_name: Option<String>,
    pub channel_group_name: Option<String>,
    /// Token expiry as Unix seconds; zero is treated as absent
    pub expires_in: Option<i64>,
}

impl ChannelAccount {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: first_id(value, &["id", "_id"]),
            name: first_text(value, &["name"]),
            channel_name: first_text(value, &["channel.name"]),
            channel_group_name: first_text(value, &["channel_group.name"]),
            expires_in: value
                .get("expires_in")
                .filter(|v| is_truthy(v))
                .and_then(integer)
                .filter(|secs| *secs != 0),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed Channel")
    }

    pub fn subtitle(&self) -> &str {
        self.channel_name
            .as_deref()
            .or(self.channel_group_name.as_deref())
            .unwrap_or("Marketplace")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Classifications
// ═══════════════════════════════════════════════════════════════════════════════

/// A product classification (category)
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub id: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub count: i64,
}

impl Classification {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: first_id(value, &["id", "_id"]),
            name: first_text(value, &["name"]),
            code: first_text(value, &["code"]),
            count: value.get("count").and_then(integer).unwrap_or(0),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Warehouses
// ═══════════════════════════════════════════════════════════════════════════════

/// A stock location
#[derive(Debug, Clone, PartialEq)]
pub struct Warehouse {
    pub id: Option<String>,
    pub name: Option<String>,
    pub channel: String,
    pub created: Option<DateTime<Utc>>,
    pub status: String,
}

impl Warehouse {
    pub fn from_value(value: &Value) -> Self {
        let channel = first_text(value, &["channel_name", "channel.name", "account.name"])
            .or_else(|| first_text(value, &["channel_id"]).map(|id| format!("Channel {}", id)))
            .or_else(|| first_text(value, &["account_id"]).map(|id| format!("Account {}", id)))
            .unwrap_or_else(|| "UniCon".to_string());

        Self {
            id: first_id(value, &["id", "_id"]),
            name: first_text(value, &["name"]),
            channel,
            created: first_timestamp(value, &["created_at", "createdAt"]),
            status: first_text(value, &["status"]).unwrap_or_else(|| "Active".to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed Warehouse")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Orders
// ═══════════════════════════════════════════════════════════════════════════════

/// A marketplace order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub key: Option<String>,
    pub order_id: Option<String>,
    pub order_name: Option<String>,
    pub channel_name: Option<String>,
    pub marketplace_account_id: Option<String>,
    pub channel_id: Option<String>,
    pub fulfillment_type: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub total: f64,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

impl Order {
    pub fn from_value(value: &Value) -> Self {
        Self {
            key: first_id(value, &["id", "_id"]),
            order_id: first_text(value, &["order_id"]),
            order_name: first_text(value, &["order_name"]),
            channel_name: first_text(value, &["channel_name"]),
            marketplace_account_id: first_text(value, &["marketplace_account_id"]),
            channel_id: first_text(value, &["u_channel_id"]),
            fulfillment_type: first_text(value, &["fulfillment_type"]),
            created: first_timestamp(value, &["created_at", "create_time"]),
            total: value.get("total").and_then(number).unwrap_or(0.0),
            currency: first_text(value, &["currency"]),
            status: first_text(value, &["status"]),
            error_message: lookup(value, "packages.error_message")
                .and_then(scalar_text)
                .or_else(|| first_text(value, &["error_message"])),
        }
    }

    /// Visible order identifier (`order_id`, then `order_name`)
    pub fn display_id(&self) -> &str {
        self.order_id
            .as_deref()
            .or(self.order_name.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_defaults_for_empty_record() {
        let product = Product::from_value(&json!({}));
        assert_eq!(product.title_or_na(), "N/A");
        assert_eq!(product.price, Price::Missing);
        assert_eq!(product.price.plain(), "-");
        assert!(product.main_image().is_none());
        assert!(!product.has_variants);
    }

    #[test]
    fn test_product_main_image_prefers_flag() {
        let product = Product::from_value(&json!({
            "images": [
                {"url": "a.png", "is_main": false},
                {"url": "b.png", "is_main": true}
            ]
        }));
        assert_eq!(product.main_image(), Some("b.png"));

        let no_main = Product::from_value(&json!({"images": [{"url": "a.png"}]}));
        assert_eq!(no_main.main_image(), Some("a.png"));
    }

    #[test]
    fn test_product_channels_fall_back_to_source() {
        let listed = Product::from_value(&json!({"channels": ["amazon", "ebay"], "u_source": "shopify"}));
        assert_eq!(listed.channels.as_deref(), Some("amazon, ebay"));

        let sourced = Product::from_value(&json!({"u_source": "shopify"}));
        assert_eq!(sourced.channels.as_deref(), Some("shopify"));
    }

    #[test]
    fn test_price_formats() {
        assert_eq!(Price::Amount(12.5).dollars(), "$12.50");
        assert_eq!(Price::Amount(0.0).plain(), "-");
        assert_eq!(Price::Text("-".to_string()).plain(), "-");
        assert_eq!(Price::Text("99".to_string()).plain(), "99");
    }

    #[test]
    fn test_attribute_required_fallback() {
        let camel = Attribute::from_value(&json!({"isRequired": true}));
        assert!(camel.required);

        let explicit_false = Attribute::from_value(&json!({"is_required": false, "isRequired": true}));
        assert!(!explicit_false.required);

        let kind = Attribute::from_value(&json!({"frontend_type": "multi_select"}));
        assert_eq!(kind.kind.as_deref(), Some("multi_select"));
    }

    #[test]
    fn test_channel_account_expiry_parsing() {
        let numeric = ChannelAccount::from_value(&json!({"expires_in": 1_800_000_000}));
        assert_eq!(numeric.expires_in, Some(1_800_000_000));

        let text = ChannelAccount::from_value(&json!({"expires_in": "1800000000"}));
        assert_eq!(text.expires_in, Some(1_800_000_000));

        let zero = ChannelAccount::from_value(&json!({"expires_in": 0}));
        assert_eq!(zero.expires_in, None);

        assert_eq!(zero.display_name(), "Unnamed Channel");
        assert_eq!(zero.subtitle(), "Marketplace");
    }

    #[test]
    fn test_warehouse_channel_chain() {
        let by_id = Warehouse::from_value(&json!({"channel_id": 12}));
        assert_eq!(by_id.channel, "Channel 12");

        let by_account = Warehouse::from_value(&json!({"account": {"name": "Main"}, "channel_id": 3}));
        assert_eq!(by_account.channel, "Main");

        let fallback = Warehouse::from_value(&json!({}));
        assert_eq!(fallback.channel, "UniCon");
        assert_eq!(fallback.status, "Active");
        assert_eq!(fallback.display_name(), "Unnamed Warehouse");
    }

    #[test]
    fn test_order_fields() {
        let order = Order::from_value(&json!({
            "order_name": "#1001",
            "total": "19.999",
            "packages": {"error_message": "label failed"},
            "create_time": 1_700_000_000
        }));
        assert_eq!(order.display_id(), "#1001");
        assert!((order.total - 19.999).abs() < f64::EPSILON);
        assert_eq!(order.error_message.as_deref(), Some("label failed"));
        assert!(order.created.is_some());
    }

    #[test]
    fn test_normalize_all_ignores_non_arrays() {
        let items: Vec<Classification> = normalize_all(Some(&json!({"a": 1})), Classification::from_value);
        assert!(items.is_empty());

        let items = normalize_all(Some(&json!([{"name": "SHOES", "count": 4}])), Classification::from_value);
        assert_eq!(items[0].count, 4);
    }
}
