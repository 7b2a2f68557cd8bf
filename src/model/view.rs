//! View registry and dispatch resolution
//!
//! `ViewKind` is the closed set of views a mapper may name. Resolution turns
//! the active configuration plus the loaded document into typed view data,
//! selecting the slice each view consumes.

use super::json::oid;
use super::mapper::ComponentConfig;
use super::records::{
    normalize_all, Attribute, ChannelAccount, Classification, Order, Product, Warehouse,
};
use serde_json::Value;

/// The eight registered views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    ProductCard,
    ProductTable,
    ProductList,
    AttributeList,
    ChannelList,
    ClassificationList,
    WarehouseList,
    ChannelOrdersList,
}

impl ViewKind {
    pub fn all() -> [ViewKind; 8] {
        [
            ViewKind::ProductCard,
            ViewKind::ProductTable,
            ViewKind::ProductList,
            ViewKind::AttributeList,
            ViewKind::ChannelList,
            ViewKind::ClassificationList,
            ViewKind::WarehouseList,
            ViewKind::ChannelOrdersList,
        ]
    }

    /// Registered component name
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::ProductCard => "ProductCard",
            ViewKind::ProductTable => "ProductTable",
            ViewKind::ProductList => "ProductList",
            ViewKind::AttributeList => "AttributeList",
            ViewKind::ChannelList => "ChannelList",
            ViewKind::ClassificationList => "ClassificationList",
            ViewKind::WarehouseList => "WarehouseList",
            ViewKind::ChannelOrdersList => "ChannelOrdersList",
        }
    }

    /// Exact, case-sensitive lookup by component name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.name() == name)
    }

    /// Document field holding this view's records; `data` is the shared fallback
    pub fn primary_field(&self) -> &'static str {
        match self {
            ViewKind::ProductCard | ViewKind::ProductTable | ViewKind::ProductList => "products",
            ViewKind::AttributeList => "attributes",
            ViewKind::ChannelList => "accounts",
            ViewKind::ClassificationList => "classifications",
            ViewKind::WarehouseList => "warehouses",
            ViewKind::ChannelOrdersList => "orders",
        }
    }

    /// Whether the generic `data` array is accepted when the primary field is absent
    fn accepts_data_fallback(&self) -> bool {
        !matches!(
            self,
            ViewKind::ProductCard | ViewKind::ProductTable | ViewKind::ProductList
        )
    }

    /// The record array this view renders, following the fallback chain
    pub fn slice<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        let primary = document.get(self.primary_field()).filter(|v| !v.is_null());
        if primary.is_some() || !self.accepts_data_fallback() {
            return primary;
        }
        document.get("data").filter(|v| !v.is_null())
    }
}

/// A product card with its render key
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCardEntry {
    pub key: String,
    pub product: Product,
}

/// Card key precedence: `_id.$oid`, then `u_product_id.$oid`, then position
pub fn card_key(raw: &Value, index: usize) -> String {
    raw.get("_id")
        .and_then(oid)
        .or_else(|| raw.get("u_product_id").and_then(oid))
        .unwrap_or_else(|| format!("#{}", index))
}

/// Normalized data for one view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    ProductCard(Vec<ProductCardEntry>),
    ProductTable(Vec<Product>),
    ProductList(Vec<Product>),
    AttributeList(Vec<Attribute>),
    ChannelList(Vec<ChannelAccount>),
    ClassificationList(Vec<Classification>),
    WarehouseList(Vec<Warehouse>),
    ChannelOrdersList(Vec<Order>),
}

impl ViewData {
    /// Select and normalize the slice of `document` consumed by `kind`
    pub fn build(kind: ViewKind, document: &Value) -> Self {
        let slice = kind.slice(document);
        match kind {
            ViewKind::ProductCard => {
                let cards = slice
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .enumerate()
                            .map(|(index, raw)| ProductCardEntry {
                                key: card_key(raw, index),
                                product: Product::from_value(raw),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                ViewData::ProductCard(cards)
            }
            ViewKind::ProductTable => ViewData::ProductTable(normalize_all(slice, Product::from_value)),
            ViewKind::ProductList => ViewData::ProductList(normalize_all(slice, Product::from_value)),
            ViewKind::AttributeList => {
                ViewData::AttributeList(normalize_all(slice, Attribute::from_value))
            }
            ViewKind::ChannelList => {
                ViewData::ChannelList(normalize_all(slice, ChannelAccount::from_value))
            }
            ViewKind::ClassificationList => {
                ViewData::ClassificationList(normalize_all(slice, Classification::from_value))
            }
            ViewKind::WarehouseList => {
                ViewData::WarehouseList(normalize_all(slice, Warehouse::from_value))
            }
            ViewKind::ChannelOrdersList => {
                ViewData::ChannelOrdersList(normalize_all(slice, Order::from_value))
            }
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            ViewData::ProductCard(_) => ViewKind::ProductCard,
            ViewData::ProductTable(_) => ViewKind::ProductTable,
            ViewData::ProductList(_) => ViewKind::ProductList,
            ViewData::AttributeList(_) => ViewKind::AttributeList,
            ViewData::ChannelList(_) => ViewKind::ChannelList,
            ViewData::ClassificationList(_) => ViewKind::ClassificationList,
            ViewData::WarehouseList(_) => ViewKind::WarehouseList,
            ViewData::ChannelOrdersList(_) => ViewKind::ChannelOrdersList,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ViewData::ProductCard(items) => items.len(),
            ViewData::ProductTable(items) | ViewData::ProductList(items) => items.len(),
            ViewData::AttributeList(items) => items.len(),
            ViewData::ChannelList(items) => items.len(),
            ViewData::ClassificationList(items) => items.len(),
            ViewData::WarehouseList(items) => items.len(),
            ViewData::ChannelOrdersList(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of resolving the active configuration against the loaded document
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Nothing to render until both a dataset and a configuration exist
    Nothing,
    /// The configuration names a view that is not registered
    NotFound(String),
    Ready(ViewData),
}

impl Resolution {
    pub fn resolve(config: Option<&ComponentConfig>, document: Option<&Value>) -> Self {
        let (Some(config), Some(document)) = (config, document) else {
            return Resolution::Nothing;
        };

        match ViewKind::from_name(&config.name) {
            Some(kind) => Resolution::Ready(ViewData::build(kind, document)),
            None => Resolution::NotFound(config.name.clone()),
        }
    }
}

/// Inline text shown for an unregistered component name
pub fn not_found_message(name: &str) -> String {
    format!("Component {} not found", name)
}
