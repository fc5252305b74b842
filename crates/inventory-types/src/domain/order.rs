use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;
use super::supplier::Supplier;
use super::validation::{require_price, ValidationError};
use crate::ports::repository::{EntityKind, Record};

pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Received,
    Cancelled,
}

/// Stand-in embedded when an item's product id no longer resolves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnknownProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Copy of a product taken when the order was written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProductSnapshot {
    Known(Product),
    Unknown(UnknownProduct),
}

impl ProductSnapshot {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self::Unknown(UnknownProduct {
            id: id.into(),
            name: UNKNOWN_PRODUCT_NAME.to_string(),
            price: 0.0,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Known(p) => &p.id,
            Self::Unknown(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Known(p) => &p.name,
            Self::Unknown(p) => &p.name,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            Self::Known(p) => p.price,
            Self::Unknown(p) => p.price,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

/// One requested line: which product, how many, and an optional price override.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product: ProductSnapshot,
    pub qty: u32,
    pub price: f64,
}

impl OrderItem {
    /// Embeds `product` and settles the effective price: the line's explicit
    /// price wins, otherwise the snapshot's price at write time.
    pub fn compose(line: OrderLine, product: ProductSnapshot) -> Self {
        let price = line.price.unwrap_or_else(|| product.price());
        Self {
            product_id: line.product_id,
            product,
            qty: line.qty,
            price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Snapshot of the supplier, keyed like the reference it replaced.
    #[serde(rename = "supplierId")]
    pub supplier: Supplier,
    pub items: Vec<OrderItem>,
}

/// A fully resolved order waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub supplier: Supplier,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
}

/// Resolved replacement values for an existing order. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRevision {
    pub supplier: Option<Supplier>,
    pub items: Option<Vec<OrderItem>>,
    pub status: Option<OrderStatus>,
}

impl Record for Order {
    type New = OrderDraft;
    type Patch = OrderRevision;

    const KIND: EntityKind = EntityKind::Order;
    const ID_PREFIX: &'static str = "ORD";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, draft: OrderDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: draft.status,
            ordered_at: now,
            updated_at: now,
            supplier: draft.supplier,
            items: draft.items,
        }
    }

    fn apply(&mut self, revision: OrderRevision) {
        if let Some(supplier) = revision.supplier {
            self.supplier = supplier;
        }
        if let Some(items) = revision.items {
            self.items = items;
        }
        if let Some(status) = revision.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub supplier_id: String,
    pub items: Vec<OrderLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

/// Partial order update. Only these three fields may be overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderLine>>,
}

fn validate_lines(lines: &[OrderLine]) -> Result<(), ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::NoItems);
    }
    for (idx, line) in lines.iter().enumerate() {
        if line.qty == 0 {
            return Err(ValidationError::ZeroQuantity(idx));
        }
        if let Some(price) = line.price {
            require_price("item price", price)?;
        }
    }
    Ok(())
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_lines(&self.items)
    }
}

impl UpdateOrderRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.items {
            Some(lines) => validate_lines(lines),
            None => Ok(()),
        }
    }
}
