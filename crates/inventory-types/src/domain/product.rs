use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_price, require_text, ValidationError};
use crate::ports::repository::{EntityKind, Record};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
}

/// Field-merge update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_price("price", self.price)
    }
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(price) = self.price {
            require_price("price", price)?;
        }
        Ok(())
    }
}

impl Record for Product {
    type New = NewProduct;
    type Patch = ProductPatch;

    const KIND: EntityKind = EntityKind::Product;
    const ID_PREFIX: &'static str = "PRD";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, new: NewProduct) -> Self {
        Self {
            id,
            sku: new.sku,
            name: new.name,
            price: new.price,
            stock: new.stock,
            created_at: Utc::now(),
        }
    }

    fn apply(&mut self, patch: ProductPatch) {
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
    }
}
