use inventory_types::domain::order::{OrderItem, OrderLine, ProductSnapshot};
use inventory_types::domain::supplier::Supplier;
use inventory_types::ports::repository::{EntityStore, Repository};

use crate::errors::AppError;

/// Turns foreign ids on an order request into the records embedded in the order.
///
/// A missing supplier rejects the request. A missing product degrades to a
/// placeholder snapshot so the remaining lines can still be recorded.
#[derive(Clone)]
pub struct ReferenceResolver<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> ReferenceResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn resolve_supplier(&self, id: &str) -> Result<Supplier, AppError> {
        self.store
            .suppliers()
            .get(id)
            .await?
            .ok_or_else(|| AppError::SupplierNotFound(id.to_string()))
    }

    /// Only store failures surface as errors here.
    pub async fn resolve_product(&self, id: &str) -> Result<ProductSnapshot, AppError> {
        match self.store.products().get(id).await? {
            Some(product) => Ok(ProductSnapshot::Known(product)),
            None => {
                tracing::warn!(product_id = %id, "product not found, embedding placeholder");
                Ok(ProductSnapshot::placeholder(id))
            }
        }
    }

    pub async fn resolve_items(&self, lines: Vec<OrderLine>) -> Result<Vec<OrderItem>, AppError> {
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self.resolve_product(&line.product_id).await?;
            items.push(OrderItem::compose(line, product));
        }
        Ok(items)
    }
}
