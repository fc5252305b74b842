use crate::application::require;
use crate::application::resolver::ReferenceResolver;
use crate::errors::AppError;
use inventory_types::domain::order::{
    CreateOrderRequest, Order, OrderDraft, OrderRevision, UpdateOrderRequest,
};
use inventory_types::ports::repository::{EntityKind, EntityStore, Repository};

/// Composes and reconciles orders. Every reference is resolved before the
/// store is written, so a rejected request leaves the store untouched.
pub struct OrderService<S: EntityStore> {
    store: S,
    resolver: ReferenceResolver<S>,
}

impl<S: EntityStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self {
            resolver: ReferenceResolver::new(store.clone()),
            store,
        }
    }

    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, AppError> {
        let supplier = self.resolver.resolve_supplier(&req.supplier_id).await?;
        req.validate()?;
        let items = self.resolver.resolve_items(req.items).await?;

        let order = self
            .store
            .orders()
            .insert(OrderDraft {
                supplier,
                items,
                status: req.status.unwrap_or_default(),
            })
            .await?;
        tracing::info!(
            order_id = %order.id,
            supplier_id = %order.supplier.id,
            items = order.items.len(),
            "order created"
        );
        Ok(order)
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, AppError> {
        require(self.store.orders(), id).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.store.orders().list().await?)
    }

    /// Re-resolves only the references present in `req`; everything else
    /// keeps its stored value.
    pub async fn update_order(&self, id: &str, req: UpdateOrderRequest) -> Result<Order, AppError> {
        require::<Order, _>(self.store.orders(), id).await?;
        req.validate()?;

        let supplier = match &req.supplier_id {
            Some(supplier_id) => Some(self.resolver.resolve_supplier(supplier_id).await?),
            None => None,
        };
        let items = match req.items {
            Some(lines) => Some(self.resolver.resolve_items(lines).await?),
            None => None,
        };

        let revision = OrderRevision {
            supplier,
            items,
            status: req.status,
        };
        let order = self
            .store
            .orders()
            .update(id, revision)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Order, id))?;
        tracing::info!(order_id = %order.id, status = ?order.status, "order updated");
        Ok(order)
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), AppError> {
        let deleted = self.store.orders().delete(id).await?;
        if deleted {
            tracing::info!(order_id = %id, "order deleted");
            Ok(())
        } else {
            Err(AppError::not_found(EntityKind::Order, id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_repo::InMemoryStore;
    use inventory_types::domain::order::{OrderLine, OrderStatus, ProductSnapshot};
    use inventory_types::domain::product::{NewProduct, Product, ProductPatch};
    use inventory_types::domain::supplier::{NewSupplier, Supplier, SupplierPatch};
    use inventory_types::domain::validation::ValidationError;

    async fn fixtures(store: &InMemoryStore) -> (Supplier, Product) {
        let supplier = store
            .suppliers()
            .insert(NewSupplier {
                name: "Acme".into(),
                contact: Some("a@acme.test".into()),
            })
            .await
            .unwrap();
        let product = store
            .products()
            .insert(NewProduct {
                sku: "P1".into(),
                name: "Widget".into(),
                price: 10.0,
                stock: 5,
            })
            .await
            .unwrap();
        (supplier, product)
    }

    fn line(product_id: &str, qty: u32, price: Option<f64>) -> OrderLine {
        OrderLine {
            product_id: product_id.into(),
            qty,
            price,
        }
    }

    fn request(supplier_id: &str, items: Vec<OrderLine>) -> CreateOrderRequest {
        CreateOrderRequest {
            supplier_id: supplier_id.into(),
            items,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_embeds_snapshots_and_defaults() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());

        let order = svc
            .create_order(request(&supplier.id, vec![line(&product.id, 3, None)]))
            .await
            .unwrap();

        assert!(order.id.starts_with("ORD-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.supplier, supplier);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, product.id);
        assert_eq!(order.items[0].product, ProductSnapshot::Known(product));
        assert_eq!(order.items[0].qty, 3);
        assert_eq!(order.items[0].price, 10.0);

        let got = svc.get_order(&order.id).await.unwrap();
        assert_eq!(got, order);
    }

    #[tokio::test]
    async fn missing_supplier_blocks_create_without_writing() {
        let store = InMemoryStore::new();
        let (_, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());

        let res = svc
            .create_order(request("SUP-missing", vec![line(&product.id, 1, None)]))
            .await;
        assert!(matches!(res, Err(AppError::SupplierNotFound(_))));
        assert_eq!(store.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_items_rejected_without_writing() {
        let store = InMemoryStore::new();
        let (supplier, _) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());

        let res = svc.create_order(request(&supplier.id, vec![])).await;
        assert!(matches!(
            res,
            Err(AppError::Validation(ValidationError::NoItems))
        ));
        assert_eq!(store.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_product_does_not_block_order() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());

        let order = svc
            .create_order(request(
                &supplier.id,
                vec![line(&product.id, 1, None), line("PRD-ghost", 4, None)],
            ))
            .await
            .unwrap();

        let ghost = &order.items[1];
        assert_eq!(ghost.product_id, "PRD-ghost");
        assert_eq!(ghost.product, ProductSnapshot::placeholder("PRD-ghost"));
        assert_eq!(ghost.product.name(), "Unknown Product");
        assert_eq!(ghost.price, 0.0);
        assert_eq!(ghost.qty, 4);
    }

    #[tokio::test]
    async fn explicit_price_overrides_product_price() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());

        let order = svc
            .create_order(request(
                &supplier.id,
                vec![line(&product.id, 2, Some(8.5)), line("PRD-ghost", 1, Some(3.0))],
            ))
            .await
            .unwrap();
        assert_eq!(order.items[0].price, 8.5);
        assert_eq!(order.items[0].product.price(), 10.0);
        assert_eq!(order.items[1].price, 3.0);
    }

    #[tokio::test]
    async fn later_edits_do_not_leak_into_orders() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());
        let order = svc
            .create_order(request(&supplier.id, vec![line(&product.id, 1, None)]))
            .await
            .unwrap();

        store
            .suppliers()
            .update(
                &supplier.id,
                SupplierPatch {
                    name: Some("Acme Renamed".into()),
                    contact: None,
                },
            )
            .await
            .unwrap();
        store
            .products()
            .update(
                &product.id,
                ProductPatch {
                    price: Some(99.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store.products().delete(&product.id).await.unwrap();

        let stored = svc.get_order(&order.id).await.unwrap();
        assert_eq!(stored.supplier.name, "Acme");
        assert_eq!(stored.items[0].product.price(), 10.0);
        assert_eq!(stored.items[0].price, 10.0);
    }

    #[tokio::test]
    async fn status_only_update_keeps_everything_else() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());
        let order = svc
            .create_order(request(&supplier.id, vec![line(&product.id, 3, None)]))
            .await
            .unwrap();

        let updated = svc
            .update_order(
                &order.id,
                UpdateOrderRequest {
                    status: Some(OrderStatus::Received),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Received);
        assert_eq!(updated.items, order.items);
        assert_eq!(updated.supplier, order.supplier);
        assert_eq!(updated.ordered_at, order.ordered_at);
        assert_eq!(
            serde_json::to_string(&updated.items).unwrap(),
            serde_json::to_string(&order.items).unwrap()
        );
    }

    #[tokio::test]
    async fn any_status_may_replace_any_other() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());
        let order = svc
            .create_order(CreateOrderRequest {
                status: Some(OrderStatus::Cancelled),
                ..request(&supplier.id, vec![line(&product.id, 1, None)])
            })
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        for status in [OrderStatus::Received, OrderStatus::Pending, OrderStatus::Cancelled] {
            let updated = svc
                .update_order(
                    &order.id,
                    UpdateOrderRequest {
                        status: Some(status),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn update_reresolves_supplier_and_items() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());
        let order = svc
            .create_order(request(&supplier.id, vec![line(&product.id, 1, None)]))
            .await
            .unwrap();

        let other = store
            .suppliers()
            .insert(NewSupplier {
                name: "Globex".into(),
                contact: None,
            })
            .await
            .unwrap();
        store
            .products()
            .update(
                &product.id,
                ProductPatch {
                    price: Some(12.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = svc
            .update_order(
                &order.id,
                UpdateOrderRequest {
                    supplier_id: Some(other.id.clone()),
                    items: Some(vec![
                        line(&product.id, 7, None),
                        line("PRD-ghost", 2, None),
                    ]),
                    status: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.supplier, other);
        assert_eq!(updated.status, OrderStatus::Pending);
        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.items[0].qty, 7);
        assert_eq!(updated.items[0].price, 12.0);
        assert_eq!(updated.items[0].product.price(), 12.0);

        let ghost = &updated.items[1];
        assert_eq!(ghost.product_id, "PRD-ghost");
        assert_eq!(ghost.product, ProductSnapshot::placeholder("PRD-ghost"));
        assert_eq!(ghost.qty, 2);
        assert_eq!(ghost.price, 0.0);
    }

    #[tokio::test]
    async fn failed_update_leaves_order_untouched() {
        let store = InMemoryStore::new();
        let (supplier, product) = fixtures(&store).await;
        let svc = OrderService::new(store.clone());
        let order = svc
            .create_order(request(&supplier.id, vec![line(&product.id, 1, None)]))
            .await
            .unwrap();

        let res = svc
            .update_order(
                &order.id,
                UpdateOrderRequest {
                    status: Some(OrderStatus::Received),
                    supplier_id: Some("SUP-missing".into()),
                    items: None,
                },
            )
            .await;
        assert!(matches!(res, Err(AppError::SupplierNotFound(_))));

        let res = svc
            .update_order(
                &order.id,
                UpdateOrderRequest {
                    items: Some(vec![]),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            res,
            Err(AppError::Validation(ValidationError::NoItems))
        ));

        assert_eq!(svc.get_order(&order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn not_found_paths() {
        let svc = OrderService::new(InMemoryStore::new());
        let missing = svc.get_order("ORD-missing").await;
        assert!(matches!(missing, Err(AppError::NotFound { .. })));

        let updated = svc
            .update_order(
                "ORD-missing",
                UpdateOrderRequest {
                    supplier_id: Some("SUP-missing".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(updated, Err(AppError::NotFound { .. })));

        let deleted = svc.delete_order("ORD-missing").await;
        assert!(matches!(deleted, Err(AppError::NotFound { .. })));
    }
}
