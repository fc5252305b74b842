use crate::application::require;
use crate::errors::AppError;
use inventory_types::domain::product::{NewProduct, Product, ProductPatch};
use inventory_types::domain::supplier::{NewSupplier, Supplier, SupplierPatch};
use inventory_types::ports::repository::{EntityStore, Record, Repository};

/// Plain CRUD over products and suppliers. Orders that already embed a
/// product or supplier keep their own copy and are never touched here.
pub struct CatalogService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_product(&self, new: NewProduct) -> Result<Product, AppError> {
        new.validate()?;
        let product = self.store.products().insert(new).await?;
        tracing::info!(product_id = %product.id, sku = %product.sku, "product created");
        Ok(product)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, AppError> {
        require(self.store.products(), id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.store.products().list().await?)
    }

    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product, AppError> {
        patch.validate()?;
        updated(self.store.products().update(id, patch).await?, id)
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), AppError> {
        deleted::<Product>(self.store.products().delete(id).await?, id)
    }

    pub async fn create_supplier(&self, new: NewSupplier) -> Result<Supplier, AppError> {
        new.validate()?;
        let supplier = self.store.suppliers().insert(new).await?;
        tracing::info!(supplier_id = %supplier.id, "supplier created");
        Ok(supplier)
    }

    pub async fn get_supplier(&self, id: &str) -> Result<Supplier, AppError> {
        require(self.store.suppliers(), id).await
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        Ok(self.store.suppliers().list().await?)
    }

    pub async fn update_supplier(
        &self,
        id: &str,
        patch: SupplierPatch,
    ) -> Result<Supplier, AppError> {
        patch.validate()?;
        updated(self.store.suppliers().update(id, patch).await?, id)
    }

    pub async fn delete_supplier(&self, id: &str) -> Result<(), AppError> {
        deleted::<Supplier>(self.store.suppliers().delete(id).await?, id)
    }
}

fn updated<T: Record>(record: Option<T>, id: &str) -> Result<T, AppError> {
    match record {
        Some(record) => {
            let kind = T::KIND;
            tracing::info!(%kind, id = %id, "record updated");
            Ok(record)
        }
        None => Err(AppError::not_found(T::KIND, id)),
    }
}

fn deleted<T: Record>(found: bool, id: &str) -> Result<(), AppError> {
    if found {
        let kind = T::KIND;
        tracing::info!(%kind, id = %id, "record deleted");
        Ok(())
    } else {
        Err(AppError::not_found(T::KIND, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_repo::InMemoryStore;
    use inventory_types::domain::validation::ValidationError;
    use inventory_types::ports::repository::EntityKind;

    fn widget() -> NewProduct {
        NewProduct {
            sku: "P1".into(),
            name: "Widget".into(),
            price: 10.0,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn product_crud() {
        let svc = CatalogService::new(InMemoryStore::new());
        let created = svc.create_product(widget()).await.unwrap();

        let updated = svc
            .update_product(
                &created.id,
                ProductPatch {
                    name: Some("Widget Pro".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Widget Pro");
        assert_eq!(updated.price, 10.0);

        assert_eq!(svc.list_products().await.unwrap(), vec![updated.clone()]);
        svc.delete_product(&created.id).await.unwrap();

        let missing = svc.get_product(&created.id).await;
        assert!(matches!(
            missing,
            Err(AppError::NotFound {
                kind: EntityKind::Product,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn supplier_crud_and_not_found() {
        let svc = CatalogService::new(InMemoryStore::new());
        let created = svc
            .create_supplier(NewSupplier {
                name: "Acme".into(),
                contact: None,
            })
            .await
            .unwrap();
        assert_eq!(svc.get_supplier(&created.id).await.unwrap(), created);

        let res = svc
            .update_supplier("SUP-missing", SupplierPatch::default())
            .await;
        assert!(matches!(
            res,
            Err(AppError::NotFound {
                kind: EntityKind::Supplier,
                ..
            })
        ));
        let res = svc.delete_supplier("SUP-missing").await;
        assert!(matches!(res, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn invalid_payloads_are_bad_requests() {
        let store = InMemoryStore::new();
        let svc = CatalogService::new(store.clone());

        let mut negative = widget();
        negative.price = -5.0;
        let res = svc.create_product(negative).await;
        assert!(matches!(
            res,
            Err(AppError::Validation(ValidationError::InvalidPrice("price")))
        ));

        let res = svc
            .create_supplier(NewSupplier {
                name: " ".into(),
                contact: None,
            })
            .await;
        assert!(matches!(
            res,
            Err(AppError::Validation(ValidationError::Empty("name")))
        ));

        assert_eq!(store.products().count().await.unwrap(), 0);
        assert_eq!(store.suppliers().count().await.unwrap(), 0);
    }
}
