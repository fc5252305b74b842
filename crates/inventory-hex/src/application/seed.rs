use inventory_types::domain::order::{CreateOrderRequest, OrderLine};
use inventory_types::domain::product::NewProduct;
use inventory_types::domain::supplier::NewSupplier;
use inventory_types::domain::CollectionCounts;
use inventory_types::ports::repository::EntityStore;

use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::application::status::collection_counts;
use crate::errors::AppError;

/// Loads the demo catalog: two products, two suppliers and one pending order
/// for the first supplier. The order goes through the normal compose path.
pub async fn load_sample_data<S: EntityStore>(
    store: &S,
    catalog: &CatalogService<S>,
    orders: &OrderService<S>,
) -> Result<CollectionCounts, AppError> {
    let laptop = catalog
        .create_product(NewProduct {
            sku: "P001".into(),
            name: "Laptop".into(),
            price: 999.99,
            stock: 15,
        })
        .await?;
    let mouse = catalog
        .create_product(NewProduct {
            sku: "P002".into(),
            name: "Wireless Mouse".into(),
            price: 29.99,
            stock: 50,
        })
        .await?;

    let tech = catalog
        .create_supplier(NewSupplier {
            name: "Tech Supplier Inc.".into(),
            contact: Some("contact@techsupplier.com".into()),
        })
        .await?;
    catalog
        .create_supplier(NewSupplier {
            name: "Office Supplies Co.".into(),
            contact: Some("sales@officesupplies.com".into()),
        })
        .await?;

    orders
        .create_order(CreateOrderRequest {
            supplier_id: tech.id,
            items: vec![
                OrderLine {
                    product_id: laptop.id,
                    qty: 5,
                    price: None,
                },
                OrderLine {
                    product_id: mouse.id,
                    qty: 10,
                    price: None,
                },
            ],
            status: None,
        })
        .await?;

    let counts = collection_counts(store).await?;
    tracing::info!(
        products = counts.products,
        suppliers = counts.suppliers,
        orders = counts.orders,
        "sample data loaded"
    );
    Ok(counts)
}
