///  To run :
///  cargo r --example client_example
use inventory_client::InventoryClient;
use inventory_hex::inbound::http::{AppState, HttpServer, HttpServerConfig};
use inventory_repo::build_store;
use inventory_types::domain::order::{CreateOrderRequest, OrderLine, OrderStatus, UpdateOrderRequest};
use inventory_types::domain::product::NewProduct;
use inventory_types::domain::supplier::{NewSupplier, SupplierPatch};
use reqwest::StatusCode;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start server on ephemeral port with an empty in-memory store.
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/api/");

    let server = HttpServer::new(
        AppState::new(build_store()),
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = InventoryClient::new(&addr)?;
    let supplier = client
        .create_supplier(&NewSupplier {
            name: "Acme".into(),
            contact: Some("a@acme.test".into()),
        })
        .await?;
    let product = client
        .create_product(&NewProduct {
            sku: "P1".into(),
            name: "Widget".into(),
            price: 10.0,
            stock: 5,
        })
        .await?;

    let created = client
        .create_order(&CreateOrderRequest {
            supplier_id: supplier.id.clone(),
            items: vec![
                OrderLine {
                    product_id: product.id.clone(),
                    qty: 3,
                    price: None,
                },
                OrderLine {
                    product_id: "PRD-discontinued".into(),
                    qty: 1,
                    price: None,
                },
            ],
            status: None,
        })
        .await?;
    println!("Created order id={}", created.id);
    for item in &created.items {
        println!("  {} x{} @ {}", item.product.name(), item.qty, item.price);
    }
    assert_eq!(created.status, OrderStatus::Pending);

    // Renaming the supplier leaves the order's copy alone.
    client
        .update_supplier(
            &supplier.id,
            &SupplierPatch {
                name: Some("Acme Ltd".into()),
                contact: None,
            },
        )
        .await?;

    let updated = client
        .update_order(
            &created.id,
            &UpdateOrderRequest {
                status: Some(OrderStatus::Received),
                ..Default::default()
            },
        )
        .await?;
    println!(
        "Updated status={:?}, supplier on order still {:?}",
        updated.status, updated.supplier.name
    );

    // Ordering from a supplier that does not exist is a client error.
    let rejected = client
        .create_order(&CreateOrderRequest {
            supplier_id: "SUP-unknown".into(),
            items: vec![OrderLine {
                product_id: product.id.clone(),
                qty: 1,
                price: None,
            }],
            status: None,
        })
        .await;
    match rejected {
        Ok(order) => anyhow::bail!("unexpectedly created order {}", order.id),
        Err(err) => {
            let status = err
                .downcast_ref::<reqwest::Error>()
                .and_then(|e| e.status());
            assert_eq!(status, Some(StatusCode::BAD_REQUEST));
            println!("Unknown supplier rejected with 400");
        }
    }

    client.delete_order(&created.id).await?;
    println!("Deleted order; health: {:?}", client.health().await?.counts);

    handle.abort();
    Ok(())
}
