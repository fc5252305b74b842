use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    serve, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::application::status::health_report;
use crate::errors::AppError;
use inventory_types::domain::order::{CreateOrderRequest, Order, UpdateOrderRequest};
use inventory_types::domain::product::{NewProduct, Product, ProductPatch};
use inventory_types::domain::supplier::{NewSupplier, Supplier, SupplierPatch};
use inventory_types::domain::HealthReport;
use inventory_types::ports::repository::EntityStore;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

/// Store plus the services built over it; shared by every handler.
pub struct AppState<S: EntityStore> {
    pub store: S,
    pub catalog: CatalogService<S>,
    pub orders: OrderService<S>,
}

impl<S: EntityStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            orders: OrderService::new(store.clone()),
            store,
        }
    }
}

pub struct HttpServer<S: EntityStore> {
    pub state: Arc<AppState<S>>,
    pub config: HttpServerConfig,
}

type Shared<S> = State<Arc<AppState<S>>>;

impl<S: EntityStore> HttpServer<S> {
    pub async fn new(state: AppState<S>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(state),
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        Router::new()
            .route("/api/health", get(health::<S>))
            .route(
                "/api/products",
                get(list_products::<S>).post(create_product::<S>),
            )
            .route(
                "/api/products/{id}",
                get(get_product::<S>)
                    .put(update_product::<S>)
                    .delete(delete_product::<S>),
            )
            .route(
                "/api/suppliers",
                get(list_suppliers::<S>).post(create_supplier::<S>),
            )
            .route(
                "/api/suppliers/{id}",
                get(get_supplier::<S>)
                    .put(update_supplier::<S>)
                    .delete(delete_supplier::<S>),
            )
            .route("/api/orders", get(list_orders::<S>).post(create_order::<S>))
            .route(
                "/api/orders/{id}",
                get(get_order::<S>)
                    .put(update_order::<S>)
                    .delete(delete_order::<S>),
            )
            .layer(trace_layer)
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health<S: EntityStore>(
    State(state): Shared<S>,
) -> Result<Json<HealthReport>, AppError> {
    Ok(Json(health_report(&state.store).await?))
}

async fn list_products<S: EntityStore>(
    State(state): Shared<S>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog.list_products().await?))
}

async fn get_product<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.catalog.get_product(&id).await?))
}

async fn create_product<S: EntityStore>(
    State(state): Shared<S>,
    Json(payload): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.catalog.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.catalog.update_product(&id, payload).await?))
}

async fn delete_product<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_suppliers<S: EntityStore>(
    State(state): Shared<S>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(state.catalog.list_suppliers().await?))
}

async fn get_supplier<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
) -> Result<Json<Supplier>, AppError> {
    Ok(Json(state.catalog.get_supplier(&id).await?))
}

async fn create_supplier<S: EntityStore>(
    State(state): Shared<S>,
    Json(payload): Json<NewSupplier>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let supplier = state.catalog.create_supplier(payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn update_supplier<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
    Json(payload): Json<SupplierPatch>,
) -> Result<Json<Supplier>, AppError> {
    Ok(Json(state.catalog.update_supplier(&id, payload).await?))
}

async fn delete_supplier<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_supplier(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_orders<S: EntityStore>(
    State(state): Shared<S>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.list_orders().await?))
}

async fn get_order<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.get_order(&id).await?))
}

async fn create_order<S: EntityStore>(
    State(state): Shared<S>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn update_order<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.update_order(&id, payload).await?))
}

async fn delete_order<S: EntityStore>(
    State(state): Shared<S>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.orders.delete_order(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
