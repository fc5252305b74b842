use std::time::Duration;

use anyhow::Context;
use inventory_types::domain::order::{CreateOrderRequest, Order, UpdateOrderRequest};
use inventory_types::domain::product::{NewProduct, Product, ProductPatch};
use inventory_types::domain::supplier::{NewSupplier, Supplier, SupplierPatch};
use inventory_types::domain::HealthReport;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone)]
pub struct InventoryClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// Typed client for the `/api` routes. `base_url` should end with `/` so
/// relative paths join beneath it, e.g. `http://localhost:3000/api/`.
#[derive(Clone)]
pub struct InventoryClient {
    base: Url,
    client: reqwest::Client,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<InventoryClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(InventoryClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        tracing::debug!(path, "GET");
        let res = self
            .client
            .get(self.url(path)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        tracing::debug!(path, "POST");
        let res = self
            .client
            .post(self.url(path)?)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        tracing::debug!(path, "PUT");
        let res = self
            .client
            .put(self.url(path)?)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn delete(&self, path: &str) -> anyhow::Result<()> {
        tracing::debug!(path, "DELETE");
        self.client
            .delete(self.url(path)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn health(&self) -> anyhow::Result<HealthReport> {
        self.get_json("health").await
    }

    pub async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        self.get_json("products").await
    }

    pub async fn get_product(&self, id: &str) -> anyhow::Result<Product> {
        self.get_json(&format!("products/{id}")).await
    }

    pub async fn create_product(&self, req: &NewProduct) -> anyhow::Result<Product> {
        self.post_json("products", req).await
    }

    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> anyhow::Result<Product> {
        self.put_json(&format!("products/{id}"), patch).await
    }

    pub async fn delete_product(&self, id: &str) -> anyhow::Result<()> {
        self.delete(&format!("products/{id}")).await
    }

    pub async fn list_suppliers(&self) -> anyhow::Result<Vec<Supplier>> {
        self.get_json("suppliers").await
    }

    pub async fn get_supplier(&self, id: &str) -> anyhow::Result<Supplier> {
        self.get_json(&format!("suppliers/{id}")).await
    }

    pub async fn create_supplier(&self, req: &NewSupplier) -> anyhow::Result<Supplier> {
        self.post_json("suppliers", req).await
    }

    pub async fn update_supplier(
        &self,
        id: &str,
        patch: &SupplierPatch,
    ) -> anyhow::Result<Supplier> {
        self.put_json(&format!("suppliers/{id}"), patch).await
    }

    pub async fn delete_supplier(&self, id: &str) -> anyhow::Result<()> {
        self.delete(&format!("suppliers/{id}")).await
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        self.get_json("orders").await
    }

    pub async fn get_order(&self, id: &str) -> anyhow::Result<Order> {
        self.get_json(&format!("orders/{id}")).await
    }

    pub async fn create_order(&self, req: &CreateOrderRequest) -> anyhow::Result<Order> {
        self.post_json("orders", req).await
    }

    pub async fn update_order(&self, id: &str, req: &UpdateOrderRequest) -> anyhow::Result<Order> {
        self.put_json(&format!("orders/{id}"), req).await
    }

    pub async fn delete_order(&self, id: &str) -> anyhow::Result<()> {
        self.delete(&format!("orders/{id}")).await
    }
}

impl InventoryClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<InventoryClient> {
        if let Some(client) = self.client {
            return Ok(InventoryClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(InventoryClient {
            base: self.base,
            client,
        })
    }
}
