use std::fmt;

use async_trait::async_trait;

use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::supplier::Supplier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Supplier,
    Order,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Product => "product",
            EntityKind::Supplier => "supplier",
            EntityKind::Order => "order",
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    /// Failure reported by a store adapter; the in-memory store never raises it.
    #[error("store error: {0}")]
    Store(String),
}

/// A storable entity. The store assigns ids; `New` is what a caller hands
/// in on insert and `Patch` is merged into an existing record on update.
pub trait Record: Clone + Send + Sync + 'static {
    type New: Send + 'static;
    type Patch: Send + 'static;

    const KIND: EntityKind;
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
    fn create(id: String, new: Self::New) -> Self;
    fn apply(&mut self, patch: Self::Patch);
}

#[async_trait]
pub trait Repository<T: Record>: Send + Sync + 'static {
    async fn get(&self, id: &str) -> Result<Option<T>, RepoError>;
    /// Records in insertion order.
    async fn list(&self) -> Result<Vec<T>, RepoError>;
    async fn insert(&self, new: T::New) -> Result<T, RepoError>;
    async fn update(&self, id: &str, patch: T::Patch) -> Result<Option<T>, RepoError>;
    async fn delete(&self, id: &str) -> Result<bool, RepoError>;
    async fn count(&self) -> Result<usize, RepoError>;
}

/// The three entity collections, injected into the application services.
pub trait EntityStore: Clone + Send + Sync + 'static {
    type Products: Repository<Product>;
    type Suppliers: Repository<Supplier>;
    type Orders: Repository<Order>;

    fn products(&self) -> &Self::Products;
    fn suppliers(&self) -> &Self::Suppliers;
    fn orders(&self) -> &Self::Orders;
}
