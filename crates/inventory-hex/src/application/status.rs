use chrono::Utc;
use inventory_types::domain::{CollectionCounts, HealthReport};
use inventory_types::ports::repository::{EntityStore, Repository};

use crate::errors::AppError;

pub async fn collection_counts<S: EntityStore>(store: &S) -> Result<CollectionCounts, AppError> {
    Ok(CollectionCounts {
        products: store.products().count().await?,
        suppliers: store.suppliers().count().await?,
        orders: store.orders().count().await?,
    })
}

pub async fn health_report<S: EntityStore>(store: &S) -> Result<HealthReport, AppError> {
    Ok(HealthReport {
        status: "OK".into(),
        timestamp: Utc::now(),
        counts: collection_counts(store).await?,
    })
}
