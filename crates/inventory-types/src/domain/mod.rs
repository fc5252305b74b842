pub mod order;
pub mod product;
pub mod supplier;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection sizes reported by the health endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionCounts {
    pub products: usize,
    pub suppliers: usize,
    pub orders: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub counts: CollectionCounts,
}
