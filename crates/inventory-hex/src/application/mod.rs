pub mod catalog_service;
pub mod order_service;
pub mod resolver;
pub mod seed;
pub mod status;

use inventory_types::ports::repository::{Record, Repository};

use crate::errors::AppError;

/// Fetches a record or fails with `NotFound` for its kind.
pub(crate) async fn require<T, R>(repo: &R, id: &str) -> Result<T, AppError>
where
    T: Record,
    R: Repository<T>,
{
    repo.get(id)
        .await?
        .ok_or_else(|| AppError::not_found(T::KIND, id))
}
