use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be a finite, non-negative number")]
    InvalidPrice(&'static str),

    #[error("item {0}: qty must be > 0")]
    ZeroQuantity(usize),

    #[error("order must contain at least one item")]
    NoItems,
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}

pub(crate) fn require_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidPrice(field));
    }
    Ok(())
}
