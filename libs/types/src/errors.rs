//! Error taxonomy for the book and the matching engine
//!
//! Rejects at the submission boundary are programmer errors surfaced as
//! `Result`s; an unknown id on cancel is a silent no-op and never an error.

use crate::ids::OrderId;
use thiserror::Error;

/// Errors raised by `OrderBook::add_limit`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    #[error("add_limit expects a limit order")]
    NotALimitOrder,

    #[error("duplicate order id: {0}")]
    DuplicateId(OrderId),

    #[error("qty must be positive")]
    InvalidQuantity,

    #[error("limit_price must be > 0")]
    InvalidPrice,
}

/// Errors raised by the matching engine's submit calls
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("order qty must be > 0")]
    InvalidQuantity,

    #[error("limit price must be > 0")]
    InvalidPrice,

    #[error("book rejected residual: {0}")]
    Book(#[from] BookError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_error_display() {
        assert_eq!(
            BookError::DuplicateId(42).to_string(),
            "duplicate order id: 42"
        );
        assert_eq!(BookError::InvalidQuantity.to_string(), "qty must be positive");
    }

    #[test]
    fn test_engine_error_from_book_error() {
        let err: EngineError = BookError::DuplicateId(1).into();
        assert!(matches!(err, EngineError::Book(BookError::DuplicateId(1))));
    }
}
