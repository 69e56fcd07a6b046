//! Pricing error types

use thiserror::Error;

/// Auction and fixed-price configuration errors.
///
/// All configuration problems are rejected here, at configuration time,
/// never deferred to mint time.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PricingError {
    #[error("Only the project artist or a privileged role may do this")]
    Unauthorized,

    #[error("Auction end must be greater than auction start")]
    InvalidOrdering,

    #[error("Auction length {length}s is below the minimum of {minimum}s")]
    AuctionTooShort { length: u64, minimum: u64 },

    #[error("Auction start price {start_price} must be greater than base price {base_price}")]
    PriceOrdering { start_price: u64, base_price: u64 },
}

pub type Result<T> = std::result::Result<T, PricingError>;
