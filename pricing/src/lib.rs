//! Artmint Pricing Module
//!
//! Dutch-auction and fixed-price mechanisms for project sales.

pub mod auction;
pub mod error;
pub mod fixed;
pub mod mechanism;

pub use auction::{AuctionEngine, AuctionParams, PriceQuote, DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS};
pub use error::{PricingError, Result};
pub use fixed::FixedPriceEngine;
pub use mechanism::{Mechanism, MechanismId, MechanismKind};
