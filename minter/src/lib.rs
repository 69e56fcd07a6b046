//! Artmint Minter Module
//!
//! Mint authorization and the purchase gate that ties the registry,
//! pricing mechanisms, and settlement together.

pub mod authorizer;
pub mod error;
pub mod gate;

pub use authorizer::MintAuthorizer;
pub use error::{MintError, Result};
pub use gate::{MintGate, Receipt, SequentialIssuer, TokenIssuer};
