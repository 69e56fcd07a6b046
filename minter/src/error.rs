//! Mint authorization and purchase errors

use thiserror::Error;

use artmint_core::{ProjectId, RegistryError, TokenId};
use pricing::PricingError;
use settlement::SettlementError;

/// Purchase-path errors. Every validation failure surfaces distinctly so a
/// client can tell "too early" from "too cheap" from "sold out"; all are
/// terminal for the request that raised them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MintError {
    #[error("Caller is not the authorized mechanism for this project")]
    Unauthorized,

    #[error("Project {0} is not available for minting")]
    ProjectNotAvailable(ProjectId),

    #[error("Auction not yet started (starts at {starts_at})")]
    AuctionNotStarted { starts_at: u64 },

    #[error("Must send minimum value to mint: sent {sent}, require {required}")]
    InsufficientPayment { sent: u64, required: u64 },

    #[error("Must not exceed max invocations for project {0}")]
    MaxInvocationsExceeded(ProjectId),

    #[error("Illegal contract pairing: {0}")]
    IllegalPairing(String),

    #[error("Mechanism {0} is still bound to a project")]
    MechanismInUse(String),

    #[error("Purchases for another address are disabled for this project")]
    RedirectionDisabled,

    #[error("Unknown mechanism: {0}")]
    UnknownMechanism(String),

    #[error("Mechanism {0} does not support this operation")]
    UnsupportedOperation(String),

    #[error("No price configured for project {0}")]
    PriceNotConfigured(ProjectId),

    #[error("Token {0} does not exist")]
    UnknownToken(TokenId),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

pub type Result<T> = std::result::Result<T, MintError>;
