//! Settlement error types

use thiserror::Error;

/// Fund movement errors. Any failure aborts the whole request that
/// triggered the settlement; there are no partial payouts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    #[error("Transfer of {amount} to {to} failed")]
    TransferFailed { to: String, amount: u64 },

    #[error("Payout total overflows")]
    AmountOverflow,
}

pub type Result<T> = std::result::Result<T, SettlementError>;
