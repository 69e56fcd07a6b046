//! Artmint Settlement Module
//!
//! Revenue and royalty split computation, plus the settlement seam that
//! moves funds to each payee.

pub mod error;
pub mod ledger;
pub mod split;

pub use error::{Result, SettlementError};
pub use ledger::{Ledger, Settlement};
pub use split::{primary_split, secondary_split, Payout, PrimarySplit, RoyaltyShare};
