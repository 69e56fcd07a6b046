//! The settlement seam and an in-memory ledger implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use artmint_core::Address;

use crate::error::{Result, SettlementError};
use crate::split::Payout;

/// Moves sale proceeds to payees. `settle` is all-or-nothing: either every
/// payout applies or none does, so a failed transfer aborts the caller's
/// whole request without partial payout.
pub trait Settlement {
    fn settle(&mut self, from: &str, payouts: &[Payout]) -> Result<()>;
}

/// Account-balance ledger backing the settlement seam in tests and
/// single-process deployments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    balances: HashMap<Address, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deposit(&mut self, to: &str, amount: u64) {
        *self.balances.entry(to.to_string()).or_insert(0) += amount;
    }

    pub fn balance(&self, who: &str) -> u64 {
        self.balances.get(who).copied().unwrap_or(0)
    }
}

impl Settlement for Ledger {
    fn settle(&mut self, from: &str, payouts: &[Payout]) -> Result<()> {
        let mut total: u64 = 0;
        for payout in payouts {
            total = total
                .checked_add(payout.amount)
                .ok_or(SettlementError::AmountOverflow)?;
        }
        let available = self.balance(from);
        if available < total {
            return Err(SettlementError::InsufficientFunds {
                requested: total,
                available,
            });
        }
        // checks done; apply the whole batch
        if let Some(balance) = self.balances.get_mut(from) {
            *balance -= total;
        }
        for payout in payouts {
            *self.balances.entry(payout.to.clone()).or_insert(0) += payout.amount;
        }
        log::debug!("settled {} across {} payees from {}", total, payouts.len(), from);
        Ok(())
    }
}
