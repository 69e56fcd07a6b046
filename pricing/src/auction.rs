//! Dutch-auction pricing: a unit price that decreases linearly with time
//! between a configured start and end instant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use artmint_core::{Project, ProjectId, RoleGate};

use crate::error::{PricingError, Result};

/// Floor applied to newly configured auctions (one hour).
pub const DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS: u64 = 3600;

/// One project's auction parameters, replaced wholesale on every
/// reconfiguration. Invariants: `end_time > start_time` and
/// `start_price > base_price`, both enforced at configuration time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuctionParams {
    pub start_time: u64,
    pub end_time: u64,
    pub start_price: u64,
    pub base_price: u64,
}

impl AuctionParams {
    /// Price at `now`: `start_price` before the auction, `base_price` at or
    /// after `end_time`, linear interpolation in between. All arithmetic is
    /// integer; the decay term truncates toward zero.
    pub fn price_at(&self, now: u64) -> u64 {
        if now < self.start_time {
            return self.start_price;
        }
        if now >= self.end_time {
            return self.base_price;
        }
        let elapsed = (now - self.start_time) as u128;
        let duration = (self.end_time - self.start_time) as u128;
        let range = (self.start_price - self.base_price) as u128;
        self.start_price - (range * elapsed / duration) as u64
    }
}

/// Result of a price query. Unconfigured projects quote a price of zero
/// with `is_configured == false`, distinguishing "no auction yet" from an
/// active auction priced at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceQuote {
    pub is_configured: bool,
    pub price: u64,
}

impl PriceQuote {
    pub fn unconfigured() -> Self {
        PriceQuote {
            is_configured: false,
            price: 0,
        }
    }
}

/// Per-project Dutch-auction parameter store and price calculator.
#[derive(Debug, Clone)]
pub struct AuctionEngine {
    auctions: HashMap<ProjectId, AuctionParams>,
    minimum_auction_length_seconds: u64,
}

impl AuctionEngine {
    pub fn new() -> Self {
        AuctionEngine {
            auctions: HashMap::new(),
            minimum_auction_length_seconds: DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS,
        }
    }

    /// Replaces the stored parameters for a project. Callable by the
    /// project's artist or a privileged role.
    pub fn set_auction_details(
        &mut self,
        project: &Project,
        caller: &str,
        roles: &dyn RoleGate,
        start_time: u64,
        end_time: u64,
        start_price: u64,
        base_price: u64,
    ) -> Result<()> {
        if caller != project.artist_address && !roles.is_privileged(caller) {
            return Err(PricingError::Unauthorized);
        }
        if end_time <= start_time {
            return Err(PricingError::InvalidOrdering);
        }
        let length = end_time - start_time;
        if length < self.minimum_auction_length_seconds {
            return Err(PricingError::AuctionTooShort {
                length,
                minimum: self.minimum_auction_length_seconds,
            });
        }
        if start_price <= base_price {
            return Err(PricingError::PriceOrdering {
                start_price,
                base_price,
            });
        }
        self.auctions.insert(
            project.id,
            AuctionParams {
                start_time,
                end_time,
                start_price,
                base_price,
            },
        );
        log::info!(
            "auction configured for project {}: {} -> {} over [{}, {})",
            project.id,
            start_price,
            base_price,
            start_time,
            end_time
        );
        Ok(())
    }

    pub fn params(&self, project_id: ProjectId) -> Option<&AuctionParams> {
        self.auctions.get(&project_id)
    }

    /// Pure price query; never fails.
    pub fn price_at(&self, project_id: ProjectId, now: u64) -> PriceQuote {
        match self.auctions.get(&project_id) {
            Some(params) => PriceQuote {
                is_configured: true,
                price: params.price_at(now),
            },
            None => PriceQuote::unconfigured(),
        }
    }

    pub fn minimum_auction_length_seconds(&self) -> u64 {
        self.minimum_auction_length_seconds
    }

    /// Privileged. Applies only to auctions configured afterwards;
    /// already-stored parameters are never re-validated.
    pub fn set_minimum_auction_length_seconds(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        seconds: u64,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(PricingError::Unauthorized);
        }
        self.minimum_auction_length_seconds = seconds;
        log::info!("minimum auction length updated to {}s", seconds);
        Ok(())
    }
}

impl Default for AuctionEngine {
    fn default() -> Self {
        Self::new()
    }
}
