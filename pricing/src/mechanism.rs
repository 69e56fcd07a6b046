//! The pluggable minting-mechanism capability set.
//!
//! A mechanism is constructed against one specific project registry and can
//! never be paired with another; the captured `registry_id` is checked when
//! the mechanism is approved for use.

use artmint_core::{ProjectId, ProjectRegistry};

use crate::auction::{AuctionEngine, PriceQuote};
use crate::fixed::FixedPriceEngine;

pub type MechanismId = String;

#[derive(Debug, Clone)]
pub enum MechanismKind {
    FixedPrice(FixedPriceEngine),
    DutchAuction(AuctionEngine),
}

#[derive(Debug, Clone)]
pub struct Mechanism {
    id: MechanismId,
    registry_id: u64,
    kind: MechanismKind,
}

impl Mechanism {
    pub fn fixed_price(id: &str, registry: &ProjectRegistry) -> Self {
        Mechanism {
            id: id.to_string(),
            registry_id: registry.registry_id(),
            kind: MechanismKind::FixedPrice(FixedPriceEngine::new()),
        }
    }

    pub fn dutch_auction(id: &str, registry: &ProjectRegistry) -> Self {
        Mechanism {
            id: id.to_string(),
            registry_id: registry.registry_id(),
            kind: MechanismKind::DutchAuction(AuctionEngine::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn registry_id(&self) -> u64 {
        self.registry_id
    }

    pub fn kind(&self) -> &MechanismKind {
        &self.kind
    }

    /// Single price interface over both variants.
    pub fn price_at(&self, project_id: ProjectId, now: u64) -> PriceQuote {
        match &self.kind {
            MechanismKind::FixedPrice(engine) => engine.price_at(project_id),
            MechanismKind::DutchAuction(engine) => engine.price_at(project_id, now),
        }
    }

    /// Start instant of the project's auction, if this mechanism is a
    /// configured Dutch auction. Fixed-price mechanisms have no time gate.
    pub fn auction_start_time(&self, project_id: ProjectId) -> Option<u64> {
        match &self.kind {
            MechanismKind::DutchAuction(engine) => {
                engine.params(project_id).map(|params| params.start_time)
            }
            MechanismKind::FixedPrice(_) => None,
        }
    }

    pub fn as_auction_mut(&mut self) -> Option<&mut AuctionEngine> {
        match &mut self.kind {
            MechanismKind::DutchAuction(engine) => Some(engine),
            MechanismKind::FixedPrice(_) => None,
        }
    }

    pub fn as_fixed_price_mut(&mut self) -> Option<&mut FixedPriceEngine> {
        match &mut self.kind {
            MechanismKind::FixedPrice(engine) => Some(engine),
            MechanismKind::DutchAuction(_) => None,
        }
    }
}
