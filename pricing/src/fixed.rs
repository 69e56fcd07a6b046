//! Legacy fixed-price mechanism: one flat price per project, no time gating.

use std::collections::HashMap;

use artmint_core::{Project, ProjectId, RoleGate};

use crate::auction::PriceQuote;
use crate::error::{PricingError, Result};

#[derive(Debug, Clone, Default)]
pub struct FixedPriceEngine {
    prices: HashMap<ProjectId, u64>,
}

impl FixedPriceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flat unit price. Callable by the project's artist or a
    /// privileged role.
    pub fn update_price(
        &mut self,
        project: &Project,
        caller: &str,
        roles: &dyn RoleGate,
        price: u64,
    ) -> Result<()> {
        if caller != project.artist_address && !roles.is_privileged(caller) {
            return Err(PricingError::Unauthorized);
        }
        self.prices.insert(project.id, price);
        log::info!("fixed price for project {} set to {}", project.id, price);
        Ok(())
    }

    pub fn price_at(&self, project_id: ProjectId) -> PriceQuote {
        match self.prices.get(&project_id) {
            Some(&price) => PriceQuote {
                is_configured: true,
                price,
            },
            None => PriceQuote::unconfigured(),
        }
    }
}
