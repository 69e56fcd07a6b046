//! The purchase gate: authorization, price validation, supply accounting,
//! and settlement for every mint request.
//!
//! Execution is strictly sequential and transactional per request: a
//! purchase either commits entirely (counter, payouts, token) or fails
//! with no observable state change.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use artmint_core::{
    Address, PlatformConfig, ProjectId, ProjectRegistry, RegistryError, RoleGate, TokenId,
    ONE_MILLION,
};
use pricing::{Mechanism, MechanismId, PriceQuote};
use settlement::{primary_split, secondary_split, PrimarySplit, RoyaltyShare, Settlement};

use crate::authorizer::MintAuthorizer;
use crate::error::{MintError, Result};

/// Issues the actual token once a purchase has fully cleared. Called
/// exactly once per successful purchase, never speculatively.
pub trait TokenIssuer {
    fn mint(&mut self, project_id: ProjectId, to: &str, invocation: u64) -> TokenId;
}

/// Token numbering used by the platform:
/// `project_id * ONE_MILLION + invocation index`.
#[derive(Debug, Clone, Default)]
pub struct SequentialIssuer {
    issued: Vec<(TokenId, Address)>,
}

impl SequentialIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issued(&self) -> &[(TokenId, Address)] {
        &self.issued
    }
}

impl TokenIssuer for SequentialIssuer {
    fn mint(&mut self, project_id: ProjectId, to: &str, invocation: u64) -> TokenId {
        // `invocation` is the post-increment count; token numbers start at 0
        let token_id = project_id * ONE_MILLION + (invocation - 1);
        self.issued.push((token_id, to.to_string()));
        token_id
    }
}

/// Record of one committed purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub token_id: TokenId,
    pub project_id: ProjectId,
    pub buyer: Address,
    pub destination: Address,
    pub price_charged: u64,
    pub amount_paid: u64,
    pub split: PrimarySplit,
}

/// Composes the registry, the authorizer, the pricing mechanisms, and the
/// settlement collaborator into the purchase surface.
pub struct MintGate<S: Settlement, I: TokenIssuer> {
    registry: ProjectRegistry,
    platform: PlatformConfig,
    authorizer: MintAuthorizer,
    mechanisms: HashMap<MechanismId, Mechanism>,
    purchase_to_disabled: HashMap<ProjectId, bool>,
    settlement: S,
    issuer: I,
}

impl<S: Settlement, I: TokenIssuer> MintGate<S, I> {
    pub fn new(registry: ProjectRegistry, platform: PlatformConfig, settlement: S, issuer: I) -> Self {
        let authorizer = MintAuthorizer::new(&registry);
        MintGate {
            registry,
            platform,
            authorizer,
            mechanisms: HashMap::new(),
            purchase_to_disabled: HashMap::new(),
            settlement,
            issuer,
        }
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProjectRegistry {
        &mut self.registry
    }

    pub fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut PlatformConfig {
        &mut self.platform
    }

    pub fn authorizer(&self) -> &MintAuthorizer {
        &self.authorizer
    }

    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    pub fn settlement_mut(&mut self) -> &mut S {
        &mut self.settlement
    }

    pub fn issuer(&self) -> &I {
        &self.issuer
    }

    /// Approves the mechanism and takes ownership of it. The authorizer
    /// rejects mechanisms built against a different registry.
    pub fn add_mechanism(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        mechanism: Mechanism,
    ) -> Result<()> {
        self.authorizer
            .add_approved_mechanism(caller, roles, &mechanism)?;
        self.mechanisms.insert(mechanism.id().to_string(), mechanism);
        Ok(())
    }

    pub fn set_mechanism_for_project(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        project_id: ProjectId,
        mechanism_id: &str,
    ) -> Result<()> {
        self.authorizer
            .set_mechanism_for_project(caller, roles, project_id, mechanism_id)
    }

    pub fn remove_mechanism_for_project(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        project_id: ProjectId,
    ) -> Result<()> {
        self.authorizer
            .remove_mechanism_for_project(caller, roles, project_id)
    }

    /// Configures (wholesale-replaces) the Dutch auction a mechanism runs
    /// for one project.
    #[allow(clippy::too_many_arguments)]
    pub fn set_auction_details(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        mechanism_id: &str,
        project_id: ProjectId,
        start_time: u64,
        end_time: u64,
        start_price: u64,
        base_price: u64,
    ) -> Result<()> {
        let project = self.registry.get(project_id)?.clone();
        let mechanism = self
            .mechanisms
            .get_mut(mechanism_id)
            .ok_or_else(|| MintError::UnknownMechanism(mechanism_id.to_string()))?;
        let engine = mechanism
            .as_auction_mut()
            .ok_or_else(|| MintError::UnsupportedOperation(mechanism_id.to_string()))?;
        engine.set_auction_details(
            &project, caller, roles, start_time, end_time, start_price, base_price,
        )?;
        Ok(())
    }

    pub fn set_minimum_auction_length_seconds(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        mechanism_id: &str,
        seconds: u64,
    ) -> Result<()> {
        let mechanism = self
            .mechanisms
            .get_mut(mechanism_id)
            .ok_or_else(|| MintError::UnknownMechanism(mechanism_id.to_string()))?;
        let engine = mechanism
            .as_auction_mut()
            .ok_or_else(|| MintError::UnsupportedOperation(mechanism_id.to_string()))?;
        engine.set_minimum_auction_length_seconds(caller, roles, seconds)?;
        Ok(())
    }

    /// Flat price for a legacy fixed-price mechanism.
    pub fn update_fixed_price(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        mechanism_id: &str,
        project_id: ProjectId,
        price: u64,
    ) -> Result<()> {
        let project = self.registry.get(project_id)?.clone();
        let mechanism = self
            .mechanisms
            .get_mut(mechanism_id)
            .ok_or_else(|| MintError::UnknownMechanism(mechanism_id.to_string()))?;
        let engine = mechanism
            .as_fixed_price_mut()
            .ok_or_else(|| MintError::UnsupportedOperation(mechanism_id.to_string()))?;
        engine.update_price(&project, caller, roles, price)?;
        Ok(())
    }

    /// Privileged toggle; when disabled, purchases may only be delivered to
    /// the buyer itself. Returns the new value.
    pub fn toggle_purchase_to_disabled(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        project_id: ProjectId,
    ) -> Result<bool> {
        if !roles.is_privileged(caller) {
            return Err(MintError::Unauthorized);
        }
        let entry = self.purchase_to_disabled.entry(project_id).or_insert(false);
        *entry = !*entry;
        log::info!("purchase_to disabled for project {}: {}", project_id, *entry);
        Ok(*entry)
    }

    /// Current price through the project's bound mechanism. Projects with
    /// no binding (or no configured price) quote zero, unconfigured.
    pub fn price_quote(&self, project_id: ProjectId, now: u64) -> PriceQuote {
        match self.authorizer.mechanism_for_project(project_id) {
            Some(mechanism_id) => match self.mechanisms.get(mechanism_id) {
                Some(mechanism) => mechanism.price_at(project_id, now),
                None => PriceQuote::unconfigured(),
            },
            None => PriceQuote::unconfigured(),
        }
    }

    /// Primary split preview for an arbitrary gross amount. Read-only.
    pub fn preview_primary_split(&self, project_id: ProjectId, gross: u64) -> Result<PrimarySplit> {
        let payment = self.registry.payment_config(project_id)?;
        Ok(primary_split(payment, &self.platform, gross))
    }

    /// Royalty shares owed on a resale of `token_id`.
    pub fn token_royalties(&self, token_id: TokenId) -> Result<Vec<RoyaltyShare>> {
        let project_id = token_id / ONE_MILLION;
        let token_number = token_id % ONE_MILLION;
        let project = self
            .registry
            .get(project_id)
            .map_err(|_| MintError::UnknownToken(token_id))?;
        if token_number >= project.invocations {
            return Err(MintError::UnknownToken(token_id));
        }
        let payment = self.registry.payment_config(project_id)?;
        Ok(secondary_split(
            payment,
            &self.platform,
            project.secondary_royalty_percentage,
        ))
    }

    /// Purchase delivered to the buyer itself.
    pub fn purchase(
        &mut self,
        mechanism_id: &str,
        buyer: &str,
        project_id: ProjectId,
        payment: u64,
        now: u64,
    ) -> Result<Receipt> {
        self.purchase_to(mechanism_id, buyer, buyer, project_id, payment, now)
    }

    /// Full purchase flow: authorization, availability, redirection,
    /// auction start, price, supply, settlement, issuance — in that order.
    /// Overpayment is accepted and becomes part of the recorded gross sale
    /// amount; no refund is issued here.
    pub fn purchase_to(
        &mut self,
        mechanism_id: &str,
        buyer: &str,
        destination: &str,
        project_id: ProjectId,
        payment: u64,
        now: u64,
    ) -> Result<Receipt> {
        // 1. caller must be the bound mechanism for this project
        match self.authorizer.mechanism_for_project(project_id) {
            Some(bound) if bound == mechanism_id => {}
            _ => return Err(MintError::Unauthorized),
        }

        // 2. project must be active and unpaused; pause blocks the general
        //    public but never the artist
        let project = self
            .registry
            .get(project_id)
            .map_err(|_| MintError::ProjectNotAvailable(project_id))?;
        if !project.active || (project.paused && buyer != project.artist_address) {
            return Err(MintError::ProjectNotAvailable(project_id));
        }

        // 3. destination redirection may be disabled per project;
        //    self-delivery always passes
        if destination != buyer
            && self
                .purchase_to_disabled
                .get(&project_id)
                .copied()
                .unwrap_or(false)
        {
            return Err(MintError::RedirectionDisabled);
        }

        // 4. timed auctions cannot sell before their start instant
        let mechanism = self
            .mechanisms
            .get(mechanism_id)
            .ok_or_else(|| MintError::UnknownMechanism(mechanism_id.to_string()))?;
        if let Some(starts_at) = mechanism.auction_start_time(project_id) {
            if now < starts_at {
                return Err(MintError::AuctionNotStarted { starts_at });
            }
        }

        // 5. payment must cover the current unit price
        let quote = mechanism.price_at(project_id, now);
        if !quote.is_configured {
            return Err(MintError::PriceNotConfigured(project_id));
        }
        if payment < quote.price {
            return Err(MintError::InsufficientPayment {
                sent: payment,
                required: quote.price,
            });
        }

        // 6. consume one invocation; at the ceiling nothing changes
        let invocation = self.registry.increment_invocations(project_id).map_err(|e| match e {
            RegistryError::MaxInvocationsExceeded(id) => MintError::MaxInvocationsExceeded(id),
            other => MintError::Registry(other),
        })?;

        // 7. settle the full payment; a settlement failure unwinds the
        //    counter so the request leaves no partial state behind
        let split = match self.registry.payment_config(project_id) {
            Ok(payment_config) => primary_split(payment_config, &self.platform, payment),
            Err(e) => {
                self.registry.rollback_invocation(project_id);
                return Err(MintError::Registry(e));
            }
        };
        let payouts = split.payouts();
        if let Err(e) = self.settlement.settle(buyer, &payouts) {
            self.registry.rollback_invocation(project_id);
            return Err(MintError::Settlement(e));
        }

        // 8. issue the token
        let token_id = self.issuer.mint(project_id, destination, invocation);
        log::info!(
            "minted token {} for project {} to {} (price {}, paid {})",
            token_id,
            project_id,
            destination,
            quote.price,
            payment
        );

        Ok(Receipt {
            token_id,
            project_id,
            buyer: buyer.to_string(),
            destination: destination.to_string(),
            price_charged: quote.price,
            amount_paid: payment,
            split,
        })
    }
}
