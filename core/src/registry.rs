//! Project registry and the payment-config propose/accept protocol

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config;
use crate::error::{RegistryError, Result};
use crate::project::Project;
use crate::types::{Address, PaymentConfig, ProjectId};

/// Role check consulted by every administrative operation.
pub trait RoleGate {
    fn is_privileged(&self, caller: &str) -> bool;
}

/// Set-backed admin list implementing [`RoleGate`].
#[derive(Debug, Clone, Default)]
pub struct AdminSet {
    admins: HashSet<Address>,
}

impl AdminSet {
    pub fn new(initial_admin: &str) -> Self {
        let mut admins = HashSet::new();
        admins.insert(initial_admin.to_string());
        AdminSet { admins }
    }

    pub fn add_admin(&mut self, caller: &str, admin: &str) -> Result<()> {
        if !self.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        self.admins.insert(admin.to_string());
        Ok(())
    }

    pub fn remove_admin(&mut self, caller: &str, admin: &str) -> Result<()> {
        if !self.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        self.admins.remove(admin);
        Ok(())
    }
}

impl RoleGate for AdminSet {
    fn is_privileged(&self, caller: &str) -> bool {
        self.admins.contains(caller)
    }
}

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

/// Owns per-project identity, lifecycle flags, invocation counters, and
/// payment configurations.
///
/// Payment identity changes go through a two-step propose/accept protocol:
/// the artist proposes, an admin accepts an exact copy of the proposal.
/// There is no direct setter, so no single party can redirect proceeds.
#[derive(Debug)]
pub struct ProjectRegistry {
    registry_id: u64,
    projects: HashMap<ProjectId, Project>,
    payment_configs: HashMap<ProjectId, PaymentConfig>,
    pending_proposals: HashMap<ProjectId, PaymentConfig>,
    next_project_id: ProjectId,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        ProjectRegistry {
            registry_id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            projects: HashMap::new(),
            payment_configs: HashMap::new(),
            pending_proposals: HashMap::new(),
            next_project_id: 0,
        }
    }

    /// Process-unique identity, used for mechanism pairing checks.
    pub fn registry_id(&self) -> u64 {
        self.registry_id
    }

    pub fn add_project(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        name: &str,
        artist_address: &str,
    ) -> Result<ProjectId> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        let id = self.next_project_id;
        self.next_project_id += 1;
        self.projects.insert(id, Project::new(id, name, artist_address));
        self.payment_configs
            .insert(id, PaymentConfig::for_artist(artist_address));
        log::info!("project {} ({}) added for artist {}", id, name, artist_address);
        Ok(id)
    }

    pub fn get(&self, id: ProjectId) -> Result<&Project> {
        self.projects.get(&id).ok_or(RegistryError::NotFound(id))
    }

    pub fn count(&self) -> usize {
        self.projects.len()
    }

    fn get_mut(&mut self, id: ProjectId) -> Result<&mut Project> {
        self.projects.get_mut(&id).ok_or(RegistryError::NotFound(id))
    }

    pub fn toggle_active(&mut self, caller: &str, roles: &dyn RoleGate, id: ProjectId) -> Result<bool> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        let project = self.get_mut(id)?;
        project.active = !project.active;
        Ok(project.active)
    }

    pub fn toggle_paused(&mut self, caller: &str, id: ProjectId) -> Result<bool> {
        let project = self.get_mut(id)?;
        if caller != project.artist_address {
            return Err(RegistryError::Unauthorized);
        }
        project.paused = !project.paused;
        Ok(project.paused)
    }

    /// Irreversibly freezes project configuration.
    pub fn lock(&mut self, caller: &str, roles: &dyn RoleGate, id: ProjectId) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        let project = self.get_mut(id)?;
        project.locked = true;
        log::info!("project {} locked", id);
        Ok(())
    }

    /// Artist-set supply ceiling. Never below the tokens already minted;
    /// once locked the ceiling may only be lowered.
    pub fn update_max_invocations(&mut self, caller: &str, id: ProjectId, new_max: u64) -> Result<()> {
        let project = self.get_mut(id)?;
        if caller != project.artist_address {
            return Err(RegistryError::Unauthorized);
        }
        if new_max < project.invocations {
            return Err(RegistryError::InvalidConfiguration(format!(
                "max invocations {} is below {} already minted",
                new_max, project.invocations
            )));
        }
        if project.locked && new_max > project.max_invocations {
            return Err(RegistryError::ProjectLocked(id));
        }
        project.max_invocations = new_max;
        Ok(())
    }

    pub fn update_secondary_royalty_percentage(
        &mut self,
        caller: &str,
        id: ProjectId,
        percentage: u64,
    ) -> Result<()> {
        let project = self.get_mut(id)?;
        if caller != project.artist_address {
            return Err(RegistryError::Unauthorized);
        }
        if percentage > config::MAX_ARTIST_SECONDARY_ROYALTY_PERCENTAGE {
            return Err(RegistryError::InvalidConfiguration(format!(
                "royalty percentage {} exceeds maximum {}",
                percentage,
                config::MAX_ARTIST_SECONDARY_ROYALTY_PERCENTAGE
            )));
        }
        project.secondary_royalty_percentage = percentage;
        Ok(())
    }

    /// Consumes one invocation and returns the new count, failing with no
    /// state change when the ceiling is reached.
    pub fn increment_invocations(&mut self, id: ProjectId) -> Result<u64> {
        let project = self.get_mut(id)?;
        if project.invocations >= project.max_invocations {
            return Err(RegistryError::MaxInvocationsExceeded(id));
        }
        project.invocations += 1;
        Ok(project.invocations)
    }

    /// Unwinds the most recent increment when a later step of the same
    /// request aborts. Must only be called within the failing request.
    pub fn rollback_invocation(&mut self, id: ProjectId) {
        if let Some(project) = self.projects.get_mut(&id) {
            project.invocations = project.invocations.saturating_sub(1);
        }
    }

    pub fn payment_config(&self, id: ProjectId) -> Result<&PaymentConfig> {
        self.payment_configs.get(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Artist stage of the two-step payment identity change.
    pub fn propose_payment_config(
        &mut self,
        caller: &str,
        id: ProjectId,
        proposal: PaymentConfig,
    ) -> Result<()> {
        let project = self.get(id)?;
        if caller != project.artist_address {
            return Err(RegistryError::Unauthorized);
        }
        proposal.validate()?;
        log::debug!("payment proposal recorded for project {}", id);
        self.pending_proposals.insert(id, proposal);
        Ok(())
    }

    /// Admin stage. The accepted value must equal the pending proposal
    /// exactly; on success it becomes the live configuration.
    pub fn accept_payment_config(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        id: ProjectId,
        accepted: PaymentConfig,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        self.get(id)?;
        let pending = self
            .pending_proposals
            .get(&id)
            .ok_or(RegistryError::NoPendingProposal(id))?;
        if *pending != accepted {
            return Err(RegistryError::ProposalMismatch(id));
        }
        self.pending_proposals.remove(&id);
        // Artist identity follows the accepted config.
        let artist = accepted.artist_address.clone();
        self.payment_configs.insert(id, accepted);
        if let Ok(project) = self.get_mut(id) {
            project.artist_address = artist;
        }
        log::info!("payment configuration accepted for project {}", id);
        Ok(())
    }
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYER: &str = "deployer";
    const ARTIST: &str = "artist";

    fn setup() -> (ProjectRegistry, AdminSet, ProjectId) {
        let roles = AdminSet::new(DEPLOYER);
        let mut registry = ProjectRegistry::new();
        let id = registry
            .add_project(DEPLOYER, &roles, "project1", ARTIST)
            .unwrap();
        (registry, roles, id)
    }

    #[test]
    fn test_add_project_requires_privilege() {
        let roles = AdminSet::new(DEPLOYER);
        let mut registry = ProjectRegistry::new();
        let result = registry.add_project("stranger", &roles, "project1", ARTIST);
        assert_eq!(result, Err(RegistryError::Unauthorized));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_project_ids_allocated_monotonically() {
        let roles = AdminSet::new(DEPLOYER);
        let mut registry = ProjectRegistry::new();
        let first = registry.add_project(DEPLOYER, &roles, "a", ARTIST).unwrap();
        let second = registry.add_project(DEPLOYER, &roles, "b", ARTIST).unwrap();
        assert_eq!(first, 0);
        assert_eq!(second, 1);
    }

    #[test]
    fn test_toggle_active_and_paused() {
        let (mut registry, roles, id) = setup();
        assert!(registry.toggle_active(DEPLOYER, &roles, id).unwrap());
        assert!(!registry.toggle_paused(ARTIST, id).unwrap());
        // pause toggle is artist-only
        assert_eq!(
            registry.toggle_paused("stranger", id),
            Err(RegistryError::Unauthorized)
        );
        // active toggle is admin-only
        assert_eq!(
            registry.toggle_active(ARTIST, &roles, id),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_increment_stops_at_ceiling() {
        let (mut registry, _roles, id) = setup();
        registry.update_max_invocations(ARTIST, id, 2).unwrap();
        assert_eq!(registry.increment_invocations(id).unwrap(), 1);
        assert_eq!(registry.increment_invocations(id).unwrap(), 2);
        assert_eq!(
            registry.increment_invocations(id),
            Err(RegistryError::MaxInvocationsExceeded(id))
        );
        // failed increment leaves the counter unchanged
        assert_eq!(registry.get(id).unwrap().invocations, 2);
    }

    #[test]
    fn test_max_invocations_cannot_go_below_minted() {
        let (mut registry, _roles, id) = setup();
        registry.update_max_invocations(ARTIST, id, 5).unwrap();
        registry.increment_invocations(id).unwrap();
        registry.increment_invocations(id).unwrap();
        assert!(registry.update_max_invocations(ARTIST, id, 1).is_err());
        assert!(registry.update_max_invocations(ARTIST, id, 2).is_ok());
    }

    #[test]
    fn test_locked_project_can_only_lower_ceiling() {
        let (mut registry, roles, id) = setup();
        registry.update_max_invocations(ARTIST, id, 10).unwrap();
        registry.lock(DEPLOYER, &roles, id).unwrap();
        assert_eq!(
            registry.update_max_invocations(ARTIST, id, 11),
            Err(RegistryError::ProjectLocked(id))
        );
        assert!(registry.update_max_invocations(ARTIST, id, 5).is_ok());
    }

    #[test]
    fn test_rollback_invocation() {
        let (mut registry, _roles, id) = setup();
        registry.increment_invocations(id).unwrap();
        registry.rollback_invocation(id);
        assert_eq!(registry.get(id).unwrap().invocations, 0);
    }

    #[test]
    fn test_propose_accept_payment_config() {
        let (mut registry, roles, id) = setup();
        let mut proposal = PaymentConfig::for_artist(ARTIST);
        proposal.additional_primary_address = "studio".to_string();
        proposal.additional_primary_percentage = 25;

        registry
            .propose_payment_config(ARTIST, id, proposal.clone())
            .unwrap();
        registry
            .accept_payment_config(DEPLOYER, &roles, id, proposal.clone())
            .unwrap();
        assert_eq!(*registry.payment_config(id).unwrap(), proposal);
    }

    #[test]
    fn test_accept_requires_exact_match() {
        let (mut registry, roles, id) = setup();
        let mut proposal = PaymentConfig::for_artist(ARTIST);
        proposal.additional_primary_address = "studio".to_string();
        proposal.additional_primary_percentage = 25;
        registry
            .propose_payment_config(ARTIST, id, proposal.clone())
            .unwrap();

        let mut tampered = proposal.clone();
        tampered.additional_primary_percentage = 26;
        assert_eq!(
            registry.accept_payment_config(DEPLOYER, &roles, id, tampered),
            Err(RegistryError::ProposalMismatch(id))
        );
        // pending proposal survives a mismatched accept
        assert!(registry
            .accept_payment_config(DEPLOYER, &roles, id, proposal)
            .is_ok());
    }

    #[test]
    fn test_accept_without_proposal() {
        let (mut registry, roles, id) = setup();
        assert_eq!(
            registry.accept_payment_config(DEPLOYER, &roles, id, PaymentConfig::for_artist(ARTIST)),
            Err(RegistryError::NoPendingProposal(id))
        );
    }

    #[test]
    fn test_propose_accept_acl() {
        let (mut registry, roles, id) = setup();
        let proposal = PaymentConfig::for_artist(ARTIST);
        assert_eq!(
            registry.propose_payment_config("stranger", id, proposal.clone()),
            Err(RegistryError::Unauthorized)
        );
        registry
            .propose_payment_config(ARTIST, id, proposal.clone())
            .unwrap();
        assert_eq!(
            registry.accept_payment_config(ARTIST, &roles, id, proposal),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_propose_rejects_bad_percentage() {
        let (mut registry, _roles, id) = setup();
        let mut proposal = PaymentConfig::for_artist(ARTIST);
        proposal.additional_secondary_percentage = 101;
        assert!(registry.propose_payment_config(ARTIST, id, proposal).is_err());
    }

    #[test]
    fn test_accepted_config_updates_artist_identity() {
        let (mut registry, roles, id) = setup();
        let proposal = PaymentConfig::for_artist("artist2");
        registry
            .propose_payment_config(ARTIST, id, proposal.clone())
            .unwrap();
        registry
            .accept_payment_config(DEPLOYER, &roles, id, proposal)
            .unwrap();
        assert_eq!(registry.get(id).unwrap().artist_address, "artist2");
    }

    #[test]
    fn test_royalty_percentage_cap() {
        let (mut registry, _roles, id) = setup();
        assert!(registry
            .update_secondary_royalty_percentage(ARTIST, id, 95)
            .is_ok());
        assert!(registry
            .update_secondary_royalty_percentage(ARTIST, id, 96)
            .is_err());
    }

    #[test]
    fn test_registry_ids_are_distinct() {
        let a = ProjectRegistry::new();
        let b = ProjectRegistry::new();
        assert_ne!(a.registry_id(), b.registry_id());
    }

    #[test]
    fn test_admin_set_management() {
        let mut roles = AdminSet::new(DEPLOYER);
        assert!(roles.add_admin("stranger", "other").is_err());
        roles.add_admin(DEPLOYER, "other").unwrap();
        assert!(roles.is_privileged("other"));
        roles.remove_admin(DEPLOYER, "other").unwrap();
        assert!(!roles.is_privileged("other"));
    }
}
