//! Mint authorization: which mechanism may mint for which project.
//!
//! A mechanism must first be admitted to a process-wide approved set, then
//! bound per project; each project has at most one bound mechanism and a
//! new binding atomically replaces the old one.

use std::collections::{HashMap, HashSet};

use artmint_core::{ProjectId, ProjectRegistry, RoleGate};
use pricing::{Mechanism, MechanismId};

use crate::error::{MintError, Result};

#[derive(Debug, Clone)]
pub struct MintAuthorizer {
    registry_id: u64,
    approved: HashSet<MechanismId>,
    bindings: HashMap<ProjectId, MechanismId>,
}

impl MintAuthorizer {
    /// Built against one specific registry; mechanisms constructed against
    /// any other registry are rejected at approval time.
    pub fn new(registry: &ProjectRegistry) -> Self {
        MintAuthorizer {
            registry_id: registry.registry_id(),
            approved: HashSet::new(),
            bindings: HashMap::new(),
        }
    }

    pub fn registry_id(&self) -> u64 {
        self.registry_id
    }

    /// Privileged. Fails with `IllegalPairing` when the mechanism was built
    /// against a different registry.
    pub fn add_approved_mechanism(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        mechanism: &Mechanism,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(MintError::Unauthorized);
        }
        if mechanism.registry_id() != self.registry_id {
            return Err(MintError::IllegalPairing(format!(
                "mechanism {} was built against another registry",
                mechanism.id()
            )));
        }
        self.approved.insert(mechanism.id().to_string());
        log::info!("mechanism {} approved", mechanism.id());
        Ok(())
    }

    /// Privileged. Refused while any project still binds the mechanism, so
    /// no binding can dangle on a disapproved mechanism.
    pub fn remove_approved_mechanism(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        mechanism_id: &str,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(MintError::Unauthorized);
        }
        if self.bindings.values().any(|bound| bound == mechanism_id) {
            return Err(MintError::MechanismInUse(mechanism_id.to_string()));
        }
        if !self.approved.remove(mechanism_id) {
            return Err(MintError::UnknownMechanism(mechanism_id.to_string()));
        }
        log::info!("mechanism {} disapproved", mechanism_id);
        Ok(())
    }

    /// Privileged. The mechanism must already be approved; the previous
    /// binding, if any, is replaced atomically.
    pub fn set_mechanism_for_project(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        project_id: ProjectId,
        mechanism_id: &str,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(MintError::Unauthorized);
        }
        if !self.approved.contains(mechanism_id) {
            return Err(MintError::IllegalPairing(format!(
                "mechanism {} is not in the approved set",
                mechanism_id
            )));
        }
        self.bindings
            .insert(project_id, mechanism_id.to_string());
        log::info!("project {} bound to mechanism {}", project_id, mechanism_id);
        Ok(())
    }

    /// Privileged. Leaves the project with no authorized mechanism.
    pub fn remove_mechanism_for_project(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        project_id: ProjectId,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(MintError::Unauthorized);
        }
        self.bindings.remove(&project_id);
        Ok(())
    }

    pub fn mechanism_for_project(&self, project_id: ProjectId) -> Option<&MechanismId> {
        self.bindings.get(&project_id)
    }

    pub fn is_approved(&self, mechanism_id: &str) -> bool {
        self.approved.contains(mechanism_id)
    }
}
