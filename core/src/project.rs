//! Project state and lifecycle flags

use serde::{Deserialize, Serialize};

use crate::config;
use crate::types::{Address, ProjectId};

/// A unit of sale with its own supply cap, pricing, and payee configuration.
///
/// Invariant: `invocations <= max_invocations` at all times, and
/// `invocations` never decreases across committed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub artist_address: Address,
    pub invocations: u64,
    pub max_invocations: u64,
    pub active: bool,
    pub paused: bool,
    pub locked: bool,
    pub secondary_royalty_percentage: u64,
}

impl Project {
    /// New projects start inactive and paused, with the default supply cap.
    pub fn new(id: ProjectId, name: &str, artist_address: &str) -> Self {
        Project {
            id,
            name: name.to_string(),
            artist_address: artist_address.to_string(),
            invocations: 0,
            max_invocations: config::DEFAULT_MAX_INVOCATIONS,
            active: false,
            paused: true,
            locked: false,
            secondary_royalty_percentage: 0,
        }
    }

    /// Whether the supply cap has been reached.
    pub fn is_sold_out(&self) -> bool {
        self.invocations >= self.max_invocations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new(0, "genesis", "artist");
        assert!(!project.active);
        assert!(project.paused);
        assert!(!project.locked);
        assert_eq!(project.invocations, 0);
        assert_eq!(project.max_invocations, config::DEFAULT_MAX_INVOCATIONS);
        assert_eq!(project.secondary_royalty_percentage, 0);
    }

    #[test]
    fn test_sold_out() {
        let mut project = Project::new(0, "genesis", "artist");
        project.max_invocations = 2;
        assert!(!project.is_sold_out());
        project.invocations = 2;
        assert!(project.is_sold_out());
    }
}
