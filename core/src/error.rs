//! Registry error types

use thiserror::Error;

use crate::types::ProjectId;

/// Project registry and configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Caller is not authorized for this operation")]
    Unauthorized,

    #[error("Project not found: {0}")]
    NotFound(ProjectId),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Must not exceed max invocations for project {0}")]
    MaxInvocationsExceeded(ProjectId),

    #[error("Project {0} is locked")]
    ProjectLocked(ProjectId),

    #[error("Proposed payment configuration for project {0} does not match the pending proposal")]
    ProposalMismatch(ProjectId),

    #[error("No pending payment proposal for project {0}")]
    NoPendingProposal(ProjectId),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
