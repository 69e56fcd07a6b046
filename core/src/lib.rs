//! Artmint Core Library
//!
//! Project registry, payment configuration, and platform fee state for the
//! generative-art minting platform.

pub mod error;
pub mod platform;
pub mod project;
pub mod registry;
pub mod types;

// Re-export main types
pub use error::{RegistryError, Result};
pub use platform::PlatformConfig;
pub use project::Project;
pub use registry::{AdminSet, ProjectRegistry, RoleGate};
pub use types::{Address, PaymentConfig, ProjectId, TokenId};

/// Platform configuration constants
pub mod config {
    /// Default platform share of primary sale revenue (10%)
    pub const DEFAULT_PRIMARY_SALES_PERCENTAGE: u64 = 10;

    /// Default platform royalty on secondary sales (2.5%)
    pub const DEFAULT_SECONDARY_SALES_BPS: u64 = 250;

    /// Highest secondary-market royalty percentage an artist may configure
    pub const MAX_ARTIST_SECONDARY_ROYALTY_PERCENTAGE: u64 = 95;

    /// One hundred percent, expressed in basis points
    pub const MAX_BPS: u64 = 10_000;

    /// Supply ceiling assigned to newly added projects
    pub const DEFAULT_MAX_INVOCATIONS: u64 = crate::ONE_MILLION;
}

/// Token ids are allocated as `project_id * ONE_MILLION + invocation index`.
pub const ONE_MILLION: u64 = 1_000_000;
