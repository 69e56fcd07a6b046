//! Shared identifier and payment configuration types

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Stable integer handle for a project, allocated monotonically from zero.
pub type ProjectId = u64;

/// Token ids encode the owning project; see [`crate::ONE_MILLION`].
pub type TokenId = u64;

/// Payee / caller identity. Absent payees are represented as `Option::None`,
/// never as an empty string.
pub type Address = String;

/// Per-project payee configuration.
///
/// A percentage of 0 is the valid "no additional payee" state; the paired
/// address carries no meaning while its percentage is 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentConfig {
    pub artist_address: Address,
    pub additional_primary_address: Address,
    pub additional_primary_percentage: u64,
    pub additional_secondary_address: Address,
    pub additional_secondary_percentage: u64,
}

impl PaymentConfig {
    /// Config with the artist as the only payee.
    pub fn for_artist(artist_address: &str) -> Self {
        PaymentConfig {
            artist_address: artist_address.to_string(),
            ..Default::default()
        }
    }

    /// Rejects additional-payee percentages outside [0, 100].
    pub fn validate(&self) -> Result<()> {
        if self.additional_primary_percentage > 100 {
            return Err(RegistryError::InvalidConfiguration(format!(
                "additional primary percentage {} exceeds 100",
                self.additional_primary_percentage
            )));
        }
        if self.additional_secondary_percentage > 100 {
            return Err(RegistryError::InvalidConfiguration(format!(
                "additional secondary percentage {} exceeds 100",
                self.additional_secondary_percentage
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_only_config_is_valid() {
        let config = PaymentConfig::for_artist("artist");
        assert!(config.validate().is_ok());
        assert_eq!(config.additional_primary_percentage, 0);
        assert_eq!(config.additional_secondary_percentage, 0);
    }

    #[test]
    fn test_percentage_over_100_rejected() {
        let mut config = PaymentConfig::for_artist("artist");
        config.additional_primary_percentage = 101;
        assert!(config.validate().is_err());
    }
}
