//! Process-wide platform fee configuration
//!
//! A single shared value read at the moment of each sale or royalty query.
//! Changes apply to subsequent queries immediately; past sales are never
//! recomputed.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{RegistryError, Result};
use crate::registry::RoleGate;
use crate::types::Address;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformConfig {
    pub primary_sales_percentage: u64,
    pub primary_sales_address: Address,
    pub secondary_sales_bps: u64,
    pub secondary_sales_address: Address,
}

impl PlatformConfig {
    pub fn new(payout_address: &str) -> Self {
        PlatformConfig {
            primary_sales_percentage: config::DEFAULT_PRIMARY_SALES_PERCENTAGE,
            primary_sales_address: payout_address.to_string(),
            secondary_sales_bps: config::DEFAULT_SECONDARY_SALES_BPS,
            secondary_sales_address: payout_address.to_string(),
        }
    }

    pub fn set_primary_sales_percentage(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        percentage: u64,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        if percentage > 100 {
            return Err(RegistryError::InvalidConfiguration(format!(
                "primary sales percentage {} exceeds 100",
                percentage
            )));
        }
        self.primary_sales_percentage = percentage;
        Ok(())
    }

    pub fn set_primary_sales_address(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        address: &str,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        self.primary_sales_address = address.to_string();
        Ok(())
    }

    pub fn set_secondary_sales_bps(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        bps: u64,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        if bps > config::MAX_BPS {
            return Err(RegistryError::InvalidConfiguration(format!(
                "secondary sales bps {} exceeds {}",
                bps,
                config::MAX_BPS
            )));
        }
        self.secondary_sales_bps = bps;
        Ok(())
    }

    pub fn set_secondary_sales_address(
        &mut self,
        caller: &str,
        roles: &dyn RoleGate,
        address: &str,
    ) -> Result<()> {
        if !roles.is_privileged(caller) {
            return Err(RegistryError::Unauthorized);
        }
        self.secondary_sales_address = address.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AdminSet;

    #[test]
    fn test_defaults() {
        let platform = PlatformConfig::new("platform");
        assert_eq!(platform.primary_sales_percentage, 10);
        assert_eq!(platform.secondary_sales_bps, 250);
        assert_eq!(platform.primary_sales_address, "platform");
        assert_eq!(platform.secondary_sales_address, "platform");
    }

    #[test]
    fn test_setters_are_privileged() {
        let roles = AdminSet::new("deployer");
        let mut platform = PlatformConfig::new("platform");
        assert_eq!(
            platform.set_primary_sales_percentage("stranger", &roles, 20),
            Err(RegistryError::Unauthorized)
        );
        platform
            .set_primary_sales_percentage("deployer", &roles, 20)
            .unwrap();
        assert_eq!(platform.primary_sales_percentage, 20);
    }

    #[test]
    fn test_range_checks() {
        let roles = AdminSet::new("deployer");
        let mut platform = PlatformConfig::new("platform");
        assert!(platform
            .set_primary_sales_percentage("deployer", &roles, 101)
            .is_err());
        assert!(platform
            .set_secondary_sales_bps("deployer", &roles, 10_001)
            .is_err());
        assert!(platform
            .set_secondary_sales_bps("deployer", &roles, 240)
            .is_ok());
    }

    #[test]
    fn test_address_updates() {
        let roles = AdminSet::new("deployer");
        let mut platform = PlatformConfig::new("platform");
        platform
            .set_secondary_sales_address("deployer", &roles, "vault")
            .unwrap();
        assert_eq!(platform.secondary_sales_address, "vault");
    }
}
