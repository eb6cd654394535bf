use anchor_lang::prelude::*;

use crate::constants::MAX_NAME_LEN;
use crate::errors::LimitGuardError;
use crate::state::enums::ServiceStatus;

// ──────────────────────────────────────────────────────
// Service Account — one per registered API service
//
// Derived from the protocol's service_count at creation time, so
// services are addressable by a dense 0-based index.
// ──────────────────────────────────────────────────────

#[account]
pub struct ServiceAccount {
    /// Signer allowed to manage this service, its policies and keys
    pub authority: Pubkey,

    /// Display name, at most 64 bytes
    pub name: String,

    pub status: ServiceStatus,

    /// Policy new keys are bound to unless told otherwise
    pub default_policy: Pubkey,

    /// Accumulated usage units (requests × cost). Doubles as the
    /// policy-generation nonce: each create_policy consumes the current
    /// value as a seed and bumps it, so every generation lands on a
    /// fresh, permanently addressable PDA.
    pub total_usage_units: u128,

    pub created_ts: i64,

    /// PDA bump
    pub bump: u8,
}

impl ServiceAccount {
    pub const LEN: usize = 8 // discriminator
        + 32                 // authority
        + 4 + MAX_NAME_LEN   // name (length-prefixed)
        + 1                  // status
        + 32                 // default_policy
        + 16                 // total_usage_units
        + 8                  // created_ts
        + 1                  // bump
        + 32;                // padding for future fields

    pub const SEED: &'static [u8] = b"service";

    pub fn validate_name(name: &str) -> Result<()> {
        require!(name.len() <= MAX_NAME_LEN, LimitGuardError::ServiceNameTooLong);
        Ok(())
    }

    /// Disabled services reject every mutation.
    pub fn assert_not_disabled(&self) -> Result<()> {
        require!(
            self.status != ServiceStatus::Disabled,
            LimitGuardError::ServiceDisabled
        );
        Ok(())
    }

    /// Key issuance additionally requires the service to be Active.
    pub fn assert_active(&self) -> Result<()> {
        self.assert_not_disabled()?;
        require!(
            self.status == ServiceStatus::Active,
            LimitGuardError::InvalidService
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(status: ServiceStatus) -> ServiceAccount {
        ServiceAccount {
            authority: Pubkey::new_unique(),
            name: "payments-api".to_string(),
            status,
            default_policy: Pubkey::new_unique(),
            total_usage_units: 0,
            created_ts: 0,
            bump: 255,
        }
    }

    #[test]
    fn name_length_is_bounded() {
        assert!(ServiceAccount::validate_name(&"a".repeat(64)).is_ok());
        assert_eq!(
            ServiceAccount::validate_name(&"a".repeat(65)).unwrap_err(),
            LimitGuardError::ServiceNameTooLong.into()
        );
    }

    #[test]
    fn disabled_rejects_everything() {
        let s = service(ServiceStatus::Disabled);
        assert_eq!(
            s.assert_not_disabled().unwrap_err(),
            LimitGuardError::ServiceDisabled.into()
        );
        assert!(s.assert_active().is_err());
    }

    #[test]
    fn paused_allows_management_but_not_issuance() {
        let s = service(ServiceStatus::Paused);
        assert!(s.assert_not_disabled().is_ok());
        assert_eq!(
            s.assert_active().unwrap_err(),
            LimitGuardError::InvalidService.into()
        );
    }
}
