use anchor_lang::prelude::*;

use crate::constants::MAX_BPS;
use crate::errors::LimitGuardError;

// ──────────────────────────────────────────────────────
// Protocol State — singleton PDA, initialized once by the deployer
//
// Global switchboard for the whole program: admin authority, treasury,
// fee rate, the pause flag consulted by service/key creation, and the
// monotonic counters that feed PDA derivation.
// ──────────────────────────────────────────────────────

#[account]
pub struct ProtocolState {
    /// The admin authority — can update config and adjust reputations
    pub admin_authority: Pubkey,

    /// Treasury wallet credited with protocol fees
    pub treasury: Pubkey,

    /// Protocol fee in basis points (10,000 = 100%)
    pub protocol_fee_bps: u16,

    /// Emergency stop: blocks service and API key creation
    pub paused: bool,

    /// Number of services ever created; next service index
    pub service_count: u64,

    /// Number of API keys ever created; next key index
    pub api_key_count: u64,

    /// Number of usage checkpoints folded back into the base ledger
    pub total_usage_checkpoints: u64,

    /// PDA bump
    pub bump: u8,
}

impl ProtocolState {
    pub const LEN: usize = 8 // discriminator
        + 32                 // admin_authority
        + 32                 // treasury
        + 2                  // protocol_fee_bps
        + 1                  // paused
        + 8                  // service_count
        + 8                  // api_key_count
        + 8                  // total_usage_checkpoints
        + 1                  // bump
        + 32;                // padding for future fields

    /// The PDA seed — only one protocol account per program
    pub const SEED: &'static [u8] = b"protocol";

    pub fn validate_fee(fee_bps: u16) -> Result<()> {
        require!(fee_bps <= MAX_BPS, LimitGuardError::InvalidProtocolFee);
        Ok(())
    }

    pub fn validate_treasury(treasury: &Pubkey) -> Result<()> {
        require!(*treasury != Pubkey::default(), LimitGuardError::InvalidInput);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_bounds() {
        assert!(ProtocolState::validate_fee(0).is_ok());
        assert!(ProtocolState::validate_fee(10_000).is_ok());
        assert_eq!(
            ProtocolState::validate_fee(10_001).unwrap_err(),
            LimitGuardError::InvalidProtocolFee.into()
        );
        assert_eq!(
            ProtocolState::validate_fee(u16::MAX).unwrap_err(),
            LimitGuardError::InvalidProtocolFee.into()
        );
    }

    #[test]
    fn treasury_must_not_be_null() {
        assert_eq!(
            ProtocolState::validate_treasury(&Pubkey::default()).unwrap_err(),
            LimitGuardError::InvalidInput.into()
        );
        assert!(ProtocolState::validate_treasury(&Pubkey::new_unique()).is_ok());
    }
}
