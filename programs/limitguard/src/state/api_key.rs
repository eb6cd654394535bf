use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::state::enums::ApiKeyStatus;

// ──────────────────────────────────────────────────────
// API Key Account — one per issued key, globally indexed
// ──────────────────────────────────────────────────────

#[account]
pub struct ApiKeyAccount {
    /// Issuing service
    pub service: Pubkey,

    /// Consumer identity the key was issued to
    pub owner: Pubkey,

    /// Currently bound rate-limit policy
    pub policy: Pubkey,

    /// The owner's reputation record (shared across their keys)
    pub reputation: Pubkey,

    pub status: ApiKeyStatus,

    /// Set by manual_block_key; automatic enforcement never clears it
    pub manually_blocked: bool,

    /// Cumulative usage applied from checkpoints; also the usage
    /// high-water mark the regression guard compares against
    pub lifetime_usage: u128,

    /// Sequence of the last checkpoint folded into this key
    pub last_checkpoint_seq: u64,

    pub last_checkpoint_ts: i64,

    /// PDA bump
    pub bump: u8,
}

impl ApiKeyAccount {
    pub const LEN: usize = 8 // discriminator
        + 32                 // service
        + 32                 // owner
        + 32                 // policy
        + 32                 // reputation
        + 1                  // status
        + 1                  // manually_blocked
        + 16                 // lifetime_usage
        + 8                  // last_checkpoint_seq
        + 8                  // last_checkpoint_ts
        + 1                  // bump
        + 32;                // padding for future fields

    pub const SEED: &'static [u8] = b"api_key";

    pub fn assert_usable(&self) -> Result<()> {
        match self.status {
            ApiKeyStatus::Revoked => err!(LimitGuardError::ApiKeyRevoked),
            ApiKeyStatus::Blocked => err!(LimitGuardError::ApiKeyBlocked),
            _ => Ok(()),
        }
    }

    /// Stale-or-replayed guard for folding a committed checkpoint into
    /// the base ledger. A snapshot is applied at most once, in order,
    /// and may never move cumulative usage backward.
    pub fn validate_checkpoint_apply(&self, seq: u64, cumulative: u128) -> Result<()> {
        require!(
            seq > self.last_checkpoint_seq,
            LimitGuardError::InvalidCheckpointSequence
        );
        require!(
            cumulative >= self.lifetime_usage,
            LimitGuardError::CheckpointRegression
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(status: ApiKeyStatus) -> ApiKeyAccount {
        ApiKeyAccount {
            service: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            policy: Pubkey::new_unique(),
            reputation: Pubkey::new_unique(),
            status,
            manually_blocked: false,
            lifetime_usage: 0,
            last_checkpoint_seq: 0,
            last_checkpoint_ts: 0,
            bump: 255,
        }
    }

    #[test]
    fn blocked_and_revoked_are_unusable() {
        assert!(key(ApiKeyStatus::Active).assert_usable().is_ok());
        assert!(key(ApiKeyStatus::Throttled).assert_usable().is_ok());
        assert_eq!(
            key(ApiKeyStatus::Blocked).assert_usable().unwrap_err(),
            LimitGuardError::ApiKeyBlocked.into()
        );
        assert_eq!(
            key(ApiKeyStatus::Revoked).assert_usable().unwrap_err(),
            LimitGuardError::ApiKeyRevoked.into()
        );
    }

    #[test]
    fn checkpoint_apply_requires_increasing_sequence() {
        let mut k = key(ApiKeyStatus::Active);
        k.last_checkpoint_seq = 3;
        k.lifetime_usage = 500;

        assert!(k.validate_checkpoint_apply(4, 600).is_ok());
        assert_eq!(
            k.validate_checkpoint_apply(3, 600).unwrap_err(),
            LimitGuardError::InvalidCheckpointSequence.into()
        );
        assert_eq!(
            k.validate_checkpoint_apply(2, 600).unwrap_err(),
            LimitGuardError::InvalidCheckpointSequence.into()
        );
    }

    #[test]
    fn checkpoint_apply_rejects_regressed_usage() {
        let mut k = key(ApiKeyStatus::Active);
        k.last_checkpoint_seq = 3;
        k.lifetime_usage = 500;

        assert_eq!(
            k.validate_checkpoint_apply(4, 499).unwrap_err(),
            LimitGuardError::CheckpointRegression.into()
        );
        // equal cumulative usage is a legal no-op snapshot
        assert!(k.validate_checkpoint_apply(4, 500).is_ok());
    }
}
