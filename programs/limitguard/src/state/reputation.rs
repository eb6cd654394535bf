use anchor_lang::prelude::*;

use crate::constants::{REPUTATION_MAX, REPUTATION_MIN};
use crate::errors::LimitGuardError;

// ──────────────────────────────────────────────────────
// Reputation Account — one per subject, created lazily
// ──────────────────────────────────────────────────────

#[account]
pub struct ReputationAccount {
    /// The identity this record scores (an API key owner)
    pub subject: Pubkey,

    /// Signed running score, clamped to ±1,000,000
    pub global_score: i64,

    /// Abuse signals recorded against this subject
    pub signal_count: u64,

    pub last_updated_ts: i64,

    /// Bitmask of abuse categories ever reported
    pub flags: u32,

    /// PDA bump
    pub bump: u8,
}

impl ReputationAccount {
    pub const LEN: usize = 8 // discriminator
        + 32                 // subject
        + 8                  // global_score
        + 8                  // signal_count
        + 8                  // last_updated_ts
        + 4                  // flags
        + 1                  // bump
        + 32;                // padding for future fields

    pub const SEED: &'static [u8] = b"reputation";

    /// Overflow-checked add, then clamp into the reputation band.
    /// Returns the post-clamp score.
    pub fn apply_delta(&mut self, delta: i64, now: i64) -> Result<i64> {
        let raw = self
            .global_score
            .checked_add(delta)
            .ok_or(LimitGuardError::ReputationOverflow)?;

        self.global_score = raw.clamp(REPUTATION_MIN, REPUTATION_MAX);
        self.last_updated_ts = now;
        Ok(self.global_score)
    }

    pub fn record_signal(&mut self, category: u32, now: i64) -> Result<()> {
        self.signal_count = self
            .signal_count
            .checked_add(1)
            .ok_or(LimitGuardError::MathOverflow)?;
        self.flags |= category;
        self.last_updated_ts = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> ReputationAccount {
        ReputationAccount {
            subject: Pubkey::new_unique(),
            global_score: 0,
            signal_count: 0,
            last_updated_ts: 0,
            flags: 0,
            bump: 255,
        }
    }

    #[test]
    fn delta_applies_to_fresh_score() {
        let mut r = fresh();
        assert_eq!(r.apply_delta(50, 10).unwrap(), 50);
        assert_eq!(r.global_score, 50);
    }

    #[test]
    fn score_clamps_at_the_ceiling() {
        let mut r = fresh();
        r.apply_delta(50, 10).unwrap();
        assert_eq!(r.apply_delta(2_000_000, 11).unwrap(), REPUTATION_MAX);
        assert_eq!(r.global_score, REPUTATION_MAX);
    }

    #[test]
    fn score_clamps_at_the_floor() {
        let mut r = fresh();
        assert_eq!(r.apply_delta(-5_000_000, 10).unwrap(), REPUTATION_MIN);
    }

    #[test]
    fn preclamp_overflow_is_an_error() {
        let mut r = fresh();
        r.global_score = i64::MAX;
        assert_eq!(
            r.apply_delta(1, 10).unwrap_err(),
            LimitGuardError::ReputationOverflow.into()
        );
    }

    #[test]
    fn signals_count_and_or_flags() {
        let mut r = fresh();
        r.record_signal(1, 10).unwrap();
        assert_eq!(r.signal_count, 1);
        assert_eq!(r.flags, 1);

        r.record_signal(4, 11).unwrap();
        assert_eq!(r.signal_count, 2);
        assert_eq!(r.flags, 5);
    }
}
