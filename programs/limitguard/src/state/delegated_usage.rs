use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::state::policy::RateLimitPolicy;

// ──────────────────────────────────────────────────────
// Delegated Usage Account — the windowed counter that travels
//
// The only account whose write ownership moves between the base ledger
// and an execution region. While delegated, the region performs
// high-frequency counter updates against its copy; checkpoints carry
// the cumulative total back. The sequence/high-water pair makes stale
// or replayed snapshots detectable instead of silently applied.
// ──────────────────────────────────────────────────────

#[account]
pub struct DelegatedUsageAccount {
    /// Owning API key
    pub api_key: Pubkey,

    /// Policy enforced while recording (refreshed at prepare time)
    pub policy: Pubkey,

    /// Target execution region recorded by prepare_delegation
    pub execution_region: Pubkey,

    /// True while the region holds write ownership
    pub delegated: bool,

    /// Bumped once per delegation; survives undelegation as a
    /// high-water mark so a re-delegation can never reuse stale
    /// sequence numbers
    pub delegation_seq: u64,

    pub window_start_ts: i64,

    /// Requests accumulated in the current window
    pub current_window_usage: u64,

    /// Short-spike counter, reset with the window
    pub burst_counter: u64,

    /// Requests accumulated over the account's whole life; never reset
    /// by window rollover, which is what lets checkpoints detect
    /// regression
    pub cumulative_usage: u128,

    /// Sequence of the last submitted checkpoint
    pub checkpoint_seq: u64,

    /// Cumulative usage captured by the last submitted checkpoint
    pub checkpoint_usage: u128,

    pub last_update_ts: i64,

    pub delegated_at: i64,

    /// PDA bump
    pub bump: u8,
}

impl DelegatedUsageAccount {
    pub const LEN: usize = 8 // discriminator
        + 32                 // api_key
        + 32                 // policy
        + 32                 // execution_region
        + 1                  // delegated
        + 8                  // delegation_seq
        + 8                  // window_start_ts
        + 8                  // current_window_usage
        + 8                  // burst_counter
        + 16                 // cumulative_usage
        + 8                  // checkpoint_seq
        + 16                 // checkpoint_usage
        + 8                  // last_update_ts
        + 8                  // delegated_at
        + 1                  // bump
        + 32;                // padding for future fields

    pub const SEED: &'static [u8] = b"delegated_usage";

    // ── Delegation lifecycle ──

    /// Step 1 of the protocol: record the target region and open a
    /// fresh window. The account must still be owned by the program.
    pub fn prepare(&mut self, execution_region: Pubkey, now: i64) -> Result<()> {
        require!(!self.delegated, LimitGuardError::AlreadyDelegated);
        require!(
            execution_region != Pubkey::default(),
            LimitGuardError::InvalidExecutionRegion
        );

        self.execution_region = execution_region;
        self.delegation_seq = self
            .delegation_seq
            .checked_add(1)
            .ok_or(LimitGuardError::MathOverflow)?;
        self.window_start_ts = now;
        self.current_window_usage = 0;
        self.burst_counter = 0;
        self.last_update_ts = now;
        Ok(())
    }

    /// Step 2 guard: ownership may only transfer to the region that
    /// prepare_delegation recorded.
    pub fn validate_handoff(&self, execution_region: Pubkey) -> Result<()> {
        require!(!self.delegated, LimitGuardError::AlreadyDelegated);
        require!(
            self.execution_region != Pubkey::default(),
            LimitGuardError::InvalidDelegationState
        );
        require!(
            self.execution_region == execution_region,
            LimitGuardError::InvalidExecutionRegion
        );
        Ok(())
    }

    // ── Region-side accounting ──

    /// Window rollover rule: once the window has elapsed, the next
    /// record opens a fresh one before accumulating.
    pub fn roll_window(&mut self, now: i64, window_seconds: u64) {
        if now.saturating_sub(self.window_start_ts) >= window_seconds as i64 {
            self.window_start_ts = now;
            self.current_window_usage = 0;
            self.burst_counter = 0;
        }
    }

    /// Accumulate `amount` requests and enforce the policy. On any
    /// failure the whole instruction aborts, so a rejected increment is
    /// never partially applied.
    pub fn apply_usage(&mut self, amount: u64, policy: &RateLimitPolicy, now: i64) -> Result<()> {
        require!(self.delegated, LimitGuardError::NotDelegated);
        require!(now >= self.window_start_ts, LimitGuardError::InvalidWindow);

        self.roll_window(now, policy.window_seconds);

        self.current_window_usage = self
            .current_window_usage
            .checked_add(amount)
            .ok_or(LimitGuardError::MathOverflow)?;
        self.burst_counter = self
            .burst_counter
            .checked_add(amount)
            .ok_or(LimitGuardError::MathOverflow)?;
        self.cumulative_usage = self
            .cumulative_usage
            .checked_add(amount as u128)
            .ok_or(LimitGuardError::MathOverflow)?;

        require!(
            self.current_window_usage <= policy.requests_per_window,
            LimitGuardError::RateLimitExceeded
        );
        require!(
            self.burst_counter <= policy.burst_limit,
            LimitGuardError::BurstLimitExceeded
        );

        self.last_update_ts = now;
        Ok(())
    }

    // ── Checkpointing ──

    pub fn next_checkpoint_seq(&self) -> Result<u64> {
        self.checkpoint_seq
            .checked_add(1)
            .ok_or(LimitGuardError::MathOverflow.into())
    }

    /// A checkpoint must carry a strictly newer sequence and must not
    /// move cumulative usage backward relative to the last commit.
    pub fn validate_checkpoint(&self, seq: u64, cumulative: u128) -> Result<()> {
        require!(self.delegated, LimitGuardError::NotDelegated);
        require!(
            seq > self.checkpoint_seq,
            LimitGuardError::InvalidCheckpointSequence
        );
        require!(
            cumulative >= self.checkpoint_usage,
            LimitGuardError::CheckpointRegression
        );
        Ok(())
    }

    pub fn record_checkpoint(&mut self, seq: u64, now: i64) -> Result<()> {
        self.validate_checkpoint(seq, self.cumulative_usage)?;
        self.checkpoint_seq = seq;
        self.checkpoint_usage = self.cumulative_usage;
        self.last_update_ts = now;
        Ok(())
    }

    /// Undelegation needs every recorded request covered by a
    /// checkpoint; otherwise region-side usage would be lost on
    /// handback.
    pub fn validate_undelegation(&self) -> Result<()> {
        require!(self.delegated, LimitGuardError::NotDelegated);
        require!(
            self.cumulative_usage == self.checkpoint_usage,
            LimitGuardError::DelegationRequiresCheckpoint
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::enums::PolicyStatus;

    fn policy(requests: u64, window: u64, burst: u64) -> RateLimitPolicy {
        RateLimitPolicy {
            service: Pubkey::new_unique(),
            requests_per_window: requests,
            window_seconds: window,
            burst_limit: burst,
            cost_per_request: 1,
            status: PolicyStatus::Active,
            bump: 255,
        }
    }

    fn fresh_usage() -> DelegatedUsageAccount {
        DelegatedUsageAccount {
            api_key: Pubkey::new_unique(),
            policy: Pubkey::new_unique(),
            execution_region: Pubkey::default(),
            delegated: false,
            delegation_seq: 0,
            window_start_ts: 1_000,
            current_window_usage: 0,
            burst_counter: 0,
            cumulative_usage: 0,
            checkpoint_seq: 0,
            checkpoint_usage: 0,
            last_update_ts: 1_000,
            delegated_at: 0,
            bump: 255,
        }
    }

    fn delegated_usage() -> DelegatedUsageAccount {
        let mut d = fresh_usage();
        let region = Pubkey::new_unique();
        d.prepare(region, 1_000).unwrap();
        d.validate_handoff(region).unwrap();
        d.delegated = true;
        d.delegated_at = 1_000;
        d
    }

    #[test]
    fn prepare_rejects_null_region_and_double_delegation() {
        let mut d = fresh_usage();
        assert_eq!(
            d.prepare(Pubkey::default(), 1_000).unwrap_err(),
            LimitGuardError::InvalidExecutionRegion.into()
        );

        let region = Pubkey::new_unique();
        d.prepare(region, 1_000).unwrap();
        assert_eq!(d.delegation_seq, 1);

        d.delegated = true;
        assert_eq!(
            d.prepare(region, 1_000).unwrap_err(),
            LimitGuardError::AlreadyDelegated.into()
        );
    }

    #[test]
    fn handoff_requires_prepared_matching_region() {
        let d = fresh_usage();
        // step 1 skipped: no region recorded
        assert_eq!(
            d.validate_handoff(Pubkey::new_unique()).unwrap_err(),
            LimitGuardError::InvalidDelegationState.into()
        );

        let mut d = fresh_usage();
        let region = Pubkey::new_unique();
        d.prepare(region, 1_000).unwrap();
        assert_eq!(
            d.validate_handoff(Pubkey::new_unique()).unwrap_err(),
            LimitGuardError::InvalidExecutionRegion.into()
        );
        assert!(d.validate_handoff(region).is_ok());
    }

    #[test]
    fn usage_requires_delegation() {
        let mut d = fresh_usage();
        assert_eq!(
            d.apply_usage(1, &policy(100, 60, 20), 1_001).unwrap_err(),
            LimitGuardError::NotDelegated.into()
        );
    }

    #[test]
    fn usage_accumulates_within_window() {
        let mut d = delegated_usage();
        let p = policy(100, 60, 20);

        d.apply_usage(5, &p, 1_001).unwrap();
        d.apply_usage(5, &p, 1_002).unwrap();
        assert_eq!(d.current_window_usage, 10);
        assert_eq!(d.burst_counter, 10);
        assert_eq!(d.cumulative_usage, 10);
    }

    #[test]
    fn window_rolls_over_after_elapsing() {
        let mut d = delegated_usage();
        let p = policy(100, 60, 100);

        d.apply_usage(40, &p, 1_010).unwrap();
        // 60 seconds past the window start: counters reset, cumulative survives
        d.apply_usage(3, &p, 1_060).unwrap();
        assert_eq!(d.window_start_ts, 1_060);
        assert_eq!(d.current_window_usage, 3);
        assert_eq!(d.burst_counter, 3);
        assert_eq!(d.cumulative_usage, 43);
    }

    #[test]
    fn exceeding_the_window_limit_aborts_atomically() {
        let mut d = delegated_usage();
        let p = policy(10, 60, 10);

        d.apply_usage(10, &p, 1_001).unwrap();
        assert_eq!(
            d.apply_usage(1, &p, 1_002).unwrap_err(),
            LimitGuardError::RateLimitExceeded.into()
        );
    }

    #[test]
    fn exceeding_the_burst_limit_aborts() {
        let mut d = delegated_usage();
        let p = policy(100, 60, 5);

        d.apply_usage(5, &p, 1_001).unwrap();
        assert_eq!(
            d.apply_usage(1, &p, 1_002).unwrap_err(),
            LimitGuardError::BurstLimitExceeded.into()
        );
    }

    #[test]
    fn clock_regression_is_rejected() {
        let mut d = delegated_usage();
        let p = policy(100, 60, 20);
        assert_eq!(
            d.apply_usage(1, &p, 999).unwrap_err(),
            LimitGuardError::InvalidWindow.into()
        );
    }

    #[test]
    fn checkpoint_sequence_must_strictly_increase() {
        let mut d = delegated_usage();
        let p = policy(100, 60, 100);
        d.apply_usage(7, &p, 1_001).unwrap();

        let seq = d.next_checkpoint_seq().unwrap();
        d.record_checkpoint(seq, 1_002).unwrap();
        assert_eq!(d.checkpoint_seq, 1);
        assert_eq!(d.checkpoint_usage, 7);

        // replaying the same sequence is rejected, never overwritten
        assert_eq!(
            d.record_checkpoint(seq, 1_003).unwrap_err(),
            LimitGuardError::InvalidCheckpointSequence.into()
        );
        assert_eq!(
            d.validate_checkpoint(0, 7).unwrap_err(),
            LimitGuardError::InvalidCheckpointSequence.into()
        );
    }

    #[test]
    fn checkpoint_regression_is_rejected() {
        let mut d = delegated_usage();
        let p = policy(100, 60, 100);
        d.apply_usage(7, &p, 1_001).unwrap();
        d.record_checkpoint(1, 1_002).unwrap();

        // a stale region snapshot claims less cumulative usage
        assert_eq!(
            d.validate_checkpoint(2, 6).unwrap_err(),
            LimitGuardError::CheckpointRegression.into()
        );
        assert!(d.validate_checkpoint(2, 7).is_ok());
    }

    #[test]
    fn undelegation_requires_final_checkpoint() {
        let mut d = delegated_usage();
        let p = policy(100, 60, 100);

        // no usage recorded: round-trip is fine without any checkpoint
        assert!(d.validate_undelegation().is_ok());

        d.apply_usage(4, &p, 1_001).unwrap();
        assert_eq!(
            d.validate_undelegation().unwrap_err(),
            LimitGuardError::DelegationRequiresCheckpoint.into()
        );

        d.record_checkpoint(1, 1_002).unwrap();
        assert!(d.validate_undelegation().is_ok());
    }

    #[test]
    fn round_trip_without_usage_leaves_window_unchanged() {
        let mut d = delegated_usage();
        let window_before = d.current_window_usage;
        let seq_before = d.delegation_seq;

        d.validate_undelegation().unwrap();
        d.delegated = false;

        assert_eq!(d.current_window_usage, window_before);
        // seq is preserved as a high-water mark for the next delegation
        assert_eq!(d.delegation_seq, seq_before);
        let region = d.execution_region;
        d.prepare(region, 2_000).unwrap();
        assert_eq!(d.delegation_seq, seq_before + 1);
    }
}
