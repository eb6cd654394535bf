use anchor_lang::prelude::*;

use crate::constants::MIN_WINDOW_SECONDS;
use crate::errors::LimitGuardError;
use crate::state::enums::{ApiKeyStatus, PolicyStatus};

// ──────────────────────────────────────────────────────
// Rate Limit Policy — one per generation, append-only
//
// The PDA seed consumes the owning service's total_usage_units nonce,
// so updating a service's limits by creating a new policy never
// overwrites an old generation; keys migrate by re-binding.
// ──────────────────────────────────────────────────────

#[account]
pub struct RateLimitPolicy {
    /// Owning service
    pub service: Pubkey,

    /// Requests allowed per window
    pub requests_per_window: u64,

    /// Window length in seconds, at least 1
    pub window_seconds: u64,

    /// Short-spike bound inside a window; never above requests_per_window
    pub burst_limit: u64,

    /// Usage units charged per request when checkpoints are applied
    pub cost_per_request: u64,

    pub status: PolicyStatus,

    /// PDA bump
    pub bump: u8,
}

impl RateLimitPolicy {
    pub const LEN: usize = 8 // discriminator
        + 32                 // service
        + 8                  // requests_per_window
        + 8                  // window_seconds
        + 8                  // burst_limit
        + 8                  // cost_per_request
        + 1                  // status
        + 1                  // bump
        + 32;                // padding for future fields

    pub const SEED: &'static [u8] = b"policy";

    pub fn validate_config(
        requests_per_window: u64,
        window_seconds: u64,
        burst_limit: u64,
    ) -> Result<()> {
        require!(requests_per_window > 0, LimitGuardError::InvalidRateLimitConfig);
        require!(
            window_seconds >= MIN_WINDOW_SECONDS,
            LimitGuardError::InvalidRateLimitConfig
        );
        require!(
            burst_limit <= requests_per_window,
            LimitGuardError::InvalidRateLimitConfig
        );
        Ok(())
    }

    pub fn assert_active(&self) -> Result<()> {
        require!(
            self.status == PolicyStatus::Active,
            LimitGuardError::PolicyDisabled
        );
        Ok(())
    }

    /// Pure enforcement decision: burst breach outranks a saturated
    /// window, a saturated window outranks everything else.
    pub fn enforcement_status(&self, window_usage: u64, burst_counter: u64) -> ApiKeyStatus {
        if burst_counter > self.burst_limit {
            ApiKeyStatus::Blocked
        } else if window_usage >= self.requests_per_window {
            ApiKeyStatus::Throttled
        } else {
            ApiKeyStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(requests: u64, burst: u64) -> RateLimitPolicy {
        RateLimitPolicy {
            service: Pubkey::new_unique(),
            requests_per_window: requests,
            window_seconds: 60,
            burst_limit: burst,
            cost_per_request: 0,
            status: PolicyStatus::Active,
            bump: 255,
        }
    }

    #[test]
    fn accepts_burst_within_window_limit() {
        assert!(RateLimitPolicy::validate_config(100, 60, 20).is_ok());
        assert!(RateLimitPolicy::validate_config(100, 1, 100).is_ok());
    }

    #[test]
    fn rejects_burst_above_window_limit() {
        assert_eq!(
            RateLimitPolicy::validate_config(10, 60, 20).unwrap_err(),
            LimitGuardError::InvalidRateLimitConfig.into()
        );
    }

    #[test]
    fn rejects_degenerate_windows() {
        assert_eq!(
            RateLimitPolicy::validate_config(100, 0, 20).unwrap_err(),
            LimitGuardError::InvalidRateLimitConfig.into()
        );
        assert_eq!(
            RateLimitPolicy::validate_config(0, 60, 0).unwrap_err(),
            LimitGuardError::InvalidRateLimitConfig.into()
        );
    }

    #[test]
    fn enforcement_boundaries() {
        let p = policy(100, 20);
        assert_eq!(p.enforcement_status(0, 0), ApiKeyStatus::Active);
        assert_eq!(p.enforcement_status(99, 20), ApiKeyStatus::Active);
        // window limit met -> throttled
        assert_eq!(p.enforcement_status(100, 0), ApiKeyStatus::Throttled);
        assert_eq!(p.enforcement_status(150, 20), ApiKeyStatus::Throttled);
        // burst breach wins over a saturated window
        assert_eq!(p.enforcement_status(100, 21), ApiKeyStatus::Blocked);
        assert_eq!(p.enforcement_status(0, 21), ApiKeyStatus::Blocked);
    }
}
