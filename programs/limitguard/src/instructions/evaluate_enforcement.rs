use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::EnforcementEvaluated;
use crate::state::api_key::ApiKeyAccount;
use crate::state::delegated_usage::DelegatedUsageAccount;
use crate::state::enums::ApiKeyStatus;
use crate::state::policy::RateLimitPolicy;

// ──────────────────────────────────────────────────────
// Evaluate Enforcement — derive key status from usage
//
// Pure read of usage + policy, single write of the key status.
// Revoked keys and manual blocks are authoritative: automatic
// evaluation refuses to touch them.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct EvaluateEnforcement<'info> {
    #[account(mut)]
    pub api_key: Account<'info, ApiKeyAccount>,

    #[account(
        constraint = policy.key() == api_key.policy @ LimitGuardError::EnforcementDataMissing,
    )]
    pub policy: Account<'info, RateLimitPolicy>,

    #[account(
        seeds = [DelegatedUsageAccount::SEED, api_key.key().as_ref()],
        bump = delegated_usage.bump,
        constraint = delegated_usage.api_key == api_key.key() @ LimitGuardError::EnforcementDataMissing,
    )]
    pub delegated_usage: Account<'info, DelegatedUsageAccount>,
}

pub fn handler(ctx: Context<EvaluateEnforcement>) -> Result<()> {
    let api_key = &mut ctx.accounts.api_key;

    require!(
        api_key.status != ApiKeyStatus::Revoked,
        LimitGuardError::ApiKeyRevoked
    );
    require!(!api_key.manually_blocked, LimitGuardError::ManualBlockActive);

    let usage = &ctx.accounts.delegated_usage;
    let new_status = ctx
        .accounts
        .policy
        .enforcement_status(usage.current_window_usage, usage.burst_counter);

    if api_key.status != new_status {
        msg!(
            "Enforcement: {:?} -> {:?} (window {}, burst {})",
            api_key.status,
            new_status,
            usage.current_window_usage,
            usage.burst_counter,
        );
        api_key.status = new_status;
    }

    emit!(EnforcementEvaluated {
        api_key: api_key.key(),
        new_status,
        window_usage: usage.current_window_usage,
        burst_counter: usage.burst_counter,
    });

    Ok(())
}
