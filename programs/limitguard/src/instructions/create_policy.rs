use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::PolicyCreated;
use crate::state::enums::PolicyStatus;
use crate::state::policy::RateLimitPolicy;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Create Policy — a new rate-limit generation for a service
//
// The PDA seed consumes the service's current total_usage_units nonce,
// which is then bumped, so every generation occupies a fresh address
// and old generations stay retrievable forever. Append-only versioning
// without a separate version counter.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct CreatePolicy<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        init,
        payer = authority,
        space = RateLimitPolicy::LEN,
        seeds = [
            RateLimitPolicy::SEED,
            service.key().as_ref(),
            service.total_usage_units.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub policy: Account<'info, RateLimitPolicy>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreatePolicy>,
    requests_per_window: u64,
    window_seconds: u64,
    burst_limit: u64,
    cost_per_request: u64,
) -> Result<()> {
    let service = &mut ctx.accounts.service;
    service.assert_not_disabled()?;
    RateLimitPolicy::validate_config(requests_per_window, window_seconds, burst_limit)?;

    let generation = service.total_usage_units;
    service.total_usage_units = generation
        .checked_add(1)
        .ok_or(LimitGuardError::MathOverflow)?;

    let policy = &mut ctx.accounts.policy;
    policy.service = service.key();
    policy.requests_per_window = requests_per_window;
    policy.window_seconds = window_seconds;
    policy.burst_limit = burst_limit;
    policy.cost_per_request = cost_per_request;
    policy.status = PolicyStatus::Active;
    policy.bump = ctx.bumps.policy;

    msg!(
        "Policy created for {}: {} req / {}s window, burst {}",
        policy.service,
        requests_per_window,
        window_seconds,
        burst_limit,
    );

    emit!(PolicyCreated {
        policy: policy.key(),
        service: policy.service,
        generation,
        requests_per_window,
        window_seconds,
        burst_limit,
        cost_per_request,
    });

    Ok(())
}
