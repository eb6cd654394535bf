use anchor_lang::prelude::*;

use crate::constants::MIN_WINDOW_SECONDS;
use crate::errors::LimitGuardError;
use crate::events::PolicyUpdated;
use crate::state::policy::RateLimitPolicy;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Update Policy — partial update, each field independently optional
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct UpdatePolicy<'info> {
    pub authority: Signer<'info>,

    #[account(
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        mut,
        constraint = policy.service == service.key() @ LimitGuardError::InvalidPolicy,
    )]
    pub policy: Account<'info, RateLimitPolicy>,
}

pub fn handler(
    ctx: Context<UpdatePolicy>,
    requests_per_window: Option<u64>,
    window_seconds: Option<u64>,
    burst_limit: Option<u64>,
    cost_per_request: Option<u64>,
) -> Result<()> {
    ctx.accounts.service.assert_not_disabled()?;
    let policy = &mut ctx.accounts.policy;

    if let Some(requests) = requests_per_window {
        require!(requests > 0, LimitGuardError::InvalidRateLimitConfig);
        policy.requests_per_window = requests;
    }

    if let Some(window) = window_seconds {
        require!(
            window >= MIN_WINDOW_SECONDS,
            LimitGuardError::InvalidRateLimitConfig
        );
        policy.window_seconds = window;
    }

    if let Some(burst) = burst_limit {
        policy.burst_limit = burst;
    }

    // the pair must stay consistent whichever of the two moved
    require!(
        policy.burst_limit <= policy.requests_per_window,
        LimitGuardError::InvalidRateLimitConfig
    );

    if let Some(cost) = cost_per_request {
        policy.cost_per_request = cost;
    }

    emit!(PolicyUpdated {
        policy: policy.key(),
        requests_per_window,
        window_seconds,
        burst_limit,
        cost_per_request,
    });

    Ok(())
}
