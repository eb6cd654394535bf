use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::PolicyStatusChanged;
use crate::state::enums::PolicyStatus;
use crate::state::policy::RateLimitPolicy;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Set Policy Status — retire or revive a policy generation
//
// Disabled policies reject new bindings; keys already bound keep
// working until re-bound.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct SetPolicyStatus<'info> {
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

pub fn handler(ctx: Context<SetPolicyStatus>, new_status: PolicyStatus) -> Result<()> {
    ctx.accounts.service.assert_not_disabled()?;

    let policy = &mut ctx.accounts.policy;
    policy.status = new_status;

    emit!(PolicyStatusChanged {
        policy: policy.key(),
        service: policy.service,
        new_status,
    });

    Ok(())
}
