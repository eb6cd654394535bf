use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::PolicyAttachedToKey;
use crate::state::api_key::ApiKeyAccount;
use crate::state::policy::RateLimitPolicy;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Attach Policy To Key — rebind without touching status
//
// The delegated usage account picks the new policy up at the next
// prepare_delegation; while delegated it keeps enforcing the policy it
// was handed off with.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct AttachPolicyToKey<'info> {
    pub authority: Signer<'info>,

    #[account(
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        constraint = policy.service == service.key() @ LimitGuardError::InvalidPolicy,
    )]
    pub policy: Account<'info, RateLimitPolicy>,

    #[account(
        mut,
        constraint = api_key.service == service.key() @ LimitGuardError::InvalidApiKey,
    )]
    pub api_key: Account<'info, ApiKeyAccount>,
}

pub fn handler(ctx: Context<AttachPolicyToKey>) -> Result<()> {
    ctx.accounts.service.assert_not_disabled()?;
    ctx.accounts.policy.assert_active()?;

    let api_key = &mut ctx.accounts.api_key;
    api_key.policy = ctx.accounts.policy.key();

    emit!(PolicyAttachedToKey {
        api_key: api_key.key(),
        policy: api_key.policy,
        service: api_key.service,
    });

    Ok(())
}
