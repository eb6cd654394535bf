use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::state::api_key::ApiKeyAccount;
use crate::state::delegated_usage::DelegatedUsageAccount;
use crate::state::policy::RateLimitPolicy;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Prepare Delegation — step 1, base ledger
//
// Runs while the usage account is still owned by this program: records
// the target execution region, refreshes the policy binding, bumps the
// delegation sequence and opens a fresh window. The actual ownership
// transfer happens in delegate_usage; that split keeps all data writes
// on this side of the handoff.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct PrepareDelegation<'info> {
    pub authority: Signer<'info>,

    #[account(
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        constraint = api_key.service == service.key() @ LimitGuardError::InvalidApiKey,
    )]
    pub api_key: Account<'info, ApiKeyAccount>,

    #[account(
        constraint = policy.key() == api_key.policy @ LimitGuardError::InvalidPolicy,
    )]
    pub policy: Account<'info, RateLimitPolicy>,

    #[account(
        mut,
        seeds = [DelegatedUsageAccount::SEED, api_key.key().as_ref()],
        bump = delegated_usage.bump,
        constraint = delegated_usage.api_key == api_key.key() @ LimitGuardError::InvalidApiKey,
    )]
    pub delegated_usage: Account<'info, DelegatedUsageAccount>,
}

pub fn handler(ctx: Context<PrepareDelegation>, execution_region: Pubkey) -> Result<()> {
    ctx.accounts.service.assert_not_disabled()?;

    let api_key = &ctx.accounts.api_key;
    if !api_key.status.is_usable() {
        return err!(LimitGuardError::ApiKeyInactive);
    }

    let now = Clock::get()?.unix_timestamp;
    let usage = &mut ctx.accounts.delegated_usage;
    usage.policy = ctx.accounts.policy.key();
    usage.prepare(execution_region, now)?;

    msg!(
        "Delegation #{} prepared for region {}",
        usage.delegation_seq,
        execution_region,
    );

    Ok(())
}
