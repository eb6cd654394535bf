use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::UsageRecordedRealtime;
use crate::state::api_key::ApiKeyAccount;
use crate::state::delegated_usage::DelegatedUsageAccount;
use crate::state::policy::RateLimitPolicy;

// ──────────────────────────────────────────────────────
// Record Usage Realtime — step 3, execution region only
//
// The hot path. Runs against the delegated copy at region speed; only
// the usage account is writable here. A breached limit aborts the
// whole instruction, so a rejected request never partially counts.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct RecordUsageRealtime<'info> {
    #[account(
        mut,
        constraint = delegated_usage.api_key == api_key.key() @ LimitGuardError::InvalidApiKey,
    )]
    pub delegated_usage: Account<'info, DelegatedUsageAccount>,

    /// Read-only on the region; status changes happen on the base ledger
    pub api_key: Account<'info, ApiKeyAccount>,

    #[account(
        constraint = policy.key() == delegated_usage.policy @ LimitGuardError::InvalidPolicy,
    )]
    pub policy: Account<'info, RateLimitPolicy>,
}

pub fn handler(ctx: Context<RecordUsageRealtime>, amount: u64) -> Result<()> {
    ctx.accounts.api_key.assert_usable()?;

    let now = Clock::get()?.unix_timestamp;
    let usage = &mut ctx.accounts.delegated_usage;
    usage.apply_usage(amount, &ctx.accounts.policy, now)?;

    emit!(UsageRecordedRealtime {
        delegated_usage: usage.key(),
        api_key: usage.api_key,
        amount,
        window_usage: usage.current_window_usage,
        burst_counter: usage.burst_counter,
    });

    Ok(())
}
