use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::UsageCheckpointApplied;
use crate::state::api_key::ApiKeyAccount;
use crate::state::delegated_usage::DelegatedUsageAccount;
use crate::state::policy::RateLimitPolicy;
use crate::state::protocol::ProtocolState;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Apply Usage Checkpoint — base ledger crank
//
// Folds the latest committed checkpoint into the accounts the
// execution region cannot touch: the key's lifetime usage, the
// service's usage-unit total and the protocol checkpoint counter.
// Permissionless — anyone may crank it, the sequence and regression
// guards make replays harmless.
//
// The usage account is read raw because while a delegation is live the
// base copy is owned by the delegation program; committed snapshots
// still land in its data.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct ApplyUsageCheckpoint<'info> {
    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = protocol.bump,
    )]
    pub protocol: Account<'info, ProtocolState>,

    #[account(
        mut,
        constraint = api_key.service == service.key() @ LimitGuardError::InvalidApiKey,
    )]
    pub api_key: Account<'info, ApiKeyAccount>,

    #[account(mut)]
    pub service: Account<'info, ServiceAccount>,

    /// The policy the usage account was delegated with
    pub policy: Account<'info, RateLimitPolicy>,

    /// CHECK: owner varies with delegation state; seeds pin the PDA and
    /// the contents are deserialized manually
    #[account(
        seeds = [DelegatedUsageAccount::SEED, api_key.key().as_ref()],
        bump,
    )]
    pub delegated_usage: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<ApplyUsageCheckpoint>) -> Result<()> {
    let usage = {
        let data = ctx.accounts.delegated_usage.try_borrow_data()?;
        DelegatedUsageAccount::try_deserialize(&mut data.as_ref())?
    };

    require!(
        usage.policy == ctx.accounts.policy.key(),
        LimitGuardError::InvalidPolicy
    );

    let api_key = &mut ctx.accounts.api_key;
    api_key.validate_checkpoint_apply(usage.checkpoint_seq, usage.checkpoint_usage)?;

    let delta = usage
        .checkpoint_usage
        .checked_sub(api_key.lifetime_usage)
        .ok_or(LimitGuardError::MathOverflow)?;
    let units = delta
        .checked_mul(ctx.accounts.policy.cost_per_request as u128)
        .ok_or(LimitGuardError::MathOverflow)?;

    let now = Clock::get()?.unix_timestamp;
    api_key.lifetime_usage = usage.checkpoint_usage;
    api_key.last_checkpoint_seq = usage.checkpoint_seq;
    api_key.last_checkpoint_ts = now;

    let service = &mut ctx.accounts.service;
    service.total_usage_units = service
        .total_usage_units
        .checked_add(units)
        .ok_or(LimitGuardError::MathOverflow)?;

    let protocol = &mut ctx.accounts.protocol;
    protocol.total_usage_checkpoints = protocol
        .total_usage_checkpoints
        .checked_add(1)
        .ok_or(LimitGuardError::MathOverflow)?;

    msg!(
        "Checkpoint #{} applied: {} new requests",
        usage.checkpoint_seq,
        delta,
    );

    emit!(UsageCheckpointApplied {
        api_key: api_key.key(),
        service: service.key(),
        checkpoint_seq: usage.checkpoint_seq,
        usage_delta: delta,
        applied_at: now,
    });

    Ok(())
}
