use anchor_lang::prelude::*;

use crate::constants::MIN_KEY_REPUTATION;
use crate::errors::LimitGuardError;
use crate::events::ApiKeyCreated;
use crate::state::api_key::ApiKeyAccount;
use crate::state::delegated_usage::DelegatedUsageAccount;
use crate::state::enums::ApiKeyStatus;
use crate::state::policy::RateLimitPolicy;
use crate::state::protocol::ProtocolState;
use crate::state::reputation::ReputationAccount;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Create API Key — issue a key bound to a policy
//
// Creates the key, its usage counter, and (lazily) the owner's
// reputation record in one transaction. Reputation records are shared
// across all of an owner's keys, so init_if_needed reuses an existing
// one — and an owner who has already dug themselves below the
// reputation floor is refused a new key.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct CreateApiKey<'info> {
    /// The service authority issuing the key
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = protocol.bump,
        constraint = !protocol.paused @ LimitGuardError::ProtocolPaused,
    )]
    pub protocol: Account<'info, ProtocolState>,

    #[account(
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        constraint = policy.service == service.key() @ LimitGuardError::InvalidPolicy,
    )]
    pub policy: Account<'info, RateLimitPolicy>,

    /// Consumer identity the key is issued to
    /// CHECK: any address; the issuing authority decides whom to trust
    pub owner: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        space = ApiKeyAccount::LEN,
        seeds = [
            ApiKeyAccount::SEED,
            protocol.api_key_count.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub api_key: Account<'info, ApiKeyAccount>,

    #[account(
        init,
        payer = authority,
        space = DelegatedUsageAccount::LEN,
        seeds = [DelegatedUsageAccount::SEED, api_key.key().as_ref()],
        bump,
    )]
    pub delegated_usage: Account<'info, DelegatedUsageAccount>,

    #[account(
        init_if_needed,
        payer = authority,
        space = ReputationAccount::LEN,
        seeds = [ReputationAccount::SEED, owner.key().as_ref()],
        bump,
    )]
    pub reputation: Account<'info, ReputationAccount>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateApiKey>) -> Result<()> {
    ctx.accounts.service.assert_active()?;
    ctx.accounts.policy.assert_active()?;

    let now = Clock::get()?.unix_timestamp;

    let reputation = &mut ctx.accounts.reputation;
    if reputation.subject == Pubkey::default() {
        // first key for this owner
        reputation.subject = ctx.accounts.owner.key();
        reputation.global_score = 0;
        reputation.signal_count = 0;
        reputation.last_updated_ts = now;
        reputation.flags = 0;
        reputation.bump = ctx.bumps.reputation;
    } else {
        require!(
            reputation.global_score >= MIN_KEY_REPUTATION,
            LimitGuardError::ReputationTooLow
        );
    }

    let protocol = &mut ctx.accounts.protocol;
    let index = protocol.api_key_count;
    protocol.api_key_count = index
        .checked_add(1)
        .ok_or(LimitGuardError::MathOverflow)?;

    let api_key = &mut ctx.accounts.api_key;
    api_key.service = ctx.accounts.service.key();
    api_key.owner = ctx.accounts.owner.key();
    api_key.policy = ctx.accounts.policy.key();
    api_key.reputation = reputation.key();
    api_key.status = ApiKeyStatus::Active;
    api_key.manually_blocked = false;
    api_key.lifetime_usage = 0;
    api_key.last_checkpoint_seq = 0;
    api_key.last_checkpoint_ts = 0;
    api_key.bump = ctx.bumps.api_key;

    let usage = &mut ctx.accounts.delegated_usage;
    usage.api_key = api_key.key();
    usage.policy = api_key.policy;
    usage.execution_region = Pubkey::default();
    usage.delegated = false;
    usage.delegation_seq = 0;
    usage.window_start_ts = now;
    usage.current_window_usage = 0;
    usage.burst_counter = 0;
    usage.cumulative_usage = 0;
    usage.checkpoint_seq = 0;
    usage.checkpoint_usage = 0;
    usage.last_update_ts = now;
    usage.delegated_at = 0;
    usage.bump = ctx.bumps.delegated_usage;

    msg!("API key #{} issued to {}", index, api_key.owner);

    emit!(ApiKeyCreated {
        api_key: api_key.key(),
        service: api_key.service,
        owner: api_key.owner,
        policy: api_key.policy,
        index,
    });

    Ok(())
}
