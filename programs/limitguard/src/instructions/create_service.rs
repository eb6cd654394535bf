use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::ServiceCreated;
use crate::state::enums::ServiceStatus;
use crate::state::protocol::ProtocolState;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Create Service — register a new API service
//
// The service PDA is derived from the pre-increment service_count, so
// indexes are dense and 0-based.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct CreateService<'info> {
    /// Becomes the service authority
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
        init,
        payer = authority,
        space = ServiceAccount::LEN,
        seeds = [
            ServiceAccount::SEED,
            protocol.service_count.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub service: Account<'info, ServiceAccount>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateService>, name: String, default_policy: Pubkey) -> Result<()> {
    ServiceAccount::validate_name(&name)?;

    let protocol = &mut ctx.accounts.protocol;
    let index = protocol.service_count;
    protocol.service_count = index
        .checked_add(1)
        .ok_or(LimitGuardError::MathOverflow)?;

    let now = Clock::get()?.unix_timestamp;
    let service = &mut ctx.accounts.service;
    service.authority = ctx.accounts.authority.key();
    service.name = name.clone();
    service.status = ServiceStatus::Active;
    service.default_policy = default_policy;
    service.total_usage_units = 0;
    service.created_ts = now;
    service.bump = ctx.bumps.service;

    msg!("Service #{} created: {}", index, service.name);

    emit!(ServiceCreated {
        service: service.key(),
        authority: service.authority,
        index,
        name,
        default_policy,
        created_at: now,
    });

    Ok(())
}
