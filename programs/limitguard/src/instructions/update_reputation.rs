use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::ReputationUpdated;
use crate::state::protocol::ProtocolState;
use crate::state::reputation::ReputationAccount;

// ──────────────────────────────────────────────────────
// Update Reputation — direct score adjustment, admin lever
//
// Overflow-checked add, then clamp to ±1,000,000.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct UpdateReputation<'info> {
    #[account(
        constraint = admin.key() == protocol.admin_authority @ LimitGuardError::Unauthorized,
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED],
        bump = protocol.bump,
    )]
    pub protocol: Account<'info, ProtocolState>,

    #[account(mut)]
    pub reputation: Account<'info, ReputationAccount>,
}

pub fn handler(ctx: Context<UpdateReputation>, delta: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let reputation = &mut ctx.accounts.reputation;
    let new_score = reputation.apply_delta(delta, now)?;

    msg!("Reputation of {} adjusted by {} to {}", reputation.subject, delta, new_score);

    emit!(ReputationUpdated {
        reputation: reputation.key(),
        subject: reputation.subject,
        delta,
        new_score,
    });

    Ok(())
}
