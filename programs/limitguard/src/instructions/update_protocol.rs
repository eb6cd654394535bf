use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::ProtocolUpdated;
use crate::state::protocol::ProtocolState;

// ──────────────────────────────────────────────────────
// Update Protocol — admin only
//
// Every field is optional; None leaves the current value in place.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct UpdateProtocol<'info> {
    #[account(
        constraint = admin.key() == protocol.admin_authority @ LimitGuardError::Unauthorized,
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = protocol.bump,
    )]
    pub protocol: Account<'info, ProtocolState>,
}

/// What to update — all fields optional (None = don't change)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ProtocolUpdate {
    pub new_fee_bps: Option<u16>,
    pub new_treasury: Option<Pubkey>,
    pub paused: Option<bool>,
}

pub fn handler(ctx: Context<UpdateProtocol>, update: ProtocolUpdate) -> Result<()> {
    let protocol = &mut ctx.accounts.protocol;

    if let Some(fee_bps) = update.new_fee_bps {
        ProtocolState::validate_fee(fee_bps)?;
        protocol.protocol_fee_bps = fee_bps;
        msg!("Protocol fee updated to {}bps", fee_bps);
    }

    if let Some(treasury) = update.new_treasury {
        ProtocolState::validate_treasury(&treasury)?;
        protocol.treasury = treasury;
        msg!("Treasury updated to {}", treasury);
    }

    if let Some(paused) = update.paused {
        protocol.paused = paused;
        msg!("Protocol paused: {}", paused);
    }

    emit!(ProtocolUpdated {
        protocol: protocol.key(),
        new_fee_bps: update.new_fee_bps,
        new_treasury: update.new_treasury,
        paused: update.paused,
    });

    Ok(())
}
