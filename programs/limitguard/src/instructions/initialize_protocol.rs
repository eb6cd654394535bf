use anchor_lang::prelude::*;

use crate::events::ProtocolInitialized;
use crate::state::protocol::ProtocolState;

// ──────────────────────────────────────────────────────
// Initialize Protocol — called once by the deployer
//
// Creates the singleton ProtocolState PDA. The `init` constraint means
// a second attempt fails at the ledger level; there is no path to
// re-initialize.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    /// The deployer; becomes the admin authority
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = ProtocolState::LEN,
        seeds = [ProtocolState::SEED],
        bump,
    )]
    pub protocol: Account<'info, ProtocolState>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeProtocol>,
    protocol_fee_bps: u16,
    treasury: Pubkey,
) -> Result<()> {
    ProtocolState::validate_fee(protocol_fee_bps)?;
    ProtocolState::validate_treasury(&treasury)?;

    let protocol = &mut ctx.accounts.protocol;
    protocol.admin_authority = ctx.accounts.admin.key();
    protocol.treasury = treasury;
    protocol.protocol_fee_bps = protocol_fee_bps;
    protocol.paused = false;
    protocol.service_count = 0;
    protocol.api_key_count = 0;
    protocol.total_usage_checkpoints = 0;
    protocol.bump = ctx.bumps.protocol;

    msg!(
        "Protocol initialized: admin={}, treasury={}, fee={}bps",
        protocol.admin_authority,
        protocol.treasury,
        protocol.protocol_fee_bps,
    );

    emit!(ProtocolInitialized {
        protocol: protocol.key(),
        admin: protocol.admin_authority,
        treasury,
        protocol_fee_bps,
    });

    Ok(())
}
