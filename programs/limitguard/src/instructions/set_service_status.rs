use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::ServiceStatusChanged;
use crate::state::enums::ServiceStatus;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Set Service Status — Active ↔ Paused freely, Disabled is one-way
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct SetServiceStatus<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,
}

pub fn handler(ctx: Context<SetServiceStatus>, new_status: ServiceStatus) -> Result<()> {
    let service = &mut ctx.accounts.service;

    require!(
        service.status.can_transition_to(new_status),
        LimitGuardError::InvalidServiceStatusTransition
    );
    service.status = new_status;

    msg!("Service status set to {:?}", new_status);

    emit!(ServiceStatusChanged {
        service: service.key(),
        new_status,
    });

    Ok(())
}
