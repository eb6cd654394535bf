use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::ServiceUpdated;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Update Service — authority only, rejected once Disabled
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct UpdateService<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,
}

pub fn handler(
    ctx: Context<UpdateService>,
    new_authority: Option<Pubkey>,
    new_default_policy: Option<Pubkey>,
) -> Result<()> {
    let service = &mut ctx.accounts.service;
    service.assert_not_disabled()?;

    if let Some(authority) = new_authority {
        msg!(
            "Service authority transferred from {} to {}",
            service.authority,
            authority
        );
        service.authority = authority;
    }

    if let Some(policy) = new_default_policy {
        service.default_policy = policy;
    }

    emit!(ServiceUpdated {
        service: service.key(),
        new_authority,
        new_default_policy,
    });

    Ok(())
}
