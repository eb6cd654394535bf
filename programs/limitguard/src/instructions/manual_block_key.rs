use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::KeyManuallyBlocked;
use crate::state::api_key::ApiKeyAccount;
use crate::state::enums::ApiKeyStatus;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Manual Block Key — authority override, sticky until unblocked
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct ManualBlockKey<'info> {
    pub authority: Signer<'info>,

    #[account(
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        mut,
        constraint = api_key.service == service.key() @ LimitGuardError::InvalidApiKey,
    )]
    pub api_key: Account<'info, ApiKeyAccount>,
}

pub fn handler(ctx: Context<ManualBlockKey>) -> Result<()> {
    let api_key = &mut ctx.accounts.api_key;

    require!(
        api_key.status != ApiKeyStatus::Revoked,
        LimitGuardError::ApiKeyRevoked
    );

    api_key.status = ApiKeyStatus::Blocked;
    api_key.manually_blocked = true;

    emit!(KeyManuallyBlocked {
        api_key: api_key.key(),
        service: api_key.service,
    });

    Ok(())
}
