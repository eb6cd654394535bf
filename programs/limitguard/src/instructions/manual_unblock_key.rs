use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::KeyManuallyUnblocked;
use crate::state::api_key::ApiKeyAccount;
use crate::state::enums::ApiKeyStatus;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Manual Unblock Key — the only way out of a manual block
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct ManualUnblockKey<'info> {
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

pub fn handler(ctx: Context<ManualUnblockKey>) -> Result<()> {
    let api_key = &mut ctx.accounts.api_key;

    require!(
        api_key.status != ApiKeyStatus::Revoked,
        LimitGuardError::InvalidApiKeyStatusTransition
    );

    api_key.status = ApiKeyStatus::Active;
    api_key.manually_blocked = false;

    emit!(KeyManuallyUnblocked {
        api_key: api_key.key(),
        service: api_key.service,
    });

    Ok(())
}
