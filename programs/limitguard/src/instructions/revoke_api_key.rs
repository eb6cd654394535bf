use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::ApiKeyRevoked;
use crate::state::api_key::ApiKeyAccount;
use crate::state::enums::ApiKeyStatus;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Revoke API Key — terminal, no way back
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct RevokeApiKey<'info> {
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

pub fn handler(ctx: Context<RevokeApiKey>) -> Result<()> {
    let api_key = &mut ctx.accounts.api_key;
    api_key.status = ApiKeyStatus::Revoked;

    let now = Clock::get()?.unix_timestamp;
    msg!("API key {} revoked", api_key.key());

    emit!(ApiKeyRevoked {
        api_key: api_key.key(),
        service: api_key.service,
        revoked_at: now,
    });

    Ok(())
}
