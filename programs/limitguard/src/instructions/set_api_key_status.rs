use anchor_lang::prelude::*;

use crate::errors::LimitGuardError;
use crate::events::ApiKeyStatusChanged;
use crate::state::api_key::ApiKeyAccount;
use crate::state::enums::ApiKeyStatus;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Set API Key Status — authority override within the live states
//
// Revoked is never entered or left here; a manual block can only be
// lifted through manual_unblock_key.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct SetApiKeyStatus<'info> {
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

pub fn handler(ctx: Context<SetApiKeyStatus>, new_status: ApiKeyStatus) -> Result<()> {
    let api_key = &mut ctx.accounts.api_key;

    require!(
        api_key.status.can_transition_to(new_status),
        LimitGuardError::InvalidApiKeyStatusTransition
    );
    if api_key.manually_blocked && new_status != ApiKeyStatus::Blocked {
        return err!(LimitGuardError::ManualBlockActive);
    }

    api_key.status = new_status;

    emit!(ApiKeyStatusChanged {
        api_key: api_key.key(),
        service: api_key.service,
        new_status,
    });

    Ok(())
}
