use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::anchor::delegate;
use ephemeral_rollups_sdk::cpi::DelegateConfig;

use crate::errors::LimitGuardError;
use crate::events::UsageDelegated;
use crate::state::api_key::ApiKeyAccount;
use crate::state::delegated_usage::DelegatedUsageAccount;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Delegate Usage — step 2, base ledger
//
// Hands write ownership of the usage account to the delegation program
// so the recorded execution region can serve high-frequency counter
// updates. From here until process_undelegation, this program cannot
// write the base copy.
// ──────────────────────────────────────────────────────

#[delegate]
#[derive(Accounts)]
pub struct DelegateUsage<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        constraint = api_key.service == service.key() @ LimitGuardError::InvalidApiKey,
    )]
    pub api_key: Account<'info, ApiKeyAccount>,

    /// The usage PDA handed to the delegation program
    /// CHECK: validated by seeds; contents checked manually below
    #[account(
        mut,
        del,
        seeds = [DelegatedUsageAccount::SEED, api_key.key().as_ref()],
        bump,
    )]
    pub delegated_usage: AccountInfo<'info>,
}

pub fn handler(ctx: Context<DelegateUsage>, execution_region: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // Flip the delegated flag in the raw buffer before the CPI moves
    // the account; the delegation program carries the data across.
    let (delegation_seq, usage_key) = {
        let info = &ctx.accounts.delegated_usage;
        let mut data = info.try_borrow_mut_data()?;

        let mut usage = DelegatedUsageAccount::try_deserialize(&mut data.as_ref())?;
        require!(
            usage.api_key == ctx.accounts.api_key.key(),
            LimitGuardError::InvalidApiKey
        );
        usage.validate_handoff(execution_region)?;

        usage.delegated = true;
        usage.delegated_at = now;
        usage.last_update_ts = now;
        usage.try_serialize(&mut &mut data[..])?;

        (usage.delegation_seq, info.key())
    };

    let api_key = ctx.accounts.api_key.key();
    ctx.accounts.delegate_delegated_usage(
        &ctx.accounts.authority,
        &[DelegatedUsageAccount::SEED, api_key.as_ref()],
        DelegateConfig {
            validator: Some(execution_region),
            ..Default::default()
        },
    )?;

    msg!("Usage account delegated to region {}", execution_region);

    emit!(UsageDelegated {
        delegated_usage: usage_key,
        api_key,
        execution_region,
        delegation_seq,
        delegated_at: now,
    });

    Ok(())
}
