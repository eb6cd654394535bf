use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::anchor::commit;
use ephemeral_rollups_sdk::ephem::commit_and_undelegate_accounts;

use crate::events::UsageUndelegated;
use crate::state::delegated_usage::DelegatedUsageAccount;

// ──────────────────────────────────────────────────────
// Undelegate Usage — step 5, execution region
//
// Requires every recorded request to be covered by a checkpoint, then
// hands ownership back to the base ledger. The paired
// process_undelegation instruction (generated by #[ephemeral])
// re-establishes program ownership from the account seeds on the base
// side. delegation_seq survives as a high-water mark.
// ──────────────────────────────────────────────────────

#[commit]
#[derive(Accounts)]
pub struct UndelegateUsage<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut)]
    pub delegated_usage: Account<'info, DelegatedUsageAccount>,
}

pub fn handler(ctx: Context<UndelegateUsage>) -> Result<()> {
    let usage = &mut ctx.accounts.delegated_usage;
    usage.validate_undelegation()?;

    usage.delegated = false;
    let delegation_seq = usage.delegation_seq;
    let api_key = usage.api_key;

    emit!(UsageUndelegated {
        delegated_usage: usage.key(),
        api_key,
        delegation_seq,
    });

    // serialize the flipped flag before the commit snapshots the account
    ctx.accounts.delegated_usage.exit(&crate::ID)?;

    commit_and_undelegate_accounts(
        &ctx.accounts.payer,
        vec![&ctx.accounts.delegated_usage.to_account_info()],
        &ctx.accounts.magic_context,
        &ctx.accounts.magic_program,
    )?;

    Ok(())
}
