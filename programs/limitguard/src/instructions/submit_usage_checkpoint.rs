use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::anchor::commit;
use ephemeral_rollups_sdk::ephem::commit_accounts;

use crate::events::UsageCheckpointSubmitted;
use crate::state::delegated_usage::DelegatedUsageAccount;

// ──────────────────────────────────────────────────────
// Submit Usage Checkpoint — step 4, execution region
//
// Snapshots the cumulative counter under the next sequence number and
// schedules an async commit of the account back to the base ledger.
// The sequence/high-water guards reject a stale or replayed region
// snapshot instead of letting it overwrite newer state.
// ──────────────────────────────────────────────────────

#[commit]
#[derive(Accounts)]
pub struct SubmitUsageCheckpoint<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut)]
    pub delegated_usage: Account<'info, DelegatedUsageAccount>,
}

pub fn handler(ctx: Context<SubmitUsageCheckpoint>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let usage = &mut ctx.accounts.delegated_usage;
    let seq = usage.next_checkpoint_seq()?;
    usage.record_checkpoint(seq, now)?;

    msg!(
        "Checkpoint #{} submitted, cumulative usage {}",
        seq,
        usage.cumulative_usage,
    );

    emit!(UsageCheckpointSubmitted {
        delegated_usage: usage.key(),
        api_key: usage.api_key,
        checkpoint_seq: seq,
        cumulative_usage: usage.cumulative_usage,
    });

    commit_accounts(
        &ctx.accounts.payer,
        vec![&ctx.accounts.delegated_usage.to_account_info()],
        &ctx.accounts.magic_context,
        &ctx.accounts.magic_program,
    )?;

    Ok(())
}
