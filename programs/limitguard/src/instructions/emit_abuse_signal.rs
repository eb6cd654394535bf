use anchor_lang::prelude::*;

use crate::constants::MAX_SEVERITY;
use crate::errors::LimitGuardError;
use crate::events::AbuseSignalEmitted;
use crate::state::abuse_signal::AbuseSignal;
use crate::state::reputation::ReputationAccount;
use crate::state::service::ServiceAccount;

// ──────────────────────────────────────────────────────
// Emit Abuse Signal — a service reports a subject
//
// The signal PDA is seeded by (subject, timestamp); init_if_needed
// lets a same-second duplicate be detected and rejected explicitly
// instead of surfacing as an opaque allocation failure. The subject's
// reputation record is created lazily on first report.
// ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct EmitAbuseSignal<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        constraint = service.authority == authority.key() @ LimitGuardError::Unauthorized,
    )]
    pub service: Account<'info, ServiceAccount>,

    /// Identity being reported
    /// CHECK: any address may be a subject
    pub subject: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        space = ReputationAccount::LEN,
        seeds = [ReputationAccount::SEED, subject.key().as_ref()],
        bump,
    )]
    pub reputation: Account<'info, ReputationAccount>,

    #[account(
        init_if_needed,
        payer = authority,
        space = AbuseSignal::LEN,
        seeds = [
            AbuseSignal::SEED,
            subject.key().as_ref(),
            Clock::get().expect("Clock sysvar required").unix_timestamp.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub abuse_signal: Account<'info, AbuseSignal>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<EmitAbuseSignal>, severity: u8, category: u32) -> Result<()> {
    require!(severity <= MAX_SEVERITY, LimitGuardError::InvalidSeverity);

    let signal = &mut ctx.accounts.abuse_signal;
    require!(signal.created_ts == 0, LimitGuardError::DuplicateAbuseSignal);

    let now = Clock::get()?.unix_timestamp;
    let reputation = &mut ctx.accounts.reputation;
    if reputation.subject == Pubkey::default() {
        reputation.subject = ctx.accounts.subject.key();
        reputation.global_score = 0;
        reputation.signal_count = 0;
        reputation.flags = 0;
        reputation.bump = ctx.bumps.reputation;
    }
    reputation.record_signal(category, now)?;

    signal.reporter_service = ctx.accounts.service.key();
    signal.subject = ctx.accounts.subject.key();
    signal.severity = severity;
    signal.category = category;
    signal.created_ts = now;
    signal.bump = ctx.bumps.abuse_signal;

    msg!(
        "Abuse signal: subject={}, severity={}, category={:#x}",
        signal.subject,
        severity,
        category,
    );

    emit!(AbuseSignalEmitted {
        abuse_signal: signal.key(),
        reporter_service: signal.reporter_service,
        subject: signal.subject,
        severity,
        category,
        created_ts: now,
    });

    Ok(())
}
