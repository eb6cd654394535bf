use anchor_lang::prelude::*;

// ──────────────────────────────────────────────────────
// Abuse Signal — immutable, one per (subject, timestamp)
//
// The PDA seed bakes in the creation timestamp, so the ledger itself
// enforces at most one signal per subject per second.
// ──────────────────────────────────────────────────────

#[account]
pub struct AbuseSignal {
    /// Service that filed the report
    pub reporter_service: Pubkey,

    /// Identity being reported
    pub subject: Pubkey,

    /// 0..=10 severity scale
    pub severity: u8,

    /// Category bitmask, OR-ed into the subject's reputation flags
    pub category: u32,

    pub created_ts: i64,

    /// PDA bump
    pub bump: u8,
}

impl AbuseSignal {
    pub const LEN: usize = 8 // discriminator
        + 32                 // reporter_service
        + 32                 // subject
        + 1                  // severity
        + 4                  // category
        + 8                  // created_ts
        + 1                  // bump
        + 16;                // padding for future fields

    pub const SEED: &'static [u8] = b"abuse_signal";
}
