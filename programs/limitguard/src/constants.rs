// ──────────────────────────────────────────────────────
// Protocol-wide limits and well-known flag bits
// ──────────────────────────────────────────────────────

/// Maximum fee expressed in basis points (10,000 = 100%)
pub const MAX_BPS: u16 = 10_000;

/// Maximum service name length in bytes
pub const MAX_NAME_LEN: usize = 64;

/// Abuse signal severity is a 0..=10 scale
pub const MAX_SEVERITY: u8 = 10;

/// Shortest rate-limit window a policy may configure
pub const MIN_WINDOW_SECONDS: u64 = 1;

/// Reputation scores are clamped into this band
pub const REPUTATION_MIN: i64 = -1_000_000;
pub const REPUTATION_MAX: i64 = 1_000_000;

/// Subjects below this score cannot be issued new API keys
pub const MIN_KEY_REPUTATION: i64 = -100_000;

// ── Reputation flag bits (OR-ed in from abuse signal categories) ──
pub const FLAG_SPAM: u32 = 1 << 0;
pub const FLAG_BOT: u32 = 1 << 1;
pub const FLAG_SUSPICIOUS_BURST: u32 = 1 << 2;
pub const FLAG_MANUAL_BLOCK: u32 = 1 << 3;
