use anchor_lang::prelude::*;

use crate::state::enums::*;

// ──────────────────────────────────────────────────────
// Events — emitted for off-chain indexing
// ──────────────────────────────────────────────────────

#[event]
pub struct ProtocolInitialized {
    pub protocol: Pubkey,
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub protocol_fee_bps: u16,
}

#[event]
pub struct ProtocolUpdated {
    pub protocol: Pubkey,
    pub new_fee_bps: Option<u16>,
    pub new_treasury: Option<Pubkey>,
    pub paused: Option<bool>,
}

#[event]
pub struct ServiceCreated {
    pub service: Pubkey,
    pub authority: Pubkey,
    pub index: u64,
    pub name: String,
    pub default_policy: Pubkey,
    pub created_at: i64,
}

#[event]
pub struct ServiceUpdated {
    pub service: Pubkey,
    pub new_authority: Option<Pubkey>,
    pub new_default_policy: Option<Pubkey>,
}

#[event]
pub struct ServiceStatusChanged {
    pub service: Pubkey,
    pub new_status: ServiceStatus,
}

#[event]
pub struct PolicyCreated {
    pub policy: Pubkey,
    pub service: Pubkey,
    pub generation: u128,
    pub requests_per_window: u64,
    pub window_seconds: u64,
    pub burst_limit: u64,
    pub cost_per_request: u64,
}

#[event]
pub struct PolicyUpdated {
    pub policy: Pubkey,
    pub requests_per_window: Option<u64>,
    pub window_seconds: Option<u64>,
    pub burst_limit: Option<u64>,
    pub cost_per_request: Option<u64>,
}

#[event]
pub struct PolicyStatusChanged {
    pub policy: Pubkey,
    pub service: Pubkey,
    pub new_status: PolicyStatus,
}

#[event]
pub struct PolicyAttachedToKey {
    pub api_key: Pubkey,
    pub policy: Pubkey,
    pub service: Pubkey,
}

#[event]
pub struct ApiKeyCreated {
    pub api_key: Pubkey,
    pub service: Pubkey,
    pub owner: Pubkey,
    pub policy: Pubkey,
    pub index: u64,
}

#[event]
pub struct ApiKeyStatusChanged {
    pub api_key: Pubkey,
    pub service: Pubkey,
    pub new_status: ApiKeyStatus,
}

#[event]
pub struct ApiKeyRevoked {
    pub api_key: Pubkey,
    pub service: Pubkey,
    pub revoked_at: i64,
}

#[event]
pub struct KeyManuallyBlocked {
    pub api_key: Pubkey,
    pub service: Pubkey,
}

#[event]
pub struct KeyManuallyUnblocked {
    pub api_key: Pubkey,
    pub service: Pubkey,
}

#[event]
pub struct UsageDelegated {
    pub delegated_usage: Pubkey,
    pub api_key: Pubkey,
    pub execution_region: Pubkey,
    pub delegation_seq: u64,
    pub delegated_at: i64,
}

#[event]
pub struct UsageRecordedRealtime {
    pub delegated_usage: Pubkey,
    pub api_key: Pubkey,
    pub amount: u64,
    pub window_usage: u64,
    pub burst_counter: u64,
}

#[event]
pub struct UsageCheckpointSubmitted {
    pub delegated_usage: Pubkey,
    pub api_key: Pubkey,
    pub checkpoint_seq: u64,
    pub cumulative_usage: u128,
}

#[event]
pub struct UsageCheckpointApplied {
    pub api_key: Pubkey,
    pub service: Pubkey,
    pub checkpoint_seq: u64,
    pub usage_delta: u128,
    pub applied_at: i64,
}

#[event]
pub struct UsageUndelegated {
    pub delegated_usage: Pubkey,
    pub api_key: Pubkey,
    pub delegation_seq: u64,
}

#[event]
pub struct EnforcementEvaluated {
    pub api_key: Pubkey,
    pub new_status: ApiKeyStatus,
    pub window_usage: u64,
    pub burst_counter: u64,
}

#[event]
pub struct AbuseSignalEmitted {
    pub abuse_signal: Pubkey,
    pub reporter_service: Pubkey,
    pub subject: Pubkey,
    pub severity: u8,
    pub category: u32,
    pub created_ts: i64,
}

#[event]
pub struct ReputationUpdated {
    pub reputation: Pubkey,
    pub subject: Pubkey,
    pub delta: i64,
    pub new_score: i64,
}
