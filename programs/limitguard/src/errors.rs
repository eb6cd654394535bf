use anchor_lang::prelude::*;

#[error_code]
pub enum LimitGuardError {
    // ── Authorization ──
    #[msg("Signer is not authorized for this action")]
    Unauthorized,

    // ── Validation ──
    #[msg("Invalid input")]
    InvalidInput,

    #[msg("Rate limit configuration is invalid")]
    InvalidRateLimitConfig,

    #[msg("Service name exceeds 64 bytes")]
    ServiceNameTooLong,

    #[msg("Abuse severity exceeds the 0-10 scale")]
    InvalidSeverity,

    // ── State machine ──
    #[msg("Service status transition is not allowed")]
    InvalidServiceStatusTransition,

    #[msg("API key status transition is not allowed")]
    InvalidApiKeyStatusTransition,

    #[msg("Service is disabled")]
    ServiceDisabled,

    #[msg("API key is not in a usable state")]
    ApiKeyInactive,

    #[msg("API key is blocked")]
    ApiKeyBlocked,

    #[msg("API key is revoked")]
    ApiKeyRevoked,

    #[msg("Policy is disabled")]
    PolicyDisabled,

    #[msg("A manual block is active; use manual_unblock_key")]
    ManualBlockActive,

    // ── Numeric ──
    #[msg("Arithmetic overflow")]
    MathOverflow,

    #[msg("Reputation arithmetic overflow")]
    ReputationOverflow,

    #[msg("Protocol fee exceeds 10,000 basis points")]
    InvalidProtocolFee,

    // ── Delegation protocol ──
    #[msg("Usage account is already delegated")]
    AlreadyDelegated,

    #[msg("Usage account is not delegated")]
    NotDelegated,

    #[msg("Delegation not prepared; call prepare_delegation first")]
    InvalidDelegationState,

    #[msg("Execution region is not recognized")]
    InvalidExecutionRegion,

    #[msg("Undelegation requires a final checkpoint")]
    DelegationRequiresCheckpoint,

    #[msg("Checkpoint sequence is not strictly increasing")]
    InvalidCheckpointSequence,

    #[msg("Checkpoint usage regressed behind the last commit")]
    CheckpointRegression,

    #[msg("Usage window is invalid")]
    InvalidWindow,

    #[msg("Usage window has not finished")]
    WindowNotFinished,

    // ── Enforcement ──
    #[msg("Rate limit exceeded for the current window")]
    RateLimitExceeded,

    #[msg("Burst limit exceeded")]
    BurstLimitExceeded,

    #[msg("Enforcement skipped; usage or policy data missing")]
    EnforcementDataMissing,

    // ── Abuse / reputation ──
    #[msg("An abuse signal already exists for this subject and timestamp")]
    DuplicateAbuseSignal,

    #[msg("Subject reputation is too low")]
    ReputationTooLow,

    // ── Global ──
    #[msg("Protocol has already been initialized")]
    ProtocolAlreadyInitialized,

    #[msg("Protocol is currently paused")]
    ProtocolPaused,

    #[msg("Service account does not match")]
    InvalidService,

    #[msg("Policy account does not match")]
    InvalidPolicy,

    #[msg("API key account does not match")]
    InvalidApiKey,
}
