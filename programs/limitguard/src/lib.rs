use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::anchor::ephemeral;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::enums::*;

declare_id!("J2RuuAJLJoAmAUPcU9PG1yqVKS3J5sZPEhFAX4Atww9U");

#[ephemeral]
#[program]
pub mod limitguard {
    use super::*;

    // ──────────────────────────────────────────────────────
    // PROTOCOL ADMIN
    // ──────────────────────────────────────────────────────

    /// Initialize the protocol singleton. Called once by the deployer;
    /// sets the admin authority, treasury and fee rate.
    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        protocol_fee_bps: u16,
        treasury: Pubkey,
    ) -> Result<()> {
        instructions::initialize_protocol::handler(ctx, protocol_fee_bps, treasury)
    }

    /// Update protocol config. Admin only.
    /// All fields are optional — pass None to keep current value.
    pub fn update_protocol(ctx: Context<UpdateProtocol>, update: ProtocolUpdate) -> Result<()> {
        instructions::update_protocol::handler(ctx, update)
    }

    // ──────────────────────────────────────────────────────
    // SERVICE REGISTRY
    // ──────────────────────────────────────────────────────

    /// Register a new service under the next sequential index.
    pub fn create_service(
        ctx: Context<CreateService>,
        name: String,
        default_policy: Pubkey,
    ) -> Result<()> {
        instructions::create_service::handler(ctx, name, default_policy)
    }

    /// Update service authority and/or default policy. Rejected once
    /// the service is Disabled.
    pub fn update_service(
        ctx: Context<UpdateService>,
        new_authority: Option<Pubkey>,
        new_default_policy: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_service::handler(ctx, new_authority, new_default_policy)
    }

    /// Move the service between Active/Paused, or retire it for good
    /// with Disabled. Disabled is one-way.
    pub fn set_service_status(
        ctx: Context<SetServiceStatus>,
        new_status: ServiceStatus,
    ) -> Result<()> {
        instructions::set_service_status::handler(ctx, new_status)
    }

    // ──────────────────────────────────────────────────────
    // POLICY STORE
    // ──────────────────────────────────────────────────────

    /// Create a new rate-limit policy generation for a service.
    pub fn create_policy(
        ctx: Context<CreatePolicy>,
        requests_per_window: u64,
        window_seconds: u64,
        burst_limit: u64,
        cost_per_request: u64,
    ) -> Result<()> {
        instructions::create_policy::handler(
            ctx,
            requests_per_window,
            window_seconds,
            burst_limit,
            cost_per_request,
        )
    }

    /// Partially update a policy; omitted fields stay as they are.
    pub fn update_policy(
        ctx: Context<UpdatePolicy>,
        requests_per_window: Option<u64>,
        window_seconds: Option<u64>,
        burst_limit: Option<u64>,
        cost_per_request: Option<u64>,
    ) -> Result<()> {
        instructions::update_policy::handler(
            ctx,
            requests_per_window,
            window_seconds,
            burst_limit,
            cost_per_request,
        )
    }

    /// Retire or revive a policy generation.
    pub fn set_policy_status(
        ctx: Context<SetPolicyStatus>,
        new_status: PolicyStatus,
    ) -> Result<()> {
        instructions::set_policy_status::handler(ctx, new_status)
    }

    /// Rebind an API key to another of the service's policies.
    pub fn attach_policy_to_key(ctx: Context<AttachPolicyToKey>) -> Result<()> {
        instructions::attach_policy_to_key::handler(ctx)
    }

    // ──────────────────────────────────────────────────────
    // API KEY REGISTRY
    // ──────────────────────────────────────────────────────

    /// Issue an API key bound to a policy; creates the usage counter
    /// and (lazily) the owner's reputation record.
    pub fn create_api_key(ctx: Context<CreateApiKey>) -> Result<()> {
        instructions::create_api_key::handler(ctx)
    }

    /// Authority override within Active/Throttled/Blocked.
    pub fn set_api_key_status(
        ctx: Context<SetApiKeyStatus>,
        new_status: ApiKeyStatus,
    ) -> Result<()> {
        instructions::set_api_key_status::handler(ctx, new_status)
    }

    /// Permanently revoke a key.
    pub fn revoke_api_key(ctx: Context<RevokeApiKey>) -> Result<()> {
        instructions::revoke_api_key::handler(ctx)
    }

    // ──────────────────────────────────────────────────────
    // DELEGATED USAGE — prepare → delegate → record* → checkpoint → undelegate
    // ──────────────────────────────────────────────────────

    /// Step 1: record the target execution region and open a fresh
    /// window while the program still owns the usage account.
    pub fn prepare_delegation(
        ctx: Context<PrepareDelegation>,
        execution_region: Pubkey,
    ) -> Result<()> {
        instructions::prepare_delegation::handler(ctx, execution_region)
    }

    /// Step 2: transfer write ownership of the usage account to the
    /// prepared execution region.
    pub fn delegate_usage(ctx: Context<DelegateUsage>, execution_region: Pubkey) -> Result<()> {
        instructions::delegate_usage::handler(ctx, execution_region)
    }

    /// Step 3: high-frequency counter update, region side only.
    pub fn record_usage_realtime(ctx: Context<RecordUsageRealtime>, amount: u64) -> Result<()> {
        instructions::record_usage_realtime::handler(ctx, amount)
    }

    /// Step 4: snapshot cumulative usage and schedule a commit back to
    /// the base ledger.
    pub fn submit_usage_checkpoint(ctx: Context<SubmitUsageCheckpoint>) -> Result<()> {
        instructions::submit_usage_checkpoint::handler(ctx)
    }

    /// Step 5: hand ownership back; requires a covering checkpoint.
    pub fn undelegate_usage(ctx: Context<UndelegateUsage>) -> Result<()> {
        instructions::undelegate_usage::handler(ctx)
    }

    /// Base-ledger crank: fold the latest committed checkpoint into the
    /// key, service and protocol totals. Permissionless.
    pub fn apply_usage_checkpoint(ctx: Context<ApplyUsageCheckpoint>) -> Result<()> {
        instructions::apply_usage_checkpoint::handler(ctx)
    }

    // ──────────────────────────────────────────────────────
    // ENFORCEMENT
    // ──────────────────────────────────────────────────────

    /// Derive the key's status from its usage counters and policy.
    pub fn evaluate_enforcement(ctx: Context<EvaluateEnforcement>) -> Result<()> {
        instructions::evaluate_enforcement::handler(ctx)
    }

    /// Authority block that automatic evaluation cannot lift.
    pub fn manual_block_key(ctx: Context<ManualBlockKey>) -> Result<()> {
        instructions::manual_block_key::handler(ctx)
    }

    /// Lift a manual block.
    pub fn manual_unblock_key(ctx: Context<ManualUnblockKey>) -> Result<()> {
        instructions::manual_unblock_key::handler(ctx)
    }

    // ──────────────────────────────────────────────────────
    // ABUSE / REPUTATION
    // ──────────────────────────────────────────────────────

    /// File a timestamped abuse report against a subject.
    pub fn emit_abuse_signal(
        ctx: Context<EmitAbuseSignal>,
        severity: u8,
        category: u32,
    ) -> Result<()> {
        instructions::emit_abuse_signal::handler(ctx, severity, category)
    }

    /// Directly adjust a subject's reputation score. Admin only.
    pub fn update_reputation(ctx: Context<UpdateReputation>, delta: i64) -> Result<()> {
        instructions::update_reputation::handler(ctx, delta)
    }
}
