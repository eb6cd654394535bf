pub mod apply_usage_checkpoint;
pub mod attach_policy_to_key;
pub mod create_api_key;
pub mod create_policy;
pub mod create_service;
pub mod delegate_usage;
pub mod emit_abuse_signal;
pub mod evaluate_enforcement;
pub mod initialize_protocol;
pub mod manual_block_key;
pub mod manual_unblock_key;
pub mod prepare_delegation;
pub mod record_usage_realtime;
pub mod revoke_api_key;
pub mod set_api_key_status;
pub mod set_policy_status;
pub mod set_service_status;
pub mod submit_usage_checkpoint;
pub mod undelegate_usage;
pub mod update_policy;
pub mod update_protocol;
pub mod update_reputation;
pub mod update_service;

pub use apply_usage_checkpoint::*;
pub use attach_policy_to_key::*;
pub use create_api_key::*;
pub use create_policy::*;
pub use create_service::*;
pub use delegate_usage::*;
pub use emit_abuse_signal::*;
pub use evaluate_enforcement::*;
pub use initialize_protocol::*;
pub use manual_block_key::*;
pub use manual_unblock_key::*;
pub use prepare_delegation::*;
pub use record_usage_realtime::*;
pub use revoke_api_key::*;
pub use set_api_key_status::*;
pub use set_policy_status::*;
pub use set_service_status::*;
pub use submit_usage_checkpoint::*;
pub use undelegate_usage::*;
pub use update_policy::*;
pub use update_protocol::*;
pub use update_reputation::*;
pub use update_service::*;
