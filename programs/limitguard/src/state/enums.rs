use anchor_lang::prelude::*;

// ──────────────────────────────────────────────────────
// Service Status — 3-state lifecycle, Disabled is terminal
// ──────────────────────────────────────────────────────

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ServiceStatus {
    Active,   // Accepting policies, keys, and usage
    Paused,   // Temporarily suspended by its authority
    Disabled, // Permanently shut down
}

impl Default for ServiceStatus {
    fn default() -> Self {
        ServiceStatus::Active
    }
}

impl ServiceStatus {
    /// Active and Paused are freely interchangeable; either may move to
    /// Disabled. Nothing leaves Disabled.
    pub fn can_transition_to(self, next: ServiceStatus) -> bool {
        match (self, next) {
            (ServiceStatus::Disabled, _) => false,
            (ServiceStatus::Active, ServiceStatus::Paused)
            | (ServiceStatus::Paused, ServiceStatus::Active)
            | (_, ServiceStatus::Disabled) => true,
            _ => false,
        }
    }
}

// ──────────────────────────────────────────────────────
// API Key Status — 4-state lifecycle, Revoked is terminal
// ──────────────────────────────────────────────────────

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ApiKeyStatus {
    Active,    // Within policy bounds
    Throttled, // Window limit met; requests should be slowed
    Blocked,   // Burst limit tripped, or blocked by the service
    Revoked,   // Permanently dead
}

impl Default for ApiKeyStatus {
    fn default() -> Self {
        ApiKeyStatus::Active
    }
}

impl ApiKeyStatus {
    /// Active, Throttled and Blocked are mutually reachable. Revoked is
    /// entered only through revoke_api_key and never left.
    pub fn can_transition_to(self, next: ApiKeyStatus) -> bool {
        self != ApiKeyStatus::Revoked && next != ApiKeyStatus::Revoked
    }

    /// A key that may still record usage.
    pub fn is_usable(self) -> bool {
        matches!(self, ApiKeyStatus::Active | ApiKeyStatus::Throttled)
    }
}

// ──────────────────────────────────────────────────────
// Policy Status — old generations can be retired
// ──────────────────────────────────────────────────────

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PolicyStatus {
    Active,
    Disabled,
}

impl Default for PolicyStatus {
    fn default() -> Self {
        PolicyStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_active_paused_are_interchangeable() {
        assert!(ServiceStatus::Active.can_transition_to(ServiceStatus::Paused));
        assert!(ServiceStatus::Paused.can_transition_to(ServiceStatus::Active));
    }

    #[test]
    fn service_disabled_is_terminal() {
        assert!(ServiceStatus::Active.can_transition_to(ServiceStatus::Disabled));
        assert!(ServiceStatus::Paused.can_transition_to(ServiceStatus::Disabled));
        assert!(!ServiceStatus::Disabled.can_transition_to(ServiceStatus::Active));
        assert!(!ServiceStatus::Disabled.can_transition_to(ServiceStatus::Paused));
        assert!(!ServiceStatus::Disabled.can_transition_to(ServiceStatus::Disabled));
    }

    #[test]
    fn api_key_live_states_are_mutually_reachable() {
        let live = [
            ApiKeyStatus::Active,
            ApiKeyStatus::Throttled,
            ApiKeyStatus::Blocked,
        ];
        for from in live {
            for to in live {
                assert!(from.can_transition_to(to), "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn api_key_revoked_is_terminal() {
        assert!(!ApiKeyStatus::Revoked.can_transition_to(ApiKeyStatus::Active));
        assert!(!ApiKeyStatus::Revoked.can_transition_to(ApiKeyStatus::Throttled));
        assert!(!ApiKeyStatus::Revoked.can_transition_to(ApiKeyStatus::Blocked));
        // set_api_key_status may not enter Revoked either; that path is
        // reserved for revoke_api_key
        assert!(!ApiKeyStatus::Active.can_transition_to(ApiKeyStatus::Revoked));
    }

    #[test]
    fn usable_states() {
        assert!(ApiKeyStatus::Active.is_usable());
        assert!(ApiKeyStatus::Throttled.is_usable());
        assert!(!ApiKeyStatus::Blocked.is_usable());
        assert!(!ApiKeyStatus::Revoked.is_usable());
    }
}
