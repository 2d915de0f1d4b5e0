//! Persisted gate flags
//!
//! This module defines the durable flags the onboarding gate reads and
//! writes. They are the only cross-session state the gate touches and are
//! persisted through [`crate::ports::GateFlagsPort`].

/// Durable onboarding-gate flags.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GateFlags {
    /// Whether cloud sync is enabled (the user's sync preference).
    pub cloud_sync_enabled: bool,
    /// Whether onboarding has concluded by any path. Never reset
    /// automatically; the UI layer gates the main surface on this alone.
    pub onboarding_completed: bool,
    /// Whether the user has made an explicit keep-remote-vs-start-fresh
    /// decision. Once true, the existing-data prompt is suppressed for the
    /// lifetime of the installation.
    pub cloud_choice_made: bool,
}

impl Default for GateFlags {
    fn default() -> Self {
        Self {
            cloud_sync_enabled: false,
            onboarding_completed: false,
            cloud_choice_made: false,
        }
    }
}
