//! Gate state machine.
//!
//! Defines a pure state transition function for the onboarding gate flow.
//! Probes, persistence, and prompt presentation are requested through
//! [`GateAction`] values and executed by the application layer; the machine
//! itself performs no IO.
//!
//! State transitions:
//!
//! ```text
//! Idle
//!  │
//!  ├─→ RunningStandardOnboarding ──→ PromptingFirstChoice ──→ ScanningForExisting
//!  │                              └─→ Done
//!  │
//!  └─→ ScanningForExisting ──→ PromptingExistingDataChoice ──→ PreparingWorkspace ──→ Done
//!                           └─→ RunningStandardOnboarding
//! ```
//!
//! At most one prompting state is reachable at a time; the machine holds a
//! single active state, so two prompts can never be eligible simultaneously.

use super::decision::{CloudDataChoice, Decision, FirstPromptChoice};

/// Gate flow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Session started; no branch picked yet.
    Idle,
    /// Probing for existing remote data.
    ScanningForExisting,
    /// Asking the user whether to enable cloud sync.
    PromptingFirstChoice,
    /// Asking the user to keep remote data or start fresh.
    PromptingExistingDataChoice,
    /// Waiting briefly for the initial import to surface data.
    PreparingWorkspace,
    /// Local onboarding surface is active.
    RunningStandardOnboarding,
    /// Gate finished; the main application may render.
    Done,
}

impl GateState {
    /// Check if this is the terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if the gate is currently waiting on a user prompt.
    pub fn is_prompting(self) -> bool {
        matches!(
            self,
            Self::PromptingFirstChoice | Self::PromptingExistingDataChoice
        )
    }
}

/// Events that drive the gate flow.
///
/// Inputs are either user prompt answers or completions of asynchronous
/// probes run by the application layer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GateEvent {
    /// Session launch with the persisted sync preference.
    Launch { sync_enabled: bool },
    /// The decision engine finished its evaluation.
    DecisionReached {
        decision: Decision,
        /// Whether the keep-remote-vs-start-fresh choice was already made
        /// in a previous session.
        choice_already_made: bool,
    },
    /// Account availability check finished.
    AccountChecked { available: bool },
    /// The user answered the enable-sync prompt.
    FirstChoice(FirstPromptChoice),
    /// The existing-data scan (remote probe and/or local scan) finished.
    ScanCompleted { found: bool },
    /// The user answered the existing-data prompt.
    ExistingDataChoice(CloudDataChoice),
    /// The best-effort initial-import wait finished.
    ImportWaitFinished { completed: bool },
    /// The onboarding UI reported completion.
    OnboardingFinished,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GateAction {
    /// Run the onboarding decision engine.
    EvaluateDecision,
    /// Check whether a remote account is currently usable.
    CheckAccountAvailability,
    /// Persist sync preference = true and apply it to the sync runtime.
    EnableSyncPreference,
    /// Run the existing-data scan (hint-biased remote probe, then local
    /// polling scan).
    ScanForExistingData,
    /// Record the cross-device "remote data was seen" hint.
    RecordStaleHint,
    /// The user declined sync; disable the preference if it was enabled.
    DeclineCloudSync,
    /// Persist the user's explicit cloud-data choice.
    MarkCloudChoiceMade,
    /// Persist sync preference = false and apply it to the sync runtime.
    DisableSyncPreference,
    /// Wait (best effort, non-gating) for the initial import.
    AwaitInitialImport,
    /// Persist onboarding completion.
    MarkOnboardingComplete,
}

/// Pure gate state machine.
pub struct GateStateMachine;

impl GateStateMachine {
    pub fn transition(state: GateState, event: GateEvent) -> (GateState, Vec<GateAction>) {
        match (state, event) {
            (GateState::Idle, GateEvent::Launch { sync_enabled: false }) => (
                GateState::RunningStandardOnboarding,
                vec![GateAction::CheckAccountAvailability],
            ),
            (GateState::Idle, GateEvent::Launch { sync_enabled: true }) => (
                GateState::ScanningForExisting,
                vec![GateAction::EvaluateDecision],
            ),
            (
                GateState::ScanningForExisting,
                GateEvent::DecisionReached {
                    decision: Decision::PromptForCloudDataChoice,
                    choice_already_made,
                },
            ) => {
                // Either way remote data was confirmed, so the hint is
                // recorded for faster probes on other devices.
                if choice_already_made {
                    // The user already resolved this once; never re-prompt.
                    (
                        GateState::RunningStandardOnboarding,
                        vec![GateAction::RecordStaleHint],
                    )
                } else {
                    (
                        GateState::PromptingExistingDataChoice,
                        vec![GateAction::RecordStaleHint],
                    )
                }
            }
            (
                GateState::ScanningForExisting,
                GateEvent::DecisionReached {
                    decision: Decision::ProceedWithStandardOnboarding,
                    ..
                },
            ) => (
                GateState::RunningStandardOnboarding,
                vec![GateAction::CheckAccountAvailability],
            ),
            (
                GateState::RunningStandardOnboarding,
                GateEvent::AccountChecked { available: true },
            ) => (GateState::PromptingFirstChoice, Vec::new()),
            (
                GateState::RunningStandardOnboarding,
                GateEvent::AccountChecked { available: false },
            ) => (GateState::RunningStandardOnboarding, Vec::new()),
            (
                GateState::PromptingFirstChoice,
                GateEvent::FirstChoice(FirstPromptChoice::UseCloud),
            ) => (
                GateState::ScanningForExisting,
                vec![
                    GateAction::EnableSyncPreference,
                    GateAction::ScanForExistingData,
                ],
            ),
            (
                GateState::PromptingFirstChoice,
                GateEvent::FirstChoice(FirstPromptChoice::NotNow),
            ) => (
                GateState::RunningStandardOnboarding,
                vec![GateAction::DeclineCloudSync],
            ),
            (GateState::ScanningForExisting, GateEvent::ScanCompleted { found: true }) => (
                GateState::PromptingExistingDataChoice,
                vec![GateAction::RecordStaleHint],
            ),
            (GateState::ScanningForExisting, GateEvent::ScanCompleted { found: false }) => {
                (GateState::RunningStandardOnboarding, Vec::new())
            }
            (
                GateState::PromptingExistingDataChoice,
                GateEvent::ExistingDataChoice(CloudDataChoice::UseRemoteData),
            ) => (
                GateState::PreparingWorkspace,
                vec![
                    GateAction::MarkCloudChoiceMade,
                    GateAction::AwaitInitialImport,
                ],
            ),
            (
                GateState::PromptingExistingDataChoice,
                GateEvent::ExistingDataChoice(CloudDataChoice::StartFresh),
            ) => (
                GateState::RunningStandardOnboarding,
                vec![
                    GateAction::MarkCloudChoiceMade,
                    GateAction::DisableSyncPreference,
                ],
            ),
            // The import wait never gates completion; either outcome ends
            // the flow.
            (GateState::PreparingWorkspace, GateEvent::ImportWaitFinished { .. }) => {
                (GateState::Done, vec![GateAction::MarkOnboardingComplete])
            }
            (GateState::RunningStandardOnboarding, GateEvent::OnboardingFinished) => {
                (GateState::Done, vec![GateAction::MarkOnboardingComplete])
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}
