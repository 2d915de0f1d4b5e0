//! Gate coordinator.
//!
//! This module drives the gate state machine and executes its side effects:
//! flag persistence, availability checks, the existing-data scan, and the
//! best-effort initial-import wait. One coordinator exists per application
//! session; dispatch calls are serialized, so at most one probe chain is in
//! flight and at most one prompt is eligible at any moment.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, info_span, warn, Instrument};

use tb_core::flags::GateFlags;
use tb_core::gate::{
    CloudDataChoice, FirstPromptChoice, GateAction, GateEvent, GateState, GateStateMachine,
};
use tb_core::ports::{
    CloudAvailabilityPort, GateEventPort, GateFlagsPort, ImportStatusPort, LedgerStorePort,
    StaleHintPort, SyncControlPort,
};

use crate::probes::{ImportCompletionMonitor, PollingImportProbe, RemoteExistenceProbe};
use crate::usecases::gate::context::GateContext;
use crate::usecases::gate::decision_engine::OnboardingDecisionEngine;

/// Errors produced by the gate coordinator.
///
/// Probe and checker failures never surface here; they are coerced to
/// negative results. Only flag-persistence failures propagate, and they go
/// to the embedding shell, never to a user-facing dialog.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("gate flag persistence failed: {0}")]
    Flags(#[from] anyhow::Error),
}

/// Deadlines and polling intervals for the gate's probes.
#[derive(Debug, Clone)]
pub struct GateTimeouts {
    /// Budget for the fast remote existence probe.
    pub remote_probe: Duration,
    /// Overall budget for the local polling scan.
    pub local_scan: Duration,
    /// Interval between local scan polls.
    pub local_scan_interval: Duration,
    /// Budget for the best-effort initial-import wait.
    pub import_wait: Duration,
    /// Interval between import-status polls.
    pub import_wait_interval: Duration,
}

impl Default for GateTimeouts {
    fn default() -> Self {
        Self {
            remote_probe: Duration::from_secs(6),
            local_scan: Duration::from_secs(3),
            local_scan_interval: Duration::from_millis(300),
            import_wait: Duration::from_secs(10),
            import_wait_interval: Duration::from_millis(200),
        }
    }
}

/// Coordinator that sequences availability checks, probes, user prompts,
/// and the terminal readiness signal.
pub struct GateCoordinator {
    context: Arc<GateContext>,

    flags: Arc<dyn GateFlagsPort>,
    availability: Arc<dyn CloudAvailabilityPort>,
    stale_hint: Arc<dyn StaleHintPort>,
    sync_control: Arc<dyn SyncControlPort>,
    events: Arc<dyn GateEventPort>,

    decision_engine: OnboardingDecisionEngine,
    remote_probe: RemoteExistenceProbe,
    local_scan: PollingImportProbe,
    import_monitor: ImportCompletionMonitor,
    timeouts: GateTimeouts,
}

impl GateCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flags: Arc<dyn GateFlagsPort>,
        availability: Arc<dyn CloudAvailabilityPort>,
        stale_hint: Arc<dyn StaleHintPort>,
        ledger: Arc<dyn LedgerStorePort>,
        import_status: Arc<dyn ImportStatusPort>,
        sync_control: Arc<dyn SyncControlPort>,
        events: Arc<dyn GateEventPort>,
        timeouts: GateTimeouts,
    ) -> Self {
        Self {
            context: GateContext::idle().arc(),
            flags,
            availability: availability.clone(),
            stale_hint,
            sync_control,
            events,
            decision_engine: OnboardingDecisionEngine::new(availability.clone()),
            remote_probe: RemoteExistenceProbe::new(availability),
            local_scan: PollingImportProbe::new(ledger),
            import_monitor: ImportCompletionMonitor::new(import_status),
            timeouts,
        }
    }

    /// Starts the gate flow for this session.
    ///
    /// A session whose onboarding already completed goes straight to `Done`
    /// without running any probe.
    pub async fn launch(&self) -> Result<GateState, GateError> {
        let flags = self.load_flags().await;
        if flags.onboarding_completed {
            let _dispatch_guard = self.context.acquire_dispatch_lock().await;
            self.set_state_and_emit(GateState::Done).await;
            return Ok(GateState::Done);
        }
        self.dispatch(GateEvent::Launch {
            sync_enabled: flags.cloud_sync_enabled,
        })
        .await
    }

    /// The user answered the enable-sync prompt.
    pub async fn choose_first_prompt(
        &self,
        choice: FirstPromptChoice,
    ) -> Result<GateState, GateError> {
        self.dispatch(GateEvent::FirstChoice(choice)).await
    }

    /// The user answered the existing-data prompt.
    pub async fn choose_existing_data(
        &self,
        choice: CloudDataChoice,
    ) -> Result<GateState, GateError> {
        self.dispatch(GateEvent::ExistingDataChoice(choice)).await
    }

    /// The onboarding UI reported completion.
    pub async fn finish_onboarding(&self) -> Result<GateState, GateError> {
        self.dispatch(GateEvent::OnboardingFinished).await
    }

    /// Current gate state, for rendering.
    pub async fn state(&self) -> GateState {
        self.context.get_state().await
    }

    /// The terminal readiness signal the UI layer observes to switch from
    /// the gate to the main application surface.
    pub async fn is_ready(&self) -> bool {
        match self.flags.is_completed().await {
            Ok(completed) => completed,
            Err(err) => {
                warn!(error = %err, "failed to read onboarding completion flag");
                false
            }
        }
    }

    async fn dispatch(&self, event: GateEvent) -> Result<GateState, GateError> {
        // Serialize concurrent dispatch calls so two callers cannot read the
        // same state and execute duplicate probe chains.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.gate_coordinator.dispatch", event = ?event);
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current;
                let event_name = format!("{:?}", event);
                let (next, actions) = GateStateMachine::transition(current, event);
                info!(from = ?from, to = ?next, event = %event_name, "gate state transition");
                // Emit before executing so the UI renders the scanning and
                // preparing surfaces while their probes run.
                self.set_state_and_emit(next).await;
                current = next;
                let follow_up_events = self.execute_actions(actions).await?;
                pending_events.extend(follow_up_events);
            }

            Ok(current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<GateAction>,
    ) -> Result<Vec<GateEvent>, GateError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "gate executing action");
            match action {
                GateAction::EvaluateDecision => {
                    let decision = self.decision_engine.initial_decision().await;
                    let choice_already_made = self.load_flags().await.cloud_choice_made;
                    follow_up_events.push(GateEvent::DecisionReached {
                        decision,
                        choice_already_made,
                    });
                }
                GateAction::CheckAccountAvailability => {
                    let available = self.availability.account_available().await;
                    follow_up_events.push(GateEvent::AccountChecked { available });
                }
                GateAction::EnableSyncPreference => {
                    self.persist_sync_preference(true).await?;
                }
                GateAction::ScanForExistingData => {
                    let found = self.scan_for_existing_data().await;
                    follow_up_events.push(GateEvent::ScanCompleted { found });
                }
                GateAction::RecordStaleHint => {
                    if let Err(err) = self.stale_hint.set_has_cloud_data().await {
                        warn!(error = %err, "failed to record stale data hint");
                    }
                }
                GateAction::DeclineCloudSync => {
                    if self.load_flags().await.cloud_sync_enabled {
                        self.persist_sync_preference(false).await?;
                    }
                }
                GateAction::MarkCloudChoiceMade => {
                    let mut flags = self.load_flags().await;
                    flags.cloud_choice_made = true;
                    self.flags.set_flags(&flags).await?;
                }
                GateAction::DisableSyncPreference => {
                    self.persist_sync_preference(false).await?;
                }
                GateAction::AwaitInitialImport => {
                    let completed = self
                        .import_monitor
                        .await_initial_import(
                            self.timeouts.import_wait,
                            self.timeouts.import_wait_interval,
                        )
                        .await;
                    info!(completed, "initial import wait finished");
                    follow_up_events.push(GateEvent::ImportWaitFinished { completed });
                }
                GateAction::MarkOnboardingComplete => {
                    let mut flags = self.load_flags().await;
                    flags.onboarding_completed = true;
                    self.flags.set_flags(&flags).await?;
                }
            }
        }

        Ok(follow_up_events)
    }

    /// Runs the existing-data scan: when a prior hint exists, try the fast
    /// remote probe first; otherwise, or when the hint turns out stale, fall
    /// through to the local polling scan.
    async fn scan_for_existing_data(&self) -> bool {
        if self.stale_hint.has_cloud_data().await {
            if self
                .remote_probe
                .has_any_remote_data(self.timeouts.remote_probe)
                .await
            {
                return true;
            }
            debug!("stale data hint not confirmed remotely, falling back to local scan");
        }
        self.local_scan
            .scan_for_existing_data(self.timeouts.local_scan, self.timeouts.local_scan_interval)
            .await
    }

    /// Persists the preference, then applies it to the sync runtime before
    /// returning so no later probe runs against a stale configuration. An
    /// apply failure is logged and ignored; stalling onboarding on it would
    /// be worse than probing optimistically.
    async fn persist_sync_preference(&self, enable: bool) -> Result<(), GateError> {
        let mut flags = self.load_flags().await;
        flags.cloud_sync_enabled = enable;
        self.flags.set_flags(&flags).await?;

        if let Err(err) = self.sync_control.apply_sync_preference(enable).await {
            warn!(error = %err, enable, "sync preference apply failed, proceeding anyway");
        }
        Ok(())
    }

    async fn load_flags(&self) -> GateFlags {
        match self.flags.get_flags().await {
            Ok(flags) => flags,
            Err(err) => {
                warn!(error = %err, "failed to load gate flags, using defaults");
                GateFlags::default()
            }
        }
    }

    async fn set_state_and_emit(&self, state: GateState) {
        self.context.set_state(state).await;
        self.events.emit_gate_state_changed(state).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tb_core::ledger::RecordProvenance;

    struct MemoryFlags {
        flags: Mutex<GateFlags>,
    }

    impl MemoryFlags {
        fn new(flags: GateFlags) -> Arc<Self> {
            Arc::new(Self {
                flags: Mutex::new(flags),
            })
        }
    }

    #[async_trait]
    impl GateFlagsPort for MemoryFlags {
        async fn get_flags(&self) -> anyhow::Result<GateFlags> {
            Ok(self.flags.lock().unwrap().clone())
        }

        async fn set_flags(&self, flags: &GateFlags) -> anyhow::Result<()> {
            *self.flags.lock().unwrap() = flags.clone();
            Ok(())
        }

        async fn reset(&self) -> anyhow::Result<()> {
            *self.flags.lock().unwrap() = GateFlags::default();
            Ok(())
        }
    }

    struct ScriptedAvailability {
        account_available: bool,
        cloud_data_exists: bool,
    }

    #[async_trait]
    impl CloudAvailabilityPort for ScriptedAvailability {
        async fn account_available(&self) -> bool {
            self.account_available
        }

        async fn cloud_data_exists(&self) -> bool {
            self.cloud_data_exists
        }
    }

    struct MemoryHint {
        set: AtomicBool,
    }

    impl MemoryHint {
        fn new(set: bool) -> Arc<Self> {
            Arc::new(Self {
                set: AtomicBool::new(set),
            })
        }
    }

    #[async_trait]
    impl StaleHintPort for MemoryHint {
        async fn has_cloud_data(&self) -> bool {
            self.set.load(Ordering::SeqCst)
        }

        async fn set_has_cloud_data(&self) -> anyhow::Result<()> {
            self.set.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn clear(&self) -> anyhow::Result<()> {
            self.set.store(false, Ordering::SeqCst);
            Ok(())
        }
    }

    struct ScriptedLedger {
        remote_records: bool,
    }

    #[async_trait]
    impl LedgerStorePort for ScriptedLedger {
        async fn has_records(
            &self,
            provenance: Option<RecordProvenance>,
        ) -> anyhow::Result<bool> {
            Ok(match provenance {
                Some(RecordProvenance::Remote) | None => self.remote_records,
                Some(RecordProvenance::Local) => false,
            })
        }
    }

    struct ScriptedImportStatus {
        completed: bool,
    }

    #[async_trait]
    impl ImportStatusPort for ScriptedImportStatus {
        async fn initial_import_completed(&self) -> bool {
            self.completed
        }
    }

    struct RecordingSyncControl {
        applied: Mutex<Vec<bool>>,
        fail: bool,
    }

    impl RecordingSyncControl {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                applied: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                applied: Mutex::new(Vec::new()),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl SyncControlPort for RecordingSyncControl {
        async fn apply_sync_preference(&self, enable: bool) -> anyhow::Result<()> {
            self.applied.lock().unwrap().push(enable);
            if self.fail {
                anyhow::bail!("sync runtime unreachable");
            }
            Ok(())
        }
    }

    struct RecordingEvents {
        states: Mutex<Vec<GateState>>,
    }

    impl RecordingEvents {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                states: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<GateState> {
            self.states.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GateEventPort for RecordingEvents {
        async fn emit_gate_state_changed(&self, state: GateState) {
            self.states.lock().unwrap().push(state);
        }
    }

    fn fast_timeouts() -> GateTimeouts {
        GateTimeouts {
            remote_probe: Duration::from_millis(50),
            local_scan: Duration::from_millis(50),
            local_scan_interval: Duration::from_millis(10),
            import_wait: Duration::from_millis(50),
            import_wait_interval: Duration::from_millis(10),
        }
    }

    struct Harness {
        flags: Arc<MemoryFlags>,
        hint: Arc<MemoryHint>,
        sync_control: Arc<RecordingSyncControl>,
        events: Arc<RecordingEvents>,
        coordinator: GateCoordinator,
    }

    fn harness(
        flags: GateFlags,
        availability: ScriptedAvailability,
        hint_set: bool,
        remote_records: bool,
        import_completed: bool,
    ) -> Harness {
        let flags = MemoryFlags::new(flags);
        let hint = MemoryHint::new(hint_set);
        let sync_control = RecordingSyncControl::new();
        let events = RecordingEvents::new();
        let coordinator = GateCoordinator::new(
            flags.clone(),
            Arc::new(availability),
            hint.clone(),
            Arc::new(ScriptedLedger { remote_records }),
            Arc::new(ScriptedImportStatus {
                completed: import_completed,
            }),
            sync_control.clone(),
            events.clone(),
            fast_timeouts(),
        );
        Harness {
            flags,
            hint,
            sync_control,
            events,
            coordinator,
        }
    }

    #[tokio::test]
    async fn completed_onboarding_short_circuits_to_done() {
        let h = harness(
            GateFlags {
                onboarding_completed: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: true,
            },
            false,
            false,
            false,
        );

        let state = h.coordinator.launch().await.unwrap();

        assert_eq!(state, GateState::Done);
        assert_eq!(h.events.seen(), vec![GateState::Done]);
        assert!(h.coordinator.is_ready().await);
    }

    #[tokio::test]
    async fn sync_enabled_with_cloud_data_prompts_for_existing_data() {
        let h = harness(
            GateFlags {
                cloud_sync_enabled: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: true,
            },
            false,
            false,
            false,
        );

        let state = h.coordinator.launch().await.unwrap();

        assert_eq!(state, GateState::PromptingExistingDataChoice);
        assert!(h.hint.has_cloud_data().await);
    }

    #[tokio::test]
    async fn confirmed_remote_data_records_the_hint_even_without_a_prompt() {
        let h = harness(
            GateFlags {
                cloud_sync_enabled: true,
                cloud_choice_made: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: true,
            },
            false,
            false,
            false,
        );

        h.coordinator.launch().await.unwrap();

        assert!(h.hint.has_cloud_data().await);
    }

    #[tokio::test]
    async fn prior_cloud_choice_suppresses_the_existing_data_prompt() {
        let h = harness(
            GateFlags {
                cloud_sync_enabled: true,
                cloud_choice_made: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: true,
            },
            false,
            false,
            false,
        );

        let state = h.coordinator.launch().await.unwrap();

        assert_eq!(state, GateState::RunningStandardOnboarding);
        assert!(!h
            .events
            .seen()
            .contains(&GateState::PromptingExistingDataChoice));
    }

    #[tokio::test]
    async fn unavailable_account_and_no_data_runs_standard_onboarding() {
        let h = harness(
            GateFlags::default(),
            ScriptedAvailability {
                account_available: false,
                cloud_data_exists: false,
            },
            false,
            false,
            false,
        );

        let state = h.coordinator.launch().await.unwrap();

        assert_eq!(state, GateState::RunningStandardOnboarding);

        let state = h.coordinator.finish_onboarding().await.unwrap();
        assert_eq!(state, GateState::Done);
        assert!(h.coordinator.is_ready().await);
    }

    #[tokio::test]
    async fn choosing_cloud_applies_preference_and_scans() {
        let h = harness(
            GateFlags::default(),
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: false,
            },
            false,
            true,
            false,
        );

        let state = h.coordinator.launch().await.unwrap();
        assert_eq!(state, GateState::PromptingFirstChoice);

        let state = h
            .coordinator
            .choose_first_prompt(FirstPromptChoice::UseCloud)
            .await
            .unwrap();

        // Local scan saw remote records; hint recorded, prompt shown.
        assert_eq!(state, GateState::PromptingExistingDataChoice);
        assert!(h.flags.get_flags().await.unwrap().cloud_sync_enabled);
        assert_eq!(*h.sync_control.applied.lock().unwrap(), vec![true]);
        assert!(h.hint.has_cloud_data().await);
    }

    #[tokio::test]
    async fn stale_hint_prefers_the_remote_probe() {
        let h = harness(
            GateFlags::default(),
            ScriptedAvailability {
                account_available: true,
                // Remote probe confirms instantly; no local scan needed.
                cloud_data_exists: true,
            },
            true,
            false,
            false,
        );

        h.coordinator.launch().await.unwrap();
        let state = h
            .coordinator
            .choose_first_prompt(FirstPromptChoice::UseCloud)
            .await
            .unwrap();

        assert_eq!(state, GateState::PromptingExistingDataChoice);
    }

    #[tokio::test]
    async fn declining_sync_resets_a_previously_enabled_preference() {
        let h = harness(
            GateFlags {
                cloud_sync_enabled: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: false,
            },
            false,
            false,
            false,
        );

        let state = h.coordinator.launch().await.unwrap();
        assert_eq!(state, GateState::PromptingFirstChoice);

        let state = h
            .coordinator
            .choose_first_prompt(FirstPromptChoice::NotNow)
            .await
            .unwrap();

        assert_eq!(state, GateState::RunningStandardOnboarding);
        assert!(!h.flags.get_flags().await.unwrap().cloud_sync_enabled);
        assert_eq!(*h.sync_control.applied.lock().unwrap(), vec![false]);
    }

    #[tokio::test]
    async fn keeping_remote_data_completes_without_standard_onboarding() {
        let h = harness(
            GateFlags {
                cloud_sync_enabled: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: true,
            },
            false,
            false,
            false,
        );

        let state = h.coordinator.launch().await.unwrap();
        assert_eq!(state, GateState::PromptingExistingDataChoice);

        let state = h
            .coordinator
            .choose_existing_data(CloudDataChoice::UseRemoteData)
            .await
            .unwrap();

        assert_eq!(state, GateState::Done);
        let flags = h.flags.get_flags().await.unwrap();
        assert!(flags.cloud_choice_made);
        assert!(flags.onboarding_completed);
        assert!(!h
            .events
            .seen()
            .contains(&GateState::RunningStandardOnboarding));
        // The import never finished within budget; completion must not
        // depend on it.
        assert!(h.coordinator.is_ready().await);
    }

    #[tokio::test]
    async fn starting_fresh_disables_sync_and_runs_onboarding() {
        let h = harness(
            GateFlags {
                cloud_sync_enabled: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: true,
            },
            false,
            false,
            false,
        );

        h.coordinator.launch().await.unwrap();
        let state = h
            .coordinator
            .choose_existing_data(CloudDataChoice::StartFresh)
            .await
            .unwrap();

        assert_eq!(state, GateState::RunningStandardOnboarding);
        let flags = h.flags.get_flags().await.unwrap();
        assert!(flags.cloud_choice_made);
        assert!(!flags.cloud_sync_enabled);
        assert_eq!(*h.sync_control.applied.lock().unwrap(), vec![false]);
    }

    #[tokio::test]
    async fn sync_apply_failure_does_not_stall_the_gate() {
        let flags = MemoryFlags::new(GateFlags::default());
        let events = RecordingEvents::new();
        let coordinator = GateCoordinator::new(
            flags.clone(),
            Arc::new(ScriptedAvailability {
                account_available: true,
                cloud_data_exists: false,
            }),
            MemoryHint::new(false),
            Arc::new(ScriptedLedger {
                remote_records: false,
            }),
            Arc::new(ScriptedImportStatus { completed: false }),
            RecordingSyncControl::failing(),
            events.clone(),
            fast_timeouts(),
        );

        coordinator.launch().await.unwrap();
        let state = coordinator
            .choose_first_prompt(FirstPromptChoice::UseCloud)
            .await
            .unwrap();

        // Apply failed, scan found nothing; the safe default terminates
        // the gate path.
        assert_eq!(state, GateState::RunningStandardOnboarding);
        assert!(flags.get_flags().await.unwrap().cloud_sync_enabled);
    }

    #[tokio::test]
    async fn scanning_state_is_emitted_before_the_scan_runs() {
        let h = harness(
            GateFlags {
                cloud_sync_enabled: true,
                ..Default::default()
            },
            ScriptedAvailability {
                account_available: true,
                cloud_data_exists: true,
            },
            false,
            false,
            false,
        );

        h.coordinator.launch().await.unwrap();

        let seen = h.events.seen();
        assert_eq!(seen.first(), Some(&GateState::ScanningForExisting));
    }
}
