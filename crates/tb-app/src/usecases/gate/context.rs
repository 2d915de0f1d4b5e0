use std::sync::Arc;

use tokio::sync::Mutex;

use tb_core::gate::GateState;

/// Shared gate context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: serializes `dispatch` calls so the entire
///   transition + action execution + state update runs atomically. This is
///   what keeps at most one probe chain in flight and at most one prompt
///   eligible at a time.
/// - `state`: used for both reading (`get_state`) and writing (during
///   `dispatch`).
#[derive(Clone)]
pub struct GateContext {
    /// Current gate state.
    state: Arc<Mutex<GateState>>,
    /// Serializes dispatch calls; only acquired during `dispatch`, NOT
    /// during `get_state`.
    dispatch_lock: Arc<Mutex<()>>,
}

impl GateContext {
    pub fn new(initial_state: GateState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a GateContext in the `Idle` state.
    pub fn idle() -> Self {
        Self::new(GateState::Idle)
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns the current state without acquiring the dispatch lock.
    pub async fn get_state(&self) -> GateState {
        *self.state.lock().await
    }

    /// Acquires the dispatch lock for serializing concurrent dispatch calls.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Updates the state; call only while holding the dispatch lock.
    pub async fn set_state(&self, state: GateState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}
