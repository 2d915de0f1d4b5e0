//! Broadcast gate event emitter
//!
//! Fan-out of gate state changes to the UI layer. Emission never fails:
//! when nobody is subscribed yet (e.g., during very early startup) the
//! state change is simply dropped, and the UI reads the current state
//! directly when it attaches.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use tb_core::gate::GateState;
use tb_core::ports::GateEventPort;

pub struct BroadcastGateEvents {
    tx: broadcast::Sender<GateState>,
}

impl BroadcastGateEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GateState> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastGateEvents {
    fn default() -> Self {
        Self::new(16)
    }
}

#[async_trait]
impl GateEventPort for BroadcastGateEvents {
    async fn emit_gate_state_changed(&self, state: GateState) {
        if self.tx.send(state).is_err() {
            debug!(?state, "gate state change emitted with no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_state_changes_in_order() {
        let events = BroadcastGateEvents::default();
        let mut rx = events.subscribe();

        events
            .emit_gate_state_changed(GateState::ScanningForExisting)
            .await;
        events.emit_gate_state_changed(GateState::Done).await;

        assert_eq!(rx.recv().await.unwrap(), GateState::ScanningForExisting);
        assert_eq!(rx.recv().await.unwrap(), GateState::Done);
    }

    #[tokio::test]
    async fn emitting_without_subscribers_is_not_an_error() {
        let events = BroadcastGateEvents::default();
        events.emit_gate_state_changed(GateState::Done).await;
    }
}
