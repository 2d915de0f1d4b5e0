//! Gate event port
//!
//! Emits gate state changes to the UI layer, which renders the
//! idle/scanning/prompting/preparing surfaces from them.

use async_trait::async_trait;

use crate::gate::GateState;

#[async_trait]
pub trait GateEventPort: Send + Sync {
    /// Notify observers that the gate entered a new state.
    async fn emit_gate_state_changed(&self, state: GateState);
}
