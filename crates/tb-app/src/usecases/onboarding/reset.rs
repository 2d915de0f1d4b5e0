use std::sync::Arc;

use tracing::warn;

use tb_core::ports::{GateFlagsPort, StaleHintPort};

/// Use case for resetting the gate (testing or explicit re-onboarding).
///
/// Clears the persisted flags and the cross-device hint. The hint clear is
/// best effort; a failure there must not block the local reset.
pub struct ResetGate {
    flags: Arc<dyn GateFlagsPort>,
    stale_hint: Arc<dyn StaleHintPort>,
}

impl ResetGate {
    pub fn new(flags: Arc<dyn GateFlagsPort>, stale_hint: Arc<dyn StaleHintPort>) -> Self {
        Self { flags, stale_hint }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        self.flags.reset().await?;
        if let Err(err) = self.stale_hint.clear().await {
            warn!(error = %err, "failed to clear stale data hint during reset");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tb_core::flags::GateFlags;

    struct MockGateFlagsPort {
        flags: std::sync::Mutex<GateFlags>,
    }

    #[async_trait::async_trait]
    impl GateFlagsPort for MockGateFlagsPort {
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

    struct MockHint {
        set: AtomicBool,
        fail_clear: bool,
    }

    #[async_trait::async_trait]
    impl StaleHintPort for MockHint {
        async fn has_cloud_data(&self) -> bool {
            self.set.load(Ordering::SeqCst)
        }

        async fn set_has_cloud_data(&self) -> anyhow::Result<()> {
            self.set.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn clear(&self) -> anyhow::Result<()> {
            if self.fail_clear {
                anyhow::bail!("hint store unreachable");
            }
            self.set.store(false, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn reset_clears_flags_and_hint() {
        let flags = Arc::new(MockGateFlagsPort {
            flags: std::sync::Mutex::new(GateFlags {
                cloud_sync_enabled: true,
                onboarding_completed: true,
                cloud_choice_made: true,
            }),
        });
        let hint = Arc::new(MockHint {
            set: AtomicBool::new(true),
            fail_clear: false,
        });

        ResetGate::new(flags.clone(), hint.clone())
            .execute()
            .await
            .unwrap();

        assert_eq!(flags.get_flags().await.unwrap(), GateFlags::default());
        assert!(!hint.has_cloud_data().await);
    }

    #[tokio::test]
    async fn hint_clear_failure_does_not_block_the_reset() {
        let flags = Arc::new(MockGateFlagsPort {
            flags: std::sync::Mutex::new(GateFlags {
                onboarding_completed: true,
                ..Default::default()
            }),
        });
        let hint = Arc::new(MockHint {
            set: AtomicBool::new(true),
            fail_clear: true,
        });

        ResetGate::new(flags.clone(), hint).execute().await.unwrap();

        assert_eq!(flags.get_flags().await.unwrap(), GateFlags::default());
    }
}
