//! Tidebook Application Orchestration Layer
//!
//! This crate contains the onboarding-gate coordinator, its bounded-time
//! probes, and the small capability use cases around the persisted gate
//! flags.

pub mod probes;
pub mod usecases;

pub use probes::{ImportCompletionMonitor, PollingImportProbe, RemoteExistenceProbe};
pub use usecases::gate::{GateCoordinator, GateError, GateTimeouts, OnboardingDecisionEngine};
