//! Gate decision types.
//!
//! Transient outcomes of a single evaluation; none of these carry identity
//! or lifecycle beyond one call.

use serde::{Deserialize, Serialize};

/// Outcome of the onboarding decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Remote data exists; offer to adopt it.
    PromptForCloudDataChoice,
    /// No confirmed remote data; run the standard onboarding path.
    ProceedWithStandardOnboarding,
}

/// The user's answer to the "sync with the cloud?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPromptChoice {
    UseCloud,
    NotNow,
}

/// The user's answer to the "existing cloud data found" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudDataChoice {
    UseRemoteData,
    StartFresh,
}
