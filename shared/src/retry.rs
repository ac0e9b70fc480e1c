//! Bounded, immediate retry of failed fetches.
//!
//! The decision depends only on the attempt counter and the screen policy,
//! never on what kind of failure occurred. Sources that need error-sensitive
//! policy wrap their own fetch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::model::Entitlement;
use crate::rules;
use crate::screen::{RetryPolicy, ScreenContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryState {
    count: u32,
    max: u32,
    enabled: bool,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            count: 0,
            max: policy.max_attempts,
            enabled: policy.enabled,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn can_retry(&self) -> bool {
        self.enabled && self.count < self.max
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Re-issue the fetch now, under the same refresh.
    Retry,
    /// Retries are spent; serve cached data instead.
    Fallback(FetchError),
    /// Retries are spent and no fallback applies.
    Fail(FetchError),
}

pub fn on_failure(
    ctx: &ScreenContext,
    state: &mut RetryState,
    entitlement: Entitlement,
    err: FetchError,
) -> Decision {
    if state.can_retry() {
        state.count += 1;
        debug!(count = state.count, max = state.max, error = %err, "retrying fetch");
        return Decision::Retry;
    }

    state.reset();

    if rules::fallback_permitted(ctx, entitlement) {
        Decision::Fallback(err)
    } else {
        Decision::Fail(err)
    }
}
