use crate::errors::StoreError;
use std::time::Duration;

pub const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_WAIT_MAX_ATTEMPTS: u32 = 20;

/// How long a consistency wait keeps probing before it gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_WAIT_INTERVAL,
            max_attempts: DEFAULT_WAIT_MAX_ATTEMPTS,
        }
    }
}

impl WaitPolicy {
    #[must_use]
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Upper bound on the total time spent waiting, used for SDK waiters.
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts.max(1))
    }
}

/// Call `check` until it reports `true`, sleeping `policy.interval` between
/// attempts. Errors from `check` abort the wait immediately.
///
/// # Errors
///
/// Returns `StoreError::WaitTimedOut` once `policy.max_attempts` checks have
/// all reported `false`, or the first error `check` returns.
pub fn poll_until<F>(policy: &WaitPolicy, mut check: F) -> Result<(), StoreError>
where
    F: FnMut() -> Result<bool, StoreError>,
{
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        if check()? {
            return Ok(());
        }
        if attempt < attempts && !policy.interval.is_zero() {
            std::thread::sleep(policy.interval);
        }
    }

    Err(StoreError::WaitTimedOut {
        attempts,
        message: "condition not met".to_string(),
    })
}
