use std::time::Duration;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Capped exponential reconnect delay: `min(max, 2^retries * base)`.
///
/// Errors grow the retry counter; a successful open resets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    retries: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY)
    }
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            retries: 0,
        }
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn on_open(&mut self) {
        self.retries = 0;
    }

    pub fn on_error(&mut self) {
        self.retries = self.retries.saturating_add(1);
    }

    /// Delay before the next attempt, from the current retry count.
    pub fn delay(&self) -> Duration {
        2u32.checked_pow(self.retries)
            .and_then(|factor| self.base.checked_mul(factor))
            .map_or(self.max, |delay| delay.min(self.max))
    }
}
