use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};
use crate::ApiResponse;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Opt-in hardening for the two provider calls.
///
/// The default policy makes a single attempt with no timeout, so a run behaves
/// exactly like a plain request unless the operator asks for more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub attempts: u32,
    /// Per-request timeout; `None` keeps the HTTP client default
    pub timeout: Option<Duration>,
    /// Base delay, multiplied by the attempt number
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 1,
            timeout: None,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn with_retries(retries: u32) -> Self {
        RetryPolicy {
            attempts: retries.saturating_add(1),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs `send` until it yields a non-retryable outcome or attempts run out.
    pub fn run<F>(&self, mut send: F) -> Result<ApiResponse>
    where
        F: FnMut(u32) -> Result<ApiResponse>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;

        loop {
            let outcome = send(attempt);
            if attempt >= attempts || !is_retryable(&outcome) {
                return outcome;
            }

            match &outcome {
                Ok(response) => warn!(
                    attempt,
                    attempts,
                    status = response.status,
                    "provider returned a server error, retrying"
                ),
                Err(e) => warn!(attempt, attempts, error = %e, "request failed, retrying"),
            }
            thread::sleep(self.backoff * attempt);
            attempt += 1;
        }
    }
}

fn is_retryable(outcome: &Result<ApiResponse>) -> bool {
    match outcome {
        Ok(response) => response.status >= 500,
        Err(Error::Http(_)) => true,
        Err(_) => false,
    }
}
