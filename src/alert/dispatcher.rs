use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::alert::message::AlertMessage;
use crate::alert::sink::AlertSink;
use crate::error::DriftError;
use crate::report::Report;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BACKOFF_SECS: u64 = 2;

/// Wait between delivery attempts.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fixed backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
        }
    }
}

pub struct AlertDispatcher {
    sink: Box<dyn AlertSink>,
    delay: Box<dyn Delay>,
    policy: RetryPolicy,
}

impl AlertDispatcher {
    pub fn new(sink: Box<dyn AlertSink>) -> Self {
        Self::with_delay(sink, Box::new(TokioDelay))
    }

    pub fn with_delay(sink: Box<dyn AlertSink>, delay: Box<dyn Delay>) -> Self {
        Self {
            sink,
            delay,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sends the failure summary, retrying until an attempt succeeds or the
    /// attempt budget is spent. Returns the number of attempts used.
    pub async fn dispatch(&self, report: &Report) -> Result<u32, DriftError> {
        let message = AlertMessage::from_report(report);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.sink.send(&message).await {
                Ok(()) => {
                    info!(attempt, "alert delivered");
                    return Ok(attempt);
                }
                Err(err) => {
                    warn!(attempt, max_attempts, "alert delivery attempt failed: {err}");
                    last_error = err.to_string();
                }
            }
            if attempt < max_attempts {
                self.delay.wait(self.policy.backoff).await;
            }
        }

        Err(DriftError::AlertDeliveryFailed {
            attempts: max_attempts,
            last_error,
        })
    }
}
