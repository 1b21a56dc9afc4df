//! Caller-side polling with a deadline.
//!
//! `HuixingImageClient` never loops on its own. The service has no failed
//! status, so a task it drops stays `processing` forever; this helper is
//! how a caller bounds that wait.
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};
use crate::image::client::HuixingImageClient;
use crate::image::response::TaskResult;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two status queries.
    pub interval: Duration,
    /// Total budget. A timeout too large to represent means no deadline.
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Query `task_id` until it completes, an error occurs, or the next query
/// would land past the deadline.
pub async fn wait_for_completion(
    client: &HuixingImageClient,
    task_id: &str,
    policy: &PollPolicy,
) -> AppResult<TaskResult> {
    let deadline = Instant::now().checked_add(policy.timeout);
    let mut attempts: u32 = 0;
    loop {
        let res = client.get_task_status(task_id).await?;
        attempts += 1;
        if res.is_completed() {
            return Ok(res);
        }

        let expired = match deadline {
            None => false,
            Some(deadline) => Instant::now()
                .checked_add(policy.interval)
                .map_or(true, |next| next > deadline),
        };
        if expired {
            tracing::warn!(task_id, attempts, "Task still processing at deadline");
            return Err(AppError::PollTimeout {
                timeout: policy.timeout,
                last: res,
            });
        }

        tracing::debug!(task_id, attempts, "Still processing, sleeping {:?}", policy.interval);
        tokio::time::sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.timeout, Duration::from_secs(600));
    }
}
