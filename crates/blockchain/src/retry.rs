use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Errors that can tell whether another attempt might succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for shared::Error {
    fn is_retryable(&self) -> bool {
        shared::Error::is_retryable(self)
    }
}

/// Retry configuration with a fixed delay between attempts
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl From<&shared::config::UpstreamConfig> for RetryConfig {
    fn from(config: &shared::config::UpstreamConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: config.retry_delay(),
        }
    }
}

/// Execute an operation, retrying retryable failures after a fixed delay
///
/// # Arguments
/// * `operation_name` - Name of the operation for logging
/// * `config` - Retry configuration
/// * `operation` - Async function to execute
///
/// # Returns
/// Result of the operation, the first non-retryable error, or the last
/// error once all attempts are used
pub async fn retry_with_delay<F, Fut, T, E>(
    operation_name: &str,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display + Retryable,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        debug!(
            "Executing '{}' - attempt {}/{}",
            operation_name, attempt, max_attempts
        );

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(
                        "'{}' succeeded on attempt {}/{}",
                        operation_name, attempt, max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) if !e.is_retryable() => {
                warn!("'{}' failed with non-retryable error: {}", operation_name, e);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "'{}' failed on attempt {}/{}: {}",
                    operation_name, attempt, max_attempts, e
                );

                if attempt >= max_attempts {
                    return Err(e);
                }

                debug!("Retrying '{}' after {:?}", operation_name, config.delay);
                sleep(config.delay).await;
            }
        }
    }
}
