use std::time::Duration;

use crate::ProviderId;

const MINUTE: Duration = Duration::from_secs(60);
const RETRIES: u32 = 3;

/// Request budget and retry guidance for one upstream provider.
///
/// The first retry waits one quota slot (`quota_window / quota_limit`), so a
/// rejected caller is told to come back when the limiter refills a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPolicy {
    pub provider_id: ProviderId,
    pub quota_window: Duration,
    pub quota_limit: u32,
    pub retry_backoff: BackoffPolicy,
}

/// Doubling retry schedule; [`crate::Throttle`] reports these waits on rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    pub max_retries: u32,
}

impl ProviderPolicy {
    /// Polygon's free tier allows five calls a minute; Yahoo is far looser.
    pub fn for_provider(provider_id: ProviderId) -> Self {
        match provider_id {
            ProviderId::Polygon => Self::per_minute(provider_id, 5, MINUTE),
            ProviderId::Yahoo => Self::per_minute(provider_id, 60, Duration::from_secs(30)),
        }
    }

    fn per_minute(provider_id: ProviderId, calls: u32, max_delay: Duration) -> Self {
        let mut policy = Self {
            provider_id,
            quota_window: MINUTE,
            quota_limit: calls,
            retry_backoff: BackoffPolicy {
                initial_delay: Duration::ZERO,
                max_delay,
                multiplier: 2.0,
                max_retries: RETRIES,
            },
        };
        policy.retry_backoff.initial_delay = policy.slot();
        policy
    }

    /// Time for the budget to refill one call.
    pub fn slot(&self) -> Duration {
        self.quota_window / self.quota_limit.max(1)
    }
}
