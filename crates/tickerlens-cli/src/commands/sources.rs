use serde::Serialize;
use tickerlens_core::{ProviderId, ProviderPolicy};

use crate::cli::SourcesArgs;
use crate::error::CliError;

use super::{adapter_for, CommandResult};

#[derive(Debug, Serialize)]
struct SourceStatus {
    id: ProviderId,
    available: bool,
    status: &'static str,
    capabilities: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<PolicySummary>,
}

#[derive(Debug, Serialize)]
struct PolicySummary {
    quota_limit: u32,
    quota_window_secs: u64,
    retry_initial_delay_secs: u64,
    retry_max_delay_secs: u64,
    max_retries: u32,
}

impl From<&ProviderPolicy> for PolicySummary {
    fn from(policy: &ProviderPolicy) -> Self {
        Self {
            quota_limit: policy.quota_limit,
            quota_window_secs: policy.quota_window.as_secs(),
            retry_initial_delay_secs: policy.retry_backoff.initial_delay.as_secs(),
            retry_max_delay_secs: policy.retry_backoff.max_delay.as_secs(),
            max_retries: policy.retry_backoff.max_retries,
        }
    }
}

#[derive(Debug, Serialize)]
struct SourcesResponseData {
    sources: Vec<SourceStatus>,
}

pub fn run(args: &SourcesArgs) -> Result<CommandResult, CliError> {
    let sources = ProviderId::ALL
        .into_iter()
        .map(|id| {
            let adapter = adapter_for(id);
            let health = adapter.health();
            SourceStatus {
                id,
                available: health.rate_available,
                status: health.status_label(),
                capabilities: adapter.capabilities().supported_endpoints(),
                policy: args
                    .policies
                    .then(|| PolicySummary::from(&ProviderPolicy::for_provider(id))),
            }
        })
        .collect::<Vec<_>>();

    let data = serde_json::to_value(SourcesResponseData { sources })?;
    Ok(CommandResult::ok(data, ProviderId::ALL.to_vec()))
}
