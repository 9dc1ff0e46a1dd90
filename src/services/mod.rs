//! External collaborators
//!
//! Both adapters are best-effort, single-shot network calls with no retry;
//! every failure maps to a defined degraded output at the call site.

pub mod copygen;
pub mod shortener;

use std::sync::OnceLock;
use std::time::Duration;

use ureq::Agent;

/// HTTP request timeout shared by both adapters
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Process-wide HTTP Agent (ureq's Agent is Send + Sync)
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

pub(crate) fn http_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}
