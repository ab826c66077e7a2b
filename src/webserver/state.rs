/// Shared application state for the webserver
///
/// Holds the scanner (and through it the injected ledger client) plus the
/// result of the startup endpoint check.
use crate::rpc::EndpointProbe;
use crate::scanner::LockScanner;
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<LockScanner>,

    /// Endpoint check made at startup, None when it was skipped
    pub endpoint: Option<EndpointProbe>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(scanner: Arc<LockScanner>, endpoint: Option<EndpointProbe>) -> Self {
        Self {
            scanner,
            endpoint,
            startup_time: chrono::Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }

    /// "ok", or "degraded" when the endpoint failed its startup check
    pub fn status(&self) -> &'static str {
        match &self.endpoint {
            Some(endpoint) if !endpoint.healthy => "degraded",
            _ => "ok",
        }
    }
}
