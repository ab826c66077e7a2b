use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    errors::ScanError,
    holders::EnrichmentMode,
    logger::{self, LogTag},
    webserver::{
        state::AppState,
        utils::{scan_error_response, success_response},
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct LocksQuery {
    /// Overrides the configured enrichment default
    pub enrich: Option<bool>,
}

/// Create lock report routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/locks", get(get_locks))
        .route("/locks/escrows", get(get_escrows))
}

/// GET /api/locks
async fn get_locks(State(state): State<Arc<AppState>>, Query(query): Query<LocksQuery>) -> Response {
    let mode = query.enrich.map(EnrichmentMode::from_flag);
    logger::debug(
        LogTag::Webserver,
        &format!("GET /api/locks (enrich={:?})", query.enrich),
    );

    match state.scanner.scan(mode).await {
        Ok(report) => success_response(report),
        Err(e) => {
            log_failure("Lock report", &e);
            scan_error_response(&e)
        }
    }
}

/// GET /api/locks/escrows
async fn get_escrows(State(state): State<Arc<AppState>>) -> Response {
    logger::debug(LogTag::Webserver, "GET /api/locks/escrows");

    match state.scanner.list_escrows().await {
        Ok(listing) => success_response(listing),
        Err(e) => {
            log_failure("Escrow listing", &e);
            scan_error_response(&e)
        }
    }
}

/// Upstream hiccups are warnings; a misconfigured service is an error
fn log_failure(what: &str, err: &ScanError) {
    let message = format!("{} failed: {}", what, err);
    if err.is_recoverable() {
        logger::warning(LogTag::Webserver, &message);
    } else {
        logger::error(LogTag::Webserver, &message);
    }
}
