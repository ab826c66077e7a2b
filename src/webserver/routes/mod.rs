use crate::webserver::{state::AppState, utils::error_response};
use axum::{http::StatusCode, response::Response, Router};
use std::sync::Arc;

pub mod locks;
pub mod status;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(not_found)
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(locks::routes())
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "No such endpoint", None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escrow::fixtures::{unique_pubkey, EscrowBuilder};
    use crate::escrow::MintFilterStrategy;
    use crate::holders::EnrichmentMode;
    use crate::rpc::mock::MockLedger;
    use crate::rpc::EndpointProbe;
    use crate::scanner::{LockScanner, ScanSettings};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(ledger: MockLedger, mint: solana_sdk::pubkey::Pubkey) -> Router {
        app_with_endpoint(ledger, mint, None)
    }

    fn app_with_endpoint(
        ledger: MockLedger,
        mint: solana_sdk::pubkey::Pubkey,
        endpoint: Option<EndpointProbe>,
    ) -> Router {
        let settings = ScanSettings {
            program_id: unique_pubkey(),
            token_mint: mint,
            strategy: MintFilterStrategy::QueryPredicate,
            use_data_slice: true,
            deadline: Duration::from_secs(5),
            max_concurrent_lookups: 4,
            default_mode: EnrichmentMode::LockedOnly,
        };
        let scanner = Arc::new(LockScanner::new(Arc::new(ledger), settings));
        create_router(Arc::new(AppState::new(scanner, endpoint)))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_locks_endpoint() {
        let mint = unique_pubkey();
        let recipient = unique_pubkey();
        let mut ledger = MockLedger::with_accounts(vec![
            EscrowBuilder::schedule(recipient, mint, 100, 10, 5, 50).account(),
            EscrowBuilder::schedule(recipient, mint, 0, 20, 2, 40).account(),
            EscrowBuilder::new(unique_pubkey(), mint).truncated(120),
        ]);
        ledger.set_balance(recipient, &[25]);

        let (status, json) = get(app(ledger, mint), "/api/locks?enrich=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["token"], mint.to_string());
        assert_eq!(json["count"], 1);
        assert_eq!(json["holders"][0]["recipient"], recipient.to_string());
        assert_eq!(json["holders"][0]["locked"], "100");
        assert_eq!(json["holders"][0]["free"], "25");
        assert_eq!(json["holders"][0]["total"], "125");
        // A bad record never turns the response into an error
        assert_eq!(json["diagnostics"].as_array().map(|d| d.len()), Some(1));
    }

    #[tokio::test]
    async fn test_locks_endpoint_uses_default_mode() {
        let mint = unique_pubkey();
        let ledger = MockLedger::with_accounts(vec![
            EscrowBuilder::schedule(unique_pubkey(), mint, 5, 0, 0, 0).account(),
        ]);

        let (status, json) = get(app(ledger, mint), "/api/locks").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["mode"], "locked-only");
        assert!(json["holders"][0].get("free").is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_502() {
        let mut ledger = MockLedger::default();
        ledger.program_error = Some("down".to_string());

        let (status, json) = get(app(ledger, unique_pubkey()), "/api/locks").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "TRANSPORT_ERROR");
        assert!(json["error"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_escrows_and_health_endpoints() {
        let mint = unique_pubkey();
        let ledger = MockLedger::with_accounts(vec![
            EscrowBuilder::schedule(unique_pubkey(), mint, 5, 0, 0, 0).account(),
            EscrowBuilder::schedule(unique_pubkey(), mint, 6, 0, 0, 0).account(),
        ]);
        let app = app(ledger, mint);

        let (status, json) = get(app.clone(), "/api/locks/escrows").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);
        assert!(json["escrows"][0]["escrowAccount"].is_string());

        let (status, json) = get(app.clone(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert!(json["uptimeSeconds"].is_u64());
        assert!(json.get("rpc").is_none());

        let (status, _) = get(app, "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_reports_failed_endpoint_check() {
        let endpoint = EndpointProbe {
            url: "http://127.0.0.1:9".to_string(),
            healthy: false,
            latency_ms: 3,
            version: None,
            error: Some("connection refused".to_string()),
        };
        let app = app_with_endpoint(MockLedger::default(), unique_pubkey(), Some(endpoint));

        let (status, json) = get(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["rpc"]["healthy"], false);
        assert_eq!(json["rpc"]["latencyMs"], 3);
    }
}
