use lockwatch::{
    arguments::{self, print_help},
    config,
    logger::{self, LogTag},
    rpc::{probe_endpoint, LedgerClient, RpcClient},
    scanner::{LockScanner, ScanSettings},
    webserver::{self, state::AppState},
};
use std::sync::Arc;

/// Main entry point for lockwatch
///
/// Loads configuration, probes the RPC endpoint, then serves the lock
/// report over HTTP until a shutdown signal arrives.
#[tokio::main]
async fn main() {
    // Check for help request first (before any other processing)
    if arguments::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::init();
    logger::info(LogTag::System, "🚀 lockwatch starting up...");

    let modes = arguments::enabled_debug_modes(&arguments::get_cmd_args());
    if !modes.is_empty() {
        logger::info(
            LogTag::System,
            &format!("Debug modes enabled: {}", modes.join(", ")),
        );
    }

    let code = match run().await {
        Ok(()) => {
            logger::info(LogTag::System, "✅ lockwatch stopped");
            0
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ lockwatch failed: {}", e));
            1
        }
    };

    logger::flush();
    std::process::exit(code);
}

async fn run() -> Result<(), String> {
    let config = config::load_config(arguments::config_path().as_deref())?;

    let client = RpcClient::from_config(&config.rpc).map_err(|e| e.to_string())?;
    // Scans still run against an unhealthy endpoint; /api/health reports it
    let endpoint = probe_endpoint(&client).await;

    let settings = ScanSettings::from_config(&config).map_err(|e| e.to_string())?;
    logger::info(
        LogTag::Scanner,
        &format!(
            "Watching program {} for mint {} (strategy {}, default mode {})",
            settings.program_id,
            settings.token_mint,
            settings.strategy,
            settings.default_mode.as_str()
        ),
    );

    let client: Arc<dyn LedgerClient> = Arc::new(client);
    let scanner = Arc::new(LockScanner::new(client, settings));
    let state = Arc::new(AppState::new(scanner, Some(endpoint)));

    let webserver_config = config.webserver.clone();
    let mut server =
        tokio::spawn(async move { webserver::start_server(&webserver_config, state).await });

    tokio::select! {
        result = &mut server => {
            // Server exited on its own, usually a bind failure
            return join_result(result);
        }
        signal = wait_for_shutdown_signal() => signal?,
    }

    webserver::shutdown();
    join_result(server.await)
}

fn join_result(
    result: Result<Result<(), String>, tokio::task::JoinError>,
) -> Result<(), String> {
    match result {
        Ok(inner) => inner,
        Err(e) => Err(format!("Webserver task failed: {}", e)),
    }
}

/// Wait for shutdown signal (Ctrl+C, SIGTERM on Unix)
async fn wait_for_shutdown_signal() -> Result<(), String> {
    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint =
            signal(SignalKind::interrupt()).map_err(|e| format!("Failed to bind SIGINT: {}", e))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| format!("Failed to bind SIGTERM: {}", e))?;

        tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        }
    };

    #[cfg(not(unix))]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| format!("Failed to listen for shutdown signal: {}", e))?;
        "CTRL_C"
    };

    logger::warning(
        LogTag::System,
        &format!("Shutdown signal received ({}), stopping...", signal_name),
    );
    Ok(())
}
