use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, Table};
use lockwatch::arguments;
use lockwatch::config::{self, Config};
use lockwatch::escrow::MintFilterStrategy;
use lockwatch::holders::{EnrichmentMode, EscrowListing, ScanReport};
use lockwatch::logger::{self, LogTag};
use lockwatch::rpc::{probe_endpoint, LedgerClient, RpcClient};
use lockwatch::scanner::{LockScanner, ScanSettings};
use std::sync::Arc;

/// Run one lock scan from the command line and print the result.
///
/// Uses the same config file and environment overrides as the server.
#[derive(Parser, Debug)]
#[command(name = "tool_lock_report", about = "Report vesting-locked holders for a token")]
struct Args {
    /// Config file (default: data/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Token mint to report on (overrides config)
    #[arg(long)]
    mint: Option<String>,

    /// Lock program id (overrides config)
    #[arg(long)]
    program: Option<String>,

    /// RPC endpoint (overrides config)
    #[arg(long)]
    rpc: Option<String>,

    /// Look up each holder's free wallet balance (default: enrichment.enabled)
    #[arg(long, default_value_t = false)]
    enrich: bool,

    /// Mint filter strategy: query or post-decode
    #[arg(long)]
    strategy: Option<MintFilterStrategy>,

    /// List individual escrows instead of holders
    #[arg(long, default_value_t = false)]
    escrows: bool,

    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Debug output for a log tag (repeatable), e.g. --debug rpc
    #[arg(long = "debug", value_name = "TAG")]
    debug: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = load(&args)?;
    let mut settings = ScanSettings::from_config(&config)?;
    if let Some(strategy) = args.strategy {
        settings.strategy = strategy;
    }

    let client = RpcClient::from_config(&config.rpc).context("Failed to create RPC client")?;
    let endpoint = probe_endpoint(&client).await;
    if !endpoint.healthy {
        bail!(
            "RPC endpoint {} is not healthy: {}",
            endpoint.url,
            endpoint.error.as_deref().unwrap_or("no response")
        );
    }

    let client: Arc<dyn LedgerClient> = Arc::new(client);
    let scanner = LockScanner::new(client, settings);

    let result = if args.escrows {
        let listing = scanner.list_escrows().await?;
        output(&listing, args.json, print_escrows)
    } else {
        let report = scanner.scan(requested_mode(args.enrich)).await?;
        output(&report, args.json, print_holders)
    };

    logger::flush();
    result
}

fn init_logging(args: &Args) {
    let mut flags = vec!["tool_lock_report".to_string(), "--no-log-file".to_string()];
    flags.extend(args.debug.iter().map(|tag| format!("--debug-{}", tag)));
    if args.json {
        flags.push("--no-console-log".to_string());
    }
    arguments::set_cmd_args(flags);
    logger::init();
}

/// `--enrich` forces free-balance lookups; without it the configured default applies
fn requested_mode(enrich: bool) -> Option<EnrichmentMode> {
    enrich.then_some(EnrichmentMode::WithFreeBalance)
}

/// Flags are looked up under the environment variable names they replace
fn flag_overrides(args: &Args) -> impl Fn(&str) -> Option<String> + '_ {
    move |key: &str| match key {
        config::utils::ENV_TOKEN_MINT => args.mint.clone(),
        config::utils::ENV_LOCK_PROGRAM_ID => args.program.clone(),
        config::utils::ENV_RPC_ENDPOINT => args.rpc.clone(),
        _ => None,
    }
}

fn load(args: &Args) -> Result<Config> {
    let config = config::load_config_with(args.config.as_deref(), flag_overrides(args))
        .map_err(|e| anyhow!(e))?;

    logger::debug(
        LogTag::Config,
        &format!("Scanning mint {} via {}", config.lock.token_mint, config.rpc.url),
    );
    Ok(config)
}

fn output<T: serde::Serialize>(value: &T, json: bool, table: fn(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        table(value);
    }
    Ok(())
}

fn print_holders(report: &ScanReport) {
    let enriched = report.mode == EnrichmentMode::WithFreeBalance;

    let mut header = vec!["#", "Recipient", "Locked"];
    if enriched {
        header.extend(["Free", "Total"]);
    }
    header.push("Escrows");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);

    for (i, holder) in report.holders.iter().enumerate() {
        let mut row = vec![
            Cell::new(i + 1),
            Cell::new(&holder.recipient),
            Cell::new(&holder.locked).set_alignment(CellAlignment::Right),
        ];
        if enriched {
            row.push(Cell::new(holder.free.as_deref().unwrap_or("-")).set_alignment(CellAlignment::Right));
            row.push(Cell::new(holder.total.as_deref().unwrap_or("-")).set_alignment(CellAlignment::Right));
        }
        row.push(Cell::new(holder.escrow_count));
        table.add_row(row);
    }

    println!("{}", table);
    println!(
        "token {}  holders {}  scanned {}  rejected {}  {}ms",
        report.token, report.count, report.stats.scanned, report.stats.rejected, report.stats.elapsed_ms
    );
    if report.partial {
        let note = format!(
            "partial: {} holder(s) without a free balance{}",
            report.degraded.len(),
            if report.truncated { " (deadline reached)" } else { "" }
        );
        println!("{}", note.yellow());
    }
    print_diagnostics(&report.diagnostics);
}

fn print_escrows(listing: &EscrowListing) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Escrow",
        "Recipient",
        "Total vesting",
        "Claimed",
        "Locked",
        "Periods",
        "Cancelled",
    ]);

    for escrow in &listing.escrows {
        table.add_row(vec![
            Cell::new(&escrow.escrow_account),
            Cell::new(&escrow.recipient),
            Cell::new(&escrow.total_vesting).set_alignment(CellAlignment::Right),
            Cell::new(&escrow.total_claimed).set_alignment(CellAlignment::Right),
            Cell::new(&escrow.locked).set_alignment(CellAlignment::Right),
            Cell::new(escrow.number_of_period),
            if escrow.cancelled {
                Cell::new("yes").fg(Color::Red)
            } else {
                Cell::new("no")
            },
        ]);
    }

    println!("{}", table);
    println!("token {}  escrows {}", listing.token, listing.count);
    print_diagnostics(&listing.diagnostics);
}

fn print_diagnostics(diagnostics: &[lockwatch::errors::RecordIssue]) {
    if diagnostics.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Skipped account", "Reason"]);
    for issue in diagnostics {
        table.add_row(vec![Cell::new(&issue.account), Cell::new(&issue.message).fg(Color::Yellow)]);
    }
    println!("{}", table);
}
