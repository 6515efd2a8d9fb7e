//! Scanlog CLI — terminal client for the scan service.
//!
//! Set SCANLOG_API_URL (or API_URL), or pass --api-url. `scan` reads one
//! decoded payload per stdin line and runs it through the capture workflow.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use scanlog_api_client::{ApiClient, ScanApi};
use scanlog_app::{
    AlwaysGranted, CaptureSettings, CaptureState, DecodeOutcome, DeleteOutcome, FixedLocation,
    HistoryList, LinkOutcome, LocationProvider, NoLocation, ScanCapture,
};
use scanlog_cli::terminal::{PrintLinks, TerminalFeedback};
use scanlog_cli::{init_tracing, parse_geo_fix};
use scanlog_core::display::{format_timestamp, truncate_string};
use scanlog_core::{ClientConfig, GeoFix, NewScan};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "scanlog", about = "QR scan log client")]
struct Cli {
    /// Scan service base URL (overrides SCANLOG_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all scans, newest first
    List,
    /// Get a single scan by ID (prints null when absent)
    Get {
        /// Scan ID
        id: i64,
    },
    /// Store a scan directly, bypassing the capture workflow
    Add {
        /// Decoded payload
        data: String,
        /// Position as LAT,LON,ALT,ACC
        #[arg(long, value_parser = parse_geo_fix)]
        location: Option<GeoFix>,
    },
    /// Delete a scan by ID after confirmation
    Delete {
        /// Scan ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the history list as a table
    History,
    /// Open the payload of a scan if it looks like a link
    Open {
        /// Scan ID
        id: i64,
    },
    /// Read decoded payloads from stdin (one per line) and capture them
    Scan {
        /// Device position as LAT,LON,ALT,ACC; omit to scan without location
        #[arg(long, value_parser = parse_geo_fix)]
        location: Option<GeoFix>,
        /// Wait for the cooldown before feeding the next line instead of dropping it
        #[arg(long)]
        wait: bool,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[derive(Serialize)]
struct ScanLine<'a> {
    payload: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
        config.validate()?;
    }
    let client = Arc::new(
        ApiClient::from_config(&config).context("Failed to create API client")?,
    );
    client.initialize().await?;

    match cli.command {
        Commands::List => {
            let scans = client.list_scans().await?;
            print_json(&scans)?;
        }
        Commands::Get { id } => {
            let scan = client.get_scan_by_id(id).await?;
            print_json(&scan)?;
        }
        Commands::Add { data, location } => {
            let id = client
                .create_scan(&NewScan::captured_now(data, location))
                .await?;
            print_json(&serde_json::json!({ "id": id }))?;
        }
        Commands::Delete { id, yes } => {
            let feedback = Arc::new(TerminalFeedback::new(yes));
            let mut history = HistoryList::new(client, feedback, Arc::new(PrintLinks));
            let outcome = history.delete(id).await;
            print_json(&serde_json::json!({
                "id": id,
                "deleted": outcome == DeleteOutcome::Deleted,
            }))?;
            if outcome == DeleteOutcome::Failed {
                anyhow::bail!("Scan {} was not deleted", id);
            }
        }
        Commands::History => {
            let mut history = HistoryList::new(
                client,
                Arc::new(TerminalFeedback::new(false)),
                Arc::new(PrintLinks),
            );
            if !history.on_focus().await {
                anyhow::bail!("Failed to load scans");
            }
            println!("{}", history.summary());
            for entry in history.entries() {
                println!(
                    "{:>6}  {:<19}  {:<40}  {:<28}  {}",
                    entry.record.id,
                    format_timestamp(entry.record.timestamp),
                    truncate_string(&entry.record.qr_data, 40),
                    entry.location_label,
                    if entry.open_link { "link" } else { "" }
                );
            }
        }
        Commands::Open { id } => {
            let scan = client
                .get_scan_by_id(id)
                .await?
                .with_context(|| format!("Scan {} not found", id))?;
            let history = HistoryList::new(
                client,
                Arc::new(TerminalFeedback::new(false)),
                Arc::new(PrintLinks),
            );
            if history.open_link(&scan.qr_data).await != LinkOutcome::Opened {
                anyhow::bail!("Scan {} does not hold an openable link", id);
            }
        }
        Commands::Scan { location, wait } => {
            let location: Arc<dyn LocationProvider> = match location {
                Some(fix) => Arc::new(FixedLocation(fix)),
                None => Arc::new(NoLocation),
            };
            run_scan_loop(client, location, CaptureSettings::from(&config), wait).await?;
        }
    }

    Ok(())
}

async fn run_scan_loop(
    client: Arc<ApiClient>,
    location: Arc<dyn LocationProvider>,
    settings: CaptureSettings,
    wait: bool,
) -> anyhow::Result<()> {
    let capture = ScanCapture::new(
        client,
        Arc::new(AlwaysGranted),
        location,
        Arc::new(TerminalFeedback::new(false)),
        settings,
    );
    capture.start().await;
    let mut gate = capture.subscribe();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Read stdin")? {
        let payload = line.trim();
        if payload.is_empty() {
            continue;
        }
        if wait {
            gate.wait_for(|state| *state == CaptureState::Scanning)
                .await
                .context("Capture workflow stopped")?;
        }
        let outcome = capture.handle_decode(payload).await;
        let (outcome, id) = match outcome {
            DecodeOutcome::Saved { id } => ("saved", Some(id)),
            DecodeOutcome::Failed => ("failed", None),
            DecodeOutcome::Ignored => ("ignored", None),
        };
        println!(
            "{}",
            serde_json::to_string(&ScanLine {
                payload,
                outcome,
                id
            })?
        );
    }

    capture.shutdown();
    tracing::info!(scan_count = capture.scan_count(), "Scan session finished");
    Ok(())
}
