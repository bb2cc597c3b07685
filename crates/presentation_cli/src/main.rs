//! Berlin transport CLI
//!
//! Command-line interface for stop lookup, one-shot departure boards and
//! checking a running server.

#![allow(clippy::print_stdout)]

mod timetable;

use std::sync::Arc;

use application::{
    BoardSettings, BoardSnapshot, DepartureBoard, DepartureService, StopSearchPort, split_list,
};
use clap::{Parser, Subcommand};
use domain::{LineType, TransportTypes};
use infrastructure::TransitAdapter;
use integration_transit::TransitConfig;
use timetable::TimetableOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Berlin transport CLI
#[derive(Parser)]
#[command(name = "berlin-transport-cli")]
#[command(author, version, about = "Berlin public transport departures", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Departures API base URL
    #[arg(
        long,
        global = true,
        env = "BERLIN_TRANSPORT_TRANSIT__BASE_URL",
        default_value = "https://v6.vbb.transport.rest"
    )]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search stops by name
    ///
    /// Prints one `{name} [{id}]` line per match; the id goes into
    /// `stop_id` of a `[[stops]]` entry.
    Search {
        /// Stop name or part of it
        query: String,

        /// Maximum number of matches
        #[arg(short, long, default_value = "10")]
        results: u8,
    },

    /// Fetch and print the departures of one stop
    ///
    /// Example: berlin-transport-cli departures --stop 900078101 --products bus,subway
    Departures {
        /// Stop id (see `search`)
        #[arg(short, long)]
        stop: String,

        /// Header to print instead of the stop id
        #[arg(long)]
        name: Option<String>,

        /// Comma-separated destination stop ids
        #[arg(long)]
        direction: Option<String>,

        /// Time window in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Minutes needed to walk to the stop
        #[arg(long, default_value = "1")]
        walking_time: u32,

        /// Comma-separated products to include (default: all)
        #[arg(long)]
        products: Option<String>,

        /// Comma-separated (sub-)stop ids whose departures are dropped
        #[arg(long)]
        exclude_stops: Option<String>,

        /// Drop clockwise Ringbahn departures
        #[arg(long)]
        exclude_ring_clockwise: bool,

        /// Drop counterclockwise Ringbahn departures
        #[arg(long)]
        exclude_ring_counterclockwise: bool,

        /// Use official line colors in JSON output
        #[arg(long)]
        show_api_colors: bool,

        /// Print JSON instead of a timetable
        #[arg(long)]
        json: bool,

        /// Number of rows to consider
        #[arg(long, default_value = "10")]
        max_entries: usize,

        /// Hide cancelled trips
        #[arg(long)]
        hide_cancelled: bool,
    },

    /// Show the boards of a running server
    Status {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,

        /// Number of rows per board
        #[arg(long, default_value = "10")]
        max_entries: usize,
    },

    /// Check server health (used by container healthchecks)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Parse a comma-separated product list
fn parse_products(raw: &str) -> anyhow::Result<TransportTypes> {
    let mut line_types = Vec::new();
    for name in split_list(raw) {
        match LineType::from_product(&name.to_lowercase()) {
            LineType::Unknown => anyhow::bail!(
                "Unknown product '{name}' (expected one of: {})",
                LineType::KNOWN.map(|t| t.as_str()).join(", ")
            ),
            line_type => line_types.push(line_type),
        }
    }
    Ok(TransportTypes::only(&line_types))
}

fn transit_adapter(endpoint: &str) -> anyhow::Result<TransitAdapter> {
    let config = TransitConfig {
        base_url: endpoint.to_string(),
        ..TransitConfig::default()
    };
    TransitAdapter::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize transit client: {e}"))
}

fn print_board(snapshot: &BoardSnapshot, options: TimetableOptions) {
    print!(
        "{}",
        timetable::render(&snapshot.name, &snapshot.attributes.departures, options)
    );
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Search { query, results } => {
            let adapter = transit_adapter(&cli.endpoint)?;
            let stops = adapter.search_stops(&query, results).await?;

            if stops.is_empty() {
                println!("No stops found for '{query}'");
            }
            for stop in stops {
                println!("{}", stop.label());
            }
        },

        Commands::Departures {
            stop,
            name,
            direction,
            duration,
            walking_time,
            products,
            exclude_stops,
            exclude_ring_clockwise,
            exclude_ring_counterclockwise,
            show_api_colors,
            json,
            max_entries,
            hide_cancelled,
        } => {
            let transport_types = match products {
                Some(raw) => parse_products(&raw)?,
                None => TransportTypes::all(),
            };

            let settings = BoardSettings {
                name,
                direction,
                duration,
                walking_time,
                transport_types,
                show_api_line_colors: show_api_colors,
                excluded_stops: exclude_stops.as_deref().map(split_list).unwrap_or_default(),
                exclude_ringbahn_clockwise: exclude_ring_clockwise,
                exclude_ringbahn_counterclockwise: exclude_ring_counterclockwise,
                ..BoardSettings::new(stop.trim())
            };

            let adapter = Arc::new(transit_adapter(&cli.endpoint)?);
            let board = DepartureBoard::new(settings, Arc::new(DepartureService::new(adapter)));
            let snapshot = board.refresh().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_board(
                    &snapshot,
                    TimetableOptions {
                        max_entries,
                        show_cancelled: !hide_cancelled,
                    },
                );
            }
        },

        Commands::Status { url, max_entries } => {
            let boards = reqwest::Client::new()
                .get(endpoint_url(&url, "/v1/boards"))
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<BoardSnapshot>>()
                .await?;

            if boards.is_empty() {
                println!("No boards configured");
            }
            for snapshot in &boards {
                let updated = snapshot
                    .updated_at
                    .map_or_else(|| "never".to_string(), |t| t.to_rfc3339());
                println!("[{}] {} (updated: {updated})", snapshot.unique_id, snapshot.state);
                print_board(
                    snapshot,
                    TimetableOptions {
                        max_entries,
                        show_cancelled: true,
                    },
                );
                println!();
            }
        },

        Commands::Health { url } => {
            match reqwest::Client::new()
                .get(endpoint_url(&url, "/ready"))
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                    std::process::exit(0);
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
