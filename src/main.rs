//! route-dispatch CLI
//!
//! Example: `route-dispatch -a "123 Main St,456 Elm St" -d "Alice,Bob" -u "2800 Euclid Ave"`
//! or `route-dispatch -a addresses.csv -d drivers.csv -u "2800 Euclid Ave"`.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use route_dispatch::assembler::{AssembleOptions, CapacityPolicy};
use route_dispatch::dispatcher::{DispatchOptions, Dispatcher};
use route_dispatch::geocoder::{GeocoderConfig, GoogleGeocoder};
use route_dispatch::ingest::{expand_list, read_location_file};
use route_dispatch::kmeans::{KMeans, KMeansConfig, DEFAULT_MAX_ITERATIONS};
use route_dispatch::report::render_text;
use route_dispatch::traits::CoordinateResolver;

#[derive(Debug, Parser)]
#[command(
    name = "route-dispatch",
    version,
    about = "A delivery route dispatcher using KMeans clustering and Euclidean distance sorting",
    long_about = "Takes order addresses and assigns them to drivers as routes: orders are grouped \
                  with k-means and each route is ordered by distance from the hub."
)]
struct Cli {
    /// Addresses, or CSV files of addresses (e.g. -a "123 Main St,456 Elm St" or -a addresses.csv)
    #[arg(short = 'a', long = "address", value_delimiter = ',', required = true)]
    addresses: Vec<String>,

    /// Drivers, or CSV files of drivers (e.g. -d "Alice,Bob" or -d drivers.csv)
    #[arg(short = 'd', long = "driver", value_delimiter = ',', required = true)]
    drivers: Vec<String>,

    /// Hub address (e.g. -u "123 Main St")
    #[arg(short = 'u', long)]
    hub: String,

    /// Google Geocoding API key
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Geocoding API base URL
    #[arg(long, env = "GEOCODER_URL", default_value = "https://maps.googleapis.com")]
    geocoder_url: String,

    /// Geocoding request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// CSV lookup table (address,lat,lon) used instead of the geocoding API
    #[arg(long)]
    locations: Option<String>,

    /// Seed for k-means initialization
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    #[arg(long, value_enum, default_value_t = Policy::OrdersPerDriver)]
    policy: Policy,

    /// Concurrent address lookups
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Orders per driver doubles as the cluster count
    OrdersPerDriver,
    /// One cluster per driver, no truncation
    ClusterPerDriver,
}

impl From<Policy> for CapacityPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::OrdersPerDriver => CapacityPolicy::OrdersPerDriver,
            Policy::ClusterPerDriver => CapacityPolicy::ClusterPerDriver,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,route_dispatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let addresses = expand_list(cli.addresses).map_err(|err| format!("error parsing addresses: {}", err))?;
    let drivers = expand_list(cli.drivers).map_err(|err| format!("error parsing drivers: {}", err))?;

    let resolver: Box<dyn CoordinateResolver> = match &cli.locations {
        Some(path) => Box::new(read_location_file(path)?),
        None => Box::new(GoogleGeocoder::new(GeocoderConfig {
            base_url: cli.geocoder_url,
            api_key: cli.api_key,
            timeout_secs: cli.timeout_secs,
        })?),
    };

    let partitioner = KMeans::new(KMeansConfig {
        seed: cli.seed,
        max_iterations: cli.max_iterations,
    });
    let options = DispatchOptions {
        assemble: AssembleOptions {
            policy: cli.policy.into(),
        },
        resolve_workers: cli.workers.max(1),
    };

    let dispatcher = Dispatcher::with_options(resolver, partitioner, options);
    let plan = dispatcher
        .dispatch(&addresses, &drivers, &cli.hub)
        .map_err(|err| format!("error assigning routes: {}", err))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_text(&plan));
    }

    Ok(())
}
