use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ride_matcher::error::MatchError;
use ride_matcher::haversine::{DEFAULT_MILES_PER_MINUTE, HaversineEstimator};
use ride_matcher::matcher::{MatchOptions, MatchOutcome, assign_rides};
use ride_matcher::osrm::{OsrmClient, OsrmConfig, OsrmTable};
use ride_matcher::report;
use ride_matcher::scenario::Scenario;

#[derive(Parser)]
#[command(
    name = "ride-matcher",
    about = "Assign scheduled rides to drivers by availability and travel time"
)]
struct Cli {
    /// Scenario file with rides and drivers (JSON)
    scenario: PathBuf,

    /// Assumed driving speed for great-circle estimates
    #[arg(long, env = "RIDE_MATCHER_MILES_PER_MINUTE", default_value_t = DEFAULT_MILES_PER_MINUTE)]
    miles_per_minute: f64,

    /// Estimate idle travel with an OSRM server instead of great-circle distance
    #[arg(long, env = "RIDE_MATCHER_OSRM_URL")]
    osrm_url: Option<String>,

    /// OSRM routing profile
    #[arg(long, env = "RIDE_MATCHER_OSRM_PROFILE", default_value = "car")]
    osrm_profile: String,

    /// Score drivers on all cores
    #[arg(long, env = "RIDE_MATCHER_PARALLEL")]
    parallel: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(outcome) => {
            print!("{}", report::render(&outcome));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "matching failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<MatchOutcome, MatchError> {
    let (rides, mut drivers) = Scenario::from_path(&cli.scenario)?.into_parts()?;
    let options = MatchOptions {
        parallel: cli.parallel,
    };

    match &cli.osrm_url {
        Some(base_url) => {
            let client = OsrmClient::new(OsrmConfig {
                base_url: base_url.clone(),
                profile: cli.osrm_profile.clone(),
                ..OsrmConfig::default()
            })?;
            tracing::info!(%base_url, "estimating idle travel with OSRM");
            let locations: Vec<_> = rides
                .iter()
                .flat_map(|ride| [ride.pickup_location, ride.dropoff_location])
                .chain(drivers.iter().map(|driver| driver.location()))
                .collect();
            let table = OsrmTable::fetch(client, &locations);
            assign_rides(&rides, &mut drivers, &table, &options)
        }
        None => {
            let estimator = HaversineEstimator::new(cli.miles_per_minute);
            assign_rides(&rides, &mut drivers, &estimator, &options)
        }
    }
}
