use std::env;
use std::error::Error;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bungie_data as bd;
use bd::settings::Settings;

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to start the logger");

    let client = bd::bungie::BungieClient::from_env()?;

    let settings = match env::var("SCRAPE_PROFILE") {
        Ok(profile) => Settings::from_profile(&profile)?,
        Err(_) => Settings::default(),
    };

    let mut sink = bd::scrape::open_sink(&settings.output)?;
    let report = bd::scrape::run(&client, &mut sink, &settings)?;

    for failure in &report.failures {
        tracing::warn!(
            "Match {} (iteration {}) failed at {}: {}",
            failure.match_id,
            failure.iteration,
            failure.failed_at,
            failure.cause
        );
    }

    Ok(())
}
