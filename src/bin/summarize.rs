use std::env;
use std::error::Error;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bungie_data as bd;
use bd::bungie::{account, player};
use bd::settings::Settings;

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to start the logger");

    let client = bd::bungie::BungieClient::from_env()?;
    let gamertag = env::var("SUMMARY_GAMERTAG").map_err(|_| "SUMMARY_GAMERTAG must be set")?;
    let platform = match env::var("SCRAPE_PROFILE") {
        Ok(profile) => Settings::from_profile(&profile)?.platform,
        Err(_) => Settings::default().platform,
    };

    let membership_id = player::destiny_membership_id(&client, platform, &gamertag)?;
    tracing::info!("{}'s Destiny ID: {}", gamertag, membership_id);

    let raw_stats = account::request_historical(
        &client,
        platform,
        membership_id,
        account::ALL_CHARACTERS,
        account::SUMMARY_MODES,
    )?;

    let pve = bd::stats::summarize_pve(&gamertag, &raw_stats)?;
    let pvp = bd::stats::summarize_pvp(&gamertag, &raw_stats)?;

    println!("{}", serde_json::to_string_pretty(&pve)?);
    println!("{}", serde_json::to_string_pretty(&pvp)?);

    Ok(())
}
