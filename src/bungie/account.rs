//! Account wide and per character historical stats
//!
//! The historical endpoint returns stats keyed by activity mode (`allPvE`, `allPvP`, `raid`),
//! which is the shape `crate::stats` summarizes.

use serde_json::Value;

use crate::bungie::{ApiResult, BungieClient, Platform};

/// Passing this as the character id lumps every character together
pub const ALL_CHARACTERS: &str = "0";

/// Modes the summaries read from
pub const SUMMARY_MODES: &str = "AllPvE,AllPvP,Raid";

pub fn stats_endpoint(platform: Platform, membership_id: u64) -> String {
    format!("Destiny2/{}/Account/{}/Stats/", platform.code(), membership_id)
}

pub fn historical_endpoint(
    platform: Platform,
    membership_id: u64,
    character_id: &str,
    modes: &str,
) -> String {
    format!(
        "Destiny2/{}/Account/{}/Character/{}/Stats/?modes={}",
        platform.code(),
        membership_id,
        character_id,
        modes
    )
}

pub fn request_stats(
    client: &BungieClient,
    platform: Platform,
    membership_id: u64,
) -> ApiResult<Value> {
    client.request::<Value>(&stats_endpoint(platform, membership_id))
}

pub fn request_historical(
    client: &BungieClient,
    platform: Platform,
    membership_id: u64,
    character_id: &str,
    modes: &str,
) -> ApiResult<Value> {
    client.request::<Value>(&historical_endpoint(
        platform,
        membership_id,
        character_id,
        modes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_endpoints() {
        assert_eq!(stats_endpoint(Platform::Pc, 7), "Destiny2/4/Account/7/Stats/");
        assert_eq!(
            historical_endpoint(Platform::Psn, 7, ALL_CHARACTERS, SUMMARY_MODES),
            "Destiny2/2/Account/7/Character/0/Stats/?modes=AllPvE,AllPvP,Raid"
        );
    }
}
