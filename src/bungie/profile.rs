//! Destiny2 GetProfile endpoint
//!
//! The payload depends on the requested components, so it is kept as raw json

use serde_json::Value;

use crate::bungie::{ApiResult, BungieClient, Platform};

/// Profiles only
pub const DEFAULT_COMPONENTS: &[u32] = &[100];

pub fn endpoint(platform: Platform, membership_id: u64, components: &[u32]) -> String {
    let components: Vec<String> = components.iter().map(|c| c.to_string()).collect();
    format!(
        "Destiny2/{}/Profile/{}/?components={}",
        platform.code(),
        membership_id,
        components.join(",")
    )
}

/// Requests a profile, `[100, 200]` adds per character details
pub fn request(
    client: &BungieClient,
    platform: Platform,
    membership_id: u64,
    components: &[u32],
) -> ApiResult<Value> {
    client.request::<Value>(&endpoint(platform, membership_id, components))
}
