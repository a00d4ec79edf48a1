//! Post game carnage reports, the per match detail

use serde_json::Value;

use crate::bungie::{ApiResult, BungieClient};

const ENDPOINT: &str = "Destiny2/Stats/PostGameCarnageReport";

pub fn endpoint(match_id: u64) -> String {
    format!("{}/{}/", ENDPOINT, match_id)
}

/// Reports are stored as they come, so no struct is imposed on them
pub fn request(client: &BungieClient, match_id: u64) -> ApiResult<Value> {
    client.request::<Value>(&endpoint(match_id))
}
