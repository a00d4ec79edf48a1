use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bungie::{ApiResult, BungieClient};

const MANIFEST_ENDPOINT: &str = "Destiny2/Manifest/";
const DEFINITIONS_ENDPOINT: &str = "Destiny2/Stats/Definition/";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: String,
    #[serde(default)]
    pub mobile_world_content_paths: HashMap<String, String>,
}

pub fn request(client: &BungieClient) -> ApiResult<Manifest> {
    client.request::<Manifest>(MANIFEST_ENDPOINT)
}

/// Historical stat definitions keyed by stat id
pub fn stat_definitions(client: &BungieClient) -> ApiResult<HashMap<String, Value>> {
    client.request::<HashMap<String, Value>>(DEFINITIONS_ENDPOINT)
}
