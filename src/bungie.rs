/*
    Every request to the platform goes through BungieClient::request, endpoint modules only build paths.
*/

use std::collections::HashMap;
use std::env;
use std::fmt::Formatter;
use std::time::Duration;

use lazy_static::lazy_static;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod account;
pub mod manifest;
pub mod membership;
pub mod pgcr;
pub mod player;
pub mod profile;

pub const API_URL: &str = "https://www.bungie.net/Platform";
pub const API_KEY_VAR: &str = "BUNGIE_API_KEY";

const REQUEST_TIMEOUT_SECS: u64 = 30;
// PlatformErrorCodes.Success
const SUCCESS_CODE: i64 = 1;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("BUNGIE_API_KEY must be set")]
    AuthMissing,
    #[error("Something happened while requesting from bungie: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Bungie responded with status {0}")]
    Status(u16),
    #[error("Bungie returned error {code} ({status}): {message}")]
    Api {
        code: i64,
        status: String,
        message: String,
    },
    #[error("Response contained no data")]
    NoResponse,
    #[error("Could not parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown platform {0}")]
    UnknownPlatform(String),
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct BungieResponseStruct {
    response: Option<Value>,
    error_code: i64,
    #[serde(default)]
    throttle_seconds: i64,
    #[serde(default)]
    error_status: String,
    #[serde(default)]
    message: String,
}

fn unwrap_envelope<T: DeserializeOwned>(envelope: BungieResponseStruct) -> ApiResult<T> {
    if envelope.error_code != SUCCESS_CODE {
        return Err(ApiError::Api {
            code: envelope.error_code,
            status: envelope.error_status,
            message: envelope.message,
        });
    }

    if envelope.throttle_seconds > 0 {
        tracing::warn!("Bungie asked to throttle for {}s", envelope.throttle_seconds);
    }

    match envelope.response {
        Some(data) => Ok(serde_json::from_value::<T>(data)?),
        None => Err(ApiError::NoResponse),
    }
}

/// Parses a raw platform response body and returns its `Response` payload
pub fn parse_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let envelope: BungieResponseStruct = serde_json::from_str(body)?;
    unwrap_envelope(envelope)
}

/// Blocking client carrying the api key header
#[derive(Debug, Clone)]
pub struct BungieClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl BungieClient {
    pub fn new(api_key: impl Into<String>) -> ApiResult<BungieClient> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(BungieClient {
            client,
            api_key: api_key.into(),
            base_url: API_URL.to_string(),
        })
    }

    /// Reads the api key from `BUNGIE_API_KEY`, a missing or empty key is fatal
    pub fn from_env() -> ApiResult<BungieClient> {
        match env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => BungieClient::new(key.trim()),
            _ => Err(ApiError::AuthMissing),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> BungieClient {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    pub fn request<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        tracing::info!("Requesting from endpoint {}", endpoint);

        let response = self
            .client
            .get(&self.url(endpoint))
            .header("X-API-Key", &self.api_key)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        parse_body(&response.text()?)
    }
}

/// Escapes the characters of a gamertag that would otherwise break the path
pub(crate) fn encode_segment(segment: &str) -> String {
    segment
        .replace('%', "%25")
        .replace(' ', "%20")
        .replace('#', "%23")
        .replace('/', "%2F")
        .replace('?', "%3F")
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "xbone")]
    Xbox,
    #[serde(alias = "ps4")]
    Psn,
    Pc,
}

lazy_static! {
    /// Platform names accepted in settings, mapped to their membership type
    pub static ref PLATFORM_CODES: HashMap<&'static str, Platform> = {
        let mut codes = HashMap::new();
        codes.insert("xbox", Platform::Xbox);
        codes.insert("xbone", Platform::Xbox);
        codes.insert("psn", Platform::Psn);
        codes.insert("pc", Platform::Pc);
        codes.insert("ps4", Platform::Psn);
        codes
    };
}

impl Platform {
    /// BungieMembershipType used in request paths
    pub fn code(&self) -> u8 {
        match self {
            Platform::Xbox => 1,
            Platform::Psn => 2,
            Platform::Pc => 4,
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, ApiError> {
        PLATFORM_CODES
            .get(s.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| ApiError::UnknownPlatform(s.to_string()))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
