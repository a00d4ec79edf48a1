use serde::{Deserialize, Serialize};

use crate::bungie::{ApiError, ApiResult, BungieClient, Platform};

const ENDPOINT: &str = "User/GetMembershipsById";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BungieNetUser {
    pub membership_id: String,
    pub display_name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Memberships {
    pub bungie_net_user: Option<BungieNetUser>,
    #[serde(default)]
    pub destiny_memberships: Vec<crate::bungie::player::UserInfoCard>,
}

pub fn endpoint(membership_id: u64, platform: Platform) -> String {
    format!("{}/{}/{}/", ENDPOINT, membership_id, platform.code())
}

pub fn request(
    client: &BungieClient,
    membership_id: u64,
    platform: Platform,
) -> ApiResult<Memberships> {
    client.request::<Memberships>(&endpoint(membership_id, platform))
}

/// Bungie.net account id behind a Destiny membership
pub fn bungie_membership_id(
    client: &BungieClient,
    membership_id: u64,
    platform: Platform,
) -> ApiResult<u64> {
    request(client, membership_id, platform)?.bungie_user_id()
}

impl Memberships {
    pub fn bungie_user_id(&self) -> ApiResult<u64> {
        let user = self
            .bungie_net_user
            .as_ref()
            .ok_or_else(|| ApiError::Unexpected("No bungie.net user linked".to_string()))?;

        user.membership_id
            .parse()
            .map_err(|_| ApiError::Unexpected(format!("Bad membership id {}", user.membership_id)))
    }
}
