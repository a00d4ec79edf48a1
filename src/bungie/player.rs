use serde::{Deserialize, Serialize};

use crate::bungie::{encode_segment, ApiError, ApiResult, BungieClient, Platform};

const ENDPOINT: &str = "Destiny2/SearchDestinyPlayer";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoCard {
    pub membership_id: String,
    pub membership_type: i64,
    pub display_name: String,
    pub icon_path: Option<String>,
}

pub fn endpoint(platform: Platform, gamertag: &str) -> String {
    format!(
        "{}/{}/{}/",
        ENDPOINT,
        platform.code(),
        encode_segment(gamertag)
    )
}

pub fn request(
    client: &BungieClient,
    platform: Platform,
    gamertag: &str,
) -> ApiResult<Vec<UserInfoCard>> {
    client.request::<Vec<UserInfoCard>>(&endpoint(platform, gamertag))
}

/// Destiny membership id of the first player matching the gamertag
pub fn destiny_membership_id(
    client: &BungieClient,
    platform: Platform,
    gamertag: &str,
) -> ApiResult<u64> {
    let cards = request(client, platform, gamertag)?;
    first_membership_id(&cards, gamertag)
}

fn first_membership_id(cards: &[UserInfoCard], gamertag: &str) -> ApiResult<u64> {
    let card = cards
        .first()
        .ok_or_else(|| ApiError::Unexpected(format!("No player named {}", gamertag)))?;

    card.membership_id
        .parse()
        .map_err(|_| ApiError::Unexpected(format!("Bad membership id {}", card.membership_id)))
}
