use std::cell::Cell;

use serde_json::{json, Value};

use super::*;
use crate::bungie::ApiError;
use crate::scrape::ReportSource;

#[test]
fn load_settings() {
    let settings = settings::Settings::from_profile("debug");
    assert!(settings.is_ok());
    assert!(settings.unwrap().pretty);
}

#[test]
fn no_pve_activity() {
    let record = stats::summarize_pve("Guardian1", &json!({"allPvE": {}})).unwrap();
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"numEventsPve": null, "userName": "Guardian1"})
    );
}

fn pvp_stats() -> Value {
    json!({
        "allPvP": {
            "allTime": {
                "activitiesEntered": {"basic": {"displayValue": "120"}},
                "activitiesWon": {"basic": {"displayValue": "80"}},
                "winLossRatio": {"basic": {"displayValue": "2"}},
                "killsDeathsRatio": {"basic": {"displayValue": "1.35"}},
                "totalActivityDurationSeconds": {"basic": {"displayValue": "2d 4h"}},
                "weaponBestType": {"basic": {"displayValue": "Hand Cannon"}},
                "bestSingleGameKills": {"basic": {"displayValue": "31"}},
                "longestKillSpree": {"basic": {"displayValue": "14"}},
                "suicides": {"basic": {"displayValue": "3"}, "pga": {"displayValue": "0.02"}}
            }
        }
    })
}

#[test]
fn pvp_summary() {
    let record = stats::summarize_pvp("Guardian1", &pvp_stats()).unwrap();

    assert_eq!(record.get("numEventsPvp"), Some(Some("120")));
    assert_eq!(record.get("numWinsPvp"), Some(Some("80")));
    assert_eq!(record.get("suicideRatePvp"), Some(Some("0.02")));
    assert_eq!(record.get("favoriteWeaponPvp"), Some(Some("Hand Cannon")));
    assert_eq!(record.user_name, "Guardian1");
}

#[test]
fn summaries_are_deterministic() {
    let raw = pvp_stats();
    assert_eq!(
        stats::summarize_pvp("Guardian1", &raw).unwrap(),
        stats::summarize_pvp("Guardian1", &raw).unwrap()
    );
    assert_eq!(
        stats::summarize_pve("Guardian1", &raw).unwrap(),
        stats::summarize_pve("Guardian1", &raw).unwrap()
    );
}

#[test]
fn schema_drift_is_an_error() {
    let mut raw = pvp_stats();
    raw["allPvP"]["allTime"]
        .as_object_mut()
        .unwrap()
        .remove("activitiesWon");

    assert_eq!(
        stats::summarize_pvp("Guardian1", &raw),
        Err(stats::SummaryError::MissingField {
            category: "allPvP",
            path: "allTime.activitiesWon.basic.displayValue".to_string(),
        })
    );
}

struct FlakySource {
    calls: Cell<u64>,
}

impl ReportSource for FlakySource {
    fn fetch_report(&self, match_id: u64) -> Result<Value, ApiError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call == 1 {
            Err(ApiError::Api {
                code: 1653,
                status: "DestinyPGCRNotFound".to_string(),
                message: "The requested post game carnage report was not found.".to_string(),
            })
        } else {
            Ok(json!({"activityDetails": {"instanceId": match_id.to_string()}, "entries": []}))
        }
    }
}

#[test]
fn scrape_continues_past_failures() {
    let source = FlakySource { calls: Cell::new(0) };
    let settings = settings::Settings {
        base_match_id: 2_719_755_481,
        count: 3,
        pause_ms: 0,
        ..settings::Settings::default()
    };
    let mut sink = Vec::new();

    let report = scrape::run(&source, &mut sink, &settings).unwrap();

    assert_eq!(report.attempted, 3);
    assert_eq!(report.saved, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].match_id, 2_719_755_482);
    assert_eq!(report.failures[0].iteration, 1);

    let documents: Vec<Value> = serde_json::Deserializer::from_slice(&sink)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1]["activityDetails"]["instanceId"], "2719755483");
}
