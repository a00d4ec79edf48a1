//! Conversion tables from summary keys to the stat names Bungie uses

use serde_json::Value;

use crate::stats::SummaryError;

/// Which sub-structure of a stat holds the displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Cumulative value, `basic.displayValue`
    Basic,
    /// Per game average, `pga.displayValue`
    Rate,
}

impl Extraction {
    pub fn block(self) -> &'static str {
        match self {
            Extraction::Basic => "basic",
            Extraction::Rate => "pga",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub summary_key: &'static str,
    pub source_key: &'static str,
    pub rule: Extraction,
}

const fn basic(summary_key: &'static str, source_key: &'static str) -> FieldMapping {
    FieldMapping {
        summary_key,
        source_key,
        rule: Extraction::Basic,
    }
}

const fn rate(summary_key: &'static str, source_key: &'static str) -> FieldMapping {
    FieldMapping {
        summary_key,
        source_key,
        rule: Extraction::Rate,
    }
}

impl FieldMapping {
    /// Location of the value inside a category block
    pub fn path(&self) -> String {
        format!(
            "allTime.{}.{}.displayValue",
            self.source_key,
            self.rule.block()
        )
    }

    /// Reads the displayed value out of an `allTime` block
    pub fn extract(&self, category: &'static str, all_time: &Value) -> Result<String, SummaryError> {
        let value = all_time
            .get(self.source_key)
            .and_then(|stat| stat.get(self.rule.block()))
            .and_then(|block| block.get("displayValue"))
            .filter(|value| !value.is_null())
            .ok_or_else(|| SummaryError::MissingField {
                category,
                path: self.path(),
            })?;

        Ok(match value {
            Value::String(display) => display.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct ConversionTable {
    /// Key of the category block in the raw stats
    pub category: &'static str,
    /// Set to null when the category has no recorded activity
    pub sentinel: &'static str,
    pub fields: &'static [FieldMapping],
}

impl ConversionTable {
    pub fn lookup(&self, summary_key: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.summary_key == summary_key)
    }
}

pub const PVE: ConversionTable = ConversionTable {
    category: "allPvE",
    sentinel: "numEventsPve",
    fields: &[
        basic("numEventsPve", "activitiesEntered"),
        basic("kdPve", "killsDeathsRatio"),
        basic("durationPlayedPve", "totalActivityDurationSeconds"),
        basic("favoriteWeaponPve", "weaponBestType"),
        basic("longestKillDistancePve", "longestKillDistance"),
        basic("orbsGeneratedPve", "orbsDropped"),
        rate("suicideRatePve", "suicides"),
        basic("longestKillSpreePve", "longestKillSpree"),
    ],
};

pub const PVP: ConversionTable = ConversionTable {
    category: "allPvP",
    sentinel: "numEventsPvp",
    fields: &[
        basic("numEventsPvp", "activitiesEntered"),
        basic("numWinsPvp", "activitiesWon"),
        basic("winLossRatioPvp", "winLossRatio"),
        basic("kdPvp", "killsDeathsRatio"),
        basic("durationPlayedPvp", "totalActivityDurationSeconds"),
        basic("favoriteWeaponPvp", "weaponBestType"),
        basic("mostKillsPvp", "bestSingleGameKills"),
        basic("longestKillSpreePvp", "longestKillSpree"),
        rate("suicideRatePvp", "suicides"),
    ],
};

pub const RAID: ConversionTable = ConversionTable {
    category: "raid",
    sentinel: "raidAttempts",
    fields: &[
        basic("raidAttempts", "activitiesEntered"),
        basic("raidClears", "activitiesCleared"),
        basic("kdRaid", "killsDeathsRatio"),
        basic("durationPlayedRaid", "totalActivityDurationSeconds"),
        basic("favoriteWeaponRaid", "weaponBestType"),
    ],
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    #[test]
    fn summary_keys_are_unique() {
        let mut seen = HashSet::new();
        for table in [&PVE, &PVP, &RAID].iter() {
            for field in table.fields {
                assert!(seen.insert(field.summary_key), "{}", field.summary_key);
            }
        }
    }

    #[test]
    fn sentinel_is_part_of_its_table() {
        for table in [&PVE, &PVP, &RAID].iter() {
            assert!(table.lookup(table.sentinel).is_some(), "{}", table.category);
        }
    }

    #[test]
    fn only_suicides_are_rates() {
        for table in [&PVE, &PVP, &RAID].iter() {
            for field in table.fields {
                let expected = if field.summary_key.starts_with("suicideRate") {
                    Extraction::Rate
                } else {
                    Extraction::Basic
                };
                assert_eq!(field.rule, expected, "{}", field.summary_key);
            }
        }
    }

    #[test]
    fn extracts_by_rule() {
        let all_time = json!({
            "suicides": {
                "basic": {"value": 12.0, "displayValue": "12"},
                "pga": {"value": 0.02, "displayValue": "0.02"}
            }
        });

        let rate = PVP.lookup("suicideRatePvp").unwrap();
        assert_eq!(rate.extract("allPvP", &all_time).unwrap(), "0.02");

        let cumulative = basic("suicides", "suicides");
        assert_eq!(cumulative.extract("allPvP", &all_time).unwrap(), "12");
    }

    #[test]
    fn numeric_display_values_are_rendered() {
        let all_time = json!({"activitiesEntered": {"basic": {"displayValue": 120}}});
        let field = PVP.lookup("numEventsPvp").unwrap();
        assert_eq!(field.extract("allPvP", &all_time).unwrap(), "120");
    }

    #[test]
    fn missing_rate_block() {
        let all_time = json!({"suicides": {"basic": {"displayValue": "12"}}});
        let field = PVE.lookup("suicideRatePve").unwrap();

        assert_eq!(
            field.extract("allPvE", &all_time),
            Err(SummaryError::MissingField {
                category: "allPvE",
                path: "allTime.suicides.pga.displayValue".to_string(),
            })
        );
    }

    #[test]
    fn null_display_value_is_missing() {
        let all_time = json!({"orbsDropped": {"basic": {"displayValue": null}}});
        let field = PVE.lookup("orbsGeneratedPve").unwrap();
        assert!(field.extract("allPvE", &all_time).is_err());
    }
}
