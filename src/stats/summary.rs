use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::stats::fields::{ConversionTable, PVE, PVP, RAID};
use crate::stats::SummaryError;

/// Flat summary of one user's stats, serializes to a single json object
///
/// Keys keep the order of the conversion tables, `userName` comes last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRecord {
    fields: Vec<(&'static str, Option<String>)>,
    pub user_name: String,
}

impl SummaryRecord {
    /// `None` if the key was never set, `Some(None)` for a no activity sentinel
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value.as_deref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(key, _)| *key)
    }

    /// Number of summary keys, not counting `userName`
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, key: &'static str, value: Option<String>) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }
}

impl Serialize for SummaryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("userName", &self.user_name)?;
        map.end()
    }
}

pub fn summarize_pve(user_name: &str, raw_stats: &Value) -> Result<SummaryRecord, SummaryError> {
    summarize(user_name, raw_stats, &PVE, Some(&RAID))
}

pub fn summarize_pvp(user_name: &str, raw_stats: &Value) -> Result<SummaryRecord, SummaryError> {
    summarize(user_name, raw_stats, &PVP, None)
}

/// Applies `table` to the raw stats, then `sub_table` if the response carries its category
pub fn summarize(
    user_name: &str,
    raw_stats: &Value,
    table: &ConversionTable,
    sub_table: Option<&ConversionTable>,
) -> Result<SummaryRecord, SummaryError> {
    let mut record = SummaryRecord::default();

    apply_table(&mut record, raw_stats, table)?;

    if let Some(sub_table) = sub_table {
        if raw_stats.get(sub_table.category).is_some() {
            apply_table(&mut record, raw_stats, sub_table)?;
        }
    }

    record.user_name = user_name.to_owned();
    Ok(record)
}

fn apply_table(
    record: &mut SummaryRecord,
    raw_stats: &Value,
    table: &ConversionTable,
) -> Result<(), SummaryError> {
    let block = match category_block(raw_stats, table.category) {
        Some(block) => block,
        None => {
            tracing::debug!("No recorded {} activity", table.category);
            record.insert(table.sentinel, None);
            return Ok(());
        }
    };

    let all_time = block
        .get("allTime")
        .ok_or_else(|| SummaryError::MissingField {
            category: table.category,
            path: "allTime".to_string(),
        })?;

    for field in table.fields {
        record.insert(field.summary_key, Some(field.extract(table.category, all_time)?));
    }

    Ok(())
}

// absent, null and empty blocks all mean the user never played that category
fn category_block<'a>(raw_stats: &'a Value, category: &str) -> Option<&'a Value> {
    match raw_stats.get(category) {
        None | Some(Value::Null) => None,
        Some(Value::Object(block)) if block.is_empty() => None,
        Some(Value::Array(block)) if block.is_empty() => None,
        Some(block) => Some(block),
    }
}
