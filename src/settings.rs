use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bungie::Platform;
use crate::scrape::StepPolicy;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read profile: {0}")]
    Io(#[from] io::Error),
    #[error("Could not parse profile: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{count} matches from {base} runs past the largest match id")]
    IdentifierOverflow { base: u64, count: u64 },
}

/// Tunables for a scrape run, anything missing from a profile keeps its default
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub platform: Platform,
    /// First match id to request
    pub base_match_id: u64,
    /// Number of requests to make
    pub count: u64,
    /// Pause after every request, in milliseconds
    pub pause_ms: u64,
    /// File the reports are appended to
    pub output: PathBuf,
    pub step: StepPolicy,
    /// Indent saved reports, makes the output a lot bigger
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            platform: Platform::Psn,
            // 100 ids past a known iron banner match
            base_match_id: 2_719_755_481,
            count: 5000,
            pause_ms: 2000,
            output: PathBuf::from("./data/unformatted_unfiltered_pgcrdata_5k.json"),
            step: StepPolicy::Linear,
            pretty: false,
        }
    }
}

impl Settings {
    pub fn from_profile(profile: &str) -> Result<Settings, SettingsError> {
        let file_content = fs::read_to_string(format!("./profiles/{}.json", profile))?;
        Settings::from_json(&file_content)
    }

    pub fn from_json(content: &str) -> Result<Settings, SettingsError> {
        let settings = serde_json::from_str::<Settings>(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Every match id the run would request has to fit in a u64
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.count == 0 {
            return Ok(());
        }

        match self.step.identifier(self.base_match_id, self.count - 1) {
            Some(_) => Ok(()),
            None => Err(SettingsError::IdentifierOverflow {
                base: self.base_match_id,
                count: self.count,
            }),
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}
