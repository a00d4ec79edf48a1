//! Reshapes historical stats responses into flat summary records

use thiserror::Error;

pub mod fields;
pub mod summary;

pub use summary::{summarize, summarize_pve, summarize_pvp, SummaryRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    // Not a "no activity" case, the category block exists but its shape changed upstream
    #[error("{category} stats are missing {path}")]
    MissingField {
        category: &'static str,
        path: String,
    },
}
