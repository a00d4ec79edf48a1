//! Client for the Bungie.net Destiny 2 api, with stat summaries and a bulk report scraper

pub mod bungie;
pub mod scrape;
pub mod settings;
pub mod stats;

#[cfg(test)]
mod tests;
