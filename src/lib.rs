//! enchanted-moods: pick an emotion, meet its creature, collect its quotes.

pub mod catalog;
pub mod chime;
pub mod error;
pub mod quotes;
pub mod report;
pub mod tui;
pub mod types;
