use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::DestinyError;

/// Allowed numbers of history entries to show.
pub const HISTORY_SIZE_OPTIONS: [u32; 6] = [3, 5, 7, 10, 15, 20];

/// Maximum number of history entries ever persisted.
pub const MAX_STORED_HISTORY: usize = 20;

/// Keys of the records kept in the key-value store.
pub mod storage_keys {
    pub const DESTINIES: &str = "destinies";
    pub const SELECTION_HISTORY: &str = "selectionHistory";
    pub const HISTORY_SIZE: &str = "historySize";
}

/// A user-entered destiny eligible for random selection.
///
/// Timestamps are milliseconds since the UNIX epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destiny {
    pub id: String,
    pub text: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<i64>,
}

impl Destiny {
    /// Which timestamp the destiny should be displayed with.
    ///
    /// Once edited, the latest edit time always wins over the creation time.
    pub fn timestamp_label(&self) -> TimestampLabel {
        match self.edited_at {
            Some(at) => TimestampLabel::Edited(at),
            None => TimestampLabel::Added(self.created_at),
        }
    }
}

/// Snapshot of a destiny at the moment it was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(flatten)]
    pub destiny: Destiny,
    pub selected_at: i64,
}

impl HistoryItem {
    pub fn new(destiny: &Destiny, selected_at: i64) -> Self {
        Self {
            destiny: destiny.clone(),
            selected_at,
        }
    }

    pub fn text(&self) -> &str {
        &self.destiny.text
    }

    /// Selection time as shown next to a history row, e.g. `"09:41 PM"`.
    pub fn selected_time(&self) -> String {
        format_millis(self.selected_at, "%I:%M %p")
    }
}

/// Display timestamp of a destiny row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLabel {
    Added(i64),
    Edited(i64),
}

impl fmt::Display for TimestampLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampLabel::Added(at) => write!(f, "Added on {}", format_date(*at)),
            TimestampLabel::Edited(at) => write!(f, "Edited on {}", format_date(*at)),
        }
    }
}

fn format_date(millis: i64) -> String {
    format_millis(millis, "%-d %b %Y, %I:%M %p")
}

fn format_millis(millis: i64, pattern: &str) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(&Local).format(pattern).to_string(),
        None => millis.to_string(),
    }
}

/// Number of history entries shown (and retained), one of [`HISTORY_SIZE_OPTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct HistorySize(u32);

impl HistorySize {
    pub const DEFAULT: HistorySize = HistorySize(5);

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// All allowed sizes in ascending order.
    pub fn options() -> impl Iterator<Item = HistorySize> {
        HISTORY_SIZE_OPTIONS.iter().map(|&n| HistorySize(n))
    }
}

impl Default for HistorySize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for HistorySize {
    type Error = DestinyError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        if HISTORY_SIZE_OPTIONS.contains(&n) {
            Ok(HistorySize(n))
        } else {
            Err(DestinyError::InvalidHistorySize(n))
        }
    }
}

impl From<HistorySize> for u32 {
    fn from(size: HistorySize) -> Self {
        size.0
    }
}

impl fmt::Display for HistorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
