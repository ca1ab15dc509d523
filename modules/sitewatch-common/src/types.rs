use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted record of the previous profile check. Replaced wholesale at
/// the end of every run; `None` fields are the "no prior data" state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub last_check: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_post_title: Option<String>,
}

/// Persisted record of every headline seen so far. `known_items` only
/// grows across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadlineSnapshot {
    #[serde(default)]
    pub last_check: Option<DateTime<Utc>>,
    #[serde(default)]
    pub known_items: HashSet<String>,
}

/// One batch of candidate headlines from a searcher.
#[derive(Debug, Clone)]
pub struct SearchBatch {
    pub searched_at: DateTime<Utc>,
    pub headlines: Vec<String>,
}

/// A (headline, detail) pair handed to a notification backend.
#[derive(Debug, Clone)]
pub struct Alert {
    pub headline: String,
    pub detail: String,
}
