use serde::{Deserialize, Serialize};

/// Message sent while the reviewer has not picked any work up yet.
pub const NO_SUBMISSION_MESSAGE: &str = "Видимо, работа пока не взята на проверку.";

/// Prefix of the failure report delivered to the operator.
pub const FAILURE_MESSAGE_PREFIX: &str = "Сбой в работе программы.";

/// Only the most recent submission is ever evaluated.
pub const LATEST_RECORD_INDEX: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    pub fn status_key(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// A single homework entry, kept as the raw JSON the API returned.
///
/// Only the latest entry is ever looked at, so older entries are never
/// checked; a malformed one must not break the poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeworkRecord(pub serde_json::Value);

impl HomeworkRecord {
    /// Value under `key`, or `None` when the key is absent or `null`
    /// (or the entry is not an object at all).
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub homeworks: Vec<HomeworkRecord>,
    pub current_date: i64,
}

impl ApiResponse {
    pub fn latest(&self) -> Option<&HomeworkRecord> {
        self.homeworks.get(LATEST_RECORD_INDEX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Status key of the last evaluated record, or the "no submission"
    /// message when the last response had no records.
    pub last_seen_status_key: String,
    pub next_from_timestamp: i64,
    /// Last failure report that was delivered; cleared by a successful tick.
    pub last_failure_report: Option<String>,
}

impl PollState {
    pub fn new(from_timestamp: i64) -> Self {
        Self {
            last_seen_status_key: String::new(),
            next_from_timestamp: from_timestamp,
            last_failure_report: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Notified(String),
    Unchanged,
}
