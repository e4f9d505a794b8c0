use std::fmt;

use serde::{Deserialize, Serialize};

/// A period axis label; the scheduler sends either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodLabel {
    Number(i64),
    Text(String),
}

impl PeriodLabel {
    /// Labels match when their string renderings are equal, so `1` matches `"1"`.
    pub fn matches(&self, other: &PeriodLabel) -> bool {
        match (self, other) {
            (PeriodLabel::Number(a), PeriodLabel::Number(b)) => a == b,
            (PeriodLabel::Text(a), PeriodLabel::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodLabel::Number(n) => write!(f, "{}", n),
            PeriodLabel::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PeriodLabel {
    fn from(n: i64) -> Self {
        PeriodLabel::Number(n)
    }
}

impl From<&str> for PeriodLabel {
    fn from(s: &str) -> Self {
        PeriodLabel::Text(s.to_string())
    }
}

/// One (day, period) occupancy produced by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSession {
    pub day: String,
    pub period: PeriodLabel,
    pub subject: String,
    pub faculty: String,
    pub room: String,
    #[serde(default)]
    pub is_lab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLink {
    pub id: u64,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableSummary {
    pub id: u64,
    pub name: String,
    pub semester: u32,
    pub course: String,
    pub sessions_count: u32,
}
