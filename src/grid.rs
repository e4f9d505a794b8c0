//! Day × period grid built from the scheduler's flat session list.

use serde::Serialize;
use tracing::warn;

use crate::models::{PeriodLabel, ScheduledSession};
use crate::scheduler::dto::SectionTimetableResponse;

pub const DEFAULT_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
pub const DEFAULT_PERIOD_COUNT: usize = 6;
pub const DEFAULT_SECTION: &str = "Section";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Session(&'a ScheduledSession),
    Empty,
}

impl<'a> Cell<'a> {
    pub fn session(self) -> Option<&'a ScheduledSession> {
        match self {
            Cell::Session(s) => Some(s),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Reconciled grid. Every (day, period) on the axes holds a session or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableGrid {
    days: Vec<String>,
    periods: Vec<PeriodLabel>,
    rows: Vec<Vec<Option<ScheduledSession>>>,
}

impl TimetableGrid {
    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn periods(&self) -> &[PeriodLabel] {
        &self.periods
    }

    /// `None` only when an index is off the axes.
    pub fn cell(&self, day: usize, period: usize) -> Option<Cell<'_>> {
        let slot = self.rows.get(day)?.get(period)?;
        Some(match slot {
            Some(session) => Cell::Session(session),
            None => Cell::Empty,
        })
    }

    pub fn lookup(&self, day: &str, period: &PeriodLabel) -> Option<Cell<'_>> {
        let d = self.days.iter().position(|x| x == day)?;
        let p = self.periods.iter().position(|x| x.matches(period))?;
        self.cell(d, p)
    }

    pub fn row(&self, day: usize) -> impl Iterator<Item = Cell<'_>> + '_ {
        self.rows.get(day).into_iter().flatten().map(|slot| match slot {
            Some(session) => Cell::Session(session),
            None => Cell::Empty,
        })
    }

    pub fn populated(&self) -> usize {
        self.rows.iter().flatten().filter(|slot| slot.is_some()).count()
    }
}

/// For each axis pair, the first session in `sessions` whose day and period match.
///
/// Duplicates on the same slot resolve to the earliest entry; the input is not checked for them.
pub fn reconcile<D: AsRef<str>>(days: &[D], periods: &[PeriodLabel], sessions: &[ScheduledSession]) -> TimetableGrid {
    let rows = days
        .iter()
        .map(|day| {
            periods
                .iter()
                .map(|period| {
                    sessions
                        .iter()
                        .find(|s| s.day == day.as_ref() && s.period.matches(period))
                        .cloned()
                })
                .collect()
        })
        .collect();

    TimetableGrid {
        days: days.iter().map(|d| d.as_ref().to_string()).collect(),
        periods: periods.to_vec(),
        rows,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    pub total_sessions: usize,
    pub working_days: usize,
    pub periods_per_day: usize,
}

/// A section's timetable after normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableView {
    pub section: String,
    pub days: Vec<String>,
    pub periods: Vec<PeriodLabel>,
    pub sessions: Vec<ScheduledSession>,
}

impl TimetableView {
    /// Missing or empty axes fall back to a Monday–Friday, six-period week so
    /// there is always something to draw.
    pub fn from_response(response: SectionTimetableResponse) -> Self {
        let days = match response.days {
            Some(days) if !days.is_empty() => days,
            _ => {
                warn!("timetable response has no days, using default week");
                default_days()
            }
        };
        let periods = match response.periods {
            Some(periods) if !periods.is_empty() => periods,
            _ => {
                warn!("timetable response has no periods, using default periods");
                default_periods()
            }
        };
        let sessions = response.timetable.unwrap_or_else(|| {
            warn!("timetable response has no sessions");
            Vec::new()
        });
        let section = response.section.unwrap_or_else(|| DEFAULT_SECTION.to_string());

        Self {
            section,
            days,
            periods,
            sessions,
        }
    }

    pub fn grid(&self) -> TimetableGrid {
        reconcile(&self.days, &self.periods, &self.sessions)
    }

    pub fn summary(&self) -> GridSummary {
        GridSummary {
            total_sessions: self.sessions.len(),
            working_days: self.days.len(),
            periods_per_day: self.periods.len(),
        }
    }
}

pub fn default_days() -> Vec<String> {
    DEFAULT_DAYS.iter().map(|d| d.to_string()).collect()
}

pub fn default_periods() -> Vec<PeriodLabel> {
    (1..=DEFAULT_PERIOD_COUNT)
        .map(|p| PeriodLabel::Text(p.to_string()))
        .collect()
}
