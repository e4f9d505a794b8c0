use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const WORKING_DAYS_BOUNDS: (u32, u32) = (1, 7);
pub const PERIODS_PER_DAY_BOUNDS: (u32, u32) = (1, 8);
pub const PERIOD_DURATION_BOUNDS: (u32, u32) = (30, 120);
pub const TOTAL_SEMESTERS_BOUNDS: (u32, u32) = (1, u32::MAX);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institute {
    pub name: String,
    pub academic_year: String,
    pub course: String,
    pub total_semesters: u32,
    pub working_days: u32,
    pub periods_per_day: u32,
    /// Minutes.
    pub period_duration: u32,
}

impl Default for Institute {
    fn default() -> Self {
        Self {
            name: String::new(),
            academic_year: String::new(),
            course: String::new(),
            total_semesters: 5,
            working_days: 5,
            periods_per_day: 6,
            period_duration: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstituteField {
    Name(String),
    AcademicYear(String),
    Course(String),
    TotalSemesters(u32),
    WorkingDays(u32),
    PeriodsPerDay(u32),
    PeriodDuration(u32),
}

impl Institute {
    pub fn with_field(&self, field: InstituteField) -> Result<Self, ModelError> {
        let mut next = self.clone();
        match field {
            InstituteField::Name(name) => next.name = name,
            InstituteField::AcademicYear(year) => next.academic_year = year,
            InstituteField::Course(course) => next.course = course,
            InstituteField::TotalSemesters(value) => {
                next.total_semesters = within("total semesters", value, TOTAL_SEMESTERS_BOUNDS)?
            }
            InstituteField::WorkingDays(value) => {
                next.working_days = within("working days", value, WORKING_DAYS_BOUNDS)?
            }
            InstituteField::PeriodsPerDay(value) => {
                next.periods_per_day = within("periods per day", value, PERIODS_PER_DAY_BOUNDS)?
            }
            InstituteField::PeriodDuration(value) => {
                next.period_duration = within("period duration", value, PERIOD_DURATION_BOUNDS)?
            }
        }
        Ok(next)
    }

    /// First numeric field outside its bounds, if any. Hydrated data bypasses the setters.
    pub fn bounds_error(&self) -> Option<ModelError> {
        [
            ("total semesters", self.total_semesters, TOTAL_SEMESTERS_BOUNDS),
            ("working days", self.working_days, WORKING_DAYS_BOUNDS),
            ("periods per day", self.periods_per_day, PERIODS_PER_DAY_BOUNDS),
            ("period duration", self.period_duration, PERIOD_DURATION_BOUNDS),
        ]
        .into_iter()
        .find_map(|(field, value, bounds)| within(field, value, bounds).err())
    }
}

pub(crate) fn within(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<u32, ModelError> {
    if value < min || value > max {
        return Err(ModelError::OutOfBounds { field, min, max, value });
    }
    Ok(value)
}
