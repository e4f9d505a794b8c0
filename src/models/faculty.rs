use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::institute::within;

pub const DEFAULT_MAX_HOURS: u32 = 18;

/// Stable handle for a faculty member inside one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacultyId(pub u32);

impl fmt::Display for FacultyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faculty#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub emp_id: String,
    /// Weekly period cap, passed through to the scheduler.
    pub max_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaculty {
    pub name: String,
    pub emp_id: String,
    pub max_hours: u32,
}

impl Default for NewFaculty {
    fn default() -> Self {
        Self {
            name: String::new(),
            emp_id: String::new(),
            max_hours: DEFAULT_MAX_HOURS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacultyField {
    Name(String),
    EmpId(String),
    MaxHours(u32),
}

impl Faculty {
    pub fn from_new(id: FacultyId, new: NewFaculty) -> Self {
        Self {
            id,
            name: new.name,
            emp_id: new.emp_id,
            max_hours: new.max_hours,
        }
    }

    pub fn apply(&mut self, field: FacultyField) -> Result<(), ModelError> {
        match field {
            FacultyField::Name(name) => self.name = name,
            FacultyField::EmpId(emp_id) => self.emp_id = emp_id,
            FacultyField::MaxHours(hours) => {
                self.max_hours = within("max hours", hours, (1, u32::MAX))?
            }
        }
        Ok(())
    }
}
