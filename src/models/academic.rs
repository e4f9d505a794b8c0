use serde::{Deserialize, Serialize};

use crate::models::FacultyId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Unique and ascending within a configuration, not contiguous.
    pub number: u32,
    pub sections: Vec<String>,
    pub subjects: Vec<Subject>,
}

impl Semester {
    pub fn seeded(number: u32) -> Self {
        Self {
            number,
            sections: vec![String::new()],
            subjects: vec![Subject::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub faculty: Option<FacultyId>,
    pub weekly_hours: u32,
    pub is_lab: bool,
    pub lab_hours: u32,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            name: String::new(),
            faculty: None,
            weekly_hours: 3,
            is_lab: false,
            lab_hours: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectField {
    Name(String),
    Faculty(Option<FacultyId>),
    WeeklyHours(u32),
    IsLab(bool),
    LabHours(u32),
}

impl Subject {
    pub fn apply(&mut self, field: SubjectField) {
        match field {
            SubjectField::Name(name) => self.name = name,
            SubjectField::Faculty(faculty) => self.faculty = faculty,
            SubjectField::WeeklyHours(hours) => self.weekly_hours = hours,
            SubjectField::IsLab(is_lab) => self.is_lab = is_lab,
            SubjectField::LabHours(hours) => self.lab_hours = hours,
        }
    }
}
