//! Completeness checks run before anything is sent to the scheduler.
//!
//! Rules are evaluated in a fixed order and the first failure wins, so the
//! same configuration always yields the same violation.

use std::collections::HashSet;

use thiserror::Error;

use crate::error::ModelError;
use crate::models::{Configuration, FacultyId};
use crate::wizard::SetupMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Institution name is required")]
    InstituteNameRequired,

    #[error("Institute settings are invalid: {0}")]
    InstituteOutOfBounds(ModelError),

    #[error("Room {room} name is required")]
    RoomNameRequired { room: usize },

    #[error("Room name \"{name}\" is used more than once")]
    DuplicateRoomName { name: String },

    #[error("Faculty {faculty} name is required")]
    FacultyNameRequired { faculty: usize },

    #[error("Please add at least one semester")]
    NoSemesters,

    #[error("Semester {semester}: Please add at least one section")]
    NoSections { semester: u32 },

    #[error("Semester {semester}: Please add at least one subject")]
    NoSubjects { semester: u32 },

    #[error("Semester {semester}: Subject {subject} name is required")]
    SubjectNameRequired { semester: u32, subject: usize },

    #[error("Semester {semester}: Faculty assignment is required for subject \"{name}\"")]
    FacultyRequired {
        semester: u32,
        subject: usize,
        name: String,
    },

    #[error("Semester {semester}: Subject \"{name}\" references a faculty member that no longer exists")]
    DanglingFacultyReference {
        semester: u32,
        subject: usize,
        name: String,
        faculty: FacultyId,
    },
}

impl Violation {
    pub fn rule(&self) -> &'static str {
        match self {
            Violation::InstituteNameRequired => "institute name required",
            Violation::InstituteOutOfBounds(_) => "institute out of bounds",
            Violation::RoomNameRequired { .. } => "room name required",
            Violation::DuplicateRoomName { .. } => "room name unique",
            Violation::FacultyNameRequired { .. } => "faculty name required",
            Violation::NoSemesters => "semester required",
            Violation::NoSections { .. } => "section required",
            Violation::NoSubjects { .. } => "subject required",
            Violation::SubjectNameRequired { .. } => "subject name required",
            Violation::FacultyRequired { .. } => "faculty required",
            Violation::DanglingFacultyReference { .. } => "faculty reference dangling",
        }
    }

    pub fn semester(&self) -> Option<u32> {
        match self {
            Violation::NoSections { semester }
            | Violation::NoSubjects { semester }
            | Violation::SubjectNameRequired { semester, .. }
            | Violation::FacultyRequired { semester, .. }
            | Violation::DanglingFacultyReference { semester, .. } => Some(*semester),
            _ => None,
        }
    }

    /// 1-based subject position within its semester.
    pub fn subject(&self) -> Option<usize> {
        match self {
            Violation::SubjectNameRequired { subject, .. }
            | Violation::FacultyRequired { subject, .. }
            | Violation::DanglingFacultyReference { subject, .. } => Some(*subject),
            _ => None,
        }
    }
}

/// Checks `config` for the given mode. Academic-only runs the academic rules alone.
pub fn validate(config: &Configuration, mode: SetupMode) -> Option<Violation> {
    match mode {
        SetupMode::FirstTime => validate_base(config).or_else(|| validate_academics(config)),
        SetupMode::AcademicOnly => validate_academics(config),
    }
}

/// Institute, room and faculty rules; gates the base-setup commit.
pub fn validate_base(config: &Configuration) -> Option<Violation> {
    if is_blank(&config.institute.name) {
        return Some(Violation::InstituteNameRequired);
    }
    if let Some(err) = config.institute.bounds_error() {
        return Some(Violation::InstituteOutOfBounds(err));
    }

    for (i, room) in config.rooms.iter().enumerate() {
        if is_blank(&room.name) {
            return Some(Violation::RoomNameRequired { room: i + 1 });
        }
    }

    let mut seen = HashSet::new();
    for room in &config.rooms {
        let name = room.name.trim();
        if !seen.insert(name) {
            return Some(Violation::DuplicateRoomName { name: name.to_string() });
        }
    }

    config
        .faculties
        .iter()
        .position(|f| is_blank(&f.name))
        .map(|i| Violation::FacultyNameRequired { faculty: i + 1 })
}

fn validate_academics(config: &Configuration) -> Option<Violation> {
    if config.semesters.is_empty() {
        return Some(Violation::NoSemesters);
    }

    for sem in &config.semesters {
        if !sem.sections.iter().any(|s| !is_blank(s)) {
            return Some(Violation::NoSections { semester: sem.number });
        }

        if sem.subjects.is_empty() {
            return Some(Violation::NoSubjects { semester: sem.number });
        }

        for (j, subject) in sem.subjects.iter().enumerate() {
            if is_blank(&subject.name) {
                return Some(Violation::SubjectNameRequired {
                    semester: sem.number,
                    subject: j + 1,
                });
            }
            let Some(faculty) = subject.faculty else {
                return Some(Violation::FacultyRequired {
                    semester: sem.number,
                    subject: j + 1,
                    name: subject.name.clone(),
                });
            };
            if config.faculty(faculty).is_none() {
                return Some(Violation::DanglingFacultyReference {
                    semester: sem.number,
                    subject: j + 1,
                    name: subject.name.clone(),
                    faculty,
                });
            }
        }
    }

    None
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
