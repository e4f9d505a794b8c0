use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ModelError;
use crate::models::{
    Faculty, FacultyField, FacultyId, Institute, InstituteField, NewFaculty, Room, RoomField,
    Semester, SubjectField,
};

/// Institute, rooms, faculty and semesters being prepared for the scheduler.
///
/// Every operator takes `&self` and returns a new value; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub institute: Institute,
    pub rooms: Vec<Room>,
    pub faculties: Vec<Faculty>,
    pub semesters: Vec<Semester>,
    next_faculty_id: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            institute: Institute::default(),
            rooms: vec![Room::default()],
            faculties: vec![Faculty::from_new(FacultyId(1), NewFaculty::default())],
            semesters: vec![Semester::seeded(1)],
            next_faculty_id: 2,
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces institute, rooms and faculty with a base setup persisted elsewhere.
    /// Faculty ids are assigned fresh; semesters are kept.
    pub fn hydrate_base(&self, institute: Institute, rooms: Vec<Room>, faculties: Vec<NewFaculty>) -> Self {
        let mut next = self.clone();
        next.institute = institute;
        next.rooms = rooms;
        next.faculties = Vec::with_capacity(faculties.len());
        for faculty in faculties {
            let id = next.allocate_faculty_id();
            next.faculties.push(Faculty::from_new(id, faculty));
        }
        next
    }

    pub fn faculty(&self, id: FacultyId) -> Option<&Faculty> {
        self.faculties.iter().find(|f| f.id == id)
    }

    pub fn faculty_by_name(&self, name: &str) -> Option<&Faculty> {
        self.faculties.iter().find(|f| f.name == name)
    }

    /// True when institute, rooms and faculty match `other`.
    pub fn same_base(&self, other: &Configuration) -> bool {
        self.institute == other.institute
            && self.rooms == other.rooms
            && self.faculties == other.faculties
    }

    pub fn add_room(&self) -> Self {
        let mut next = self.clone();
        next.rooms.push(Room::default());
        next
    }

    pub fn remove_room(&self, index: usize) -> Self {
        if self.rooms.len() <= 1 || index >= self.rooms.len() {
            warn!("ignoring remove_room({}) with {} rooms", index, self.rooms.len());
            return self.clone();
        }
        let mut next = self.clone();
        next.rooms.remove(index);
        next
    }

    pub fn add_faculty(&self) -> Self {
        let mut next = self.clone();
        let id = next.allocate_faculty_id();
        next.faculties.push(Faculty::from_new(id, NewFaculty::default()));
        next
    }

    pub fn remove_faculty(&self, index: usize) -> Self {
        if self.faculties.len() <= 1 || index >= self.faculties.len() {
            warn!("ignoring remove_faculty({}) with {} faculty", index, self.faculties.len());
            return self.clone();
        }
        let mut next = self.clone();
        next.faculties.remove(index);
        next
    }

    pub fn add_semester(&self) -> Self {
        let number = self
            .semesters
            .iter()
            .map(|s| s.number)
            .max()
            .map_or(1, |max| max + 1);
        let mut next = self.clone();
        next.semesters.push(Semester::seeded(number));
        next
    }

    /// Survivors keep their numbers; gaps are expected.
    pub fn remove_semester(&self, index: usize) -> Self {
        if index >= self.semesters.len() {
            warn!("ignoring remove_semester({}) with {} semesters", index, self.semesters.len());
            return self.clone();
        }
        let mut next = self.clone();
        next.semesters.remove(index);
        next
    }

    pub fn add_section(&self, semester: usize) -> Self {
        let mut next = self.clone();
        match next.semesters.get_mut(semester) {
            Some(sem) => sem.sections.push(String::new()),
            None => warn!("ignoring add_section for missing semester index {}", semester),
        }
        next
    }

    pub fn add_subject(&self, semester: usize) -> Self {
        let mut next = self.clone();
        match next.semesters.get_mut(semester) {
            Some(sem) => sem.subjects.push(Default::default()),
            None => warn!("ignoring add_subject for missing semester index {}", semester),
        }
        next
    }

    pub fn set_institute(&self, field: InstituteField) -> Result<Self, ModelError> {
        let mut next = self.clone();
        next.institute = self.institute.with_field(field)?;
        Ok(next)
    }

    pub fn set_room(&self, index: usize, field: RoomField) -> Result<Self, ModelError> {
        let mut next = self.clone();
        next.rooms
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { collection: "room", index })?
            .apply(field);
        Ok(next)
    }

    pub fn set_faculty(&self, index: usize, field: FacultyField) -> Result<Self, ModelError> {
        let mut next = self.clone();
        next.faculties
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { collection: "faculty", index })?
            .apply(field)?;
        Ok(next)
    }

    pub fn set_section(&self, semester: usize, section: usize, name: impl Into<String>) -> Result<Self, ModelError> {
        let mut next = self.clone();
        let slot = next
            .semester_mut(semester)?
            .sections
            .get_mut(section)
            .ok_or(ModelError::IndexOutOfRange { collection: "section", index: section })?;
        *slot = name.into();
        Ok(next)
    }

    pub fn set_subject(&self, semester: usize, subject: usize, field: SubjectField) -> Result<Self, ModelError> {
        let mut next = self.clone();
        next.semester_mut(semester)?
            .subjects
            .get_mut(subject)
            .ok_or(ModelError::IndexOutOfRange { collection: "subject", index: subject })?
            .apply(field);
        Ok(next)
    }

    fn semester_mut(&mut self, index: usize) -> Result<&mut Semester, ModelError> {
        self.semesters
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { collection: "semester", index })
    }

    fn allocate_faculty_id(&mut self) -> FacultyId {
        let id = FacultyId(self.next_faculty_id);
        self.next_faculty_id += 1;
        id
    }
}
