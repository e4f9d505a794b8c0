pub mod academic;
pub mod configuration;
pub mod faculty;
pub mod institute;
pub mod room;
pub mod timetable;

pub use academic::{Semester, Subject, SubjectField};
pub use configuration::Configuration;
pub use faculty::{Faculty, FacultyField, FacultyId, NewFaculty};
pub use institute::{Institute, InstituteField};
pub use room::{Room, RoomField};
pub use timetable::{PeriodLabel, ScheduledSession, SectionLink, TimetableSummary};
