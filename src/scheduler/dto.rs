use serde::{Deserialize, Serialize};

use crate::models::{
    Configuration, Faculty, Institute, NewFaculty, PeriodLabel, Room, ScheduledSession, SectionLink,
    TimetableSummary, faculty::DEFAULT_MAX_HOURS,
};
use crate::validation::Violation;
use crate::wizard::SetupMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstituteDto {
    pub name: String,
    pub academic_year: String,
    pub course: String,
    pub total_semesters: u32,
    pub working_days: u32,
    pub periods_per_day: u32,
    pub period_duration: u32,
}

impl Default for InstituteDto {
    fn default() -> Self {
        InstituteDto::from(&Institute::default())
    }
}

impl From<&Institute> for InstituteDto {
    fn from(i: &Institute) -> Self {
        Self {
            name: i.name.clone(),
            academic_year: i.academic_year.clone(),
            course: i.course.clone(),
            total_semesters: i.total_semesters,
            working_days: i.working_days,
            periods_per_day: i.periods_per_day,
            period_duration: i.period_duration,
        }
    }
}

impl From<InstituteDto> for Institute {
    fn from(dto: InstituteDto) -> Self {
        Self {
            name: dto.name,
            academic_year: dto.academic_year,
            course: dto.course,
            total_semesters: dto.total_semesters,
            working_days: dto.working_days,
            periods_per_day: dto.periods_per_day,
            period_duration: dto.period_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub name: String,
    #[serde(default)]
    pub is_lab: bool,
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            is_lab: room.is_lab,
        }
    }
}

impl From<RoomDto> for Room {
    fn from(dto: RoomDto) -> Self {
        Self {
            name: dto.name,
            is_lab: dto.is_lab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDto {
    pub name: String,
    #[serde(default)]
    pub emp_id: String,
    #[serde(default = "default_max_hours")]
    pub max_hours: u32,
}

fn default_max_hours() -> u32 {
    DEFAULT_MAX_HOURS
}

impl From<&Faculty> for FacultyDto {
    fn from(f: &Faculty) -> Self {
        Self {
            name: f.name.clone(),
            emp_id: f.emp_id.clone(),
            max_hours: f.max_hours,
        }
    }
}

impl From<FacultyDto> for NewFaculty {
    fn from(dto: FacultyDto) -> Self {
        Self {
            name: dto.name,
            emp_id: dto.emp_id,
            max_hours: dto.max_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDto {
    pub semester: u32,
    pub sections: Vec<String>,
    pub subjects: Vec<SubjectDto>,
}

/// Subjects travel with the faculty *name*; ids never leave the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDto {
    pub name: String,
    pub faculty: String,
    pub weekly_hours: u32,
    pub is_lab: bool,
    pub lab_hours: u32,
}

/// Resolves faculty ids to names. Fails on the first unresolved reference.
pub fn academics_payload(config: &Configuration) -> Result<Vec<SemesterDto>, Violation> {
    config
        .semesters
        .iter()
        .map(|sem| {
            let subjects = sem
                .subjects
                .iter()
                .enumerate()
                .map(|(j, subject)| {
                    let Some(id) = subject.faculty else {
                        return Err(Violation::FacultyRequired {
                            semester: sem.number,
                            subject: j + 1,
                            name: subject.name.clone(),
                        });
                    };
                    let faculty = config.faculty(id).ok_or_else(|| Violation::DanglingFacultyReference {
                        semester: sem.number,
                        subject: j + 1,
                        name: subject.name.clone(),
                        faculty: id,
                    })?;
                    Ok(SubjectDto {
                        name: subject.name.clone(),
                        faculty: faculty.name.clone(),
                        weekly_hours: subject.weekly_hours,
                        is_lab: subject.is_lab,
                        lab_hours: subject.lab_hours,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SemesterDto {
                semester: sem.number,
                sections: sem.sections.clone(),
                subjects,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSetupRequest {
    pub institute: InstituteDto,
    pub rooms: Vec<RoomDto>,
    pub faculties: Vec<FacultyDto>,
}

impl From<&Configuration> for BaseSetupRequest {
    fn from(config: &Configuration) -> Self {
        Self {
            institute: InstituteDto::from(&config.institute),
            rooms: config.rooms.iter().map(RoomDto::from).collect(),
            faculties: config.faculties.iter().map(FacultyDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenerateRequest {
    AcademicOnly {
        academics: Vec<SemesterDto>,
    },
    Full {
        institute: InstituteDto,
        rooms: Vec<RoomDto>,
        faculties: Vec<FacultyDto>,
        academics: Vec<SemesterDto>,
    },
}

impl GenerateRequest {
    pub fn for_mode(config: &Configuration, mode: SetupMode) -> Result<Self, Violation> {
        let academics = academics_payload(config)?;
        Ok(match mode {
            SetupMode::AcademicOnly => GenerateRequest::AcademicOnly { academics },
            SetupMode::FirstTime => {
                let base = BaseSetupRequest::from(config);
                GenerateRequest::Full {
                    institute: base.institute,
                    rooms: base.rooms,
                    faculties: base.faculties,
                    academics,
                }
            }
        })
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            GenerateRequest::AcademicOnly { .. } => "setup/academic/",
            GenerateRequest::Full { .. } => "generate/",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateResponse {
    pub section_id: u64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SetupStatusResponse {
    pub setup_complete: bool,
    #[serde(default)]
    pub institute: Option<InstituteDto>,
    #[serde(default)]
    pub rooms: Option<Vec<RoomDto>>,
    #[serde(default)]
    pub faculties: Option<Vec<FacultyDto>>,
}

impl SetupStatusResponse {
    /// Installs the persisted base setup; absent parts keep what `config` already holds.
    pub fn hydrate(self, config: &Configuration) -> Configuration {
        let institute = self
            .institute
            .map(Institute::from)
            .unwrap_or_else(|| config.institute.clone());
        let rooms = self
            .rooms
            .map(|rooms| rooms.into_iter().map(Room::from).collect())
            .unwrap_or_else(|| config.rooms.clone());
        let faculties = match self.faculties {
            Some(faculties) => faculties.into_iter().map(NewFaculty::from).collect(),
            None => config
                .faculties
                .iter()
                .map(|f| NewFaculty {
                    name: f.name.clone(),
                    emp_id: f.emp_id.clone(),
                    max_hours: f.max_hours,
                })
                .collect(),
        };
        config.hydrate_base(institute, rooms, faculties)
    }
}

/// Body of `view/{id}/`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTimetableResponse {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub days: Option<Vec<String>>,
    #[serde(default)]
    pub periods: Option<Vec<PeriodLabel>>,
    #[serde(default)]
    pub timetable: Option<Vec<ScheduledSession>>,
}

#[derive(Debug, Deserialize)]
pub struct NavigationResponse {
    #[serde(default)]
    pub all_sections: Vec<SectionLink>,
}

#[derive(Debug, Deserialize)]
pub struct TimetableListResponse {
    #[serde(default)]
    pub timetables: Vec<TimetableSummary>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
