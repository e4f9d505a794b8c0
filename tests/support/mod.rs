#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use timetable_client::error::AppError;
use timetable_client::models::{Configuration, FacultyField, SectionLink, SubjectField, TimetableSummary};
use timetable_client::scheduler::SchedulerClient;
use timetable_client::scheduler::dto::{
    BaseSetupRequest, FacultyDto, GenerateRequest, GenerateResponse, InstituteDto, RoomDto,
    SectionTimetableResponse, SetupStatusResponse,
};
use timetable_client::session::SessionContext;

#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Unauthorized,
    Remote(u16, &'static str),
}

impl Failure {
    fn to_error(self) -> AppError {
        match self {
            Failure::Unauthorized => AppError::Unauthorized,
            Failure::Remote(status, message) => AppError::Remote {
                status,
                message: message.to_string(),
            },
        }
    }
}

/// Scripted scheduler that records what it was sent.
#[derive(Default)]
pub struct MockScheduler {
    pub status: SetupStatusResponse,
    pub timetable: SectionTimetableResponse,
    pub sections: Vec<SectionLink>,
    pub timetables: Vec<TimetableSummary>,
    pub section_id: u64,
    pub delay: Option<Duration>,
    pub failure: Mutex<Option<Failure>>,
    pub base_setups: Mutex<Vec<BaseSetupRequest>>,
    pub generate_requests: Mutex<Vec<GenerateRequest>>,
    pub calls: AtomicUsize,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self {
            section_id: 42,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: SetupStatusResponse) -> Self {
        self.status = status;
        self
    }

    pub fn with_timetable(mut self, timetable: SectionTimetableResponse) -> Self {
        self.timetable = timetable;
        self
    }

    pub fn with_delay(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }

    pub fn failing(self, failure: Failure) -> Self {
        self.fail_with(Some(failure));
        self
    }

    pub fn fail_with(&self, failure: Option<Failure>) {
        *self.failure.lock().unwrap() = failure;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn generate_count(&self) -> usize {
        self.generate_requests.lock().unwrap().len()
    }

    async fn hit(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match *self.failure.lock().unwrap() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SchedulerClient for MockScheduler {
    async fn login(&self, _username: &str, _password: &str) -> Result<SessionContext, AppError> {
        self.hit().await?;
        Ok(SessionContext::with_token("mock-token"))
    }

    async fn setup_status(&self, session: &SessionContext) -> Result<SetupStatusResponse, AppError> {
        session.credential()?;
        self.hit().await?;
        Ok(self.status.clone())
    }

    async fn save_base_setup(&self, session: &SessionContext, request: &BaseSetupRequest) -> Result<(), AppError> {
        session.credential()?;
        self.hit().await?;
        self.base_setups.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn generate(&self, session: &SessionContext, request: &GenerateRequest) -> Result<GenerateResponse, AppError> {
        session.credential()?;
        self.generate_requests.lock().unwrap().push(request.clone());
        self.hit().await?;
        Ok(GenerateResponse {
            section_id: self.section_id,
            message: None,
        })
    }

    async fn section_timetable(&self, session: &SessionContext, _section_id: u64) -> Result<SectionTimetableResponse, AppError> {
        session.credential()?;
        self.hit().await?;
        Ok(self.timetable.clone())
    }

    async fn sibling_sections(&self, session: &SessionContext, _section_id: u64) -> Result<Vec<SectionLink>, AppError> {
        session.credential()?;
        self.hit().await?;
        Ok(self.sections.clone())
    }

    async fn list_timetables(&self, session: &SessionContext) -> Result<Vec<TimetableSummary>, AppError> {
        session.credential()?;
        self.hit().await?;
        Ok(self.timetables.clone())
    }
}

pub fn completed_status(faculty_names: &[&str]) -> SetupStatusResponse {
    SetupStatusResponse {
        setup_complete: true,
        institute: Some(InstituteDto {
            name: "Sample Institute".to_string(),
            academic_year: "2024-25".to_string(),
            course: "MCA".to_string(),
            ..Default::default()
        }),
        rooms: Some(vec![
            RoomDto { name: "R1".to_string(), is_lab: false },
            RoomDto { name: "Lab 1".to_string(), is_lab: true },
        ]),
        faculties: Some(
            faculty_names
                .iter()
                .map(|name| FacultyDto {
                    name: name.to_string(),
                    emp_id: format!("EMP-{}", name),
                    max_hours: 18,
                })
                .collect(),
        ),
    }
}

/// One semester, section "A", subject "Math" taught by "Dr. X".
pub fn math_configuration() -> Configuration {
    let config = Configuration::new()
        .set_faculty(0, FacultyField::Name("Dr. X".to_string()))
        .unwrap()
        .set_section(0, 0, "A")
        .unwrap()
        .set_subject(0, 0, SubjectField::Name("Math".to_string()))
        .unwrap();
    let id = config.faculties[0].id;
    config
        .set_subject(0, 0, SubjectField::Faculty(Some(id)))
        .unwrap()
}

/// `math_configuration` with the base setup filled in as well.
pub fn complete_configuration() -> Configuration {
    use timetable_client::models::{InstituteField, RoomField};

    math_configuration()
        .set_institute(InstituteField::Name("Sample Institute".to_string()))
        .unwrap()
        .set_room(0, RoomField::Name("R1".to_string()))
        .unwrap()
}
