pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, info};

use crate::config::SchedulerConfig;
use crate::error::AppError;
use crate::models::{SectionLink, TimetableSummary};
use crate::session::SessionContext;

use dto::{
    BaseSetupRequest, ErrorBody, GenerateRequest, GenerateResponse, LoginRequest, LoginResponse,
    NavigationResponse, SectionTimetableResponse, SetupStatusResponse, TimetableListResponse,
};

/// The remote timetable service. Scheduling itself happens on the other side.
#[async_trait]
pub trait SchedulerClient: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<SessionContext, AppError>;
    async fn setup_status(&self, session: &SessionContext) -> Result<SetupStatusResponse, AppError>;
    async fn save_base_setup(&self, session: &SessionContext, request: &BaseSetupRequest) -> Result<(), AppError>;
    async fn generate(&self, session: &SessionContext, request: &GenerateRequest) -> Result<GenerateResponse, AppError>;
    async fn section_timetable(&self, session: &SessionContext, section_id: u64) -> Result<SectionTimetableResponse, AppError>;
    async fn sibling_sections(&self, session: &SessionContext, section_id: u64) -> Result<Vec<SectionLink>, AppError>;
    async fn list_timetables(&self, session: &SessionContext) -> Result<Vec<TimetableSummary>, AppError>;
}

pub struct HttpSchedulerClient {
    client: Client,
    base_url: String,
}

impl HttpSchedulerClient {
    pub fn new(config: &SchedulerConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, session: &SessionContext, path: &str) -> Result<T, AppError> {
        let token = session.credential()?;
        debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Token {}", token))
            .send()
            .await?;
        session.observe(decode(response).await)
    }

    async fn post_json<B, T>(&self, session: &SessionContext, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let token = session.credential()?;
        debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Token {}", token))
            .json(body)
            .send()
            .await?;
        session.observe(decode(response).await)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::Unauthorized);
    }
    if !status.is_success() {
        let message = remote_message(&body);
        error!("scheduler returned {}: {}", status, message);
        return Err(AppError::Remote {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        error!("Failed to parse scheduler response: {}", e);
        AppError::MalformedResponse(e.to_string())
    })
}

/// Picks `error`, then `detail`, then the raw body.
fn remote_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error
        .or(parsed.detail)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "empty response".to_string()
            } else {
                body.to_string()
            }
        })
}

#[async_trait]
impl SchedulerClient for HttpSchedulerClient {
    async fn login(&self, username: &str, password: &str) -> Result<SessionContext, AppError> {
        let response = self
            .client
            .post(self.url("auth/login/"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let login: LoginResponse = decode(response).await?;
        info!("logged in as {}", username);
        Ok(SessionContext::with_token(login.token))
    }

    async fn setup_status(&self, session: &SessionContext) -> Result<SetupStatusResponse, AppError> {
        self.get_json(session, "setup/status/").await
    }

    async fn save_base_setup(&self, session: &SessionContext, request: &BaseSetupRequest) -> Result<(), AppError> {
        let _: serde_json::Value = self.post_json(session, "setup/institute/", request).await?;
        info!(
            "base setup saved: {} rooms, {} faculty",
            request.rooms.len(),
            request.faculties.len()
        );
        Ok(())
    }

    async fn generate(&self, session: &SessionContext, request: &GenerateRequest) -> Result<GenerateResponse, AppError> {
        let response: GenerateResponse = self.post_json(session, request.endpoint(), request).await?;
        info!("timetable generated, first section {}", response.section_id);
        Ok(response)
    }

    async fn section_timetable(&self, session: &SessionContext, section_id: u64) -> Result<SectionTimetableResponse, AppError> {
        self.get_json(session, &format!("view/{}/", section_id)).await
    }

    async fn sibling_sections(&self, session: &SessionContext, section_id: u64) -> Result<Vec<SectionLink>, AppError> {
        let nav: NavigationResponse = self
            .get_json(session, &format!("navigation/{}/", section_id))
            .await?;
        Ok(nav.all_sections)
    }

    async fn list_timetables(&self, session: &SessionContext) -> Result<Vec<TimetableSummary>, AppError> {
        let list: TimetableListResponse = self.get_json(session, "list/").await?;
        Ok(list.timetables)
    }
}
