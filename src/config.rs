use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/timetable";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub listen_addr: SocketAddr,
}

impl SchedulerConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("SCHEDULER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| AppError::BadRequest(format!("LISTEN_ADDR is invalid: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: non_empty_var("SCHEDULER_TOKEN"),
            username: non_empty_var("SCHEDULER_USERNAME"),
            password: non_empty_var("SCHEDULER_PASSWORD"),
            listen_addr,
        })
    }

    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            username: None,
            password: None,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
