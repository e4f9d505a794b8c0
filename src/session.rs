use std::sync::RwLock;

use tracing::info;

use crate::error::AppError;

/// Credential holder passed to every call against the scheduler.
///
/// Created at login, torn down on the first 401.
#[derive(Debug, Default)]
pub struct SessionContext {
    token: RwLock<Option<String>>,
}

impl SessionContext {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn credential(&self) -> Result<String, AppError> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(AppError::Unauthorized)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Passes `result` through, tearing the session down if it is a 401.
    pub fn observe<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(AppError::Unauthorized) = &result {
            self.invalidate();
        }
        result
    }

    pub fn invalidate(&self) {
        let mut token = self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if token.take().is_some() {
            info!("session credential invalidated");
        }
    }
}
