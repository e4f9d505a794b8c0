//! Step/mode sequencer for building a configuration and handing it to the scheduler.
//!
//! The controller owns no business data beyond the configuration under edit.
//! At most one request to the scheduler is outstanding per controller; a second
//! submit while one is pending is a no-op and edits are refused until it settles.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, ModelError};
use crate::models::Configuration;
use crate::scheduler::SchedulerClient;
use crate::scheduler::dto::{BaseSetupRequest, GenerateRequest};
use crate::session::SessionContext;
use crate::validation::{validate, validate_base};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupMode {
    FirstTime,
    AcademicOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    Institute,
    Infrastructure,
    Faculty,
    Academic,
    Review,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Institute,
        Step::Infrastructure,
        Step::Faculty,
        Step::Academic,
        Step::Review,
    ];

    fn next(self) -> Option<Step> {
        let i = Step::ALL.iter().position(|s| *s == self)?;
        Step::ALL.get(i + 1).copied()
    }

    fn previous(self) -> Option<Step> {
        let i = Step::ALL.iter().position(|s| *s == self)?;
        i.checked_sub(1).and_then(|i| Step::ALL.get(i).copied())
    }

    pub fn is_reachable(self, mode: SetupMode) -> bool {
        match mode {
            SetupMode::FirstTime => true,
            SetupMode::AcademicOnly => matches!(self, Step::Academic | Step::Review),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Institute => "Institute",
            Step::Infrastructure => "Infrastructure",
            Step::Faculty => "Faculty",
            Step::Academic => "Academic",
            Step::Review => "Review",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WizardPhase {
    Editing,
    Generated { section_id: u64 },
    ReauthenticationRequired,
}

/// Outcome of a submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    Completed(T),
    /// Another request from this controller is still pending; nothing was sent.
    AlreadyInFlight,
}

struct WizardState {
    mode: SetupMode,
    step: Step,
    phase: WizardPhase,
    config: Configuration,
    undo: Vec<Configuration>,
    redo: Vec<Configuration>,
}

pub struct WizardController {
    client: Arc<dyn SchedulerClient>,
    session: Arc<SessionContext>,
    state: Mutex<WizardState>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl WizardController {
    /// Queries the setup status and picks the mode and entry step from it.
    pub async fn start(client: Arc<dyn SchedulerClient>, session: Arc<SessionContext>) -> Result<Self, AppError> {
        let status = session.observe(client.setup_status(&session).await)?;

        let (mode, step, config) = if status.setup_complete {
            let config = status.hydrate(&Configuration::default());
            info!(
                "base setup found ({} rooms, {} faculty), starting in academic-only mode",
                config.rooms.len(),
                config.faculties.len()
            );
            (SetupMode::AcademicOnly, Step::Academic, config)
        } else {
            info!("no base setup found, starting first-time setup");
            (SetupMode::FirstTime, Step::Institute, Configuration::default())
        };

        Ok(Self::with_state(client, session, mode, step, config))
    }

    /// Builds a controller without querying the scheduler.
    pub fn with_state(
        client: Arc<dyn SchedulerClient>,
        session: Arc<SessionContext>,
        mode: SetupMode,
        step: Step,
        config: Configuration,
    ) -> Self {
        Self {
            client,
            session,
            state: Mutex::new(WizardState {
                mode,
                step,
                phase: WizardPhase::Editing,
                config,
                undo: Vec::new(),
                redo: Vec::new(),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(InFlight(&self.in_flight))
    }

    pub fn mode(&self) -> SetupMode {
        self.state().mode
    }

    pub fn step(&self) -> Step {
        self.state().step
    }

    pub fn phase(&self) -> WizardPhase {
        self.state().phase
    }

    pub fn configuration(&self) -> Configuration {
        self.state().config.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn reachable_steps(&self) -> Vec<Step> {
        let mode = self.mode();
        Step::ALL.into_iter().filter(|s| s.is_reachable(mode)).collect()
    }

    pub fn can_undo(&self) -> bool {
        !self.state().undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state().redo.is_empty()
    }

    fn editable(&self) -> Result<MutexGuard<'_, WizardState>, AppError> {
        if self.is_busy() {
            return Err(AppError::Busy);
        }
        let state = self.state();
        if state.phase != WizardPhase::Editing {
            return Err(AppError::Finished);
        }
        Ok(state)
    }

    pub fn next(&self) -> Result<Step, AppError> {
        let mut state = self.editable()?;
        let target = state
            .step
            .next()
            .filter(|s| s.is_reachable(state.mode))
            .ok_or_else(|| AppError::InvalidTransition {
                action: "advance",
                step: state.step.to_string(),
            })?;
        state.step = target;
        Ok(target)
    }

    pub fn back(&self) -> Result<Step, AppError> {
        let mut state = self.editable()?;
        let target = state
            .step
            .previous()
            .filter(|s| s.is_reachable(state.mode))
            .ok_or_else(|| AppError::InvalidTransition {
                action: "go back",
                step: state.step.to_string(),
            })?;
        state.step = target;
        Ok(target)
    }

    pub fn go_to(&self, target: Step) -> Result<Step, AppError> {
        let mut state = self.editable()?;
        if !target.is_reachable(state.mode) {
            return Err(AppError::InvalidTransition {
                action: "jump",
                step: state.step.to_string(),
            });
        }
        state.step = target;
        Ok(target)
    }

    pub fn edit<F>(&self, f: F) -> Result<Configuration, AppError>
    where
        F: FnOnce(&Configuration) -> Configuration,
    {
        self.try_edit(|config| Ok(f(config)))
    }

    /// Applies a configuration transform and records it for undo.
    pub fn try_edit<F>(&self, f: F) -> Result<Configuration, AppError>
    where
        F: FnOnce(&Configuration) -> Result<Configuration, ModelError>,
    {
        let mut state = self.editable()?;
        let next = f(&state.config)?;

        if state.mode == SetupMode::AcademicOnly && !next.same_base(&state.config) {
            warn!("rejected edit to saved base setup");
            return Err(AppError::ReadOnly(
                "institute, rooms and faculty are fixed once the base setup is saved".to_string(),
            ));
        }
        if next == state.config {
            return Ok(next);
        }

        let previous = std::mem::replace(&mut state.config, next.clone());
        state.undo.push(previous);
        state.redo.clear();
        Ok(next)
    }

    pub fn undo(&self) -> Result<bool, AppError> {
        let mut state = self.editable()?;
        let Some(previous) = state.undo.pop() else {
            return Ok(false);
        };
        let current = std::mem::replace(&mut state.config, previous);
        state.redo.push(current);
        Ok(true)
    }

    pub fn redo(&self) -> Result<bool, AppError> {
        let mut state = self.editable()?;
        let Some(next) = state.redo.pop() else {
            return Ok(false);
        };
        let current = std::mem::replace(&mut state.config, next);
        state.undo.push(current);
        Ok(true)
    }

    /// Saves institute, rooms and faculty as the base setup, then switches to academic-only.
    pub async fn commit_base_setup(&self) -> Result<Submission<()>, AppError> {
        let Some(_guard) = self.begin() else {
            return Ok(Submission::AlreadyInFlight);
        };

        let request = {
            let state = self.state();
            if state.phase != WizardPhase::Editing {
                return Err(AppError::Finished);
            }
            if state.mode != SetupMode::FirstTime || state.step != Step::Faculty {
                return Err(AppError::InvalidTransition {
                    action: "commit base setup",
                    step: state.step.to_string(),
                });
            }
            if let Some(violation) = validate_base(&state.config) {
                return Err(violation.into());
            }
            BaseSetupRequest::from(&state.config)
        };

        let result = self
            .session
            .observe(self.client.save_base_setup(&self.session, &request).await);

        let mut state = self.state();
        match result {
            Ok(()) => {
                state.mode = SetupMode::AcademicOnly;
                state.step = Step::Academic;
                state.undo.clear();
                state.redo.clear();
                info!("base setup committed, switched to academic-only mode");
                Ok(Submission::Completed(()))
            }
            Err(err) => {
                if matches!(err, AppError::Unauthorized) {
                    state.phase = WizardPhase::ReauthenticationRequired;
                }
                warn!("base setup commit failed: {}", err);
                Err(err)
            }
        }
    }

    /// Validates and submits the configuration; on success the wizard is finished.
    pub async fn generate(&self) -> Result<Submission<u64>, AppError> {
        let Some(_guard) = self.begin() else {
            return Ok(Submission::AlreadyInFlight);
        };

        let request = {
            let state = self.state();
            if state.phase != WizardPhase::Editing {
                return Err(AppError::Finished);
            }
            if state.step != Step::Review {
                return Err(AppError::InvalidTransition {
                    action: "generate",
                    step: state.step.to_string(),
                });
            }
            if let Some(violation) = validate(&state.config, state.mode) {
                info!("generation blocked: {}", violation);
                return Err(violation.into());
            }
            GenerateRequest::for_mode(&state.config, state.mode)?
        };

        let result = self
            .session
            .observe(self.client.generate(&self.session, &request).await);

        let mut state = self.state();
        match result {
            Ok(response) => {
                state.phase = WizardPhase::Generated {
                    section_id: response.section_id,
                };
                info!("generation finished, section {}", response.section_id);
                Ok(Submission::Completed(response.section_id))
            }
            Err(err) => {
                if matches!(err, AppError::Unauthorized) {
                    state.phase = WizardPhase::ReauthenticationRequired;
                }
                warn!("generation failed: {}", err);
                Err(err)
            }
        }
    }
}
