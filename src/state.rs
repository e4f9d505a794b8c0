use std::sync::Arc;

use crate::scheduler::SchedulerClient;
use crate::session::SessionContext;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<dyn SchedulerClient>,
    pub session: Arc<SessionContext>,
}
