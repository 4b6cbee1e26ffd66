use std::sync::Arc;
use crate::domain::ports::{EntryRepository, LeadDirectory};
use crate::domain::services::scheduling::SchedulingService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub scheduling: Arc<SchedulingService>,
}

impl AppState {
    pub fn new(config: Config, entry_repo: Arc<dyn EntryRepository>, lead_repo: Arc<dyn LeadDirectory>) -> Self {
        Self {
            config,
            scheduling: Arc::new(SchedulingService::new(entry_repo, lead_repo)),
        }
    }
}
