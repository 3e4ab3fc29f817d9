use crate::config::DashboardConfig;
use hostmon_collector::SystemSampler;
use std::sync::{Arc, Mutex};
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub templates: Arc<Tera>,
    /// Host sampler for the live stats panel; `None` hides the panel.
    pub live: Option<Arc<Mutex<SystemSampler>>>,
}
