use std::sync::Arc;

use crate::application::services::AnalysisService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub analysis_service: Arc<AnalysisService>,
    pub settings: Settings,
}
