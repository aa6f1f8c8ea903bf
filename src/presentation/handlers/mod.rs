mod analyze;
mod health;
mod result;
mod status;
mod ui;

pub use analyze::{AnalyzeRequest, ErrorResponse, MessageResponse, analyze_handler, cancel_handler};
pub use health::{HealthResponse, health_handler};
pub use result::{ResultResponse, result_handler};
pub use status::{StatusResponse, status_handler};
pub use ui::ui_handler;
