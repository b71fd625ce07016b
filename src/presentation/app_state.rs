// Application state for HTTP handlers
use crate::application::chart_service::ChartService;
use crate::infrastructure::chart_board::ChartBoard;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: Arc<ChartService>,
    pub chart_board: Arc<ChartBoard>,
    pub max_upload_bytes: usize,
}
