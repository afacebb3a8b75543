use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::BoardDataService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub board_data: Arc<dyn BoardDataService>,
}

impl AppContext {
    pub fn new(config: AppConfig, board_data: Arc<dyn BoardDataService>) -> Self {
        Self { config, board_data }
    }
}
