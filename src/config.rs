use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{AppError, AppResult};

/// Endpoint the board was built against.
pub const DEFAULT_API_URL: &str = "https://api.quicksell.co/v1/internal/frontend-assignment";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
}

impl AppConfig {
    pub fn load() -> Self {
        let api_url = env::var("TRELLIS_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { api_url }
    }
}

/// Directory holding the preference file. `TRELLIS_CONFIG_DIR` overrides the
/// platform default.
pub fn config_directory() -> AppResult<PathBuf> {
    if let Ok(dir) = env::var("TRELLIS_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "trellis")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            AppError::Configuration("could not determine a configuration directory".to_string())
        })
}
