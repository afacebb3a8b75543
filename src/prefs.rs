use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::config_directory;
use crate::domain::board::{GroupBy, SortBy};
use crate::error::{AppError, AppResult};

const PREFS_FILE_NAME: &str = "preferences.json";

/// The two view options the board persists across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewPreferences {
    pub group_by: GroupBy,
    pub sort_by: SortBy,
}

/// On-disk shape: the two modes as plain strings, so a stale or hand-edited
/// value degrades to the default for that field alone.
#[derive(Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    group_by: String,
    #[serde(default)]
    sort_by: String,
}

pub struct PreferenceStore {
    file_path: PathBuf,
}

impl PreferenceStore {
    pub fn open() -> AppResult<Self> {
        let dir = config_directory()?;
        Ok(Self {
            file_path: dir.join(PREFS_FILE_NAME),
        })
    }

    #[cfg(test)]
    pub(crate) fn at(dir: &Path) -> Self {
        Self {
            file_path: dir.join(PREFS_FILE_NAME),
        }
    }

    /// Read the stored preferences. Never fails: a missing or unreadable
    /// file, corrupt JSON, or an unrecognized mode string each fall back to
    /// the defaults (`status` / `priority`), per field.
    pub fn load(&self) -> ViewPreferences {
        let file = fs::read_to_string(&self.file_path)
            .ok()
            .and_then(|contents| serde_json::from_str::<PrefsFile>(&contents).ok())
            .unwrap_or_default();

        ViewPreferences {
            group_by: file.group_by.parse().unwrap_or_default(),
            sort_by: file.sort_by.parse().unwrap_or_default(),
        }
    }

    /// Persist both modes. Best-effort: a storage failure is logged and
    /// swallowed; callers never observe it.
    pub fn save(&self, prefs: ViewPreferences) {
        if let Err(error) = self.write(prefs) {
            warn!(%error, "failed to persist view preferences");
        }
    }

    fn write(&self, prefs: ViewPreferences) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = PrefsFile {
            group_by: prefs.group_by.to_string(),
            sort_by: prefs.sort_by.to_string(),
        };
        let data = serde_json::to_string_pretty(&file)
            .map_err(|err| AppError::Configuration(format!("failed to encode preferences: {err}")))?;
        fs::write(&self.file_path, data)?;
        Ok(())
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
