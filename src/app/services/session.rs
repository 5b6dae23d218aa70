use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionRestore {
    #[default]
    Off,
    SavedFiles,
}

/// Files open at shutdown, in presentation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionData {
    pub active_index: usize,
    pub files: Vec<PathBuf>,
}

/// Returns the session directory path: data_dir/deskpad/session/
pub fn session_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("deskpad");
    path.push("session");
    path
}

/// Save the session to `dir`. A no-op when restore is off or nothing is open.
pub fn save_session(dir: &Path, data: &SessionData, mode: SessionRestore) -> Result<()> {
    if mode == SessionRestore::Off {
        return Ok(());
    }
    if data.files.is_empty() {
        clear_session(dir);
        return Ok(());
    }

    fs::create_dir_all(dir)
        .map_err(|e| AppError::Session(format!("Failed to create session dir: {}", e)))?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(dir.join("session.json"), json)
        .map_err(|e| AppError::Session(format!("Failed to write session file: {}", e)))?;
    tracing::debug!("Saved session with {} files", data.files.len());
    Ok(())
}

/// Load session data from `dir`, if restore is on and a non-empty session exists.
pub fn load_session(dir: &Path, mode: SessionRestore) -> Option<SessionData> {
    if mode == SessionRestore::Off {
        return None;
    }

    let contents = fs::read_to_string(dir.join("session.json")).ok()?;
    let session_data: SessionData = match serde_json::from_str(&contents) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Discarding unreadable session: {}", e);
            return None;
        }
    };

    if session_data.files.is_empty() {
        return None;
    }

    Some(session_data)
}

/// Delete the session file.
pub fn clear_session(dir: &Path) {
    let _ = fs::remove_file(dir.join("session.json"));
}
