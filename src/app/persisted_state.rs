// SPDX-License-Identifier: MPL-2.0
//! Session state persisted in CBOR.
//!
//! Unlike `settings.toml`, this file is written by the application itself and
//! is never meant to be edited by hand. Failures never abort: loading falls back
//! to defaults and both directions report an i18n warning key instead.

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.cbor";

/// State carried from one session to the next.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Set once the gesture tutorial has been shown; never reset automatically.
    #[serde(default)]
    pub has_seen_tutorial: bool,

    /// Directory of the last opened document.
    #[serde(default)]
    pub last_open_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads state from the default data directory.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads state from `base_dir`, or the default data directory.
    ///
    /// A missing file is not an error.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = state_file_path(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("cannot open {}: {err}", path.display());
                return (
                    Self::default(),
                    Some("notification-state-read-error".to_string()),
                );
            }
        };

        match ciborium::from_reader(BufReader::new(file)) {
            Ok(state) => (state, None),
            Err(err) => {
                log::warn!("discarding unreadable state {}: {err}", path.display());
                (
                    Self::default(),
                    Some("notification-state-parse-error".to_string()),
                )
            }
        }
    }

    /// Saves state to the default data directory.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves state to `base_dir`, creating it if needed.
    ///
    /// Returns a warning key on failure.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = state_file_path(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-dir-error".to_string());
            }
        }

        let Ok(file) = fs::File::create(&path) else {
            return Some("notification-state-create-error".to_string());
        };
        if let Err(err) = ciborium::into_writer(self, BufWriter::new(file)) {
            log::warn!("cannot write {}: {err}", path.display());
            return Some("notification-state-write-error".to_string());
        }
        None
    }

    /// Remembers the directory containing `file_path`.
    pub fn set_last_open_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_open_directory = Some(parent.to_path_buf());
        }
    }
}

fn state_file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
        path.push(STATE_FILE);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_state_has_not_seen_tutorial() {
        let state = AppState::default();
        assert!(!state.has_seen_tutorial);
        assert!(state.last_open_directory.is_none());
    }

    #[test]
    fn set_last_open_directory_extracts_parent() {
        let mut state = AppState::default();
        state.set_last_open_directory_from_file(Path::new("/home/user/docs/manual.pdf"));
        assert_eq!(
            state.last_open_directory,
            Some(PathBuf::from("/home/user/docs"))
        );
    }

    #[test]
    fn set_last_open_directory_ignores_root() {
        let mut state = AppState::default();
        state.set_last_open_directory_from_file(Path::new("/"));
        assert!(state.last_open_directory.is_none());
    }

    #[test]
    fn save_to_and_load_from_custom_directory() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().join("nested");

        let original = AppState {
            has_seen_tutorial: true,
            last_open_directory: Some(PathBuf::from("/test/open/directory")),
        };

        assert!(original.save_to(Some(base_dir.clone())).is_none());
        assert!(base_dir.join(STATE_FILE).exists());

        let (loaded, warning) = AppState::load_from(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(original, loaded);
    }

    #[test]
    fn load_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("create temp dir");
        let (state, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn load_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        fs::write(temp_dir.path().join(STATE_FILE), "not valid cbor data").expect("write file");

        let (state, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));
        assert_eq!(warning.as_deref(), Some("notification-state-parse-error"));
        assert_eq!(state, AppState::default());
    }
}
