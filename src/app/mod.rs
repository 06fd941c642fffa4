// SPDX-License-Identifier: MPL-2.0
//! Application entry points shared by the binary: command-line flags,
//! directories, persisted state and trace replay.
//!
//! [`run`] wires the pieces together: it loads `settings.toml` and
//! `state.cbor`, resolves the locale, replays the trace against a headless
//! engine and writes the tutorial flag back.

pub mod paths;
pub mod persisted_state;
pub mod replay;

use crate::config;
use crate::error::{Error, Result};
use crate::i18n::I18n;
use persisted_state::AppState;
use replay::{Trace, TraceEvent};
use std::path::PathBuf;

/// Command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `GESTURE_READER_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `GESTURE_READER_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Trace file to replay.
    pub trace: Option<PathBuf>,
}

/// Replays the trace named in `flags`, returning the lines to print.
pub fn run(flags: Flags) -> Result<Vec<String>> {
    paths::init_cli_overrides(flags.data_dir, flags.config_dir);

    let (config, config_warning) = config::load();
    let i18n = I18n::new(flags.lang, &config);
    if let Some(key) = config_warning {
        log::warn!("{}", i18n.tr(&key));
    }

    let (mut state, state_warning) = AppState::load();
    if let Some(key) = state_warning {
        log::warn!("{}", i18n.tr(&key));
    }

    let trace_path = flags
        .trace
        .ok_or_else(|| Error::Trace("no trace file given".to_string()))?;
    let trace = Trace::from_path(&trace_path)?;
    log::info!("replaying {} steps from {}", trace.steps.len(), trace_path.display());

    let report = replay::run(&trace, config.viewer_settings(), &i18n, state.has_seen_tutorial);

    let last_opened = trace.steps.iter().rev().find_map(|step| match &step.event {
        TraceEvent::Open { path } => Some(path),
        _ => None,
    });
    if let Some(path) = last_opened {
        state.set_last_open_directory_from_file(path);
    }
    state.has_seen_tutorial = report.has_seen_tutorial;
    if let Some(key) = state.save() {
        log::warn!("{}", i18n.tr(&key));
    }

    let mut lines = report.lines.clone();
    lines.extend(report.summary(&i18n));
    Ok(lines)
}
