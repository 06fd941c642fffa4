// SPDX-License-Identifier: MPL-2.0
use gesture_reader::app::persisted_state::AppState;
use gesture_reader::config::{self, Config, GeneralConfig, NavigationConfig};
use gesture_reader::i18n::I18n;
use gesture_reader::ui::notifications::Notification;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let english = Config {
        general: GeneralConfig {
            language: Some("en-US".to_string()),
        },
        ..Config::default()
    };
    config::save_to_path(&english, &path).expect("Failed to write initial config file");
    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    assert_eq!(I18n::new(None, &loaded).current_locale().to_string(), "en-US");

    let french = Config {
        general: GeneralConfig {
            language: Some("fr".to_string()),
        },
        ..Config::default()
    };
    config::save_to_path(&french, &path).expect("Failed to write french config file");
    let loaded = config::load_from_path(&path).expect("Failed to load french config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(
        i18n.translate(&Notification::info("notification-pan-mode-on")),
        "Mode déplacement activé"
    );
}

#[test]
fn navigation_section_reaches_viewer_settings() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let config = Config {
        navigation: NavigationConfig {
            action_debounce_ms: Some(100),
            ..NavigationConfig::default()
        },
        ..Config::default()
    };
    config::save_to_path(&config, &path).expect("Failed to write config");

    let settings = config::load_from_path(&path)
        .expect("Failed to load config")
        .viewer_settings();
    assert_eq!(settings.navigation.action_debounce.as_millis(), 100);
}

#[test]
fn tutorial_flag_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let state = AppState {
        has_seen_tutorial: true,
        ..AppState::default()
    };
    assert_eq!(state.save_to(Some(dir.path().to_path_buf())), None);

    let (loaded, warning) = AppState::load_from(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert!(loaded.has_seen_tutorial);
}
