//! Keybindings matching utilities.
//!
//! Converts [`AppKeyEvent`]s to the string form used in `keybindings.yaml`
//! and checks them against configured bindings.

use std::path::{Path, PathBuf};

use crate::data::keybindings_data::KeybindingsConfig;
use crate::data::storage::StorageError;
use crate::event::{AppKeyEvent, KeyCode};

impl KeybindingsConfig {
    /// Convert an AppKeyEvent to our string format.
    ///
    /// Examples:
    /// - KeyCode::Char('a') with no modifiers -> "a"
    /// - KeyCode::Char('c') with ctrl -> "ctrl+c"
    /// - KeyCode::Char('D') with shift -> "shift+d"
    /// - KeyCode::BackTab -> "shift+tab"
    pub fn app_key_to_string(key: &AppKeyEvent) -> String {
        let mut parts = Vec::new();

        if key.ctrl {
            parts.push("ctrl");
        }
        if key.alt {
            parts.push("alt");
        }

        let key_str = match &key.code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => {
                if key.shift && (c.is_uppercase() || !c.is_alphabetic()) {
                    parts.push("shift");
                }
                c.to_lowercase().to_string()
            }
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "delete".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::F(n) => format!("f{}", n),
            KeyCode::BackTab => {
                if !parts.contains(&"shift") {
                    parts.push("shift");
                }
                "tab".to_string()
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                if key.shift {
                    parts.push("shift");
                }
                match key.code {
                    KeyCode::Tab => "tab",
                    KeyCode::Up => "up",
                    KeyCode::Down => "down",
                    KeyCode::Left => "left",
                    _ => "right",
                }
                .to_string()
            }
            _ => return String::new(),
        };

        parts.push(&key_str);
        parts.join("+")
    }

    /// Check if a key matches any of the configured bindings.
    pub fn matches(key: &AppKeyEvent, bindings: &[String]) -> bool {
        let key_str = Self::app_key_to_string(key);
        if key_str.is_empty() {
            return false;
        }
        bindings.iter().any(|b| b.eq_ignore_ascii_case(&key_str))
    }

    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("keybindings.yaml")
    }

    /// Load keybindings, falling back to defaults when the file is missing or
    /// does not parse.
    pub fn load_or_default(data_dir: &Path) -> Self {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_saphyr::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid keybindings.yaml, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), StorageError> {
        let yaml = serde_saphyr::to_string(self).map_err(|e| {
            StorageError::Serialize(format!("Failed to serialize keybindings: {}", e))
        })?;

        std::fs::write(Self::path(data_dir), yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write keybindings: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(code: KeyCode, ctrl: bool, shift: bool) -> AppKeyEvent {
        AppKeyEvent {
            code,
            ctrl,
            alt: false,
            shift,
        }
    }

    #[test]
    fn test_key_to_string() {
        assert_eq!(
            KeybindingsConfig::app_key_to_string(&make_key(KeyCode::Char('a'), false, false)),
            "a"
        );
        assert_eq!(
            KeybindingsConfig::app_key_to_string(&make_key(KeyCode::Char('c'), true, false)),
            "ctrl+c"
        );
        assert_eq!(
            KeybindingsConfig::app_key_to_string(&make_key(KeyCode::Char('D'), false, true)),
            "shift+d"
        );
        assert_eq!(
            KeybindingsConfig::app_key_to_string(&make_key(KeyCode::Char(' '), false, false)),
            "space"
        );
        assert_eq!(
            KeybindingsConfig::app_key_to_string(&make_key(KeyCode::BackTab, false, false)),
            "shift+tab"
        );
        assert_eq!(
            KeybindingsConfig::app_key_to_string(&make_key(KeyCode::F(2), false, false)),
            "f2"
        );
    }

    #[test]
    fn test_matches_defaults() {
        let config = KeybindingsConfig::default();
        let key = make_key(KeyCode::Char('D'), false, true);
        assert!(KeybindingsConfig::matches(&key, &config.panel.deploy));
        assert!(!KeybindingsConfig::matches(&key, &config.panel.delete));

        let key = make_key(KeyCode::Down, false, false);
        assert!(KeybindingsConfig::matches(&key, &config.navigation.down));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = KeybindingsConfig::default();
        config.global.quit = vec!["ctrl+q".into()];
        config.save(dir.path()).unwrap();

        let loaded = KeybindingsConfig::load_or_default(dir.path());
        assert_eq!(loaded.global.quit, vec!["ctrl+q".to_string()]);
        assert_eq!(loaded.panel.add, vec!["a".to_string()]);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(KeybindingsConfig::path(dir.path()), "global: [not, a, map").unwrap();
        let loaded = KeybindingsConfig::load_or_default(dir.path());
        assert_eq!(loaded.global.quit, vec!["q".to_string(), "ctrl+c".to_string()]);
    }
}
