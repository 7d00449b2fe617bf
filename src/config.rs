//! Modal behaviour configuration
//!
//! Defaults match the usual dialog conventions (Esc dismisses, clicking the
//! backdrop dismisses, page scroll is locked, focus returns to the opener).
//! Settings can be loaded from a TOML file or assembled with the builder.

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::ThemeVariant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Key that dismisses the top dialog ("esc", a single character, or "f1".."f12")
    pub cancel_key: String,
    /// Dismiss when the overlay outside the dialog content is clicked
    pub close_on_backdrop: bool,
    /// Suppress page scrolling while any dialog is open
    pub lock_scroll: bool,
    /// Return focus to the previously focused element on close
    pub restore_focus: bool,
    /// Focus the first focusable element once a dialog has mounted
    pub auto_focus: bool,
    /// Prefix of generated modal ids
    pub id_prefix: String,
    /// Label of the header's dismiss button
    pub close_button_label: String,
    pub theme: ThemeVariant,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            cancel_key: "esc".to_string(),
            close_on_backdrop: true,
            lock_scroll: true,
            restore_focus: true,
            auto_focus: true,
            id_prefix: "modal".to_string(),
            close_button_label: "Close dialog".to_string(),
            theme: ThemeVariant::default(),
        }
    }
}

impl ModalConfig {
    /// Create a new builder for ModalConfig
    pub fn builder() -> ModalConfigBuilder {
        ModalConfigBuilder::new()
    }

    /// Dialogs that only close through their own buttons or the cancel key
    pub fn strict() -> Self {
        Self {
            close_on_backdrop: false,
            ..Self::default()
        }
    }

    /// Parsed cancellation key. Unknown names fall back to Esc.
    pub fn cancel_key_code(&self) -> KeyCode {
        let name = self.cancel_key.trim();
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "esc" | "escape" => return KeyCode::Esc,
            "backspace" => return KeyCode::Backspace,
            "delete" | "del" => return KeyCode::Delete,
            _ => {}
        }

        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=12).contains(&n) {
                return KeyCode::F(n);
            }
        }

        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return KeyCode::Char(c);
        }

        warn!("Unknown cancel key '{}', using Esc", self.cancel_key);
        KeyCode::Esc
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("modal-await");
        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading modal config from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ModalConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }
}

/// Builder for ModalConfig
#[derive(Debug, Default)]
pub struct ModalConfigBuilder {
    config: ModalConfig,
}

impl ModalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_key(mut self, key: impl Into<String>) -> Self {
        self.config.cancel_key = key.into();
        self
    }

    pub fn close_on_backdrop(mut self, enabled: bool) -> Self {
        self.config.close_on_backdrop = enabled;
        self
    }

    pub fn lock_scroll(mut self, enabled: bool) -> Self {
        self.config.lock_scroll = enabled;
        self
    }

    pub fn restore_focus(mut self, enabled: bool) -> Self {
        self.config.restore_focus = enabled;
        self
    }

    pub fn auto_focus(mut self, enabled: bool) -> Self {
        self.config.auto_focus = enabled;
        self
    }

    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.id_prefix = prefix.into();
        self
    }

    pub fn close_button_label(mut self, label: impl Into<String>) -> Self {
        self.config.close_button_label = label.into();
        self
    }

    pub fn theme(mut self, theme: ThemeVariant) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn build(self) -> ModalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ModalConfig::default();
        assert_eq!(config.cancel_key_code(), KeyCode::Esc);
        assert!(config.close_on_backdrop);
        assert!(config.lock_scroll);
        assert!(config.restore_focus);
        assert_eq!(config.id_prefix, "modal");
    }

    #[test]
    fn test_builder() {
        let config = ModalConfig::builder()
            .cancel_key("q")
            .close_on_backdrop(false)
            .id_prefix("dialog")
            .theme(ThemeVariant::Latte)
            .build();

        assert_eq!(config.cancel_key_code(), KeyCode::Char('q'));
        assert!(!config.close_on_backdrop);
        assert_eq!(config.id_prefix, "dialog");
        assert_eq!(config.theme, ThemeVariant::Latte);
    }

    #[test]
    fn test_strict_preset() {
        let config = ModalConfig::strict();
        assert!(!config.close_on_backdrop);
        assert_eq!(config.cancel_key_code(), KeyCode::Esc);
    }

    #[test]
    fn test_cancel_key_names() {
        let key = |name: &str| ModalConfig::builder().cancel_key(name).build().cancel_key_code();
        assert_eq!(key("Escape"), KeyCode::Esc);
        assert_eq!(key("F2"), KeyCode::F(2));
        assert_eq!(key("x"), KeyCode::Char('x'));
        assert_eq!(key("f13"), KeyCode::Esc);
        assert_eq!(key("nonsense"), KeyCode::Esc);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ModalConfig = toml::from_str("close_on_backdrop = false\ntheme = \"latte\"\n").unwrap();
        assert!(!config.close_on_backdrop);
        assert_eq!(config.theme, ThemeVariant::Latte);
        assert!(config.lock_scroll);
        assert_eq!(config.close_button_label, "Close dialog");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cancel_key = \"q\"\nid_prefix = \"form\"").unwrap();

        let config = ModalConfig::load_from(file.path()).unwrap();
        assert_eq!(config.cancel_key_code(), KeyCode::Char('q'));
        assert_eq!(config.id_prefix, "form");
    }

    #[test]
    fn test_load_from_invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lock_scroll = \"maybe\"").unwrap();

        let err = ModalConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
