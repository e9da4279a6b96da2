//! # Menu Settings
//!
//! The boolean flags the dialogs read and write, plus the dialog tuning
//! section. Loaded once at startup from TOML.
//!
//! ```toml
//! bundle_assets_extract_enable = true
//! menu_show_start_screen = true
//!
//! [dialog]
//! requires_rearm_for_extraction_push = true
//! welcome_duration_ms = 3000
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::dialog::DialogConfig;
use crate::error::{UiError, UiResult};
use crate::services::ConfigStore;

/// A named boolean setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFlag {
    /// Set by the extraction worker when bundled assets are unpacked.
    BundleFinished,
    /// Extract bundled assets on this launch.
    BundleAssetsExtractEnable,
    /// Show the welcome screen on startup.
    MenuShowStartScreen,
}

impl ConfigFlag {
    /// Returns the setting name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BundleFinished => "bundle_finished",
            Self::BundleAssetsExtractEnable => "bundle_assets_extract_enable",
            Self::MenuShowStartScreen => "menu_show_start_screen",
        }
    }
}

/// Persistent menu settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Bundled asset extraction has completed.
    pub bundle_finished: bool,
    /// Extract bundled assets on this launch.
    pub bundle_assets_extract_enable: bool,
    /// Show the welcome screen on startup.
    pub menu_show_start_screen: bool,
    /// Dialog controller tuning.
    pub dialog: DialogConfig,
}

impl MenuSettings {
    /// Parses settings from a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] on malformed TOML.
    pub fn from_toml_str(document: &str) -> UiResult<Self> {
        toml::from_str(document).map_err(|e| UiError::InvalidConfig(e.to_string()))
    }

    /// Serializes the settings to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> UiResult<String> {
        toml::to_string(self).map_err(|e| UiError::InvalidConfig(e.to_string()))
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| UiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&document)
    }

    /// Writes settings to a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> UiResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?).map_err(|source| UiError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn flag_mut(&mut self, flag: ConfigFlag) -> &mut bool {
        match flag {
            ConfigFlag::BundleFinished => &mut self.bundle_finished,
            ConfigFlag::BundleAssetsExtractEnable => &mut self.bundle_assets_extract_enable,
            ConfigFlag::MenuShowStartScreen => &mut self.menu_show_start_screen,
        }
    }
}

impl ConfigStore for MenuSettings {
    fn get_bool(&self, flag: ConfigFlag) -> bool {
        match flag {
            ConfigFlag::BundleFinished => self.bundle_finished,
            ConfigFlag::BundleAssetsExtractEnable => self.bundle_assets_extract_enable,
            ConfigFlag::MenuShowStartScreen => self.menu_show_start_screen,
        }
    }

    fn set_bool(&mut self, flag: ConfigFlag, value: bool) {
        *self.flag_mut(flag) = value;
    }
}

/// Settings shared between the menu thread and background workers.
///
/// The asset extraction worker raises [`ConfigFlag::BundleFinished`] through
/// its clone while the menu polls it every frame.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<MenuSettings>>,
}

impl SharedSettings {
    /// Wraps `settings` for sharing.
    #[must_use]
    pub fn new(settings: MenuSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Returns a copy of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> MenuSettings {
        self.inner.read().clone()
    }

    /// Returns the dialog tuning section.
    #[must_use]
    pub fn dialog_config(&self) -> DialogConfig {
        self.inner.read().dialog
    }

    /// Reads a flag.
    #[must_use]
    pub fn get(&self, flag: ConfigFlag) -> bool {
        self.inner.read().get_bool(flag)
    }

    /// Writes a flag.
    pub fn set(&self, flag: ConfigFlag, value: bool) {
        self.inner.write().set_bool(flag, value);
    }
}

impl ConfigStore for SharedSettings {
    fn get_bool(&self, flag: ConfigFlag) -> bool {
        self.get(flag)
    }

    fn set_bool(&mut self, flag: ConfigFlag, value: bool) {
        self.set(flag, value);
    }
}
