//! Help topics and the built-in English catalog.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{UiError, UiResult};
use crate::input::MenuAction;
use crate::services::HelpTextProvider;
use crate::text::TextBuffer;

/// A help text the dialogs can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpTopic {
    /// First-launch welcome.
    Welcome,
    /// Heading of the controls screen.
    ControlsPrologue,
    /// What a core is.
    WhatIsACore,
    /// How to load content.
    LoadingContent,
    /// Changing the virtual gamepad overlay.
    ChangeVirtualGamepad,
    /// Audio/video troubleshooting.
    AudioVideoTroubleshooting,
    /// Sending debug information.
    SendDebugInfo,
    /// Scanning content into playlists.
    ScanningContent,
    /// Wait screen while bundled assets are extracted.
    ExtractingPleaseWait,
    /// Placeholder for dialogs with no text yet.
    Unknown,
}

impl HelpTopic {
    /// Every topic.
    pub const ALL: [Self; 10] = [
        Self::Welcome,
        Self::ControlsPrologue,
        Self::WhatIsACore,
        Self::LoadingContent,
        Self::ChangeVirtualGamepad,
        Self::AudioVideoTroubleshooting,
        Self::SendDebugInfo,
        Self::ScanningContent,
        Self::ExtractingPleaseWait,
        Self::Unknown,
    ];

    /// Returns the snake_case name used in catalog files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::ControlsPrologue => "controls_prologue",
            Self::WhatIsACore => "what_is_a_core",
            Self::LoadingContent => "loading_content",
            Self::ChangeVirtualGamepad => "change_virtual_gamepad",
            Self::AudioVideoTroubleshooting => "audio_video_troubleshooting",
            Self::SendDebugInfo => "send_debug_info",
            Self::ScanningContent => "scanning_content",
            Self::ExtractingPleaseWait => "extracting_please_wait",
            Self::Unknown => "unknown",
        }
    }

    /// Looks a topic up by its catalog name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.key() == key)
    }

    const fn default_text(self) -> &'static str {
        match self {
            Self::Welcome => {
                "Welcome!\n\
                 For more information, go to the Help menu.\n\
                 This screen closes on its own in a few seconds."
            }
            Self::ControlsPrologue => "The menu uses the following controls:\n \n",
            Self::WhatIsACore => {
                "A core is a program that does the actual emulation or game logic.\n\
                 Each core supports its own set of content. Load a core first,\n\
                 then load content with it."
            }
            Self::LoadingContent => {
                "To load content you need a core and a content file.\n\
                 Pick 'Load Content' to browse for a file, or add a folder to\n\
                 a playlist with 'Scan Directory'."
            }
            Self::ChangeVirtualGamepad => {
                "The virtual gamepad is drawn as an overlay.\n\
                 Change it under Settings > On-Screen Overlay. Overlay opacity\n\
                 and scale can be adjusted there too."
            }
            Self::AudioVideoTroubleshooting => {
                "If audio crackles or video stutters, turn on threaded video,\n\
                 raise the audio latency, or disable vsync in the video settings."
            }
            Self::SendDebugInfo => {
                "Hold the 'Send Debug Info' entry to upload diagnostic details\n\
                 about your device and configuration."
            }
            Self::ScanningContent => {
                "To scan content, go to 'Import Content' and choose 'Scan\n\
                 Directory' or 'Scan File'. Matching entries are added to playlists."
            }
            Self::ExtractingPleaseWait => "Extracting assets, please wait.\nThis might take a while...",
            Self::Unknown => "Unknown",
        }
    }
}

/// Default English label for each control.
const fn default_label(action: MenuAction) -> &'static str {
    match action {
        MenuAction::Up => "Scroll Up",
        MenuAction::Down => "Scroll Down",
        MenuAction::Accept => "Confirm",
        MenuAction::Back => "Back",
        MenuAction::Info => "Info",
        MenuAction::Start => "Start",
        MenuAction::ToggleMenu => "Toggle Menu",
        MenuAction::Quit => "Quit",
        MenuAction::ToggleKeyboard => "Toggle Keyboard",
        MenuAction::Search => "Search",
    }
}

/// On-disk shape of a catalog override file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogFile {
    topics: HashMap<String, String>,
    labels: HashMap<String, String>,
}

/// Help texts and control labels.
///
/// Starts from the built-in English strings; any topic or label can be
/// overridden, e.g. from a translation file:
///
/// ```toml
/// [topics]
/// welcome = "Bienvenue !"
///
/// [labels]
/// accept = "Valider"
/// ```
#[derive(Debug, Clone, Default)]
pub struct HelpCatalog {
    topics: HashMap<HelpTopic, String>,
    labels: HashMap<MenuAction, String>,
}

impl HelpCatalog {
    /// Creates the built-in English catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses overrides from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] on malformed TOML or unknown
    /// topic/label names.
    pub fn from_toml_str(document: &str) -> UiResult<Self> {
        let file: CatalogFile =
            toml::from_str(document).map_err(|e| UiError::InvalidConfig(e.to_string()))?;

        let mut catalog = Self::new();
        for (key, text) in file.topics {
            let topic = HelpTopic::from_key(&key)
                .ok_or_else(|| UiError::InvalidConfig(format!("unknown help topic '{key}'")))?;
            catalog.topics.insert(topic, text);
        }
        for (key, text) in file.labels {
            let action = MenuAction::from_key(&key)
                .ok_or_else(|| UiError::InvalidConfig(format!("unknown control '{key}'")))?;
            catalog.labels.insert(action, text);
        }
        Ok(catalog)
    }

    /// Overrides the text of one topic.
    #[must_use]
    pub fn with_topic(mut self, topic: HelpTopic, text: impl Into<String>) -> Self {
        self.topics.insert(topic, text.into());
        self
    }

    /// Returns the text for `topic`.
    #[must_use]
    pub fn text(&self, topic: HelpTopic) -> &str {
        self.topics
            .get(&topic)
            .map_or_else(|| topic.default_text(), String::as_str)
    }
}

impl HelpTextProvider for HelpCatalog {
    fn write_help(&self, topic: HelpTopic, out: &mut TextBuffer) {
        out.set(self.text(topic));
    }

    fn control_label(&self, action: MenuAction) -> &str {
        self.labels
            .get(&action)
            .map_or_else(|| default_label(action), String::as_str)
    }
}
