//! # Menu Dialogs
//!
//! A state machine over the menu's transient informational screens.
//!
//! ## State Machine
//!
//! ```text
//!            push_pending(kind)
//!   ┌──────┐ ─────────────────→ ┌───────────┐
//!   │ None │                    │  kind     │ ←─ iterate() every frame
//!   └──────┘ ←───────────────── └───────────┘
//!        timer expired / extraction done / reset()
//! ```
//!
//! Only [`DialogKind::Welcome`] and [`DialogKind::HelpExtract`] end on their
//! own. Every other kind stays up until the user dismisses it.

mod controller;
mod controls;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigFlag;
use crate::help::HelpTopic;
use crate::services::{AchievementDescriptions, ConfigStore, HelpTextProvider, InputBindings};

pub use controller::DialogController;

/// Which dialog is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// No dialog. Initial and terminal state.
    #[default]
    None,
    /// Timed welcome screen.
    Welcome,
    /// Current control bindings.
    HelpControls,
    /// What a core is.
    HelpWhatIsACore,
    /// How to load content.
    HelpLoadingContent,
    /// Changing the virtual gamepad.
    HelpChangeVirtualGamepad,
    /// Audio/video troubleshooting.
    HelpAudioVideoTroubleshooting,
    /// Sending debug information.
    HelpSendDebugInfo,
    /// Scanning content.
    HelpScanningContent,
    /// Wait screen for first-launch asset extraction.
    HelpExtract,
    /// Description of the achievement selected with `set_current_id`.
    HelpCheevosDescription,
    /// Quit confirmation.
    QuitConfirm,
    /// Generic information message.
    Information,
    /// Generic question.
    Question,
    /// Generic warning.
    Warning,
    /// Generic error.
    Error,
}

/// How a dialog kind behaves when iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogBehavior {
    /// Nothing to do.
    Idle,
    /// Timed screen that ends itself.
    Welcome,
    /// Renders the control bindings.
    Controls,
    /// Shows a fixed help topic.
    Topic(HelpTopic),
    /// Shows an achievement description.
    AchievementDescription,
    /// Waits for asset extraction to finish.
    Extract,
    /// No content exists for this kind yet, a placeholder is shown.
    Unimplemented,
}

impl DialogKind {
    /// Returns how this kind behaves when iterated.
    #[must_use]
    pub const fn behavior(self) -> DialogBehavior {
        match self {
            Self::None => DialogBehavior::Idle,
            Self::Welcome => DialogBehavior::Welcome,
            Self::HelpControls => DialogBehavior::Controls,
            Self::HelpWhatIsACore => DialogBehavior::Topic(HelpTopic::WhatIsACore),
            Self::HelpLoadingContent => DialogBehavior::Topic(HelpTopic::LoadingContent),
            Self::HelpChangeVirtualGamepad => {
                DialogBehavior::Topic(HelpTopic::ChangeVirtualGamepad)
            }
            Self::HelpAudioVideoTroubleshooting => {
                DialogBehavior::Topic(HelpTopic::AudioVideoTroubleshooting)
            }
            Self::HelpSendDebugInfo => DialogBehavior::Topic(HelpTopic::SendDebugInfo),
            Self::HelpScanningContent => DialogBehavior::Topic(HelpTopic::ScanningContent),
            Self::HelpExtract => DialogBehavior::Extract,
            Self::HelpCheevosDescription => DialogBehavior::AchievementDescription,
            Self::QuitConfirm
            | Self::Information
            | Self::Question
            | Self::Warning
            | Self::Error => DialogBehavior::Unimplemented,
        }
    }

    /// Returns true if iterating this kind can end the dialog.
    #[must_use]
    pub const fn is_self_terminating(self) -> bool {
        matches!(self, Self::Welcome | Self::HelpExtract)
    }
}

/// Snapshot of the controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogState {
    /// A push to the help screen was requested and not yet cleared.
    pub pending_push: bool,
    /// Selector for kinds that need one (the achievement index).
    pub current_id: u32,
    /// The active dialog.
    pub current_kind: DialogKind,
}

impl DialogState {
    /// The idle state.
    pub const IDLE: Self = Self {
        pending_push: false,
        current_id: 0,
        current_kind: DialogKind::None,
    };
}

/// Dialog controller tuning, the `[dialog]` settings section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Only accept an extraction push when one is already pending.
    ///
    /// Set on platforms where extraction must stay inside the startup
    /// sequence.
    pub requires_rearm_for_extraction_push: bool,
    /// How long the welcome screen stays up.
    pub welcome_duration_ms: u64,
}

impl DialogConfig {
    /// Welcome screen length when not configured.
    pub const DEFAULT_WELCOME_DURATION: Duration = Duration::from_secs(3);

    /// Returns the welcome screen length.
    #[must_use]
    pub const fn welcome_duration(&self) -> Duration {
        Duration::from_millis(self.welcome_duration_ms)
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            requires_rearm_for_extraction_push: false,
            welcome_duration_ms: 3_000,
        }
    }
}

/// The collaborators one `iterate` call may use.
pub struct DialogServices<'a> {
    /// Help texts and control labels.
    pub help: &'a dyn HelpTextProvider,
    /// Control bindings.
    pub bindings: &'a dyn InputBindings,
    /// Achievement descriptions, when achievements are available.
    pub achievements: Option<&'a dyn AchievementDescriptions>,
    /// Settings flags.
    pub config: &'a mut dyn ConfigStore,
}

impl DialogServices<'_> {
    /// Reads and clears `flag` in one step. Returns the old value.
    fn take_flag(&mut self, flag: ConfigFlag) -> bool {
        let set = self.config.get_bool(flag);
        if set {
            self.config.set_bool(flag, false);
        }
        set
    }
}
