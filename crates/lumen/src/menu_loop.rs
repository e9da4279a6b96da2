//! # LUMEN Menu Loop
//!
//! ```text
//! startup():
//!   ├─ Carve the configured memory regions
//!   ├─ Arm the welcome screen (first launch only)
//!   └─ Arm the extraction screen (if bundled assets need unpacking)
//!
//! Frame N, tick(now_us):
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. PUSH                                                             │
//! │    └─ Pending dialog? Push the help screen unless one is up         │
//! │                                                                     │
//! │ 2. ITERATE                                                          │
//! │    └─ Advance the active dialog, render its text                    │
//! │                                                                     │
//! │ 3. CLOSE                                                            │
//! │    └─ Dialog finished? Pop the help screen                          │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//! shutdown():
//!   ├─ Reset the dialog controller
//!   └─ Hand the memory regions back to their pools
//! ```

use std::time::Duration;

use lumen_core::{MemoryRegions, PoolLayout, Region};
use lumen_ui::{
    AchievementDescriptions, BindingTable, ConfigFlag, DialogController, DialogKind,
    DialogServices, DisplayListKind, HelpCatalog, NavigationStack, SharedSettings, TextBuffer,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{LumenError, LumenResult};

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Navigation stack the help screen lives on.
const HELP_STACK_LEVEL: usize = 0;

/// Configuration for the menu loop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLoopConfig {
    /// Size of the dialog text buffer, terminator slot included.
    pub text_capacity: usize,
    /// Platform pool placement.
    pub pools: PoolLayout,
    /// Regions carved at startup.
    pub regions: Vec<Region>,
}

impl MenuLoopConfig {
    /// Parses a config from TOML. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::InvalidConfig`] on malformed TOML.
    pub fn from_toml_str(document: &str) -> LumenResult<Self> {
        toml::from_str(document).map_err(|e| LumenError::InvalidConfig(e.to_string()))
    }
}

impl Default for MenuLoopConfig {
    fn default() -> Self {
        Self {
            text_capacity: 4096,
            pools: PoolLayout::default(),
            regions: vec![Region::Mem1, Region::Bucket],
        }
    }
}

/// What one frame did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame number, starting at zero.
    pub frame: u64,
    /// Dialog active at the start of the frame.
    pub kind: DialogKind,
    /// The help screen was pushed this frame. False when a pending dialog
    /// reused the help screen already showing.
    pub pushed: bool,
    /// The dialog ended this frame.
    pub finished: bool,
}

/// The menu orchestrator.
///
/// Owns the dialog controller, its collaborators and the memory regions.
pub struct MenuLoop {
    config: MenuLoopConfig,
    dialogs: DialogController,
    text: TextBuffer,
    navigation: NavigationStack,
    help: HelpCatalog,
    bindings: BindingTable,
    achievements: Option<Box<dyn AchievementDescriptions>>,
    settings: SharedSettings,
    regions: MemoryRegions,
    frame_count: u64,
}

impl MenuLoop {
    /// Creates a menu loop over `settings`.
    ///
    /// The dialog controller takes its tuning from the settings' `[dialog]`
    /// section.
    #[must_use]
    pub fn new(config: MenuLoopConfig, settings: SharedSettings) -> Self {
        Self {
            dialogs: DialogController::new(settings.dialog_config()),
            text: TextBuffer::with_capacity(config.text_capacity),
            navigation: NavigationStack::new(),
            help: HelpCatalog::new(),
            bindings: BindingTable::retro_defaults(),
            achievements: None,
            settings,
            regions: MemoryRegions::new(config.pools),
            config,
            frame_count: 0,
        }
    }

    /// Replaces the help catalog, e.g. with a translation.
    #[must_use]
    pub fn with_help(mut self, help: HelpCatalog) -> Self {
        self.help = help;
        self
    }

    /// Installs the achievement description provider.
    pub fn set_achievements(&mut self, achievements: Box<dyn AchievementDescriptions>) {
        self.achievements = Some(achievements);
    }

    /// Brings up the memory regions and arms the startup dialogs.
    ///
    /// The welcome screen is shown once: its setting is cleared when armed.
    /// The extraction screen is armed after it and takes over the dialog
    /// slot.
    ///
    /// # Errors
    ///
    /// Fails if a configured region cannot be initialized. Regions carved
    /// by this call are handed back before the error is returned.
    pub fn startup(&mut self) -> LumenResult<()> {
        for (index, &region) in self.config.regions.iter().enumerate() {
            if let Err(e) = self.regions.initialize(region) {
                for &carved in self.config.regions[..index].iter().rev() {
                    self.regions.destroy(carved);
                }
                return Err(e.into());
            }
        }

        if self.settings.get(ConfigFlag::MenuShowStartScreen) {
            self.dialogs.push_pending(true, DialogKind::Welcome);
            self.settings.set(ConfigFlag::MenuShowStartScreen, false);
        }

        if self.settings.get(ConfigFlag::BundleAssetsExtractEnable)
            && !self.dialogs.push_pending(true, DialogKind::HelpExtract)
        {
            warn!("asset extraction screen not armed at startup");
        }

        info!(
            kind = ?self.dialogs.current_kind(),
            regions = self.config.regions.len(),
            "menu started"
        );
        Ok(())
    }

    /// Runs one frame at time `now_us`.
    pub fn tick(&mut self, now_us: u64) -> FrameReport {
        let mut pushed = false;
        if self.dialogs.is_push_pending() {
            // One help screen serves every dialog
            if !self
                .navigation
                .is_showing(HELP_STACK_LEVEL, DisplayListKind::Help)
            {
                self.dialogs.push(&mut self.navigation);
                pushed = true;
            }
            self.dialogs.unset_pending_push();
        }

        let kind = self.dialogs.current_kind();
        let mut services = DialogServices {
            help: &self.help,
            bindings: &self.bindings,
            achievements: self.achievements.as_deref(),
            config: &mut self.settings,
        };
        let finished = self.dialogs.iterate(&mut services, &mut self.text, now_us);

        if finished {
            self.close_help_screen();
        }

        let report = FrameReport {
            frame: self.frame_count,
            kind,
            pushed,
            finished,
        };
        self.frame_count += 1;
        report
    }

    /// Opens a help dialog on the next frame.
    ///
    /// Returns false if the controller refused the request.
    pub fn open(&mut self, kind: DialogKind) -> bool {
        self.dialogs.push_pending(true, kind)
    }

    /// Opens the description of achievement `index`.
    pub fn show_achievement(&mut self, index: u32) -> bool {
        self.dialogs.set_current_id(index);
        self.open(DialogKind::HelpCheevosDescription)
    }

    /// Closes the active dialog, as the user pressing back does.
    pub fn dismiss(&mut self) {
        debug!(kind = ?self.dialogs.current_kind(), "dialog dismissed");
        self.close_help_screen();
        self.dialogs.reset();
    }

    /// Resets the dialogs and returns every region to its pool.
    pub fn shutdown(&mut self) {
        self.dialogs.reset();
        self.navigation.clear();
        for &region in self.config.regions.iter().rev() {
            self.regions.destroy(region);
        }
        info!(frames = self.frame_count, "menu shut down");
    }

    fn close_help_screen(&mut self) {
        if self
            .navigation
            .is_showing(HELP_STACK_LEVEL, DisplayListKind::Help)
        {
            let _ = self.navigation.pop(HELP_STACK_LEVEL);
        }
    }

    /// Returns the text rendered by the last frame.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Returns the dialog controller.
    #[inline]
    #[must_use]
    pub fn dialogs(&self) -> &DialogController {
        &self.dialogs
    }

    /// Returns the navigation stack.
    #[inline]
    #[must_use]
    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    /// Returns the control bindings for rebinding.
    #[inline]
    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    /// Returns a handle to the shared settings.
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Returns the memory regions.
    #[inline]
    pub fn regions_mut(&mut self) -> &mut MemoryRegions {
        &mut self.regions
    }

    /// Returns the current frame count.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
