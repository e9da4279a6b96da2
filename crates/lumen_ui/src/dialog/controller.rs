//! The dialog controller.

use tracing::{debug, info, trace, warn};

use super::controls::write_controls;
use super::{DialogBehavior, DialogConfig, DialogKind, DialogServices, DialogState};
use crate::config::ConfigFlag;
use crate::displaylist::DisplayListRequest;
use crate::help::HelpTopic;
use crate::services::{DisplayListEnqueuer, HelpTextProvider};
use crate::text::TextBuffer;
use crate::timer::CountdownTimer;

/// Owns the dialog state and advances the active dialog once per frame.
///
/// One controller lives for the whole application and is handed by
/// reference to every call site. All mutation goes through its methods.
///
/// # Example
///
/// ```rust,ignore
/// let mut dialogs = DialogController::new(DialogConfig::default());
/// dialogs.push_pending(true, DialogKind::Welcome);
///
/// // Menu loop
/// dialogs.push(&mut nav);
/// dialogs.unset_pending_push();
/// loop {
///     if dialogs.iterate(&mut services, &mut text, now_us()) {
///         nav.pop(0);
///         break;
///     }
///     draw(text.as_str());
/// }
/// ```
#[derive(Debug, Default)]
pub struct DialogController {
    state: DialogState,
    config: DialogConfig,
    /// Countdown of the welcome screen, created on its first frame.
    welcome_timer: Option<CountdownTimer>,
}

impl DialogController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: DialogConfig) -> Self {
        Self {
            state: DialogState::IDLE,
            config,
            welcome_timer: None,
        }
    }

    /// Returns the controller tuning.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> DialogConfig {
        self.config
    }

    /// Returns a copy of the current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> DialogState {
        self.state
    }

    /// Returns the active dialog.
    #[inline]
    #[must_use]
    pub const fn current_kind(&self) -> DialogKind {
        self.state.current_kind
    }

    /// Returns true if a push is armed.
    #[inline]
    #[must_use]
    pub const fn is_push_pending(&self) -> bool {
        self.state.pending_push
    }

    /// Returns the welcome countdown, if the welcome screen is running.
    #[inline]
    #[must_use]
    pub const fn welcome_timer(&self) -> Option<&CountdownTimer> {
        self.welcome_timer.as_ref()
    }

    /// Advances the active dialog and writes its text into `out`.
    ///
    /// Returns true if the dialog ended on this call. The state is already
    /// back to idle when that happens. When idle, `out` is left untouched.
    pub fn iterate(
        &mut self,
        services: &mut DialogServices<'_>,
        out: &mut TextBuffer,
        now_us: u64,
    ) -> bool {
        let kind = self.state.current_kind;
        trace!(?kind, now_us, "dialog iterate");

        match kind.behavior() {
            DialogBehavior::Idle => false,
            DialogBehavior::Welcome => self.iterate_welcome(services.help, out, now_us),
            DialogBehavior::Controls => {
                write_controls(services.help, services.bindings, out);
                false
            }
            DialogBehavior::Topic(topic) => {
                services.help.write_help(topic, out);
                false
            }
            DialogBehavior::AchievementDescription => {
                match services.achievements {
                    Some(achievements) => {
                        achievements.write_description(self.state.current_id, out);
                    }
                    None => {
                        out.clear();
                        trace!("achievements unavailable, nothing to describe");
                    }
                }
                false
            }
            DialogBehavior::Extract => {
                services.help.write_help(HelpTopic::ExtractingPleaseWait, out);
                if !services.take_flag(ConfigFlag::BundleFinished) {
                    return false;
                }
                debug!(flag = ConfigFlag::BundleFinished.name(), "flag cleared");
                self.finish(kind);
                true
            }
            DialogBehavior::Unimplemented => {
                services.help.write_help(HelpTopic::Unknown, out);
                false
            }
        }
    }

    fn iterate_welcome(
        &mut self,
        help: &dyn HelpTextProvider,
        out: &mut TextBuffer,
        now_us: u64,
    ) -> bool {
        let duration = self.config.welcome_duration();
        let timer = self.welcome_timer.get_or_insert_with(|| {
            let mut timer = CountdownTimer::new();
            timer.begin(duration, now_us);
            timer
        });

        timer.tick(now_us);
        help.write_help(HelpTopic::Welcome, out);

        if timer.is_ended() || !timer.has_expired() {
            return false;
        }
        timer.end();
        self.finish(DialogKind::Welcome);
        true
    }

    fn finish(&mut self, kind: DialogKind) {
        self.state.current_kind = DialogKind::None;
        self.welcome_timer = None;
        info!(?kind, "dialog finished");
    }

    /// Arms a push request and selects the dialog kind.
    ///
    /// Returns false, changing nothing, when the controller only allows the
    /// extraction dialog to be re-armed and no push is pending.
    pub fn push_pending(&mut self, push: bool, kind: DialogKind) -> bool {
        if self.config.requires_rearm_for_extraction_push
            && kind == DialogKind::HelpExtract
            && !self.state.pending_push
        {
            warn!("extraction dialog can only be re-armed while a push is pending");
            return false;
        }

        self.state.pending_push = push;
        self.state.current_kind = kind;
        self.welcome_timer = None;
        debug!(?kind, push, "dialog armed");
        true
    }

    /// Clears the pending flag. The dialog kind is kept.
    pub fn unset_pending_push(&mut self) {
        self.state.pending_push = false;
    }

    /// Requests the help screen on the base navigation stack.
    ///
    /// Does nothing unless a push is pending. The pending flag is left set;
    /// callers clear it with [`unset_pending_push`](Self::unset_pending_push)
    /// once the screen is up.
    pub fn push(&self, enqueuer: &mut dyn DisplayListEnqueuer) {
        if !self.state.pending_push {
            return;
        }
        enqueuer.enqueue(DisplayListRequest::help());
    }

    /// Sets the selector used by kinds that need one.
    pub fn set_current_id(&mut self, id: u32) {
        self.state.current_id = id;
    }

    /// Returns to idle unconditionally.
    pub fn reset(&mut self) {
        self.state = DialogState::IDLE;
        self.welcome_timer = None;
        debug!("dialog state reset");
    }
}
