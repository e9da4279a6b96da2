//! Collaborators the dialog controller calls into.
//!
//! None of these are implemented by the controller itself. The crate ships
//! reference implementations ([`HelpCatalog`](crate::help::HelpCatalog),
//! [`BindingTable`](crate::input::BindingTable),
//! [`SharedSettings`](crate::config::SharedSettings),
//! [`NavigationStack`](crate::displaylist::NavigationStack)) used by the menu
//! loop and the tests.

use crate::config::ConfigFlag;
use crate::displaylist::DisplayListRequest;
use crate::help::HelpTopic;
use crate::input::{describe_binding, InputBind, MenuAction};
use crate::text::TextBuffer;

/// Localized help text.
pub trait HelpTextProvider {
    /// Overwrites `out` with the text for `topic`.
    fn write_help(&self, topic: HelpTopic, out: &mut TextBuffer);

    /// Returns the label shown next to `action` on the controls screen.
    fn control_label(&self, action: MenuAction) -> &str;
}

/// Where the menu actions are bound.
pub trait InputBindings {
    /// The user's explicit bind for `action` on `port`.
    fn bind(&self, port: usize, action: MenuAction) -> Option<&InputBind>;

    /// The bind assigned by the controller profile for `action` on `port`.
    fn auto_bind(&self, port: usize, action: MenuAction) -> Option<&InputBind>;

    /// Readable description of the bind, falling back to the auto bind.
    fn describe(&self, port: usize, action: MenuAction) -> String {
        describe_binding(self.bind(port, action), self.auto_bind(port, action))
    }
}

/// Achievement descriptions, present only when achievements are enabled.
pub trait AchievementDescriptions {
    /// Overwrites `out` with the description of achievement `index`.
    fn write_description(&self, index: u32, out: &mut TextBuffer);
}

/// Named boolean settings.
pub trait ConfigStore {
    /// Reads a flag.
    fn get_bool(&self, flag: ConfigFlag) -> bool;

    /// Writes a flag.
    fn set_bool(&mut self, flag: ConfigFlag, value: bool);
}

/// Accepts requests to push a screen onto the navigation stack.
pub trait DisplayListEnqueuer {
    /// Queues `request`.
    fn enqueue(&mut self, request: DisplayListRequest);
}
