//! The controls screen.

use crate::help::HelpTopic;
use crate::input::MenuAction;
use crate::services::{HelpTextProvider, InputBindings};
use crate::text::TextBuffer;

/// Port whose bindings are shown.
const CONTROLS_PORT: usize = 0;

/// Room for one binding description.
const DESCRIPTION_CAPACITY: usize = 64;

/// Room for the localized prologue.
const PROLOGUE_CAPACITY: usize = 4096;

/// Overwrites `out` with the prologue and one line per menu control.
///
/// Bindings are looked up on every call so rebinding shows up immediately.
pub(super) fn write_controls(
    help: &dyn HelpTextProvider,
    bindings: &dyn InputBindings,
    out: &mut TextBuffer,
) {
    let descriptions = MenuAction::CONTROLS.map(|action| {
        let mut description = TextBuffer::with_capacity(DESCRIPTION_CAPACITY);
        description.set(&bindings.describe(CONTROLS_PORT, action));
        description
    });

    let mut prologue = TextBuffer::with_capacity(PROLOGUE_CAPACITY);
    help.write_help(HelpTopic::ControlsPrologue, &mut prologue);

    out.set(prologue.as_str());
    for (action, description) in MenuAction::CONTROLS.into_iter().zip(&descriptions) {
        out.push_str(&format!(
            "[{}]: {:<20}\n",
            help.control_label(action),
            description.as_str()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::help::HelpCatalog;
    use crate::input::{BindingTable, InputBind, JoypadInput};

    #[test]
    fn test_lists_every_control_in_order() {
        let catalog = HelpCatalog::new();
        let bindings = BindingTable::retro_defaults();
        let mut out = TextBuffer::with_capacity(4096);

        write_controls(&catalog, &bindings, &mut out);

        let text = out.as_str();
        assert!(text.starts_with(catalog.text(HelpTopic::ControlsPrologue)));

        let lines: Vec<_> = text.lines().filter(|line| line.starts_with('[')).collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], format!("[Scroll Up]: {:<20}", "(Key: Up)"));
        assert_eq!(lines[7], format!("[Quit]: {:<20}", "(Key: Escape)"));
        assert!(lines[9].starts_with("[Search]: (Key: A)"));
    }

    #[test]
    fn test_rebinding_is_picked_up() {
        let catalog = HelpCatalog::new();
        let mut bindings = BindingTable::retro_defaults();
        let mut out = TextBuffer::with_capacity(4096);

        write_controls(&catalog, &bindings, &mut out);
        assert!(!out.as_str().contains("Auto: Cross"));

        bindings.set_auto_bind(
            0,
            MenuAction::Accept,
            InputBind::joypad(JoypadInput::Button(0)).with_label("Cross"),
        );
        write_controls(&catalog, &bindings, &mut out);
        assert!(out.as_str().contains("[Confirm]: Auto: Cross (Key: X)"));
    }

    #[test]
    fn test_every_control_line_is_terminated() {
        let catalog = HelpCatalog::new();
        let bindings = BindingTable::retro_defaults();
        let mut out = TextBuffer::with_capacity(4096);

        write_controls(&catalog, &bindings, &mut out);

        let controls = out
            .as_str()
            .strip_prefix(catalog.text(HelpTopic::ControlsPrologue))
            .unwrap();
        assert_eq!(controls.matches('\n').count(), 10);
        assert!(controls.ends_with('\n'));
        assert!(!out.is_truncated());
    }

    #[test]
    fn test_small_buffer_truncates() {
        let catalog = HelpCatalog::new();
        let bindings = BindingTable::retro_defaults();
        let mut out = TextBuffer::with_capacity(16);

        write_controls(&catalog, &bindings, &mut out);
        assert_eq!(out.len(), 15);
        assert!(out.is_truncated());
    }
}
