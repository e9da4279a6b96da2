//! Input bindings for the menu controls.
//!
//! Maps logical menu actions to physical inputs and renders a readable
//! description of whatever is bound.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::fmt;

use crate::services::InputBindings;

/// Keyboard key the menu layout binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    X,
    Z,
    RightShift,
    Enter,
    F1,
    Escape,
    S,
    A,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::X => "X",
            Self::Z => "Z",
            Self::RightShift => "Right Shift",
            Self::Enter => "Enter",
            Self::F1 => "F1",
            Self::Escape => "Escape",
            Self::S => "S",
            Self::A => "A",
        })
    }
}

/// Direction of a joypad hat switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatDirection {
    /// Hat pushed up.
    Up,
    /// Hat pushed down.
    Down,
    /// Hat pushed left.
    Left,
    /// Hat pushed right.
    Right,
}

/// A physical joypad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoypadInput {
    /// A digital button by index.
    Button(u16),
    /// One half of an analog axis.
    Axis {
        /// Axis index.
        index: u16,
        /// True for the positive half.
        positive: bool,
    },
    /// A hat switch direction.
    Hat {
        /// Hat index.
        index: u16,
        /// Direction on the hat.
        direction: HatDirection,
    },
}

impl fmt::Display for JoypadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button(index) => write!(f, "{index}"),
            Self::Axis { index, positive } => {
                write!(f, "{}{index}", if *positive { '+' } else { '-' })
            }
            Self::Hat { index, direction } => write!(f, "Hat #{index} {direction:?}"),
        }
    }
}

/// What a single action is bound to on one port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBind {
    /// Keyboard key, if any.
    pub key: Option<Key>,
    /// Joypad input, if any.
    pub joypad: Option<JoypadInput>,
    /// Name the controller profile gives the joypad input.
    pub joypad_label: Option<String>,
}

impl InputBind {
    /// A keyboard-only bind.
    #[must_use]
    pub const fn keyboard(key: Key) -> Self {
        Self {
            key: Some(key),
            joypad: None,
            joypad_label: None,
        }
    }

    /// A joypad-only bind.
    #[must_use]
    pub const fn joypad(input: JoypadInput) -> Self {
        Self {
            key: None,
            joypad: Some(input),
            joypad_label: None,
        }
    }

    /// Adds a keyboard key.
    #[must_use]
    pub const fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Adds a profile label for the joypad input.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.joypad_label = Some(label.into());
        self
    }

    fn describe_joypad(&self) -> Option<String> {
        let input = self.joypad?;
        Some(match &self.joypad_label {
            Some(label) => label.clone(),
            None => input.to_string(),
        })
    }
}

/// Logical menu actions shown on the controls screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Move the selection up.
    Up,
    /// Move the selection down.
    Down,
    /// Confirm the selection.
    Accept,
    /// Go back one level.
    Back,
    /// Show information on the selection.
    Info,
    /// Start / context action.
    Start,
    /// Open or close the menu.
    ToggleMenu,
    /// Quit the application.
    Quit,
    /// Show or hide the on-screen keyboard.
    ToggleKeyboard,
    /// Search the current list.
    Search,
}

impl MenuAction {
    /// The controls screen order.
    pub const CONTROLS: [Self; 10] = [
        Self::Up,
        Self::Down,
        Self::Accept,
        Self::Back,
        Self::Info,
        Self::Start,
        Self::ToggleMenu,
        Self::Quit,
        Self::ToggleKeyboard,
        Self::Search,
    ];

    /// Returns the snake_case name used in configuration files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Accept => "accept",
            Self::Back => "back",
            Self::Info => "info",
            Self::Start => "start",
            Self::ToggleMenu => "toggle_menu",
            Self::Quit => "quit",
            Self::ToggleKeyboard => "toggle_keyboard",
            Self::Search => "search",
        }
    }

    /// Looks an action up by its configuration name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::CONTROLS.into_iter().find(|action| action.key() == key)
    }
}

/// Renders a readable description of a binding.
///
/// The joypad part comes from the explicit bind, or from the auto-assigned
/// bind with an `Auto: ` prefix. A bound keyboard key is appended as
/// `(Key: NAME)`. Unbound actions describe as an empty string.
#[must_use]
pub fn describe_binding(explicit: Option<&InputBind>, auto: Option<&InputBind>) -> String {
    let joypad = explicit
        .and_then(InputBind::describe_joypad)
        .or_else(|| {
            auto.and_then(InputBind::describe_joypad)
                .map(|name| format!("Auto: {name}"))
        });
    let key = explicit.and_then(|bind| bind.key);

    match (joypad, key) {
        (Some(joypad), Some(key)) => format!("{joypad} (Key: {key})"),
        (Some(joypad), None) => joypad,
        (None, Some(key)) => format!("(Key: {key})"),
        (None, None) => String::new(),
    }
}

/// Explicit and auto-assigned binds for one port.
#[derive(Debug, Clone, Default)]
struct PortBinds {
    explicit: HashMap<MenuAction, InputBind>,
    auto: HashMap<MenuAction, InputBind>,
}

/// Binding table for every input port.
#[derive(Debug, Clone)]
pub struct BindingTable {
    ports: Vec<PortBinds>,
}

impl BindingTable {
    /// Creates a table with `ports` empty ports.
    #[must_use]
    pub fn new(ports: usize) -> Self {
        Self {
            ports: vec![PortBinds::default(); ports],
        }
    }

    /// The stock keyboard layout on port 0.
    #[must_use]
    pub fn retro_defaults() -> Self {
        let mut table = Self::new(1);
        let defaults = [
            (MenuAction::Up, Key::Up),
            (MenuAction::Down, Key::Down),
            (MenuAction::Accept, Key::X),
            (MenuAction::Back, Key::Z),
            (MenuAction::Info, Key::RightShift),
            (MenuAction::Start, Key::Enter),
            (MenuAction::ToggleMenu, Key::F1),
            (MenuAction::Quit, Key::Escape),
            (MenuAction::ToggleKeyboard, Key::S),
            (MenuAction::Search, Key::A),
        ];
        for (action, key) in defaults {
            table.set_bind(0, action, InputBind::keyboard(key));
        }
        table
    }

    /// Returns the number of ports.
    #[must_use]
    pub fn ports(&self) -> usize {
        self.ports.len()
    }

    /// Sets the explicit bind for `action`. Out-of-range ports are ignored.
    pub fn set_bind(&mut self, port: usize, action: MenuAction, bind: InputBind) {
        if let Some(binds) = self.ports.get_mut(port) {
            binds.explicit.insert(action, bind);
        }
    }

    /// Sets the auto-assigned bind for `action` (from a controller profile).
    pub fn set_auto_bind(&mut self, port: usize, action: MenuAction, bind: InputBind) {
        if let Some(binds) = self.ports.get_mut(port) {
            binds.auto.insert(action, bind);
        }
    }

    /// Drops every auto-assigned bind on `port`, e.g. when a pad is unplugged.
    pub fn clear_auto_binds(&mut self, port: usize) {
        if let Some(binds) = self.ports.get_mut(port) {
            binds.auto.clear();
        }
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::retro_defaults()
    }
}

impl InputBindings for BindingTable {
    fn bind(&self, port: usize, action: MenuAction) -> Option<&InputBind> {
        self.ports.get(port)?.explicit.get(&action)
    }

    fn auto_bind(&self, port: usize, action: MenuAction) -> Option<&InputBind> {
        self.ports.get(port)?.auto.get(&action)
    }
}
