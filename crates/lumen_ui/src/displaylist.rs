//! Display-list requests and the navigation stack that receives them.

use tracing::{debug, warn};

use crate::services::DisplayListEnqueuer;

/// Label and category of the help screen.
pub const HELP_LABEL: &str = "help";

/// Number of navigation stacks the menu keeps.
pub const STACK_LEVELS: usize = 2;

/// What kind of screen a request builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayListKind {
    /// A dialog/help screen.
    Help,
}

/// A request to push a screen onto a navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayListRequest {
    /// Which navigation stack to push onto (0 is the base stack).
    pub stack_level: usize,
    /// Screen label.
    pub label: String,
    /// Screen kind.
    pub kind: DisplayListKind,
}

impl DisplayListRequest {
    /// The help screen on the base stack.
    #[must_use]
    pub fn help() -> Self {
        Self {
            stack_level: 0,
            label: HELP_LABEL.to_owned(),
            kind: DisplayListKind::Help,
        }
    }
}

/// The menu's navigation stacks.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    levels: Vec<Vec<DisplayListRequest>>,
}

impl NavigationStack {
    /// Creates [`STACK_LEVELS`] empty stacks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: vec![Vec::new(); STACK_LEVELS],
        }
    }

    /// Returns the number of screens on `level`.
    #[must_use]
    pub fn depth(&self, level: usize) -> usize {
        self.levels.get(level).map_or(0, Vec::len)
    }

    /// Returns the top screen on `level`.
    #[must_use]
    pub fn top(&self, level: usize) -> Option<&DisplayListRequest> {
        self.levels.get(level)?.last()
    }

    /// Returns true if the top of `level` is a screen of `kind`.
    #[must_use]
    pub fn is_showing(&self, level: usize, kind: DisplayListKind) -> bool {
        self.top(level).is_some_and(|screen| screen.kind == kind)
    }

    /// Pops the top screen off `level`.
    pub fn pop(&mut self, level: usize) -> Option<DisplayListRequest> {
        let screen = self.levels.get_mut(level)?.pop()?;
        debug!(level, label = %screen.label, "screen popped");
        Some(screen)
    }

    /// Empties every stack.
    pub fn clear(&mut self) {
        for level in &mut self.levels {
            level.clear();
        }
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayListEnqueuer for NavigationStack {
    fn enqueue(&mut self, request: DisplayListRequest) {
        let level = request.stack_level;
        let Some(stack) = self.levels.get_mut(level) else {
            warn!(level, label = %request.label, "no such navigation stack, request dropped");
            return;
        };
        debug!(level, label = %request.label, "screen pushed");
        stack.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut nav = NavigationStack::new();
        nav.enqueue(DisplayListRequest::help());

        assert_eq!(nav.depth(0), 1);
        assert!(nav.is_showing(0, DisplayListKind::Help));
        assert_eq!(nav.top(0).unwrap().label, HELP_LABEL);

        assert!(nav.pop(0).is_some());
        assert!(nav.pop(0).is_none());
        assert!(!nav.is_showing(0, DisplayListKind::Help));
    }

    #[test]
    fn test_unknown_level_dropped() {
        let mut nav = NavigationStack::new();
        let mut request = DisplayListRequest::help();
        request.stack_level = STACK_LEVELS;
        nav.enqueue(request);

        assert_eq!(nav.depth(0), 0);
        assert_eq!(nav.depth(STACK_LEVELS), 0);
    }

    #[test]
    fn test_clear() {
        let mut nav = NavigationStack::new();
        nav.enqueue(DisplayListRequest::help());
        nav.enqueue(DisplayListRequest::help());
        nav.clear();
        assert_eq!(nav.depth(0), 0);
    }
}
