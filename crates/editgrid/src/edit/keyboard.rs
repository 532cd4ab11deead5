//! Keyboard input relevant to inline editing.

/// Keys the edit controller reacts to.
///
/// Everything else is reported as [`Key::Other`] and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Main Enter/Return key.
    Enter,
    /// Enter key on the numeric keypad.
    NumpadEnter,
    /// Escape key.
    Escape,
    /// Any other key.
    Other,
}

/// Where a key press came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyOrigin {
    /// An editor or cell belonging to this grid.
    #[default]
    Grid,
    /// An input nested inside an unrelated grid (for example a detail grid
    /// rendered within a row). Such presses never commit this grid's row.
    ForeignGrid,
}

/// A key press delivered to the grid while it has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key that was pressed.
    pub key: Key,
    /// Where the press originated.
    pub origin: KeyOrigin,
}

impl KeyPress {
    /// A key press originating in this grid.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            origin: KeyOrigin::Grid,
        }
    }

    /// Sets the origin using builder pattern.
    pub fn with_origin(mut self, origin: KeyOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Returns `true` if this press should commit the row being edited.
    pub fn is_commit(&self) -> bool {
        matches!(self.key, Key::Enter | Key::NumpadEnter) && self.origin == KeyOrigin::Grid
    }

    /// Returns `true` if this press should cancel the row being edited.
    pub fn is_cancel(&self) -> bool {
        self.key == Key::Escape && self.origin == KeyOrigin::Grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_keys() {
        assert!(KeyPress::new(Key::Enter).is_commit());
        assert!(KeyPress::new(Key::NumpadEnter).is_commit());
        assert!(!KeyPress::new(Key::Escape).is_commit());
        assert!(!KeyPress::new(Key::Other).is_commit());
    }

    #[test]
    fn test_foreign_origin_never_commits() {
        let press = KeyPress::new(Key::Enter).with_origin(KeyOrigin::ForeignGrid);
        assert!(!press.is_commit());
        assert!(!KeyPress::new(Key::Escape).with_origin(KeyOrigin::ForeignGrid).is_cancel());
    }
}
