//! Key binding registry for navigation actions.
//!
//! [`NavBindingRegistry`] maps key+modifier combinations to [`NavAction`]s.
//! The `with_defaults()` constructor installs the standard card-navigation
//! bindings (arrows, paging, Home/End, Enter, Escape).

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// NavAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Move focus by `(row_delta, col_delta)` in grid terms.
    MoveFocus { row_delta: i64, col_delta: i64 },
    /// Move focus forward by one viewport worth of cards.
    PageForward,
    /// Move focus backward by one viewport worth of cards.
    PageBackward,
    /// Jump focus to the first card.
    Home,
    /// Jump focus to the last card.
    End,
    /// Open the document behind the focused card.
    OpenFocused,
    /// Release keyboard focus.
    Blur,
}

// ---------------------------------------------------------------------------
// NavBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> NavAction.
#[derive(Debug)]
pub struct NavBindingRegistry {
    bindings: HashMap<(Key, Modifiers), NavAction>,
}

impl NavBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with the standard card-navigation bindings.
    ///
    /// Defaults:
    /// - Arrow keys -> directional focus moves
    /// - `PageDown` / `PageUp` -> page moves
    /// - `Home` / `End` -> first / last card
    /// - `Enter` -> open the focused card's document
    /// - `Escape` -> release focus
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Up, Modifiers::NONE, NavAction::MoveFocus { row_delta: -1, col_delta: 0 });
        registry.bind(Key::Down, Modifiers::NONE, NavAction::MoveFocus { row_delta: 1, col_delta: 0 });
        registry.bind(Key::Left, Modifiers::NONE, NavAction::MoveFocus { row_delta: 0, col_delta: -1 });
        registry.bind(Key::Right, Modifiers::NONE, NavAction::MoveFocus { row_delta: 0, col_delta: 1 });
        registry.bind(Key::PageDown, Modifiers::NONE, NavAction::PageForward);
        registry.bind(Key::PageUp, Modifiers::NONE, NavAction::PageBackward);
        registry.bind(Key::Home, Modifiers::NONE, NavAction::Home);
        registry.bind(Key::End, Modifiers::NONE, NavAction::End);
        registry.bind(Key::Enter, Modifiers::NONE, NavAction::OpenFocused);
        registry.bind(Key::Escape, Modifiers::NONE, NavAction::Blur);
        registry
    }

    /// Register a key binding.
    ///
    /// If a binding already exists for this key+modifier combination, it is
    /// replaced.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: NavAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding. Returns the removed action, if any.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<NavAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a given key event.
    pub fn resolve(&self, event: &KeyEvent) -> Option<NavAction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for NavBindingRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_navigation_keys() {
        let registry = NavBindingRegistry::with_defaults();
        assert_eq!(registry.len(), 10);
        assert_eq!(
            registry.resolve(&KeyEvent::plain(Key::Down)),
            Some(NavAction::MoveFocus { row_delta: 1, col_delta: 0 })
        );
        assert_eq!(
            registry.resolve(&KeyEvent::plain(Key::Enter)),
            Some(NavAction::OpenFocused)
        );
        assert_eq!(registry.resolve(&KeyEvent::plain(Key::Escape)), Some(NavAction::Blur));
    }

    #[test]
    fn modifiers_distinguish_bindings() {
        let registry = NavBindingRegistry::with_defaults();
        assert_eq!(
            registry.resolve(&KeyEvent::new(Key::Down, Modifiers::CTRL)),
            None
        );
    }

    #[test]
    fn bind_replaces_and_unbind_removes() {
        let mut registry = NavBindingRegistry::new();
        registry.bind(Key::Char('g'), Modifiers::NONE, NavAction::Home);
        registry.bind(Key::Char('g'), Modifiers::NONE, NavAction::End);
        assert_eq!(registry.resolve(&KeyEvent::plain(Key::Char('g'))), Some(NavAction::End));
        assert_eq!(registry.unbind(Key::Char('g'), Modifiers::NONE), Some(NavAction::End));
        assert!(registry.is_empty());
    }
}
