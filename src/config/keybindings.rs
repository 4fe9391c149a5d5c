//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Vim-style keys and their arrow/page equivalents are bound by default.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let none = KeyModifiers::NONE;
        let entries = [
            // Vim-style selection
            (KeyCode::Char('j'), none, KeyAction::SelectNext),
            (KeyCode::Char('k'), none, KeyAction::SelectPrev),
            (KeyCode::Char('g'), none, KeyAction::SelectFirst),
            (KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::SelectLast),
            // Arrows
            (KeyCode::Down, none, KeyAction::SelectNext),
            (KeyCode::Up, none, KeyAction::SelectPrev),
            (KeyCode::Home, none, KeyAction::SelectFirst),
            (KeyCode::End, none, KeyAction::SelectLast),
            // Page navigation
            (KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown),
            (KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp),
            (KeyCode::PageDown, none, KeyAction::PageDown),
            (KeyCode::PageUp, none, KeyAction::PageUp),
            // Expand/collapse
            (KeyCode::Enter, none, KeyAction::ToggleExpand),
            (KeyCode::Char(' '), none, KeyAction::ToggleExpand),
            // Application
            (KeyCode::Char('q'), none, KeyAction::Quit),
        ];

        let bindings = entries
            .into_iter()
            .map(|(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();

        Self { bindings }
    }
}
