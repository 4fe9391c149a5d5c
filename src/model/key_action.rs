//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that key bindings map to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to KeyAction is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Select the previous record. Default: k/↑
    SelectPrev,
    /// Select the next record. Default: j/↓
    SelectNext,
    /// Move the selection up one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Move the selection down one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Select the first record. Default: g/Home
    SelectFirst,
    /// Select the last record. Default: G/End
    SelectLast,
    /// Expand or collapse the selected record. Default: Enter/Space
    ToggleExpand,
    /// Quit the application. Default: q
    Quit,
}
