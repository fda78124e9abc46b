//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for the continue/restart shortcuts
/// - macOS: SUPER (Cmd key), Ctrl also accepted
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Continue shortcut display for help text
/// Ctrl+S works on all platforms
pub const CONTINUE_SHORTCUT: &str = "Ctrl+S";

/// Restart shortcut display
/// - macOS: "Cmd+R"
/// - Linux/Windows: "Ctrl+R"
#[cfg(target_os = "macos")]
pub const RESTART_SHORTCUT: &str = "Cmd+R";

#[cfg(not(target_os = "macos"))]
pub const RESTART_SHORTCUT: &str = "Ctrl+R";

/// True if the event carries Ctrl or the platform shortcut modifier
pub fn has_shortcut_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | SHORTCUT_MODIFIER)
}
