use std::time::Duration;

use crate::foundation::core::Point;
use crate::schedule::hover::HoverTarget;

/// Interactive surface a pointer gesture starts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Drawing overlay on top of the video.
    Canvas,
    /// Playback progress bar.
    ProgressBar,
}

/// Key identity, reduced to what the review surface binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Space bar.
    Space,
    /// A printable character.
    Char(char),
    /// Anything else.
    Other,
}

/// A key press with its modifier state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyPress {
    /// Pressed key.
    pub key: Key,
    /// Ctrl held.
    #[serde(default)]
    pub ctrl: bool,
    /// Cmd/Meta held.
    #[serde(default)]
    pub meta: bool,
    /// Focus is inside a text field.
    #[serde(default)]
    pub in_text_field: bool,
}

impl KeyPress {
    /// Plain press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            in_text_field: false,
        }
    }
}

/// Global shortcut resolved from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Space.
    TogglePlay,
    /// `d`.
    ToggleTool,
    /// Ctrl/Cmd+Z.
    Undo,
}

/// Resolve `press` to a shortcut. Presses inside a text field never trigger one.
pub fn shortcut_for(press: &KeyPress) -> Option<Shortcut> {
    if press.in_text_field {
        return None;
    }
    let modified = press.ctrl || press.meta;
    match press.key {
        Key::Space if !modified => Some(Shortcut::TogglePlay),
        Key::Char('d' | 'D') if !modified => Some(Shortcut::ToggleTool),
        Key::Char('z' | 'Z') if modified => Some(Shortcut::Undo),
        _ => None,
    }
}

/// Host input fed to [`crate::ReviewSession::handle`].
///
/// Pointer positions are in display coordinates; the session maps canvas positions into
/// logical coordinates itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over a surface.
    PointerDown {
        /// Surface under the pointer.
        surface: Surface,
        /// Pointer position.
        position: Point,
    },
    /// Pointer moved.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// Primary button released.
    PointerUp,
    /// Pointer left a surface.
    PointerLeave {
        /// Surface that was left.
        surface: Surface,
    },
    /// Key pressed.
    Key(KeyPress),
    /// Pointer entered a hover-revealed element.
    HoverEnter(HoverTarget),
    /// Pointer left a hover-revealed element.
    HoverLeave {
        /// Element that was left.
        target: HoverTarget,
        /// Monotonic host clock.
        now: Duration,
    },
    /// A hover-revealed element was torn down; its scheduled hide is dropped.
    HoverDismiss(HoverTarget),
    /// Clock advanced; fires due auto-hide tasks.
    Tick {
        /// Monotonic host clock.
        now: Duration,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/session/input.rs"]
mod tests;
