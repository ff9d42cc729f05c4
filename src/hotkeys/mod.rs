//! Hotkey system
//!
//! Keyboard bindings for the annotation session.
//!
//! # Architecture
//!
//! - **Key**: A pressed key, independent of any windowing toolkit
//! - **HotkeyAction**: Semantic actions that hotkeys trigger
//! - **HotkeyContext**: Determines which hotkeys are active based on session state
//! - **handle_hotkey()**: Main dispatch function that maps key events to actions
//!
//! # Adding New Hotkeys
//!
//! 1. Add a variant to `HotkeyAction`
//! 2. Add the key binding in `handle_hotkey()`
//! 3. Handle the action in the annotate driver's `apply_action`

/// A pressed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Character(String),
    ArrowLeft,
    ArrowRight,
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    /// Parse a token such as `b`, `space`, `left`, `.` or `ctrl+s`.
    ///
    /// `None` for unknown modifiers and for names that are not a single
    /// character or a named key.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let mut parts: Vec<&str> = token.split('+').collect();
        // A bare "+" splits into two empty parts.
        let key_part = match parts.pop() {
            Some("") if token.ends_with('+') => "+",
            Some(part) => part,
            None => return None,
        };
        let mut press = KeyPress::plain(parse_key(key_part)?);
        for modifier in parts.iter().filter(|part| !part.is_empty()) {
            match modifier.to_ascii_lowercase().as_str() {
                "shift" => press.shift = true,
                "ctrl" | "control" => press.ctrl = true,
                "alt" | "option" => press.alt = true,
                "cmd" | "meta" | "super" => press.meta = true,
                _ => return None,
            }
        }
        Some(press)
    }
}

fn parse_key(name: &str) -> Option<Key> {
    match name.to_ascii_lowercase().as_str() {
        "space" => Some(Key::Character(" ".to_string())),
        "left" | "arrowleft" => Some(Key::ArrowLeft),
        "right" | "arrowright" => Some(Key::ArrowRight),
        _ if name.chars().count() == 1 => Some(Key::Character(name.to_string())),
        _ => None,
    }
}

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    // ═══════════════════════════════════════════════════════════════
    // Annotation
    // ═══════════════════════════════════════════════════════════════
    /// Record a mark at the current time
    MarkShot,
    /// Remove the most recently added mark
    UndoLastMark,
    StartCycle,
    EndCycle,
    /// Select the shooting category for new marks and cycles
    SelectShooting,
    /// Select the feeding category for new marks and cycles
    SelectFeeding,

    // ═══════════════════════════════════════════════════════════════
    // Playback
    // ═══════════════════════════════════════════════════════════════
    SeekBackward,
    SeekForward,
    StepBackward,
    StepForward,
    /// Toggle playback of the local media element.
    PlayPause,

    /// Open the save flow for the current session.
    SaveSession,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether an input field has focus (should suppress all hotkeys)
    pub input_focused: bool,
    /// Whether a video source is loaded; seek and step need one
    pub has_source: bool,
    /// Whether the local media element has focus; play/pause needs it
    pub video_focused: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (e.g., input field focused)
    Suppressed,
}

/// Maps a key event to an action, considering the current context.
///
/// Letter bindings are case-insensitive.
pub fn handle_hotkey(
    key: &Key,
    _shift: bool,
    ctrl: bool,
    _alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    // Suppress hotkeys when typing in an input field
    if context.input_focused {
        return HotkeyResult::Suppressed;
    }

    // ═══════════════════════════════════════════════════════════════
    // Global Hotkeys (work regardless of source)
    // ═══════════════════════════════════════════════════════════════
    if let Key::Character(c) = key {
        let lower = c.to_lowercase();
        if ctrl || meta {
            return match lower.as_str() {
                "s" => HotkeyResult::Action(HotkeyAction::SaveSession),
                _ => HotkeyResult::NoMatch,
            };
        }
        let action = match lower.as_str() {
            "u" => Some(HotkeyAction::UndoLastMark),
            "q" => Some(HotkeyAction::StartCycle),
            "e" => Some(HotkeyAction::EndCycle),
            "s" => Some(HotkeyAction::SelectShooting),
            "f" => Some(HotkeyAction::SelectFeeding),
            "b" => Some(HotkeyAction::MarkShot),
            _ => None,
        };
        if let Some(action) = action {
            return HotkeyResult::Action(action);
        }
    }

    // ═══════════════════════════════════════════════════════════════
    // Source-Specific Hotkeys
    // ═══════════════════════════════════════════════════════════════
    if !context.has_source {
        return HotkeyResult::NoMatch;
    }
    match key {
        Key::ArrowLeft => HotkeyResult::Action(HotkeyAction::SeekBackward),
        Key::ArrowRight => HotkeyResult::Action(HotkeyAction::SeekForward),
        Key::Character(c) if c == "," => HotkeyResult::Action(HotkeyAction::StepBackward),
        Key::Character(c) if c == "." => HotkeyResult::Action(HotkeyAction::StepForward),
        Key::Character(c) if c == " " && context.video_focused => {
            HotkeyResult::Action(HotkeyAction::PlayPause)
        }
        _ => HotkeyResult::NoMatch,
    }
}

/// [`handle_hotkey`] for a parsed [`KeyPress`].
pub fn handle_key_press(press: &KeyPress, context: &HotkeyContext) -> HotkeyResult {
    handle_hotkey(
        &press.key,
        press.shift,
        press.ctrl,
        press.alt,
        press.meta,
        context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> HotkeyContext {
        HotkeyContext {
            has_source: true,
            ..Default::default()
        }
    }

    fn press(key: &str, ctx: &HotkeyContext) -> HotkeyResult {
        handle_key_press(&KeyPress::parse(key).unwrap(), ctx)
    }

    #[test]
    fn test_b_marks_shot() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("b".to_string()), false, false, false, false, &ctx);
        assert!(matches!(result, HotkeyResult::Action(HotkeyAction::MarkShot)));
        let result = handle_hotkey(&Key::Character("B".to_string()), true, false, false, false, &ctx);
        assert!(matches!(result, HotkeyResult::Action(HotkeyAction::MarkShot)));
    }

    #[test]
    fn test_cycle_and_category_keys() {
        let ctx = HotkeyContext::default();
        assert_eq!(press("q", &ctx), HotkeyResult::Action(HotkeyAction::StartCycle));
        assert_eq!(press("e", &ctx), HotkeyResult::Action(HotkeyAction::EndCycle));
        assert_eq!(press("u", &ctx), HotkeyResult::Action(HotkeyAction::UndoLastMark));
        assert_eq!(press("s", &ctx), HotkeyResult::Action(HotkeyAction::SelectShooting));
        assert_eq!(press("f", &ctx), HotkeyResult::Action(HotkeyAction::SelectFeeding));
    }

    #[test]
    fn test_ctrl_s_saves_session() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("s".to_string()), false, true, false, false, &ctx);
        assert!(matches!(result, HotkeyResult::Action(HotkeyAction::SaveSession)));
        assert_eq!(press("cmd+S", &ctx), HotkeyResult::Action(HotkeyAction::SaveSession));
        assert_eq!(press("ctrl+b", &ctx), HotkeyResult::NoMatch);
    }

    #[test]
    fn test_seek_requires_source() {
        let ctx = HotkeyContext::default();
        assert_eq!(press("left", &ctx), HotkeyResult::NoMatch);
        assert_eq!(press(".", &ctx), HotkeyResult::NoMatch);

        let ctx = loaded();
        assert_eq!(press("left", &ctx), HotkeyResult::Action(HotkeyAction::SeekBackward));
        assert_eq!(press("right", &ctx), HotkeyResult::Action(HotkeyAction::SeekForward));
        assert_eq!(press(",", &ctx), HotkeyResult::Action(HotkeyAction::StepBackward));
        assert_eq!(press(".", &ctx), HotkeyResult::Action(HotkeyAction::StepForward));
    }

    #[test]
    fn test_space_needs_focused_video() {
        assert_eq!(press("space", &loaded()), HotkeyResult::NoMatch);
        let ctx = HotkeyContext {
            video_focused: true,
            ..loaded()
        };
        assert_eq!(press("space", &ctx), HotkeyResult::Action(HotkeyAction::PlayPause));
    }

    #[test]
    fn test_suppressed_when_input_focused() {
        let ctx = HotkeyContext {
            input_focused: true,
            ..loaded()
        };
        let result = handle_hotkey(&Key::Character("b".to_string()), false, false, false, false, &ctx);
        assert!(matches!(result, HotkeyResult::Suppressed));
    }

    #[test]
    fn test_parse_key_press() {
        let parsed = KeyPress::parse("Ctrl+Shift+s").unwrap();
        assert!(parsed.ctrl && parsed.shift && !parsed.meta);
        assert_eq!(parsed.key, Key::Character("s".to_string()));
        assert_eq!(KeyPress::parse("+").unwrap().key, Key::Character("+".to_string()));
        assert_eq!(KeyPress::parse("Right").unwrap().key, Key::ArrowRight);
        assert!(KeyPress::parse("hyper+b").is_none());
        assert!(KeyPress::parse("  ").is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_key_names() {
        assert!(KeyPress::parse("sav").is_none());
        assert!(KeyPress::parse("dance now").is_none());
        assert!(KeyPress::parse("ctrl+home").is_none());
        assert!(KeyPress::parse("ctrl+s").is_some());
    }
}
