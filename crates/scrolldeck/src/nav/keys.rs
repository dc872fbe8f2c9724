/// Key input model for the navigation layer, decoupled from the windowing
/// toolkit so the router and the modal state machines can be driven headless.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Home,
    End,
    Backspace,
    /// A digit key, 0-9.
    Digit(u8),
    /// A plain letter key, lowercase.
    Letter(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Cmd on macOS, Ctrl elsewhere.
    pub command: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            mods: Modifiers::default(),
        }
    }

    pub fn command(key: Key) -> Self {
        Self {
            key,
            mods: Modifiers {
                command: true,
                shift: false,
            },
        }
    }

    pub fn command_shift(key: Key) -> Self {
        Self {
            key,
            mods: Modifiers {
                command: true,
                shift: true,
            },
        }
    }
}

/// What a global shortcut resolved to on the base page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterAction {
    OpenPalette,
    OpenSlideshow,
    NextSection,
    PrevSection,
    JumpToSection(usize),
    ToggleHints,
    Quit,
}

/// Global shortcut dispatch for the base page. Checked in priority order;
/// the first match wins. Modal-owned input never reaches this function:
/// the controller dispatches to the open overlay first.
///
/// `typing` is true when a text input has focus; all shortcuts are inert
/// then so native editing proceeds.
pub fn route(press: KeyPress, section_count: usize, typing: bool) -> Option<RouterAction> {
    if typing {
        return None;
    }

    if press.mods.command {
        return match (press.key, press.mods.shift) {
            (Key::Letter('k'), false) => Some(RouterAction::OpenPalette),
            (Key::Letter('p'), true) => Some(RouterAction::OpenSlideshow),
            _ => None,
        };
    }

    match press.key {
        Key::ArrowDown | Key::ArrowRight | Key::Space => Some(RouterAction::NextSection),
        Key::ArrowUp | Key::ArrowLeft => Some(RouterAction::PrevSection),
        Key::Digit(d) if (d as usize) < section_count => {
            Some(RouterAction::JumpToSection(d as usize))
        }
        Key::Letter('h') => Some(RouterAction::ToggleHints),
        Key::Letter('q') => Some(RouterAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_k_opens_palette() {
        let action = route(KeyPress::command(Key::Letter('k')), 6, false);
        assert_eq!(action, Some(RouterAction::OpenPalette));
    }

    #[test]
    fn test_command_shift_p_opens_slideshow() {
        let action = route(KeyPress::command_shift(Key::Letter('p')), 6, false);
        assert_eq!(action, Some(RouterAction::OpenSlideshow));
    }

    #[test]
    fn test_command_p_without_shift_is_inert() {
        assert_eq!(route(KeyPress::command(Key::Letter('p')), 6, false), None);
    }

    #[test]
    fn test_arrows_and_space_navigate() {
        assert_eq!(
            route(KeyPress::plain(Key::ArrowDown), 6, false),
            Some(RouterAction::NextSection)
        );
        assert_eq!(
            route(KeyPress::plain(Key::ArrowRight), 6, false),
            Some(RouterAction::NextSection)
        );
        assert_eq!(
            route(KeyPress::plain(Key::Space), 6, false),
            Some(RouterAction::NextSection)
        );
        assert_eq!(
            route(KeyPress::plain(Key::ArrowUp), 6, false),
            Some(RouterAction::PrevSection)
        );
        assert_eq!(
            route(KeyPress::plain(Key::ArrowLeft), 6, false),
            Some(RouterAction::PrevSection)
        );
    }

    #[test]
    fn test_digit_jump_respects_section_count() {
        assert_eq!(
            route(KeyPress::plain(Key::Digit(2)), 6, false),
            Some(RouterAction::JumpToSection(2))
        );
        assert_eq!(route(KeyPress::plain(Key::Digit(6)), 6, false), None);
        assert_eq!(route(KeyPress::plain(Key::Digit(9)), 3, false), None);
    }

    #[test]
    fn test_typing_suppresses_all_shortcuts() {
        assert_eq!(route(KeyPress::command(Key::Letter('k')), 6, true), None);
        assert_eq!(route(KeyPress::plain(Key::ArrowDown), 6, true), None);
        assert_eq!(route(KeyPress::plain(Key::Digit(1)), 6, true), None);
    }
}
