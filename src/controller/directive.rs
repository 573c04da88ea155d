use std::collections::BTreeMap;

use crate::editor::CommandTemplate;

/// DOM key code for the left arrow.
pub const KEY_LEFT: u32 = 37;
/// DOM key code for the right arrow.
pub const KEY_RIGHT: u32 = 39;
/// DOM key code for backspace.
pub const KEY_BACKSPACE: u32 = 8;

/// Which raw key codes mean what.
///
/// Codes are whatever the input capture layer emits; the defaults follow
/// browser `keyCode` values. `commands` binds extra codes to command
/// templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    pub left: u32,
    pub right: u32,
    pub backspace: u32,
    pub commands: BTreeMap<u32, CommandTemplate>,
}

impl KeyMap {
    /// Bind `code` to a template, replacing any existing binding.
    pub fn bind(&mut self, code: u32, template: CommandTemplate) {
        self.commands.insert(code, template);
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut commands = BTreeMap::new();
        // Ctrl+R and Ctrl+F arrive as the letters' key codes.
        if let Ok(sqrt) = CommandTemplate::new("\\sqrt", 1) {
            commands.insert(u32::from(b'R'), sqrt);
        }
        if let Ok(frac) = CommandTemplate::new("\\frac", 2) {
            commands.insert(u32::from(b'F'), frac);
        }
        Self {
            left: KEY_LEFT,
            right: KEY_RIGHT,
            backspace: KEY_BACKSPACE,
            commands,
        }
    }
}

/// One recognized unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    MoveLeft,
    MoveRight,
    Erase,
    /// Literal text; each character is inserted in turn.
    InsertChar(String),
    InsertCommand(CommandTemplate),
    Unrecognized(u32),
}

impl Directive {
    /// Translate a raw `(key code, characters)` pair.
    ///
    /// A key code wins over characters. Returns `None` when neither carries
    /// anything.
    pub fn translate(key_code: Option<u32>, chars: Option<&str>, keymap: &KeyMap) -> Option<Self> {
        if let Some(code) = key_code {
            let directive = if code == keymap.left {
                Self::MoveLeft
            } else if code == keymap.right {
                Self::MoveRight
            } else if code == keymap.backspace {
                Self::Erase
            } else if let Some(template) = keymap.commands.get(&code) {
                Self::InsertCommand(template.clone())
            } else {
                Self::Unrecognized(code)
            };
            return Some(directive);
        }

        chars
            .filter(|text| !text.is_empty())
            .map(|text| Self::InsertChar(text.to_string()))
    }
}
