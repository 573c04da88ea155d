//! Input capture: crossterm events to raw `(key code, characters)` pairs.
//!
//! Non-character keys are reported by their browser `keyCode`, which is
//! what the default [`KeyMap`](crate::controller::KeyMap) expects. Plain
//! characters carry no code. Ctrl+letter reports the letter's upper-case
//! code with no characters, which is how command bindings are reached.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message};

impl App {
    pub(super) fn handle_event(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Paste(text) => Some(Message::Key {
                code: None,
                chars: Some(text.clone()),
            }),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Some(Message::Quit),
            KeyCode::Char('c') if ctrl => return Some(Message::Quit),
            KeyCode::F(2) => return Some(Message::ToggleDebugView),
            _ => {}
        }

        let (code, chars) = raw_key(key)?;
        Some(Message::Key { code, chars })
    }
}

/// The `(key code, characters)` pair for a key press, if it has one.
pub(super) fn raw_key(key: KeyEvent) -> Option<(Option<u32>, Option<String>)> {
    let ctrl_or_alt = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char(c) if ctrl_or_alt => {
            c.is_ascii_alphabetic()
                .then(|| (Some(u32::from(c.to_ascii_uppercase())), None))
        }
        KeyCode::Char(c) => Some((None, Some(c.to_string()))),
        other => dom_key_code(other).map(|code| (Some(code), None)),
    }
}

/// Browser `keyCode` for a non-character key.
pub(super) fn dom_key_code(code: KeyCode) -> Option<u32> {
    let code = match code {
        KeyCode::Backspace => 8,
        KeyCode::Tab | KeyCode::BackTab => 9,
        KeyCode::Enter => 13,
        KeyCode::PageUp => 33,
        KeyCode::PageDown => 34,
        KeyCode::End => 35,
        KeyCode::Home => 36,
        KeyCode::Left => 37,
        KeyCode::Up => 38,
        KeyCode::Right => 39,
        KeyCode::Down => 40,
        KeyCode::Insert => 45,
        KeyCode::Delete => 46,
        KeyCode::F(n) if (1..=24).contains(&n) => 111 + u32::from(n),
        _ => return None,
    };
    Some(code)
}
