//! A terminal stand-in for the math typesetter.
//!
//! Markup is shown as source with light styling: command names, block
//! braces, and plain text get distinct styles. The cursor marker is cut
//! out and its display column recorded for the caret positioner.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::render::{RenderId, RenderRequest};

/// Typeset output for one render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typeset {
    pub id: RenderId,
    pub line: Line<'static>,
    /// Display column where the marker was, if it was found.
    pub caret: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Command,
    Brace,
    Text,
}

impl Token {
    fn style(self) -> Style {
        match self {
            Self::Command => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Self::Brace => Style::default().fg(Color::DarkGray),
            Self::Text => Style::default(),
        }
    }
}

/// Typeset `request`, cutting `marker` out at the request's marker offset.
///
/// Copies of the marker elsewhere in the markup are ordinary text.
pub fn typeset(request: &RenderRequest, marker: &str) -> Typeset {
    let markup = request.markup.as_str();
    let (before, after) = match marker_byte(request, marker) {
        Some(at) => (&markup[..at], Some(&markup[at + marker.len()..])),
        None => (markup, None),
    };

    let mut spans = tokenize(before);
    let caret = after.map(|_| u16::try_from(before.width()).unwrap_or(u16::MAX));
    if let Some(after) = after {
        spans.extend(tokenize(after));
    }

    Typeset {
        id: request.id,
        line: Line::from(spans),
        caret,
    }
}

/// Byte index of the marker, if it really sits at `marker_at`.
fn marker_byte(request: &RenderRequest, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    let markup = request.markup.as_str();
    let at = request.marker_at?;
    let byte = markup
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(markup.len()))
        .nth(at)?;
    markup[byte..].starts_with(marker).then_some(byte)
}

fn tokenize(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut kind = Token::Text;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                flush(&mut current, kind, &mut spans);
                kind = Token::Command;
                current.push(ch);
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_alphabetic() {
                        break;
                    }
                    current.push(next);
                    chars.next();
                }
                flush(&mut current, kind, &mut spans);
                kind = Token::Text;
            }
            '{' | '}' => {
                flush(&mut current, kind, &mut spans);
                spans.push(Span::styled(ch.to_string(), Token::Brace.style()));
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, kind, &mut spans);
    spans
}

fn flush(current: &mut String, kind: Token, spans: &mut Vec<Span<'static>>) {
    if !current.is_empty() {
        spans.push(Span::styled(std::mem::take(current), kind.style()));
    }
}
