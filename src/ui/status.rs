use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let state = model.controller.state();
    let bindings = model
        .controller
        .keymap()
        .commands
        .iter()
        .map(|(code, template)| format!("{}:{}", key_label(*code), template.name()))
        .collect::<Vec<_>>()
        .join(" ");

    let pending = model.controller.pending_renders();
    let pending_indicator = if pending > 0 {
        format!(" [rendering {pending}]")
    } else {
        String::new()
    };

    let status = format!(
        " Len {}  Cursor {}{}  {}  F2:debug  Esc:quit",
        state.buffer().len(),
        state.cursor(),
        pending_indicator,
        bindings
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

/// `^R` for upper-case letter codes, the raw code otherwise.
fn key_label(code: u32) -> String {
    match char::from_u32(code) {
        Some(letter) if letter.is_ascii_uppercase() => format!("^{letter}"),
        _ => format!("#{code}"),
    }
}
