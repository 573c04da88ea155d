//! Terminal UI components.
//!
//! - [`typeset`]: the markup typesetter and caret positioner
//! - [`view`]: lays out the editor, the debug view, and the status bars

mod status;
mod typeset;

pub use typeset::{Typeset, typeset};

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Model;

pub const EDITOR_TITLE: &str = " mathline ";

/// Render the complete UI.
pub fn view(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_active = model.active_toast().is_some();

    let mut constraints = vec![Constraint::Length(3)];
    if model.debug_visible {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    if toast_active {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));
    let chunks = Layout::vertical(constraints).split(area);

    render_editor(model, frame, chunks[0]);
    if model.debug_visible {
        render_debug_view(model, frame, chunks[1]);
    }
    let last = chunks.len() - 1;
    if toast_active {
        status::render_toast_bar(model, frame, chunks[last - 1]);
    }
    status::render_status_bar(model, frame, chunks[last]);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(EDITOR_TITLE);
    let inner = block.inner(area);
    let line = model
        .displayed
        .as_ref()
        .map(|typeset| typeset.line.clone())
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(line).block(block), area);

    // Caret positioner: place the terminal cursor where the marker was.
    if let Some(caret) = model.displayed.as_ref().and_then(|typeset| typeset.caret)
        && inner.width > 0
        && inner.height > 0
    {
        let column = caret.min(inner.width - 1);
        frame.set_cursor_position((inner.x + column, inner.y));
    }
}

fn render_debug_view(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" debug ")
        .border_style(Style::default().fg(Color::DarkGray));
    let debug = Paragraph::new(model.controller.debug_view())
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(debug, area);
}
