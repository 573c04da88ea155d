use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, Model, update};
use crate::controller::EditorController;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, mathline requires an interactive terminal")?;
        let size = terminal.size()?;
        execute!(stdout(), EnableBracketedPaste)?;

        let controller = EditorController::new(self.keymap.clone(), self.marker.clone());
        let mut model =
            Model::new(controller, (size.width, size.height)).with_debug_visible(self.debug_view);
        model.request_render();
        info!(
            width = size.width,
            height = size.height,
            marker = %self.marker,
            "editor started"
        );

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();

        result
    }

    /// Hand every outstanding render request to the typesetter and feed the
    /// results back as completions. Returns whether anything was typeset.
    pub(super) fn flush_renders(model: &mut Model) -> bool {
        let requests = model.take_outbox();
        if requests.is_empty() {
            return false;
        }
        for request in requests {
            let typeset = crate::ui::typeset(&request, model.controller.marker());
            *model = update(std::mem::take(model), Message::RenderComplete(typeset));
        }
        true
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }
            if Self::flush_renders(model) {
                needs_render = true;
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::view(model, frame))?;
                debug!(
                    frame = frame_idx,
                    draw_ms = draw_start.elapsed().as_secs_f64() * 1000.0,
                    "frame drawn"
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Some(msg) = Self::handle_event(&event::read()?) {
                    debug!(frame = frame_idx, ?msg, "event");
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single draw.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?) {
                        drained += 1;
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    debug!(frame = frame_idx, drained, "drained events");
                }
            }
        }
        info!(frames = frame_idx, "editor stopped");
        Ok(())
    }
}
