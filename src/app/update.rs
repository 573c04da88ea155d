use tracing::{debug, warn};

use crate::app::{Model, ToastLevel};
use crate::controller::Dispatch;
use crate::ui::Typeset;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Raw input from the capture layer: a key code on key-down, or typed
    /// characters with no code.
    Key {
        code: Option<u32>,
        chars: Option<String>,
    },
    /// The typesetter finished a render request.
    RenderComplete(Typeset),
    /// Show or hide the `|` debug view
    ToggleDebugView,
    /// Terminal resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Editing goes through the controller; render requests it issues are
/// parked in the outbox for the event loop to typeset.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Key { code, chars } => {
            match model.controller.handle_key(code, chars.as_deref()) {
                Dispatch::Render(request) => model.outbox.push(request),
                Dispatch::Unrecognized(code) => {
                    model.show_toast(ToastLevel::Warning, format!("Unrecognized key code {code}"));
                }
                Dispatch::Idle => {}
            }
        }
        Message::RenderComplete(typeset) => {
            let id = typeset.id;
            match model.controller.complete_render(id) {
                Ok(ready) => {
                    model.finished.insert(id, typeset);
                    for request in ready {
                        if let Some(done) = model.finished.remove(&request.id) {
                            debug!(id = %done.id, caret = ?done.caret, "render delivered");
                            model.displayed = Some(done);
                        }
                    }
                }
                Err(err) => warn!(%err, "dropping render completion"),
            }
        }
        Message::ToggleDebugView => {
            model.debug_visible = !model.debug_visible;
            let state = if model.debug_visible { "shown" } else { "hidden" };
            model.show_toast(ToastLevel::Info, format!("Debug view {state}"));
        }
        Message::Resize(width, height) => {
            model.size = (width, height);
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
