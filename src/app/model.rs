use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::controller::EditorController;
use crate::render::{RenderId, RenderRequest};
use crate::ui::Typeset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// The editing state itself lives in the controller; everything else here
/// is presentation.
#[derive(Debug)]
pub struct Model {
    pub controller: EditorController,
    /// Render requests not yet handed to the typesetter.
    pub outbox: Vec<RenderRequest>,
    /// Typeset output waiting for earlier renders to complete.
    pub(super) finished: BTreeMap<RenderId, Typeset>,
    /// The render currently on screen.
    pub displayed: Option<Typeset>,
    pub debug_visible: bool,
    pub should_quit: bool,
    pub size: (u16, u16),
    toast: Option<Toast>,
}

impl Model {
    pub fn new(controller: EditorController, size: (u16, u16)) -> Self {
        Self {
            controller,
            outbox: Vec::new(),
            finished: BTreeMap::new(),
            displayed: None,
            debug_visible: false,
            should_quit: false,
            size,
            toast: None,
        }
    }

    #[must_use]
    pub const fn with_debug_visible(mut self, visible: bool) -> Self {
        self.debug_visible = visible;
        self
    }

    /// Queue a render of the current state, e.g. for the first frame.
    pub fn request_render(&mut self) {
        let request = self.controller.request_render();
        self.outbox.push(request);
    }

    /// Take the requests the typesetter has not seen yet.
    pub fn take_outbox(&mut self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(EditorController::default(), (80, 24))
    }
}
