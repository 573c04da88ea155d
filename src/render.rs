//! The request/response boundary with the typesetting renderer.
//!
//! The controller never waits on the renderer. Each mutation issues a
//! [`RenderRequest`]; whoever typesets it later reports back with
//! [`RenderQueue::complete`]. Completions are handed on strictly in issue
//! order so the caret is never positioned against a stale render.

use std::collections::VecDeque;
use std::fmt;

use crate::error::RenderError;

/// Identifies one render request. Ids increase monotonically per queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderId(u64);

impl RenderId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Markup snapshot to typeset, with the cursor marker already spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub id: RenderId,
    pub markup: String,
    /// Char offset in `markup` where the marker was spliced.
    pub marker_at: Option<usize>,
}

#[derive(Debug)]
struct InFlight {
    request: RenderRequest,
    done: bool,
}

/// Render requests that have been issued but not yet delivered.
#[derive(Debug, Default)]
pub struct RenderQueue {
    next_id: u64,
    in_flight: VecDeque<InFlight>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for `markup`, whose marker (if any) starts at the
    /// char offset `marker_at`.
    pub fn issue(&mut self, markup: String, marker_at: Option<usize>) -> RenderRequest {
        let request = RenderRequest {
            id: RenderId(self.next_id),
            markup,
            marker_at,
        };
        self.next_id += 1;
        self.in_flight.push_back(InFlight {
            request: request.clone(),
            done: false,
        });
        request
    }

    /// Record that the renderer finished `id`.
    ///
    /// Returns the requests that are now deliverable, oldest first. This is
    /// empty while an earlier request is still outstanding.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownRequest`] if `id` is not in flight.
    pub fn complete(&mut self, id: RenderId) -> Result<Vec<RenderRequest>, RenderError> {
        let entry = self
            .in_flight
            .iter_mut()
            .find(|entry| entry.request.id == id && !entry.done)
            .ok_or(RenderError::UnknownRequest(id.0))?;
        entry.done = true;

        let mut ready = Vec::new();
        while self.in_flight.front().is_some_and(|entry| entry.done) {
            if let Some(entry) = self.in_flight.pop_front() {
                ready.push(entry.request);
            }
        }
        Ok(ready)
    }

    /// Number of requests not yet delivered.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }
}
