//! Cancellation key and backdrop click handling for one dialog
//!
//! Both triggers lead to the same close request. Deactivation removes the
//! binding itself, so a controller that outlives its dialog has nothing left
//! to fire.

use crossterm::event::KeyCode;
use log::debug;
use ratatui::layout::{Position, Rect};

use super::contract::CloseRequest;

/// Where a pointer press landed relative to a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHit {
    /// Inside the dialog content
    Content,
    /// On the overlay around the content
    Backdrop,
    /// Outside the overlay entirely
    Outside,
}

impl PointerHit {
    pub fn classify(column: u16, row: u16, overlay: Rect, content: Rect) -> Self {
        let position = Position::new(column, row);
        if content.contains(position) {
            PointerHit::Content
        } else if overlay.contains(position) {
            PointerHit::Backdrop
        } else {
            PointerHit::Outside
        }
    }
}

struct Binding {
    cancel_key: KeyCode,
    close_on_backdrop: bool,
    on_request_close: CloseRequest,
}

#[derive(Default)]
pub struct DismissalController {
    binding: Option<Binding>,
}

impl DismissalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, cancel_key: KeyCode, close_on_backdrop: bool, on_request_close: CloseRequest) {
        self.binding = Some(Binding {
            cancel_key,
            close_on_backdrop,
            on_request_close,
        });
    }

    pub fn unbind(&mut self) {
        if self.binding.take().is_some() {
            debug!("Dismissal controller unbound");
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Close request to fire for `code`, if it is the cancellation key.
    ///
    /// The request is returned rather than fired so the caller can release
    /// any borrow of the registry first.
    pub fn on_key(&self, code: KeyCode) -> Option<CloseRequest> {
        let binding = self.binding.as_ref()?;
        (code == binding.cancel_key).then(|| binding.on_request_close.clone())
    }

    /// Close request to fire for a pointer press, if it landed on the backdrop.
    pub fn on_pointer(&self, hit: PointerHit) -> Option<CloseRequest> {
        let binding = self.binding.as_ref()?;
        (hit == PointerHit::Backdrop && binding.close_on_backdrop)
            .then(|| binding.on_request_close.clone())
    }
}
