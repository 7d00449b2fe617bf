use anyhow::Result;
use crossterm::event::KeyCode;

use crate::document::FocusId;
use crate::error::ModalError;

use super::contract::{Dialog, ModalContext};
use super::manager::ModalHandle;

/// Input routed to a mounted view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A button was activated (Enter, Space or click)
    Press(FocusId),
    /// Any other key, with the focused element inside the dialog if there is one
    Key { target: Option<FocusId>, code: KeyCode },
}

/// A view that can be hosted in a modal.
///
/// The manager treats the view tree as opaque: it only asks for the current
/// dialog and forwards input. `render` must not call back into the manager.
pub trait ModalView: 'static {
    /// Build the dialog for the current state.
    fn render(&self, ctx: &ModalContext) -> Result<Dialog, ModalError>;

    /// React to input. Errors propagate to whoever dispatched the event.
    fn handle_event(&mut self, event: ViewEvent, ctx: &ModalContext) -> Result<()>;
}

/// A view that can be opened by type through the manager
pub trait ModalComponent: ModalView + Sized {
    type Props;
    type Output: 'static;

    /// Build the view from the opener's props and the injected instance handle.
    fn create(props: Self::Props, modal: ModalHandle<Self::Output>) -> Self;
}
