//! Awaitable modal dialogs for terminal UIs.
//!
//! Open a view as a modal from anywhere that holds a [`ModalManager`] and
//! `.await` its result: `Some(value)` when the view closes with a value,
//! `None` when it is cancelled or dismissed. The manager owns the dialog
//! lifecycle (focus trap, focus restore, scroll lock, Esc and backdrop
//! dismissal) and draws mounted dialogs with ratatui.

pub mod config;
pub mod document;
pub mod error;
pub mod modal;
pub mod render;
pub mod theme;

pub use config::{ModalConfig, ModalConfigBuilder};
pub use document::{ContainerId, Document, FocusId, FocusKey, Scope};
pub use error::ModalError;
pub use modal::{
    Body, Dialog, DialogSnapshot, Footer, Header, ModalComponent, ModalContext, ModalHandle, ModalId, ModalManager,
    ModalView, Node, PendingResult, Role, TabDirection, ViewEvent, cancel_modal, close_modal, open_modal,
    open_modal_with_id,
};
pub use render::DialogLayout;
pub use theme::{Theme, ThemeVariant};
