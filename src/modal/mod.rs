pub mod api;
pub mod contract;
pub mod dismissal;
pub mod focus_trap;
pub mod id;
pub mod manager;
pub mod pending;
pub mod scheduler;
pub mod scroll_lock;
pub mod view;

pub use api::{cancel_modal, close_modal, open_modal, open_modal_with_id};
pub use contract::{
    Body, CloseRequest, ContainerHandle, Dialog, DialogSemantics, Footer, Header, ModalContext, Node, Role,
    CLOSE_BUTTON_ID, TITLE_ID,
};
pub use dismissal::{DismissalController, PointerHit};
pub use focus_trap::{FocusHost, FocusTrap, TabDirection};
pub use id::{IdGenerator, ModalId};
pub use manager::{DialogSnapshot, ModalHandle, ModalManager};
pub use pending::PendingResult;
pub use scroll_lock::ScrollLock;
pub use view::{ModalComponent, ModalView, ViewEvent};
