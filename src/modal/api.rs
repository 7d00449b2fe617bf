//! Free-function entry points mirroring the [`ModalManager`] methods

use super::id::ModalId;
use super::manager::ModalManager;
use super::pending::PendingResult;
use super::view::ModalComponent;

/// Open `V` with a generated id and return its pending result.
pub fn open_modal<V: ModalComponent>(manager: &ModalManager, props: V::Props) -> PendingResult<V::Output> {
    manager.open::<V>(props)
}

/// Open `V` under a caller-chosen id.
pub fn open_modal_with_id<V: ModalComponent>(
    manager: &ModalManager,
    props: V::Props,
    id: impl Into<ModalId>,
) -> PendingResult<V::Output> {
    manager.open_with_id::<V>(props, Some(id.into()))
}

/// Resolve `id` with `result`. The result is always required: pass `()` for
/// views without output, or use [`cancel_modal`] to resolve with `None`.
pub fn close_modal<T: 'static>(manager: &ModalManager, id: impl AsRef<str>, result: T) {
    manager.close(id, result);
}

pub fn cancel_modal(manager: &ModalManager, id: impl AsRef<str>, reason: Option<&str>) {
    manager.cancel(id, reason);
}
