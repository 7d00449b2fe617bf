//! Error types for the modal layer

use thiserror::Error;

use crate::modal::ModalId;

/// Errors raised by the modal manager and the view contract.
///
/// None of these describe user behaviour: cancelling a dialog is a regular
/// `None` result, and closing an unknown id is a silent no-op. What remains are
/// programmer errors that should surface during development.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// A view contract slot was built from a context that is not bound to an
    /// open modal instance.
    #[error("{slot} can only be used inside an open modal; build it from the ModalContext handed to the view")]
    OutsideModal { slot: &'static str },

    /// A caller supplied an id that belongs to a modal that is still open.
    #[error("Modal id already in use: {0}")]
    DuplicateId(ModalId),

    /// `close` was called with a value of a different type than the one the
    /// opener is awaiting.
    #[error("Modal {id} expects a result of type {expected}")]
    ResultType { id: ModalId, expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_modal_message_names_slot() {
        let err = ModalError::OutsideModal { slot: "Modal header" };
        let message = err.to_string();
        assert!(message.starts_with("Modal header can only be used inside an open modal"));
    }

    #[test]
    fn test_duplicate_id_message() {
        let err = ModalError::DuplicateId(ModalId::from("abc"));
        assert_eq!(err.to_string(), "Modal id already in use: abc");
    }
}
