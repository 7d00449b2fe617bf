//! Structure every hosted view composes its dialog from
//!
//! A view receives one [`ModalContext`] per instance and threads it into the
//! [`Header`], [`Body`] and [`Footer`] slot constructors. Slots refuse to be
//! built from a context that is not bound to an open instance.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::document::{ContainerId, FocusId};
use crate::error::ModalError;

use super::ModalId;

/// Focus id of the header's dismiss button
pub const CLOSE_BUTTON_ID: FocusId = FocusId::new("modal-close");

/// Element id the dialog is labelled by
pub const TITLE_ID: &str = "modal-title";

/// Callback asking for the dialog to be closed
#[derive(Clone)]
pub struct CloseRequest(Rc<dyn Fn()>);

impl CloseRequest {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn fire(&self) {
        (self.0)()
    }
}

impl fmt::Debug for CloseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CloseRequest")
    }
}

/// The container a dialog is mounted in
#[derive(Debug, Clone)]
pub struct ContainerHandle {
    container: Option<ContainerId>,
    alive: Weak<()>,
}

impl ContainerHandle {
    pub(crate) fn new(container: ContainerId, alive: &Rc<()>) -> Self {
        Self {
            container: Some(container),
            alive: Rc::downgrade(alive),
        }
    }

    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }

    /// Whether the container is still mounted
    pub fn is_attached(&self) -> bool {
        self.alive.upgrade().is_some()
    }
}

/// Per-instance capabilities shared by all slots of a dialog
#[derive(Debug, Clone)]
pub struct ModalContext {
    modal_id: Option<ModalId>,
    on_request_close: CloseRequest,
    container: ContainerHandle,
    close_label: String,
}

impl ModalContext {
    pub(crate) fn new(
        modal_id: ModalId,
        on_request_close: CloseRequest,
        container: ContainerHandle,
        close_label: String,
    ) -> Self {
        Self {
            modal_id: Some(modal_id),
            on_request_close,
            container,
            close_label,
        }
    }

    /// A context that belongs to no modal. Every slot built from it fails.
    pub fn detached() -> Self {
        Self {
            modal_id: None,
            on_request_close: CloseRequest::noop(),
            container: ContainerHandle {
                container: None,
                alive: Weak::new(),
            },
            close_label: String::new(),
        }
    }

    pub fn modal_id(&self) -> Option<&ModalId> {
        self.modal_id.as_ref()
    }

    pub fn container(&self) -> &ContainerHandle {
        &self.container
    }

    pub fn is_active(&self) -> bool {
        self.modal_id.is_some() && self.container.is_attached()
    }

    pub fn request_close(&self) {
        self.on_request_close.fire();
    }

    pub fn on_request_close(&self) -> &CloseRequest {
        &self.on_request_close
    }

    fn require(&self, slot: &'static str) -> Result<(), ModalError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ModalError::OutsideModal { slot })
        }
    }
}

/// Content nodes a view places into its body and footer
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    /// Error summary announced to the user
    Alert { title: String, messages: Vec<String> },
    Button {
        id: FocusId,
        label: String,
        disabled: bool,
    },
    Input {
        id: FocusId,
        label: String,
        value: String,
        placeholder: String,
        invalid: bool,
    },
    Select {
        id: FocusId,
        label: String,
        options: Vec<String>,
        selected: Option<usize>,
        invalid: bool,
    },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn button(id: FocusId, label: impl Into<String>) -> Self {
        Node::Button {
            id,
            label: label.into(),
            disabled: false,
        }
    }

    pub fn input(id: FocusId, label: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Input {
            id,
            label: label.into(),
            value: value.into(),
            placeholder: String::new(),
            invalid: false,
        }
    }

    pub fn select(id: FocusId, label: impl Into<String>, options: Vec<String>, selected: Option<usize>) -> Self {
        Node::Select {
            id,
            label: label.into(),
            options,
            selected,
            invalid: false,
        }
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        if let Node::Input { placeholder, .. } = &mut self {
            *placeholder = text.into();
        }
        self
    }

    pub fn invalid(mut self, flag: bool) -> Self {
        match &mut self {
            Node::Input { invalid, .. } | Node::Select { invalid, .. } => *invalid = flag,
            _ => {}
        }
        self
    }

    pub fn disabled(mut self, flag: bool) -> Self {
        if let Node::Button { disabled, .. } = &mut self {
            *disabled = flag;
        }
        self
    }

    /// Focus id when the node can take focus
    pub fn focus_id(&self) -> Option<&FocusId> {
        match self {
            Node::Button { disabled: true, .. } => None,
            Node::Button { id, .. } | Node::Input { id, .. } | Node::Select { id, .. } => Some(id),
            Node::Text(_) | Node::Alert { .. } => None,
        }
    }

    /// Rows the node occupies when drawn
    pub fn height(&self) -> u16 {
        match self {
            Node::Text(_) => 1,
            Node::Alert { messages, .. } => 1 + messages.len() as u16,
            Node::Button { .. } => 3,
            Node::Input { .. } | Node::Select { .. } => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Header {
    title: String,
    close: Option<(String, CloseRequest)>,
}

impl Header {
    pub fn new(ctx: &ModalContext, title: impl Into<String>) -> Result<Self, ModalError> {
        ctx.require("Modal header")?;
        Ok(Self {
            title: title.into(),
            close: Some((ctx.close_label.clone(), ctx.on_request_close.clone())),
        })
    }

    /// Show or hide the dismiss button (shown by default)
    pub fn show_close_button(mut self, show: bool) -> Self {
        if !show {
            self.close = None;
        }
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn close_label(&self) -> Option<&str> {
        self.close.as_ref().map(|(label, _)| label.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    nodes: Vec<Node>,
}

impl Body {
    pub fn new(ctx: &ModalContext) -> Result<Self, ModalError> {
        ctx.require("Modal body")?;
        Ok(Self { nodes: Vec::new() })
    }

    pub fn child(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

#[derive(Debug, Clone)]
pub struct Footer {
    nodes: Vec<Node>,
}

impl Footer {
    pub fn new(ctx: &ModalContext) -> Result<Self, ModalError> {
        ctx.require("Modal footer")?;
        Ok(Self { nodes: Vec::new() })
    }

    pub fn child(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

/// Accessibility role of a mounted surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Dialog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSemantics {
    pub role: Role,
    pub aria_modal: bool,
    pub labelled_by: Option<&'static str>,
}

/// A dialog tree assembled from the three slots
#[derive(Debug, Clone, Default)]
pub struct Dialog {
    header: Option<Header>,
    body: Option<Body>,
    footer: Option<Footer>,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn footer(mut self, footer: Footer) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.header.as_ref().map(Header::title)
    }

    pub fn header_slot(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn body_nodes(&self) -> &[Node] {
        self.body.as_ref().map(Body::nodes).unwrap_or_default()
    }

    pub fn footer_nodes(&self) -> &[Node] {
        self.footer.as_ref().map(Footer::nodes).unwrap_or_default()
    }

    pub fn semantics(&self) -> DialogSemantics {
        DialogSemantics {
            role: Role::Dialog,
            aria_modal: true,
            labelled_by: self.header.as_ref().map(|_| TITLE_ID),
        }
    }

    /// Focusable elements in document order: header, body, footer
    pub fn focusables(&self) -> Vec<FocusId> {
        let mut ids = Vec::new();
        if self.header.as_ref().is_some_and(|h| h.close.is_some()) {
            ids.push(CLOSE_BUTTON_ID);
        }
        ids.extend(
            self.body_nodes()
                .iter()
                .chain(self.footer_nodes())
                .filter_map(Node::focus_id)
                .cloned(),
        );
        ids
    }

    pub fn node(&self, id: &FocusId) -> Option<&Node> {
        self.body_nodes()
            .iter()
            .chain(self.footer_nodes())
            .find(|node| node.focus_id() == Some(id))
    }

    /// The header's close request when `id` is its dismiss button
    pub fn close_request_for(&self, id: &FocusId) -> Option<CloseRequest> {
        if id != &CLOSE_BUTTON_ID {
            return None;
        }
        self.header
            .as_ref()
            .and_then(|h| h.close.as_ref())
            .map(|(_, request)| request.clone())
    }

    /// Whether any node displays `text` (title included)
    pub fn contains_text(&self, text: &str) -> bool {
        if self.title() == Some(text) {
            return true;
        }
        self.body_nodes()
            .iter()
            .chain(self.footer_nodes())
            .any(|node| match node {
                Node::Text(content) => content == text,
                Node::Alert { title, messages } => title == text || messages.iter().any(|m| m == text),
                Node::Button { label, .. } => label == text,
                Node::Input { label, value, placeholder, .. } => {
                    label == text || value == text || placeholder == text
                }
                Node::Select { label, .. } => label == text,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn live_context(alive: &Rc<()>) -> ModalContext {
        let mut document = Document::new();
        let container = document.attach_container();
        ModalContext::new(
            ModalId::from("test"),
            CloseRequest::noop(),
            ContainerHandle::new(container, alive),
            "Close dialog".to_string(),
        )
    }

    #[test]
    fn test_slots_fail_outside_modal() {
        let ctx = ModalContext::detached();
        assert_eq!(
            Header::new(&ctx, "Wrong").unwrap_err(),
            ModalError::OutsideModal { slot: "Modal header" }
        );
        assert!(Body::new(&ctx).is_err());
        assert!(Footer::new(&ctx).is_err());
    }

    #[test]
    fn test_slots_fail_after_container_unmounted() {
        let alive = Rc::new(());
        let ctx = live_context(&alive);
        assert!(Header::new(&ctx, "Title").is_ok());
        drop(alive);
        assert!(!ctx.is_active());
        assert!(Header::new(&ctx, "Title").is_err());
    }

    #[test]
    fn test_focusables_in_document_order() {
        let alive = Rc::new(());
        let ctx = live_context(&alive);
        let dialog = Dialog::new()
            .header(Header::new(&ctx, "Complete modal").unwrap())
            .body(
                Body::new(&ctx)
                    .unwrap()
                    .child(Node::text("Modal content"))
                    .child(Node::input(FocusId::new("field"), "Field", "")),
            )
            .footer(
                Footer::new(&ctx)
                    .unwrap()
                    .child(Node::button(FocusId::new("save"), "Save"))
                    .child(Node::button(FocusId::new("cancel"), "Cancel").disabled(true)),
            );

        assert_eq!(
            dialog.focusables(),
            vec![CLOSE_BUTTON_ID, FocusId::new("field"), FocusId::new("save")]
        );
        assert!(dialog.contains_text("Complete modal"));
        assert!(dialog.contains_text("Modal content"));
        assert!(dialog.contains_text("Save"));
    }

    #[test]
    fn test_hidden_close_button() {
        let alive = Rc::new(());
        let ctx = live_context(&alive);
        let dialog = Dialog::new().header(Header::new(&ctx, "Header title").unwrap().show_close_button(false));

        assert!(dialog.focusables().is_empty());
        assert!(dialog.close_request_for(&CLOSE_BUTTON_ID).is_none());
        assert_eq!(dialog.title(), Some("Header title"));
    }

    #[test]
    fn test_semantics() {
        let alive = Rc::new(());
        let ctx = live_context(&alive);
        let dialog = Dialog::new().header(Header::new(&ctx, "Test").unwrap());
        let semantics = dialog.semantics();
        assert_eq!(semantics.role, Role::Dialog);
        assert!(semantics.aria_modal);
        assert_eq!(semantics.labelled_by, Some(TITLE_ID));
    }
}
