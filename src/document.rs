//! Headless model of the surface modals are mounted into
//!
//! The document knows which page elements can take focus, which modal
//! containers are attached, which element currently holds focus and whether
//! page scrolling is suppressed. It knows nothing about what lives inside a
//! container; the modal manager asks the mounted views for that.

use log::debug;
use std::borrow::Cow;
use std::fmt;

use crate::modal::focus_trap::{FocusHost, TabDirection};

/// Stable identifier for focusable UI elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(Cow<'static, str>);

impl FocusId {
    /// Create a new FocusId with a static string identifier
    pub const fn new(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Create a FocusId from a runtime string (generated list rows etc.)
    pub fn owned(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FocusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle of a container attached to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Where a focusable element lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Page,
    Container(ContainerId),
}

/// A focusable element addressed document-wide
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusKey {
    pub scope: Scope,
    pub id: FocusId,
}

impl FocusKey {
    pub fn page(id: FocusId) -> Self {
        Self {
            scope: Scope::Page,
            id,
        }
    }

    pub fn in_container(container: ContainerId, id: FocusId) -> Self {
        Self {
            scope: Scope::Container(container),
            id,
        }
    }
}

#[derive(Debug, Default)]
pub struct Document {
    page: Vec<FocusId>,
    containers: Vec<ContainerId>,
    next_container: u64,
    focused: Option<FocusKey>,
    scroll_locked: bool,
    scroll_offset: u16,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the page's focusable elements (document order)
    pub fn set_page_focusables(&mut self, ids: Vec<FocusId>) {
        self.page = ids;
        let stale = matches!(
            &self.focused,
            Some(FocusKey { scope: Scope::Page, id }) if !self.page.contains(id)
        );
        if stale {
            self.focused = None;
        }
    }

    pub fn page_focusables(&self) -> &[FocusId] {
        &self.page
    }

    pub fn attach_container(&mut self) -> ContainerId {
        self.next_container += 1;
        let container = ContainerId(self.next_container);
        self.containers.push(container);
        debug!("Attached container {}", container.0);
        container
    }

    /// Remove a container. Focus held inside it falls back to the document.
    pub fn detach_container(&mut self, container: ContainerId) -> bool {
        let Some(pos) = self.containers.iter().position(|c| *c == container) else {
            return false;
        };
        self.containers.remove(pos);
        if self
            .focused
            .as_ref()
            .is_some_and(|key| key.scope == Scope::Container(container))
        {
            self.focused = None;
        }
        debug!("Detached container {}", container.0);
        true
    }

    pub fn is_attached(&self, container: ContainerId) -> bool {
        self.containers.contains(&container)
    }

    pub fn containers(&self) -> &[ContainerId] {
        &self.containers
    }

    pub fn focused(&self) -> Option<&FocusKey> {
        self.focused.as_ref()
    }

    pub fn set_focus(&mut self, key: Option<FocusKey>) {
        self.focused = key;
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    /// Scroll the page. Returns false when scrolling is suppressed.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        if self.scroll_locked {
            return false;
        }
        let next = (self.scroll_offset as i32 + delta).clamp(0, u16::MAX as i32);
        self.scroll_offset = next as u16;
        true
    }
}

/// The document together with a live snapshot of the document-order focus list.
pub struct FocusSurface<'a> {
    document: &'a mut Document,
    order: Vec<FocusKey>,
}

impl<'a> FocusSurface<'a> {
    pub fn new(document: &'a mut Document, order: Vec<FocusKey>) -> Self {
        Self { document, order }
    }

    /// Host-native Tab behaviour: walk the document order without wrapping.
    /// Stepping past either end leaves the document (nothing focused).
    pub fn step(&mut self, direction: TabDirection) {
        if self.order.is_empty() {
            return;
        }
        let current = self
            .document
            .focused
            .as_ref()
            .and_then(|key| self.order.iter().position(|k| k == key));

        let next = match (direction, current) {
            (TabDirection::Forward, None) => self.order.first().cloned(),
            (TabDirection::Backward, None) => self.order.last().cloned(),
            (TabDirection::Forward, Some(pos)) => self.order.get(pos + 1).cloned(),
            (TabDirection::Backward, Some(pos)) => {
                pos.checked_sub(1).and_then(|p| self.order.get(p).cloned())
            }
        };
        self.document.focused = next;
    }
}

impl FocusHost for FocusSurface<'_> {
    fn active_element(&self) -> Option<FocusKey> {
        self.document.focused.clone()
    }

    fn focus(&mut self, key: &FocusKey) {
        self.document.focused = Some(key.clone());
    }

    fn is_focusable(&self, key: &FocusKey) -> bool {
        self.order.contains(key)
    }
}
