//! Modal instance registry
//!
//! Tracks every open modal by id. Each instance owns a resolver for the
//! opener's [`PendingResult`] and a mounted view in its own document
//! container.
//!
//! # Invariants
//!
//! - At most one live instance per id; a supplied id that is still live is
//!   rejected.
//! - Resolution is exactly-once: the registry entry (and with it the
//!   resolver) is removed synchronously when the instance resolves, so a
//!   second `close`/`cancel` finds nothing and is a no-op.
//! - Teardown is exactly-once and deferred: unmounting (dismissal unbind,
//!   scroll lock release, container detach, focus restore) runs on the next
//!   [`ModalManager::tick`], after the event that resolved the instance has
//!   finished against a still-mounted view.
//! - No registry borrow is held while view code runs; views are taken out of
//!   their slot for the duration of the call and put back afterwards.
//!
//! # Failure Modes
//!
//! - `close`/`cancel` on an unknown id: ignored.
//! - `close` with a value of the wrong type: logged, instance stays open.
//! - Errors returned by a view's `handle_event` propagate out of `dispatch_*`.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, error, info, warn};
use ratatui::Frame;
use ratatui::layout::Rect;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};
use std::time::Instant;

use crate::config::ModalConfig;
use crate::document::{ContainerId, Document, FocusId, FocusKey, FocusSurface, Scope};
use crate::error::ModalError;
use crate::render::{self, DialogLayout};
use crate::theme::Theme;

use super::contract::{CloseRequest, ContainerHandle, Dialog, DialogSemantics, ModalContext, Node, Role};
use super::dismissal::{DismissalController, PointerHit};
use super::focus_trap::{FocusTrap, TabDirection};
use super::id::{IdGenerator, ModalId};
use super::pending::{ErasedResolver, PendingResult};
use super::scheduler::Scheduler;
use super::scroll_lock::ScrollLock;
use super::view::{ModalComponent, ModalView, ViewEvent};

/// Work deferred to the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Settle(ContainerId),
    Unmount(ContainerId),
}

struct Instance {
    container: ContainerId,
    resolver: Box<dyn ErasedResolver>,
    created_at: Instant,
    sequence: u64,
}

struct Mounted {
    modal_id: ModalId,
    container: ContainerId,
    /// `None` while the view is out for a call
    view: Option<Box<dyn ModalView>>,
    context: ModalContext,
    trap: Option<FocusTrap>,
    dismissal: DismissalController,
    layout: Option<DialogLayout>,
    holds_scroll_lock: bool,
    _alive: Rc<()>,
}

pub(crate) struct Registry {
    config: ModalConfig,
    cancel_key: KeyCode,
    ids: IdGenerator,
    instances: HashMap<ModalId, Instance>,
    /// Mount order is layering order: last is on top and receives input
    mounted: Vec<Mounted>,
    document: Document,
    scroll_lock: ScrollLock,
    scheduler: Scheduler<Deferred>,
    opened: u64,
}

impl Registry {
    fn new(config: ModalConfig) -> Self {
        Self {
            cancel_key: config.cancel_key_code(),
            ids: IdGenerator::new(config.id_prefix.clone()),
            config,
            instances: HashMap::new(),
            mounted: Vec::new(),
            document: Document::new(),
            scroll_lock: ScrollLock::new(),
            scheduler: Scheduler::new(),
            opened: 0,
        }
    }

    fn generate_id(&mut self) -> ModalId {
        loop {
            let id = self.ids.next_id();
            if !self.instances.contains_key(&id) {
                return id;
            }
            warn!("Generated modal id {} collides with a live instance, drawing again", id);
        }
    }

    fn mounted_mut(&mut self, container: ContainerId) -> Option<&mut Mounted> {
        self.mounted.iter_mut().find(|m| m.container == container)
    }
}

/// What a dialog looks like right now, for queries and assertions
#[derive(Debug, Clone)]
pub struct DialogSnapshot {
    pub modal_id: ModalId,
    pub container: ContainerId,
    pub semantics: DialogSemantics,
    pub dialog: Dialog,
}

impl DialogSnapshot {
    pub fn title(&self) -> Option<&str> {
        self.dialog.title()
    }
}

/// Handle to the modal registry.
///
/// Cloning is cheap and every clone addresses the same registry. The manager
/// is single-threaded (`!Send`): all calls happen on the UI thread.
#[derive(Clone)]
pub struct ModalManager {
    inner: Rc<RefCell<Registry>>,
}

impl Default for ModalManager {
    fn default() -> Self {
        Self::new(ModalConfig::default())
    }
}

impl fmt::Debug for ModalManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("ModalManager")
            .field("open", &registry.instances.len())
            .field("mounted", &registry.mounted.len())
            .field("pending_tasks", &registry.scheduler.len())
            .finish()
    }
}

impl ModalManager {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry::new(config))),
        }
    }

    fn upgrade(registry: &Weak<RefCell<Registry>>) -> Option<Self> {
        registry.upgrade().map(|inner| Self { inner })
    }

    pub fn config(&self) -> ModalConfig {
        self.inner.borrow().config.clone()
    }

    // --- Opening ---

    /// Open `V` with a generated id.
    pub fn open<V: ModalComponent>(&self, props: V::Props) -> PendingResult<V::Output> {
        self.open_with_id::<V>(props, None)
    }

    /// Open `V`, optionally under a caller-chosen id.
    ///
    /// A supplied id that is still live is a programmer error: it is logged
    /// and the returned result is already cancelled. That result carries a
    /// fresh, never registered id so it cannot address the live instance.
    pub fn open_with_id<V: ModalComponent>(&self, props: V::Props, id: Option<ModalId>) -> PendingResult<V::Output> {
        self.try_open::<V>(props, id).unwrap_or_else(|err| {
            error!("Failed to open modal: {}", err);
            let detached = self.inner.borrow_mut().generate_id();
            PendingResult::cancelled(detached)
        })
    }

    /// Open `V`, reporting a duplicate id as an error.
    pub fn try_open<V: ModalComponent>(
        &self,
        props: V::Props,
        id: Option<ModalId>,
    ) -> Result<PendingResult<V::Output>, ModalError> {
        let (modal_id, container, pending, close_label) = {
            let mut guard = self.inner.borrow_mut();
            let registry = &mut *guard;

            let modal_id = match id {
                Some(id) if registry.instances.contains_key(&id) => {
                    return Err(ModalError::DuplicateId(id));
                }
                Some(id) => id,
                None => registry.generate_id(),
            };

            let container = registry.document.attach_container();
            let (resolver, pending) = PendingResult::<V::Output>::channel(modal_id.clone());
            registry.opened += 1;
            registry.instances.insert(
                modal_id.clone(),
                Instance {
                    container,
                    resolver: Box::new(resolver),
                    created_at: Instant::now(),
                    sequence: registry.opened,
                },
            );
            (modal_id, container, pending, registry.config.close_button_label.clone())
        };

        let alive = Rc::new(());
        let context = ModalContext::new(
            modal_id.clone(),
            self.close_request(&modal_id),
            ContainerHandle::new(container, &alive),
            close_label,
        );
        let handle = ModalHandle::new(modal_id.clone(), Rc::downgrade(&self.inner));
        let view = V::create(props, handle);

        self.mount(modal_id, container, Box::new(view), context, alive);
        Ok(pending)
    }

    fn close_request(&self, modal_id: &ModalId) -> CloseRequest {
        let registry = Rc::downgrade(&self.inner);
        let modal_id = modal_id.clone();
        CloseRequest::new(move || {
            if let Some(manager) = ModalManager::upgrade(&registry) {
                manager.cancel(&modal_id, Some("dismissed"));
            }
        })
    }

    fn mount(
        &self,
        modal_id: ModalId,
        container: ContainerId,
        view: Box<dyn ModalView>,
        context: ModalContext,
        alive: Rc<()>,
    ) {
        let order = self.document_order();
        let mut guard = self.inner.borrow_mut();
        let registry = &mut *guard;

        let trap = FocusTrap::activate(&FocusSurface::new(&mut registry.document, order));
        let mut dismissal = DismissalController::new();
        dismissal.bind(
            registry.cancel_key,
            registry.config.close_on_backdrop,
            context.on_request_close().clone(),
        );

        let holds_scroll_lock = registry.config.lock_scroll;
        if holds_scroll_lock {
            registry.scroll_lock.acquire(&mut registry.document);
        }

        registry.mounted.push(Mounted {
            modal_id: modal_id.clone(),
            container,
            view: Some(view),
            context,
            trap: Some(trap),
            dismissal,
            layout: None,
            holds_scroll_lock,
            _alive: alive,
        });

        if registry.config.auto_focus {
            registry.scheduler.defer(Deferred::Settle(container));
        }
        info!("Opened modal {} in container {}", modal_id, container.id());
    }

    // --- Resolution ---

    /// Resolve `id` with `result`. Unknown ids are ignored. Use [`ModalManager::cancel`]
    /// to resolve with `None`.
    pub fn close<T: 'static>(&self, id: impl AsRef<str>, result: T) {
        if let Err(err) = self.try_close(id, result) {
            error!("{}", err);
        }
    }

    /// Resolve `id` with `result`.
    ///
    /// Returns `Ok(true)` when the instance resolved, `Ok(false)` when the id
    /// is not tracked, and an error (leaving the instance open) when the
    /// opener awaits a different type.
    pub fn try_close<T: 'static>(&self, id: impl AsRef<str>, result: T) -> Result<bool, ModalError> {
        self.resolve(id.as_ref(), Some(Box::new(result)))
    }

    /// Resolve `id` as cancelled. `reason` is only logged. Unknown ids are ignored.
    pub fn cancel(&self, id: impl AsRef<str>, reason: Option<&str>) {
        let id = id.as_ref();
        if let Ok(true) = self.resolve(id, None) {
            debug!("Modal {} cancelled ({})", id, reason.unwrap_or("no reason"));
        }
    }

    /// Cancel every tracked instance, newest first.
    pub fn close_all(&self) {
        let ids: Vec<ModalId> = {
            let registry = self.inner.borrow();
            let mut live: Vec<(&ModalId, u64)> = registry
                .instances
                .iter()
                .map(|(id, instance)| (id, instance.sequence))
                .collect();
            live.sort_by(|a, b| b.1.cmp(&a.1));
            live.into_iter().map(|(id, _)| id.clone()).collect()
        };

        if !ids.is_empty() {
            info!("Closing all {} open modals", ids.len());
        }
        for id in ids {
            self.cancel(&id, Some("close_all"));
        }
    }

    fn resolve(&self, id: &str, value: Option<Box<dyn Any>>) -> Result<bool, ModalError> {
        let resolver = {
            let mut guard = self.inner.borrow_mut();
            let registry = &mut *guard;

            let Some(instance) = registry.instances.remove(id) else {
                debug!("Ignoring resolution of unknown modal {}", id);
                return Ok(false);
            };

            if let Some(result) = value.as_deref() {
                if !instance.resolver.accepts(result) {
                    let expected = instance.resolver.expected_type();
                    let modal_id = ModalId::from(id);
                    registry.instances.insert(modal_id.clone(), instance);
                    return Err(ModalError::ResultType { id: modal_id, expected });
                }
            }

            registry.scheduler.defer(Deferred::Unmount(instance.container));
            debug!("Modal {} resolved after {:?}", id, instance.created_at.elapsed());
            instance.resolver
        };

        resolver.resolve_any(value);
        Ok(true)
    }

    // --- Deferred work ---

    /// Run the work scheduled before this call: initial focus for newly
    /// mounted dialogs and unmounts of resolved ones, in schedule order.
    /// Returns how many tasks ran.
    pub fn tick(&self) -> usize {
        let tasks = self.inner.borrow_mut().scheduler.take_ready();
        let count = tasks.len();
        for task in tasks {
            match task {
                Deferred::Settle(container) => self.settle(container),
                Deferred::Unmount(container) => self.unmount(container),
            }
        }
        count
    }

    pub fn pending_tasks(&self) -> usize {
        self.inner.borrow().scheduler.len()
    }

    fn settle(&self, container: ContainerId) {
        let focusables = match self.container_focusables(container) {
            Ok(focusables) => focusables,
            Err(err) => {
                error!("Modal view failed to render: {}", err);
                return;
            }
        };
        let order = self.document_order();

        let mut guard = self.inner.borrow_mut();
        let registry = &mut *guard;
        let Some(trap) = registry
            .mounted
            .iter_mut()
            .find(|m| m.container == container)
            .and_then(|m| m.trap.as_mut())
        else {
            return;
        };
        let mut surface = FocusSurface::new(&mut registry.document, order);
        trap.settle(&focusables, &mut surface);
    }

    fn unmount(&self, container: ContainerId) {
        let mut removed = {
            let mut guard = self.inner.borrow_mut();
            let registry = &mut *guard;

            let Some(pos) = registry.mounted.iter().position(|m| m.container == container) else {
                return;
            };
            let mut mounted = registry.mounted.remove(pos);
            mounted.dismissal.unbind();
            if mounted.holds_scroll_lock {
                registry.scroll_lock.release(&mut registry.document);
            }
            registry.document.detach_container(container);

            // Not the top dialog: focus stays with the dialog above, which
            // inherits the restore target when its own pointed into this one.
            if let Some(above) = registry.mounted.get_mut(pos) {
                if let (Some(trap), Some(above_trap)) = (mounted.trap.take(), above.trap.as_mut()) {
                    let points_here = above_trap
                        .restore_target()
                        .is_none_or(|key| key.scope == Scope::Container(container));
                    if points_here {
                        trap.hand_over(above_trap);
                    }
                }
            }
            mounted
        };

        if let Some(trap) = removed.trap.take() {
            let restore = self.inner.borrow().config.restore_focus;
            if restore {
                let order = self.document_order();
                let mut guard = self.inner.borrow_mut();
                trap.deactivate(&mut FocusSurface::new(&mut guard.document, order));
            }
        }

        info!("Unmounted modal {}", removed.modal_id);
        drop(removed);
    }

    // --- View access ---

    fn take_view(&self, container: ContainerId) -> Option<(Box<dyn ModalView>, ModalContext)> {
        let mut registry = self.inner.borrow_mut();
        let mounted = registry.mounted_mut(container)?;
        let view = mounted.view.take()?;
        Some((view, mounted.context.clone()))
    }

    fn restore_view(&self, container: ContainerId, view: Box<dyn ModalView>) {
        let leftover = {
            let mut registry = self.inner.borrow_mut();
            match registry.mounted_mut(container) {
                Some(mounted) if mounted.view.is_none() => {
                    mounted.view = Some(view);
                    None
                }
                _ => Some(view),
            }
        };
        drop(leftover);
    }

    fn with_view<R>(
        &self,
        container: ContainerId,
        f: impl FnOnce(&mut dyn ModalView, &ModalContext) -> R,
    ) -> Option<R> {
        let (mut view, context) = self.take_view(container)?;
        let out = f(view.as_mut(), &context);
        self.restore_view(container, view);
        Some(out)
    }

    fn render_dialog(&self, container: ContainerId) -> Result<Option<Dialog>, ModalError> {
        self.with_view(container, |view, ctx| view.render(ctx)).transpose()
    }

    fn container_focusables(&self, container: ContainerId) -> Result<Vec<FocusKey>, ModalError> {
        Ok(self
            .render_dialog(container)?
            .map(|dialog| {
                dialog
                    .focusables()
                    .into_iter()
                    .map(|id| FocusKey::in_container(container, id))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Every focusable element in document order: page first, then each
    /// mounted dialog in mount order. Computed from the live view trees.
    fn document_order(&self) -> Vec<FocusKey> {
        let (page, containers): (Vec<FocusId>, Vec<ContainerId>) = {
            let registry = self.inner.borrow();
            (
                registry.document.page_focusables().to_vec(),
                registry.mounted.iter().map(|m| m.container).collect(),
            )
        };

        let mut order: Vec<FocusKey> = page.into_iter().map(FocusKey::page).collect();
        for container in containers {
            match self.container_focusables(container) {
                Ok(keys) => order.extend(keys),
                Err(err) => error!("Modal view failed to render: {}", err),
            }
        }
        order
    }

    fn top_container(&self) -> Option<ContainerId> {
        self.inner.borrow().mounted.last().map(|m| m.container)
    }

    fn focused_in(&self, container: ContainerId) -> Option<FocusId> {
        let registry = self.inner.borrow();
        registry
            .document
            .focused()
            .filter(|key| key.scope == Scope::Container(container))
            .map(|key| key.id.clone())
    }

    fn deliver(&self, container: ContainerId, event: ViewEvent) -> Result<()> {
        self.with_view(container, |view, ctx| view.handle_event(event, ctx))
            .unwrap_or(Ok(()))
    }

    /// Activate an element of the top dialog: the header's dismiss button
    /// requests close, buttons are pressed, anything else is ignored.
    fn activate(&self, container: ContainerId, dialog: &Dialog, id: &FocusId) -> Result<bool> {
        if let Some(request) = dialog.close_request_for(id) {
            request.fire();
            return Ok(true);
        }
        if let Some(Node::Button { .. }) = dialog.node(id) {
            self.deliver(container, ViewEvent::Press(id.clone()))?;
            return Ok(true);
        }
        Ok(false)
    }

    // --- Input ---

    /// Route a key press to the top dialog.
    ///
    /// Returns `Ok(false)` when no dialog is mounted and the page should
    /// handle the key itself.
    pub fn dispatch_key(&self, key: KeyEvent) -> Result<bool> {
        let Some(container) = self.top_container() else {
            return Ok(false);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(true);
        }

        let request = self
            .inner
            .borrow()
            .mounted
            .last()
            .and_then(|m| m.dismissal.on_key(key.code));
        if let Some(request) = request {
            // a cancel key that also edits text is typed, not obeyed, inside an input
            if !(is_text_edit(&key) && self.input_has_focus(container)?) {
                request.fire();
                return Ok(true);
            }
        }

        match key.code {
            KeyCode::BackTab => return self.navigate(container, TabDirection::Backward).map(|_| true),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                return self.navigate(container, TabDirection::Backward).map(|_| true);
            }
            KeyCode::Tab => return self.navigate(container, TabDirection::Forward).map(|_| true),
            _ => {}
        }

        let Some(dialog) = self.render_dialog(container)? else {
            return Ok(true);
        };
        let target = self.focused_in(container);

        if let Some(id) = &target {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) && self.activate(container, &dialog, id)? {
                return Ok(true);
            }
        }

        self.deliver(container, ViewEvent::Key { target, code: key.code })?;
        Ok(true)
    }

    fn input_has_focus(&self, container: ContainerId) -> Result<bool, ModalError> {
        let Some(id) = self.focused_in(container) else {
            return Ok(false);
        };
        Ok(self
            .render_dialog(container)?
            .is_some_and(|dialog| matches!(dialog.node(&id), Some(Node::Input { .. }))))
    }

    fn navigate(&self, container: ContainerId, direction: TabDirection) -> Result<()> {
        let focusables = self.container_focusables(container)?;
        let order = self.document_order();

        let mut guard = self.inner.borrow_mut();
        let registry = &mut *guard;
        let mut surface = FocusSurface::new(&mut registry.document, order);
        let redirected = registry
            .mounted
            .iter()
            .find(|m| m.container == container)
            .and_then(|m| m.trap.as_ref())
            .is_some_and(|trap| trap.handle_tab(direction, &focusables, &mut surface));
        if !redirected {
            surface.step(direction);
        }
        Ok(())
    }

    /// Route a mouse event to the top dialog. Needs a prior [`ModalManager::render`]
    /// for hit testing; before that, presses are swallowed.
    pub fn dispatch_mouse(&self, mouse: MouseEvent) -> Result<bool> {
        let Some(container) = self.top_container() else {
            return Ok(false);
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(true);
        }

        let (request, element) = {
            let registry = self.inner.borrow();
            let Some(top) = registry.mounted.last() else {
                return Ok(false);
            };
            let Some(layout) = &top.layout else {
                return Ok(true);
            };
            let hit = PointerHit::classify(mouse.column, mouse.row, layout.overlay, layout.content);
            (top.dismissal.on_pointer(hit), layout.element_at(mouse.column, mouse.row))
        };

        if let Some(request) = request {
            request.fire();
            return Ok(true);
        }

        if let Some(id) = element {
            self.inner
                .borrow_mut()
                .document
                .set_focus(Some(FocusKey::in_container(container, id.clone())));
            if let Some(dialog) = self.render_dialog(container)? {
                self.activate(container, &dialog, &id)?;
            }
        }
        Ok(true)
    }

    // --- Rendering ---

    /// Draw every mounted dialog bottom to top and remember their layout for
    /// pointer hit testing.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let (containers, focused): (Vec<ContainerId>, Option<FocusKey>) = {
            let registry = self.inner.borrow();
            (
                registry.mounted.iter().map(|m| m.container).collect(),
                registry.document.focused().cloned(),
            )
        };

        for container in containers {
            match self.render_dialog(container) {
                Ok(Some(dialog)) => {
                    let focused_id = focused
                        .as_ref()
                        .filter(|key| key.scope == Scope::Container(container))
                        .map(|key| &key.id);
                    let layout = render::draw_dialog(frame, area, theme, &dialog, focused_id);
                    if let Some(mounted) = self.inner.borrow_mut().mounted_mut(container) {
                        mounted.layout = Some(layout);
                    }
                }
                Ok(None) => {}
                Err(err) => error!("Modal view failed to render: {}", err),
            }
        }
    }

    // --- Queries ---

    /// Whether `id` is tracked (open and not yet resolved)
    pub fn is_open(&self, id: impl AsRef<str>) -> bool {
        self.inner.borrow().instances.contains_key(id.as_ref())
    }

    /// Number of tracked (unresolved) instances
    pub fn open_count(&self) -> usize {
        self.inner.borrow().instances.len()
    }

    /// Number of mounted dialogs, including resolved ones awaiting unmount
    pub fn mounted_count(&self) -> usize {
        self.inner.borrow().mounted.len()
    }

    pub fn has_mounted(&self) -> bool {
        self.mounted_count() > 0
    }

    /// Ids of tracked instances in open order
    pub fn open_ids(&self) -> Vec<ModalId> {
        let registry = self.inner.borrow();
        let mut live: Vec<(&ModalId, u64)> = registry
            .instances
            .iter()
            .map(|(id, instance)| (id, instance.sequence))
            .collect();
        live.sort_by_key(|(_, sequence)| *sequence);
        live.into_iter().map(|(id, _)| id.clone()).collect()
    }

    /// Mounted dialogs with the given role, bottom to top
    pub fn find_by_role(&self, role: Role) -> Vec<DialogSnapshot> {
        let mounted: Vec<(ModalId, ContainerId)> = {
            let registry = self.inner.borrow();
            registry
                .mounted
                .iter()
                .map(|m| (m.modal_id.clone(), m.container))
                .collect()
        };

        mounted
            .into_iter()
            .filter_map(|(modal_id, container)| {
                let dialog = self.render_dialog(container).ok().flatten()?;
                let semantics = dialog.semantics();
                (semantics.role == role).then_some(DialogSnapshot {
                    modal_id,
                    container,
                    semantics,
                    dialog,
                })
            })
            .collect()
    }

    /// The topmost mounted dialog for `id`
    pub fn dialog(&self, id: impl AsRef<str>) -> Option<DialogSnapshot> {
        let id = id.as_ref();
        self.find_by_role(Role::Dialog)
            .into_iter()
            .rev()
            .find(|snapshot| snapshot.modal_id.as_str() == id)
    }

    /// Where the topmost dialog for `id` was last drawn
    pub fn dialog_layout(&self, id: impl AsRef<str>) -> Option<DialogLayout> {
        let id = id.as_ref();
        self.inner
            .borrow()
            .mounted
            .iter()
            .rev()
            .find(|m| m.modal_id.as_str() == id)
            .and_then(|m| m.layout.clone())
    }

    // --- Document ---

    pub fn set_page_focusables(&self, ids: Vec<FocusId>) {
        self.inner.borrow_mut().document.set_page_focusables(ids);
    }

    pub fn focused(&self) -> Option<FocusKey> {
        self.inner.borrow().document.focused().cloned()
    }

    pub fn focus(&self, key: Option<FocusKey>) {
        self.inner.borrow_mut().document.set_focus(key);
    }

    /// Native Tab navigation over the whole document, for use when no dialog
    /// is mounted.
    pub fn focus_step(&self, direction: TabDirection) {
        let order = self.document_order();
        let mut guard = self.inner.borrow_mut();
        FocusSurface::new(&mut guard.document, order).step(direction);
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.inner.borrow().document.is_scroll_locked()
    }

    pub fn scroll_offset(&self) -> u16 {
        self.inner.borrow().document.scroll_offset()
    }

    /// Scroll the page; suppressed while a dialog holds the scroll lock.
    pub fn scroll_page(&self, delta: i32) -> bool {
        self.inner.borrow_mut().document.scroll_by(delta)
    }
}

/// Keys that edit the value of a focused text input
fn is_text_edit(key: &KeyEvent) -> bool {
    let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    !chord && matches!(key.code, KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete)
}

/// Typed handle given to a view for its own instance
pub struct ModalHandle<T> {
    id: ModalId,
    registry: Weak<RefCell<Registry>>,
    _result: PhantomData<fn(T)>,
}

impl<T> Clone for ModalHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            registry: self.registry.clone(),
            _result: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ModalHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHandle").field("id", &self.id).finish()
    }
}

impl<T: 'static> ModalHandle<T> {
    fn new(id: ModalId, registry: Weak<RefCell<Registry>>) -> Self {
        Self {
            id,
            registry,
            _result: PhantomData,
        }
    }

    pub fn id(&self) -> &ModalId {
        &self.id
    }

    /// The manager, unless it has been dropped
    pub fn manager(&self) -> Option<ModalManager> {
        ModalManager::upgrade(&self.registry)
    }

    pub fn close(&self, result: T) {
        if let Some(manager) = self.manager() {
            manager.close(&self.id, result);
        }
    }

    pub fn cancel(&self) {
        if let Some(manager) = self.manager() {
            manager.cancel(&self.id, None);
        }
    }
}
