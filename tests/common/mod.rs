//! Views shared by the integration tests

#![allow(dead_code)]

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use modal_await::{
    Body, Dialog, FocusId, Footer, Header, ModalComponent, ModalContext, ModalError, ModalHandle, ModalManager,
    ModalView, Node, Theme, ViewEvent,
};
use ratatui::{Terminal, backend::TestBackend};

pub const OPENER: FocusId = FocusId::new("opener");
pub const HELP: FocusId = FocusId::new("help");
pub const FIELD: FocusId = FocusId::new("field");
pub const OK: FocusId = FocusId::new("ok");
pub const CANCEL: FocusId = FocusId::new("cancel");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub value: String,
}

/// A small form: one text field, OK and Cancel
pub struct FormView {
    title: String,
    value: String,
    modal: ModalHandle<Outcome>,
}

pub struct FormProps {
    pub title: String,
}

impl ModalView for FormView {
    fn render(&self, ctx: &ModalContext) -> Result<Dialog, ModalError> {
        Ok(Dialog::new()
            .header(Header::new(ctx, self.title.as_str())?)
            .body(Body::new(ctx)?.child(Node::input(FIELD, "Value", self.value.as_str())))
            .footer(
                Footer::new(ctx)?
                    .child(Node::button(CANCEL, "Cancel"))
                    .child(Node::button(OK, "OK")),
            ))
    }

    fn handle_event(&mut self, event: ViewEvent, ctx: &ModalContext) -> Result<()> {
        match event {
            ViewEvent::Press(id) if id == OK => self.modal.close(Outcome {
                ok: true,
                value: self.value.clone(),
            }),
            ViewEvent::Press(id) if id == CANCEL => ctx.request_close(),
            ViewEvent::Key {
                target: Some(id),
                code: KeyCode::Char(c),
            } if id == FIELD => self.value.push(c),
            _ => {}
        }
        Ok(())
    }
}

impl ModalComponent for FormView {
    type Props = FormProps;
    type Output = Outcome;

    fn create(props: FormProps, modal: ModalHandle<Outcome>) -> Self {
        Self {
            title: props.title,
            value: String::new(),
            modal,
        }
    }
}

/// A dialog with nothing focusable
pub struct NoticeView;

impl ModalView for NoticeView {
    fn render(&self, ctx: &ModalContext) -> Result<Dialog, ModalError> {
        Ok(Dialog::new()
            .header(Header::new(ctx, "Notice")?.show_close_button(false))
            .body(Body::new(ctx)?.child(Node::text("Read only"))))
    }

    fn handle_event(&mut self, _event: ViewEvent, _ctx: &ModalContext) -> Result<()> {
        Ok(())
    }
}

impl ModalComponent for NoticeView {
    type Props = ();
    type Output = ();

    fn create(_props: (), _modal: ModalHandle<()>) -> Self {
        NoticeView
    }
}

/// A view whose input handler always fails
pub struct BrokenView;

impl ModalView for BrokenView {
    fn render(&self, ctx: &ModalContext) -> Result<Dialog, ModalError> {
        Ok(Dialog::new().header(Header::new(ctx, "Broken")?))
    }

    fn handle_event(&mut self, _event: ViewEvent, _ctx: &ModalContext) -> Result<()> {
        anyhow::bail!("view rejected input")
    }
}

impl ModalComponent for BrokenView {
    type Props = ();
    type Output = ();

    fn create(_props: (), _modal: ModalHandle<()>) -> Self {
        BrokenView
    }
}

pub fn form(title: &str) -> FormProps {
    FormProps {
        title: title.to_string(),
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn left_click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// A manager with a two-button page, focus on the opener
pub fn page_manager(manager: ModalManager) -> ModalManager {
    manager.set_page_focusables(vec![OPENER, HELP]);
    manager.focus(Some(modal_await::FocusKey::page(OPENER)));
    manager
}

/// Draw every mounted dialog once so pointer hit testing has a layout
pub fn draw(manager: &ModalManager) {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let theme = Theme::default();
    terminal
        .draw(|frame| {
            let area = frame.area();
            manager.render(frame, area, &theme);
        })
        .unwrap();
}
