//! Application form hosted in a modal by the demo binary

use anyhow::Result;
use crossterm::event::KeyCode;
use log::debug;
use serde::{Deserialize, Serialize};

use modal_await::{
    Body, Dialog, FocusId, Footer, Header, ModalComponent, ModalContext, ModalError, ModalHandle, ModalView, Node,
    ViewEvent,
};

pub const NAME: FocusId = FocusId::new("name");
pub const EMAIL: FocusId = FocusId::new("email");
pub const EXPERIENCE: FocusId = FocusId::new("year-of-experience");
pub const GITHUB: FocusId = FocusId::new("github-link");
pub const CANCEL: FocusId = FocusId::new("cancel");
pub const SUBMIT: FocusId = FocusId::new("submit");

pub const EXPERIENCE_OPTIONS: [&str; 3] = ["0-3 years", "4-7 years", "8+ years"];

/// What the form resolves with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub year_of_experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FormProps {
    pub title: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct FieldErrors {
    name: Option<&'static str>,
    email: Option<&'static str>,
    year_of_experience: Option<&'static str>,
}

impl FieldErrors {
    fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    fn messages(&self) -> Vec<String> {
        [self.name, self.email, self.year_of_experience]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect()
    }
}

pub struct FormModal {
    title: String,
    name: String,
    email: String,
    experience: Option<usize>,
    github: String,
    errors: FieldErrors,
    modal: ModalHandle<FormData>,
}

impl FormModal {
    fn validate(&self) -> FieldErrors {
        let email = self.email.trim();
        FieldErrors {
            name: self.name.trim().is_empty().then_some("Please enter your name"),
            email: if email.is_empty() {
                Some("Please enter your email")
            } else if !looks_like_email(email) {
                Some("Please enter a valid email address")
            } else {
                None
            },
            year_of_experience: self.experience.is_none().then_some("Please select your years of experience"),
        }
    }

    fn submit(&mut self) {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            debug!("Form has {} invalid fields", self.errors.messages().len());
            return;
        }

        let github = self.github.trim();
        let data = FormData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            year_of_experience: self
                .experience
                .and_then(|i| EXPERIENCE_OPTIONS.get(i))
                .map(|s| s.to_string())
                .unwrap_or_default(),
            github_link: (!github.is_empty()).then(|| github.to_string()),
        };
        self.modal.close(data);
    }

    fn field_mut(&mut self, id: &FocusId) -> Option<&mut String> {
        match id {
            id if *id == NAME => Some(&mut self.name),
            id if *id == EMAIL => Some(&mut self.email),
            id if *id == GITHUB => Some(&mut self.github),
            _ => None,
        }
    }

    fn cycle_experience(&mut self, forward: bool) {
        let count = EXPERIENCE_OPTIONS.len();
        self.experience = Some(match (self.experience, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.starts_with('.') && domain.contains('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

impl ModalView for FormModal {
    fn render(&self, ctx: &ModalContext) -> Result<Dialog, ModalError> {
        let mut body = Body::new(ctx)?;
        if !self.errors.is_empty() {
            body = body.child(Node::Alert {
                title: "Please check your details".to_string(),
                messages: self.errors.messages(),
            });
        }

        let body = body
            .child(
                Node::input(NAME, "Name *", self.name.as_str())
                    .placeholder("Enter your name")
                    .invalid(self.errors.name.is_some()),
            )
            .child(
                Node::input(EMAIL, "Email *", self.email.as_str())
                    .placeholder("example@email.com")
                    .invalid(self.errors.email.is_some()),
            )
            .child(
                Node::select(
                    EXPERIENCE,
                    "Years of frontend experience *",
                    EXPERIENCE_OPTIONS.iter().map(|s| s.to_string()).collect(),
                    self.experience,
                )
                .invalid(self.errors.year_of_experience.is_some()),
            )
            .child(
                Node::input(GITHUB, "GitHub link", self.github.as_str()).placeholder("https://github.com/username"),
            );

        Ok(Dialog::new()
            .header(Header::new(ctx, self.title.as_str())?)
            .body(body)
            .footer(
                Footer::new(ctx)?
                    .child(Node::button(CANCEL, "Cancel"))
                    .child(Node::button(SUBMIT, "Submit")),
            ))
    }

    fn handle_event(&mut self, event: ViewEvent, ctx: &ModalContext) -> Result<()> {
        match event {
            ViewEvent::Press(id) if id == SUBMIT => self.submit(),
            ViewEvent::Press(id) if id == CANCEL => ctx.request_close(),
            ViewEvent::Press(_) => {}

            ViewEvent::Key { target: Some(id), code } if id == EXPERIENCE => match code {
                KeyCode::Down | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => self.cycle_experience(true),
                KeyCode::Up | KeyCode::Left => self.cycle_experience(false),
                _ => {}
            },

            ViewEvent::Key { target: Some(id), code } => {
                if code == KeyCode::Enter {
                    self.submit();
                } else if let Some(field) = self.field_mut(&id) {
                    match code {
                        KeyCode::Char(c) => field.push(c),
                        KeyCode::Backspace => {
                            field.pop();
                        }
                        _ => {}
                    }
                }
            }

            ViewEvent::Key { target: None, .. } => {}
        }
        Ok(())
    }
}

impl ModalComponent for FormModal {
    type Props = FormProps;
    type Output = FormData;

    fn create(props: FormProps, modal: ModalHandle<FormData>) -> Self {
        let title = if props.title.is_empty() {
            "Application form".to_string()
        } else {
            props.title
        };
        Self {
            title,
            name: String::new(),
            email: String::new(),
            experience: None,
            github: String::new(),
            errors: FieldErrors::default(),
            modal,
        }
    }
}
