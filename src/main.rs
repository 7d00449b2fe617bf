use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use modal_await::{FocusId, FocusKey, ModalConfig, ModalManager, TabDirection, Theme, ThemeVariant, open_modal};

mod form;

use form::{FormModal, FormProps};

const OPEN_FORM: FocusId = FocusId::new("open-form");
const QUIT: FocusId = FocusId::new("quit");

#[derive(Parser, Debug)]
#[command(name = "modal-await")]
#[command(about = "Open a form in a modal dialog and await its result")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write logs
    #[arg(long, default_value = "modal-await.log")]
    log_file: PathBuf,

    /// Title of the form dialog
    #[arg(long, default_value = "Application form")]
    title: String,

    #[arg(long, value_enum)]
    theme: Option<ThemeVariant>,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Page state shared with the tasks awaiting dialog results
#[derive(Default)]
struct Page {
    status: String,
    results: Vec<String>,
    buttons: Vec<(FocusId, Rect)>,
    quit: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file: {:?}", cli.log_file))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let mut config = match &cli.config {
        Some(path) => ModalConfig::load_from(path)?,
        None => ModalConfig::load()?,
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    info!("Starting modal-await demo");

    let mut terminal = setup_terminal()?;
    let local = tokio::task::LocalSet::new();
    let outcome = local.run_until(run(&mut terminal, cli.title, config)).await;
    restore_terminal(&mut terminal)?;

    let page = outcome?;
    for result in page.borrow().results.iter() {
        println!("{}", result);
    }
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run(terminal: &mut Tui, title: String, config: ModalConfig) -> Result<Rc<RefCell<Page>>> {
    let theme = Theme::new(config.theme);
    let manager = ModalManager::new(config);
    let page = Rc::new(RefCell::new(Page {
        status: "Press Enter on \"Open form\" to start".to_string(),
        ..Page::default()
    }));

    manager.set_page_focusables(vec![OPEN_FORM, QUIT]);
    manager.focus(Some(FocusKey::page(OPEN_FORM)));

    while !page.borrow().quit {
        manager.tick();
        terminal.draw(|frame| {
            let area = frame.area();
            draw_page(frame, area, &theme, &manager, &mut page.borrow_mut());
            manager.render(frame, area, &theme);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => handle_key(&manager, &page, &title, key)?,
                Event::Mouse(mouse) => handle_mouse(&manager, &page, &title, mouse)?,
                _ => {}
            }
        }

        // let result awaiters run
        tokio::task::yield_now().await;
    }

    manager.close_all();
    manager.tick();
    Ok(page)
}

fn open_form(manager: &ModalManager, page: &Rc<RefCell<Page>>, title: &str) {
    let pending = open_modal::<FormModal>(manager, FormProps { title: title.to_string() });
    info!("Opened form {}", pending.id());

    let page = Rc::clone(page);
    tokio::task::spawn_local(async move {
        let message = match pending.await {
            Some(data) => match serde_json::to_string_pretty(&data) {
                Ok(json) => json,
                Err(err) => {
                    error!("Failed to serialize form data: {}", err);
                    return;
                }
            },
            None => "cancelled".to_string(),
        };
        let mut page = page.borrow_mut();
        page.status = if message == "cancelled" {
            "Form cancelled".to_string()
        } else {
            "Form submitted".to_string()
        };
        page.results.push(message);
    });
}

fn activate(manager: &ModalManager, page: &Rc<RefCell<Page>>, title: &str, id: &FocusId) {
    if *id == OPEN_FORM {
        open_form(manager, page, title);
    } else if *id == QUIT {
        page.borrow_mut().quit = true;
    }
}

fn handle_key(manager: &ModalManager, page: &Rc<RefCell<Page>>, title: &str, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        page.borrow_mut().quit = true;
        return Ok(());
    }
    if manager.dispatch_key(key)? || key.kind != KeyEventKind::Press {
        return Ok(());
    }

    match key.code {
        KeyCode::Tab => manager.focus_step(TabDirection::Forward),
        KeyCode::BackTab => manager.focus_step(TabDirection::Backward),
        KeyCode::Up => {
            manager.scroll_page(-1);
        }
        KeyCode::Down => {
            manager.scroll_page(1);
        }
        KeyCode::Char('q') => page.borrow_mut().quit = true,
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(FocusKey { id, .. }) = manager.focused() {
                activate(manager, page, title, &id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_mouse(manager: &ModalManager, page: &Rc<RefCell<Page>>, title: &str, mouse: MouseEvent) -> Result<()> {
    // suppressed by the scroll lock while a dialog is open
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            manager.scroll_page(-1);
            return Ok(());
        }
        MouseEventKind::ScrollDown => {
            manager.scroll_page(1);
            return Ok(());
        }
        _ => {}
    }

    if manager.dispatch_mouse(mouse)? || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(());
    }

    let position = Position::new(mouse.column, mouse.row);
    let hit = page
        .borrow()
        .buttons
        .iter()
        .find(|(_, rect)| rect.contains(position))
        .map(|(id, _)| id.clone());
    if let Some(id) = hit {
        manager.focus(Some(FocusKey::page(id.clone())));
        activate(manager, page, title, &id);
    }
    Ok(())
}

fn draw_page(frame: &mut Frame, area: Rect, theme: &Theme, manager: &ModalManager, page: &mut Page) {
    frame.render_widget(Block::default().style(theme.page_style()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let lines: Vec<String> = (1..=40)
        .map(|n| format!("Line {} of the page. Up/Down scrolls unless a dialog is open.", n))
        .collect();
    let content = Paragraph::new(lines.join("\n"))
        .block(Block::default().borders(Borders::ALL).title("modal-await"))
        .scroll((manager.scroll_offset(), 0));
    frame.render_widget(content, chunks[0]);

    let focused = manager.focused();
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(15), Constraint::Length(10), Constraint::Min(0)])
        .split(chunks[1]);

    page.buttons.clear();
    for ((id, label), rect) in [(OPEN_FORM, "Open form"), (QUIT, "Quit")].into_iter().zip(buttons.iter()) {
        let is_focused = focused.as_ref() == Some(&FocusKey::page(id.clone()));
        let widget = Paragraph::new(label)
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(is_focused, false)),
            );
        frame.render_widget(widget, *rect);
        page.buttons.push((id, *rect));
    }

    frame.render_widget(
        Paragraph::new(page.status.as_str()).style(Style::default().fg(theme.subtext)),
        chunks[2],
    );
}
