//! Terminal drawing of mounted dialogs
//!
//! A dialog is drawn as a dimmed backdrop over the whole frame with a
//! centered bordered panel on top. Header, body nodes and the footer row are
//! stacked inside the panel. Drawing returns a [`DialogLayout`] that the
//! manager keeps for pointer hit testing.

use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::document::FocusId;
use crate::modal::contract::{CLOSE_BUTTON_ID, Dialog, Node};
use crate::theme::Theme;

const MAX_PANEL_WIDTH: u16 = 64;
const HEADER_HEIGHT: u16 = 3;
const CLOSE_BUTTON_WIDTH: u16 = 5;

/// Where a dialog ended up on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    /// The backdrop, covering the whole area behind the dialog
    pub overlay: Rect,
    /// The dialog panel
    pub content: Rect,
    /// Focusable elements and the cells they occupy
    pub elements: Vec<(FocusId, Rect)>,
}

impl DialogLayout {
    /// The focusable element under a cell, if any
    pub fn element_at(&self, column: u16, row: u16) -> Option<FocusId> {
        let position = Position::new(column, row);
        self.elements
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(id, _)| id.clone())
    }

    pub fn rect_of(&self, id: &FocusId) -> Option<Rect> {
        self.elements.iter().find(|(el, _)| el == id).map(|(_, rect)| *rect)
    }
}

/// Rows the panel needs for `dialog`, borders included
pub fn panel_height(dialog: &Dialog) -> u16 {
    let header = if dialog.header_slot().is_some() { HEADER_HEIGHT } else { 0 };
    let body: u16 = dialog.body_nodes().iter().map(Node::height).sum();
    let footer = dialog.footer_nodes().iter().map(Node::height).max().unwrap_or(0);
    2 + header + body + footer
}

/// Center a `width` x `height` rect inside `container`, clamped to fit
pub fn centered(container: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(container.width);
    let height = height.min(container.height);
    Rect {
        x: container.x + (container.width - width) / 2,
        y: container.y + (container.height - height) / 2,
        width,
        height,
    }
}

/// Draw the backdrop and the dialog panel into `area`.
pub fn draw_dialog(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    dialog: &Dialog,
    focused: Option<&FocusId>,
) -> DialogLayout {
    frame.render_widget(Block::default().style(theme.backdrop_style()), area);

    let width = MAX_PANEL_WIDTH.min(area.width.saturating_sub(4));
    let content = centered(area, width, panel_height(dialog));
    frame.render_widget(Clear, content);

    let panel = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay))
        .style(theme.panel_style());
    let inner = panel.inner(content);
    frame.render_widget(panel, content);

    let mut elements = Vec::new();
    let mut cursor = inner;

    if let Some(header) = dialog.header_slot() {
        let row = take_rows(&mut cursor, HEADER_HEIGHT);
        let title_area = Rect {
            width: row.width.saturating_sub(CLOSE_BUTTON_WIDTH),
            ..row
        };
        let title = Paragraph::new(Line::from(Span::styled(header.title(), theme.title_style())));
        frame.render_widget(title, Rect { y: title_area.y + 1, height: 1, ..title_area }.intersection(row));

        if header.close_label().is_some() {
            let button = Rect {
                x: row.x + row.width.saturating_sub(CLOSE_BUTTON_WIDTH),
                width: CLOSE_BUTTON_WIDTH.min(row.width),
                ..row
            };
            draw_button(frame, theme, "x", button, focused == Some(&CLOSE_BUTTON_ID), false);
            elements.push((CLOSE_BUTTON_ID, button));
        }
    }

    for node in dialog.body_nodes() {
        let rect = take_rows(&mut cursor, node.height());
        draw_node(frame, theme, node, rect, focused, &mut elements);
    }

    let footer_height = dialog.footer_nodes().iter().map(Node::height).max().unwrap_or(0);
    if footer_height > 0 {
        let row = take_rows(&mut cursor, footer_height);
        // right-aligned, in declaration order
        let widths: Vec<u16> = dialog.footer_nodes().iter().map(node_width).collect();
        let total: u16 = widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16;
        let mut x = row.x + row.width.saturating_sub(total);
        for (node, width) in dialog.footer_nodes().iter().zip(widths) {
            let rect = Rect { x, width: width.min(row.right().saturating_sub(x)), ..row };
            draw_node(frame, theme, node, rect, focused, &mut elements);
            x = x.saturating_add(width + 1);
        }
    }

    DialogLayout {
        overlay: area,
        content,
        elements,
    }
}

fn take_rows(area: &mut Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    let taken = Rect { height: rows, ..*area };
    area.y += rows;
    area.height -= rows;
    taken
}

fn node_width(node: &Node) -> u16 {
    let chars = |s: &str| s.chars().count() as u16;
    match node {
        Node::Button { label, .. } => chars(label) + 4,
        Node::Text(text) => chars(text),
        Node::Alert { title, messages } => messages
            .iter()
            .map(|m| chars(m) + 2)
            .chain(std::iter::once(chars(title)))
            .max()
            .unwrap_or(0),
        Node::Input { .. } | Node::Select { .. } => 24,
    }
}

fn draw_node(
    frame: &mut Frame,
    theme: &Theme,
    node: &Node,
    area: Rect,
    focused: Option<&FocusId>,
    elements: &mut Vec<(FocusId, Rect)>,
) {
    if area.height == 0 {
        return;
    }

    match node {
        Node::Text(text) => {
            frame.render_widget(Paragraph::new(text.as_str()).style(theme.panel_style()), area);
        }

        Node::Alert { title, messages } => {
            let mut lines = vec![Line::from(Span::styled(
                title.as_str(),
                theme.error_style().add_modifier(Modifier::BOLD),
            ))];
            lines.extend(
                messages
                    .iter()
                    .map(|m| Line::from(Span::styled(format!("• {}", m), theme.error_style()))),
            );
            frame.render_widget(Paragraph::new(lines), area);
        }

        Node::Button { id, label, disabled } => {
            draw_button(frame, theme, label, area, focused == Some(id), *disabled);
            if !disabled {
                elements.push((id.clone(), area));
            }
        }

        Node::Input {
            id,
            label,
            value,
            placeholder,
            invalid,
        } => {
            let is_focused = focused == Some(id);
            let field = draw_label(frame, theme, label, area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(is_focused, *invalid));

            let text = if value.is_empty() && !is_focused {
                Paragraph::new(Span::styled(placeholder.as_str(), theme.placeholder_style()))
            } else if is_focused {
                Paragraph::new(format!("{}▏", value))
            } else {
                Paragraph::new(value.as_str())
            };
            frame.render_widget(text.block(block), field);
            elements.push((id.clone(), field));
        }

        Node::Select {
            id,
            label,
            options,
            selected,
            invalid,
        } => {
            let is_focused = focused == Some(id);
            let field = draw_label(frame, theme, label, area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(is_focused, *invalid));

            let current = selected.and_then(|i| options.get(i));
            let text = match current {
                Some(option) => Line::from(vec![Span::raw(option.as_str()), Span::raw(" ▾")]),
                None => Line::from(vec![
                    Span::styled("Select...", theme.placeholder_style()),
                    Span::raw(" ▾"),
                ]),
            };
            frame.render_widget(Paragraph::new(text).block(block), field);
            elements.push((id.clone(), field));
        }
    }
}

/// Draw a field label on the first row and return the rows left for the field
fn draw_label(frame: &mut Frame, theme: &Theme, label: &str, area: Rect) -> Rect {
    let mut rest = area;
    let label_row = take_rows(&mut rest, 1);
    frame.render_widget(Paragraph::new(label).style(Style::default().fg(theme.subtext)), label_row);
    rest
}

fn draw_button(frame: &mut Frame, theme: &Theme, label: &str, area: Rect, focused: bool, disabled: bool) {
    let border_style = theme.border_style(focused, false);
    let text_style = if disabled {
        Style::default().fg(theme.overlay)
    } else {
        Style::default().fg(theme.text)
    };
    let widget = Paragraph::new(label)
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .alignment(Alignment::Center)
        .style(text_style);
    frame.render_widget(widget, area);
}
