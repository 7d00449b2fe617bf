/*
Catppuccin palette subset used by the dialog renderer

Mocha: Text cdd6f4, Subtext0 a6adc8, Overlay0 6c7086, Surface0 313244,
       Base 1e1e2e, Crust 11111b, Lavender b4befe, Red f38ba8, Blue 89b4fa
Latte: Text 4c4f69, Subtext0 6c6f85, Overlay0 9ca0b0, Surface0 ccd0da,
       Base eff1f5, Crust dce0e8, Lavender 7287fd, Red d20f39, Blue 1e66f5
*/

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Mocha, // Dark theme (default)
    Latte, // Light theme
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub subtext: Color,
    pub overlay: Color,
    pub surface: Color,
    pub base: Color,
    pub crust: Color,
    pub focus: Color,
    pub error: Color,
    pub accent: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext: Color::Rgb(0xa6, 0xad, 0xc8),
            overlay: Color::Rgb(0x6c, 0x70, 0x86),
            surface: Color::Rgb(0x31, 0x32, 0x44),
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            crust: Color::Rgb(0x11, 0x11, 0x1b),
            focus: Color::Rgb(0xb4, 0xbe, 0xfe),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
            accent: Color::Rgb(0x89, 0xb4, 0xfa),
        }
    }

    fn latte() -> Self {
        Self {
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            subtext: Color::Rgb(0x6c, 0x6f, 0x85),
            overlay: Color::Rgb(0x9c, 0xa0, 0xb0),
            surface: Color::Rgb(0xcc, 0xd0, 0xda),
            base: Color::Rgb(0xef, 0xf1, 0xf5),
            crust: Color::Rgb(0xdc, 0xe0, 0xe8),
            focus: Color::Rgb(0x72, 0x87, 0xfd),
            error: Color::Rgb(0xd2, 0x0f, 0x39),
            accent: Color::Rgb(0x1e, 0x66, 0xf5),
        }
    }

    /// Dimmed area behind an open dialog
    pub fn backdrop_style(&self) -> Style {
        Style::default().bg(self.crust)
    }

    pub fn panel_style(&self) -> Style {
        Style::default().bg(self.base).fg(self.text)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool, invalid: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else if invalid {
            Style::default().fg(self.error)
        } else {
            Style::default().fg(self.overlay)
        }
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(self.subtext).add_modifier(Modifier::ITALIC)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn page_style(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
