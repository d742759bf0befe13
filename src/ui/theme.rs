//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── card list ──────────────────────────────────────────────
    pub fn name_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn kind_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn project_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn label_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn rule_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── preview pane ───────────────────────────────────────────
    pub fn placeholder_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn placeholder_label_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
