//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::geometry::RectF;

/// Primary screen layout: card list on the left, preview pane on the right,
/// status bar along the bottom.
pub struct AppLayout {
    pub list_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // main content
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // card list
                Constraint::Percentage(45), // preview stack
            ])
            .split(rows[0]);

        Self {
            list_area: columns[0],
            preview_area: columns[1],
            status_area: rows[1],
        }
    }

    /// The list pane's inner area (inside its border) as fractional cells —
    /// the box the hover logic measures the pointer against.
    pub fn list_inner(&self) -> RectF {
        let inner = inset(self.list_area);
        RectF::new(
            inner.x as f64,
            inner.y as f64,
            inner.width as f64,
            inner.height as f64,
        )
    }
}

fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}
