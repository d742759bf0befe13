//! The card-list widget.
//!
//! Each project record renders as a card: a two-row text viewport over a
//! six-row "wrapper" (name/type, project/label, then name/type again), plus
//! a rule row. The wrapper's animated pixel offset decides which rows show
//! through the viewport — 0 px shows the first name/type block, −80 px the
//! project/label block, −160 px the trailing name/type block, and values in
//! between slide row by row while a transition plays.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::geometry::CARD_ROWS;
use crate::core::project::ProjectRecord;

use super::theme::Theme;

/// Pixels of wrapper travel per terminal row (one 80 px text block spans
/// two rows).
pub const PX_PER_ROW: f64 = 40.0;

/// Rows of the text viewport (the rest of [`CARD_ROWS`] is the rule row).
const VIEWPORT_ROWS: usize = 2;

/// Total virtual rows in a card's wrapper.
const WRAPPER_ROWS: usize = 6;

/// Map a wrapper offset in px to the first wrapper row visible in the
/// viewport: 0 px → row 0, −80 px → row 2, −160 px → row 4.
pub fn wrapper_window(offset_px: f64) -> usize {
    let row = (-offset_px / PX_PER_ROW).round();
    (row.max(0.0) as usize).min(WRAPPER_ROWS - VIEWPORT_ROWS)
}

/// One frame's card list — created fresh each draw.
pub struct CardList<'a> {
    records: &'a [ProjectRecord],
    /// Current animated wrapper offset per card, px.
    offsets: &'a [f64],
    /// Smooth-scroll offset in fractional rows.
    scroll_rows: f64,
    block: Option<Block<'a>>,
}

impl<'a> CardList<'a> {
    pub fn new(records: &'a [ProjectRecord], offsets: &'a [f64]) -> Self {
        Self {
            records,
            offsets,
            scroll_rows: 0.0,
            block: None,
        }
    }

    pub fn scroll_rows(mut self, rows: f64) -> Self {
        self.scroll_rows = rows;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// The six wrapper rows for one record, top to bottom.
    fn wrapper_rows(record: &'a ProjectRecord) -> [(&'a str, Style); WRAPPER_ROWS] {
        [
            (record.name.as_str(), Theme::name_style()),
            (record.kind.as_str(), Theme::kind_style()),
            (record.project.as_str(), Theme::project_style()),
            (record.label.as_str(), Theme::label_style()),
            (record.name.as_str(), Theme::name_style()),
            (record.kind.as_str(), Theme::kind_style()),
        ]
    }
}

impl Widget for CardList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        for (i, record) in self.records.iter().enumerate() {
            let card_top = i as f64 * CARD_ROWS - self.scroll_rows;
            let rows = Self::wrapper_rows(record);
            let window = wrapper_window(self.offsets.get(i).copied().unwrap_or(0.0));

            for vis in 0..VIEWPORT_ROWS {
                let row = card_top + vis as f64;
                let Some(y) = to_screen_row(inner, row) else {
                    continue;
                };
                let (text, style) = rows[window + vis];
                let line = Line::from(Span::styled(text, style));
                let text_w = text.chars().count() as u16;
                let x = inner.x + inner.width.saturating_sub(text_w) / 2;
                buf.set_line(x, y, &line, inner.width.min(text_w.max(1)));
            }

            // Rule row under the viewport.
            let Some(y) = to_screen_row(inner, card_top + VIEWPORT_ROWS as f64) else {
                continue;
            };
            let rule = "─".repeat(inner.width as usize);
            buf.set_line(
                inner.x,
                y,
                &Line::from(Span::styled(rule, Theme::rule_style())),
                inner.width,
            );
        }
    }
}

/// Round a fractional card-relative row onto the pane, or `None` when it
/// falls outside.
fn to_screen_row(inner: Rect, row: f64) -> Option<u16> {
    let rounded = row.round();
    if rounded < 0.0 || rounded >= inner.height as f64 {
        return None;
    }
    Some(inner.y + rounded as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hover::{OFFSET_BOTTOM, OFFSET_MIDDLE, OFFSET_TOP};
    use crate::core::project::sample_projects;
    use pretty_assertions::assert_eq;

    fn row_text(buf: &Buffer, area: Rect, y: u16) -> String {
        (0..area.width)
            .map(|x| buf.cell((area.x + x, area.y + y)).unwrap().symbol())
            .collect::<String>()
            .trim()
            .to_string()
    }

    #[test]
    fn offset_positions_select_the_expected_block() {
        assert_eq!(wrapper_window(OFFSET_BOTTOM), 0);
        assert_eq!(wrapper_window(OFFSET_MIDDLE), 2);
        assert_eq!(wrapper_window(OFFSET_TOP), 4);
        // Mid-animation values land on intermediate rows.
        assert_eq!(wrapper_window(-40.0), 1);
        assert_eq!(wrapper_window(-120.0), 3);
    }

    #[test]
    fn renders_one_card_per_record_in_input_order() {
        let records = sample_projects();
        let offsets = vec![0.0; records.len()];
        let area = Rect::new(0, 0, 40, records.len() as u16 * CARD_ROWS as u16);
        let mut buf = Buffer::empty(area);
        CardList::new(&records, &offsets).render(area, &mut buf);

        for (i, record) in records.iter().enumerate() {
            let top = i as u16 * CARD_ROWS as u16;
            assert_eq!(row_text(&buf, area, top), record.name);
            assert_eq!(row_text(&buf, area, top + 1), record.kind);
        }
    }

    #[test]
    fn middle_offset_shows_project_and_label() {
        let records = sample_projects();
        let mut offsets = vec![0.0; records.len()];
        offsets[0] = OFFSET_MIDDLE;
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        CardList::new(&records, &offsets).render(area, &mut buf);

        assert_eq!(row_text(&buf, area, 0), records[0].project);
        assert_eq!(row_text(&buf, area, 1), records[0].label);
    }

    #[test]
    fn scroll_shifts_cards_and_clips_at_the_edge() {
        let records = sample_projects();
        let offsets = vec![0.0; records.len()];
        let area = Rect::new(0, 0, 40, 9);
        let mut buf = Buffer::empty(area);
        CardList::new(&records, &offsets)
            .scroll_rows(CARD_ROWS)
            .render(area, &mut buf);

        // Card 0 scrolled out; card 1 now sits at the top.
        assert_eq!(row_text(&buf, area, 0), records[1].name);
    }

    #[test]
    fn empty_record_list_renders_nothing() {
        let area = Rect::new(0, 0, 40, 9);
        let mut buf = Buffer::empty(area);
        CardList::new(&[], &[]).render(area, &mut buf);
        for y in 0..area.height {
            assert_eq!(row_text(&buf, area, y), "");
        }
    }
}
