//! Pointer/card geometry in fractional cell coordinates.
//!
//! Everything that hit-tests the mouse against cards goes through this
//! module so the renderer and the hover logic always agree on where a card
//! is — boxes shift every frame while the smooth scroll is gliding, so they
//! are recomputed from the live scroll offset, never cached.

/// Height of one card in terminal rows: two visible text rows + a rule row.
pub const CARD_ROWS: f64 = 3.0;

/// A pointer position in fractional cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in fractional cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical midpoint — the line that decides top-half vs bottom-half.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Inclusive containment on all four edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

/// Compute the live box of every card, in list order.
///
/// `list` is the inner list-pane area; `scroll_rows` is the current smooth
/// scroll offset (fractional rows, positive = content shifted up). Cards
/// scrolled fully outside the pane still get a box — the hover logic wants
/// "pointer is not inside" to hold for them, not for them to vanish.
pub fn card_rects(list: RectF, count: usize, scroll_rows: f64) -> Vec<RectF> {
    (0..count)
        .map(|i| {
            RectF::new(
                list.left,
                list.top + i as f64 * CARD_ROWS - scroll_rows,
                list.width,
                CARD_ROWS,
            )
        })
        .collect()
}

/// Total content height of `count` cards, in rows.
pub fn content_rows(count: usize) -> f64 {
    count as f64 * CARD_ROWS
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn containment_is_edge_inclusive() {
        let r = RectF::new(10.0, 5.0, 20.0, 6.0);
        assert!(r.contains(Point::new(10.0, 5.0)));
        assert!(r.contains(Point::new(30.0, 11.0)));
        assert!(r.contains(Point::new(15.0, 8.0)));
        assert!(!r.contains(Point::new(9.9, 8.0)));
        assert!(!r.contains(Point::new(15.0, 11.1)));
    }

    #[test]
    fn one_rect_per_card_in_input_order() {
        let list = RectF::new(0.0, 2.0, 40.0, 12.0);
        let rects = card_rects(list, 4, 0.0);
        assert_eq!(rects.len(), 4);
        for (i, r) in rects.iter().enumerate() {
            assert_eq!(r.top, 2.0 + i as f64 * CARD_ROWS);
            assert_eq!(r.height, CARD_ROWS);
        }
    }

    #[test]
    fn scroll_shifts_every_box_up() {
        let list = RectF::new(0.0, 0.0, 40.0, 12.0);
        let still = card_rects(list, 3, 0.0);
        let scrolled = card_rects(list, 3, 1.5);
        for (a, b) in still.iter().zip(&scrolled) {
            assert_eq!(b.top, a.top - 1.5);
        }
    }

    #[test]
    fn empty_list_has_no_rects() {
        let list = RectF::new(0.0, 0.0, 40.0, 12.0);
        assert!(card_rects(list, 0, 0.0).is_empty());
        assert_eq!(content_rows(0), 0.0);
    }
}
