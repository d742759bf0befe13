//! The preview pane — renders the image stack.
//!
//! Images draw oldest-first so the most recent lands on top, each scaled by
//! its animated factor around the pane centre. Pixels go out as Unicode `▀`
//! half-blocks (2 pixels per cell). A card whose asset is still decoding,
//! or failed to decode, gets a placeholder box instead of a crash — the
//! showcase equivalent of a broken image reference.

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::preview::PreviewStack;
use crate::core::project::ProjectRecord;

use super::theme::Theme;

/// Cached decode state for one card's asset.
#[derive(Debug, Clone)]
pub enum ImageSlot {
    /// A decode thread is running.
    Pending,
    Ready(Arc<image::RgbaImage>),
    Failed,
}

/// Scales below this render nothing — the image is effectively gone.
const MIN_VISIBLE_SCALE: f64 = 0.02;

pub struct PreviewPane<'a> {
    stack: &'a PreviewStack,
    records: &'a [ProjectRecord],
    cache: &'a HashMap<usize, ImageSlot>,
    block: Option<Block<'a>>,
}

impl<'a> PreviewPane<'a> {
    pub fn new(
        stack: &'a PreviewStack,
        records: &'a [ProjectRecord],
        cache: &'a HashMap<usize, ImageSlot>,
    ) -> Self {
        Self { stack, records, cache, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for PreviewPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width < 2 || inner.height < 2 {
            return;
        }

        for img in self.stack.iter() {
            let scale = img.scale.clamp(0.0, 1.0);
            if scale < MIN_VISIBLE_SCALE {
                continue;
            }
            let target = scaled_rect(inner, scale);
            match self.cache.get(&img.card) {
                Some(ImageSlot::Ready(pixels)) => {
                    render_image_halfblocks(pixels, target, buf);
                }
                _ => {
                    let label = self
                        .records
                        .get(img.card)
                        .map(|r| r.name.as_str())
                        .unwrap_or("?");
                    render_placeholder(label, img.card + 1, target, buf);
                }
            }
        }
    }
}

/// Shrink `inner` by `scale` around its centre.
fn scaled_rect(inner: Rect, scale: f64) -> Rect {
    let w = ((inner.width as f64 * scale).round() as u16).clamp(1, inner.width);
    let h = ((inner.height as f64 * scale).round() as u16).clamp(1, inner.height);
    Rect::new(
        inner.x + (inner.width - w) / 2,
        inner.y + (inner.height - h) / 2,
        w,
        h,
    )
}

/// Render an `RgbaImage` using `▀` half-blocks (2 pixels per cell).
///
/// Aspect ratio is preserved: the image is fitted inside `area` and centred
/// on both axes. Terminal cells are ~2× taller than wide, so each cell is
/// 1 pixel wide × 2 pixels tall. Mostly-transparent pixels leave the cell
/// untouched so stacked images show through each other's empty corners.
fn render_image_halfblocks(pixels: &Arc<image::RgbaImage>, area: Rect, buf: &mut Buffer) {
    use image::imageops::FilterType;

    if area.width == 0 || area.height == 0 || pixels.width() == 0 || pixels.height() == 0 {
        return;
    }

    let max_px_w = area.width as f64;
    let max_px_h = (area.height as f64) * 2.0;
    let src_w = pixels.width() as f64;
    let src_h = pixels.height() as f64;

    let fit = (max_px_w / src_w).min(max_px_h / src_h);
    let fit_w = (src_w * fit).round().max(1.0) as u32;
    let fit_h = (src_h * fit).round().max(1.0) as u32;

    let rgba = image::imageops::resize(pixels.as_ref(), fit_w, fit_h, FilterType::Triangle);
    let (iw, ih) = (rgba.width(), rgba.height());

    let col_offset = (area.width.saturating_sub(iw as u16)) / 2;
    let row_offset = (area.height.saturating_sub(ih.div_ceil(2) as u16)) / 2;

    for row in 0..area.height {
        let yt = (row as u32) * 2;
        if yt >= ih {
            break;
        }
        let yb = yt + 1;
        for col in 0..iw.min(area.width as u32) {
            let top = rgba.get_pixel(col, yt);
            let bottom = (yb < ih).then(|| rgba.get_pixel(col, yb));
            if top[3] < 8 && bottom.map_or(true, |p| p[3] < 8) {
                continue; // fully transparent column pair
            }
            let fg = Color::Rgb(top[0], top[1], top[2]);
            let bg = match bottom {
                Some(p) if p[3] >= 8 => Color::Rgb(p[0], p[1], p[2]),
                _ => Color::Reset,
            };
            let pos = Position::new(
                area.x + col_offset + col as u16,
                area.y + row_offset + row,
            );
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

/// Placeholder box for a pending or failed asset.
fn render_placeholder(name: &str, asset_number: usize, area: Rect, buf: &mut Buffer) {
    Block::bordered()
        .border_style(Theme::placeholder_style())
        .render(area, buf);

    if area.height < 3 || area.width < 4 {
        return;
    }
    let label = format!("{name} · {asset_number:02}");
    let width = (label.chars().count() as u16).min(area.width.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height / 2;
    buf.set_line(
        x,
        y,
        &Line::from(Span::styled(label, Theme::placeholder_label_style())),
        width,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_rect_shrinks_around_the_centre() {
        let inner = Rect::new(10, 10, 20, 10);
        let half = scaled_rect(inner, 0.5);
        assert_eq!(half.width, 10);
        assert_eq!(half.height, 5);
        // Centred: equal margins on both sides (±1 for rounding).
        assert_eq!(half.x - inner.x, inner.right() - half.right());
        assert!(half.y > inner.y && half.bottom() < inner.bottom() + 1);
    }

    #[test]
    fn full_scale_fills_the_pane() {
        let inner = Rect::new(0, 0, 20, 10);
        assert_eq!(scaled_rect(inner, 1.0), inner);
    }

    #[test]
    fn invisible_images_draw_nothing() {
        let mut stack = PreviewStack::default();
        stack.push(0); // scale 0.0 — still animating in
        let cache = HashMap::new();
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        PreviewPane::new(&stack, &[], &cache).render(area, &mut buf);
        let blank = Buffer::empty(area);
        assert_eq!(buf, blank);
    }
}
