//! Input handling and the per-frame update pass.
//!
//! A browser hands hover scripts `mouseenter`/`mouseleave` for free; a
//! terminal only reports raw pointer positions. `pointer_moved` therefore
//! hit-tests every move against the live card boxes and synthesises
//! enter/leave transitions when the containing card changes, then schedules
//! the coalesced frame check. `run_frame` is the once-per-frame
//! counterpart: it ticks the scroll clock, advances tweens, fires the idle
//! trim, and — when an update was scheduled — runs exit cleanup followed by
//! the hover recompute, in that order.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

use crate::app::image_runtime::{self, ImageUpdate};
use crate::app::state::{AppState, TweenKey, PREVIEW_SCALE_DURATION};
use crate::config::Action;
use crate::core::geometry::{card_rects, content_rows, Point};
use crate::core::hover::HoverEffect;
use crate::core::preview::PreviewEffect;
use crate::core::tween::Easing;
use crate::ui::layout::AppLayout;
use crate::ui::preview_pane::ImageSlot;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => scroll_by(state, -state.config.wheel_rows),
        Action::ScrollDown => scroll_by(state, state.config.wheel_rows),
    }
}

/// Process a mouse event.
pub fn handle_mouse(
    state: &mut AppState,
    mouse: MouseEvent,
    img_tx: &mpsc::UnboundedSender<ImageUpdate>,
    now: Instant,
) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let p = Point::new(mouse.column as f64, mouse.row as f64);
            pointer_moved(state, p, img_tx, now);
        }
        MouseEventKind::ScrollUp => scroll_by(state, -state.config.wheel_rows),
        MouseEventKind::ScrollDown => scroll_by(state, state.config.wheel_rows),
        _ => {}
    }
}

/// The terminal was resized; boxes moved, so re-check everything.
pub fn handle_resize(state: &mut AppState) {
    state.scroll.clamp_target(max_scroll(state));
    state.scheduler.request_update();
}

fn scroll_by(state: &mut AppState, rows: f64) {
    state.scroll.scroll_by(rows, max_scroll(state));
    state.scheduler.request_update();
}

fn max_scroll(state: &AppState) -> f64 {
    let list = AppLayout::from_area(state.terminal_area).list_inner();
    content_rows(state.records.len()) - list.height
}

/// A raw pointer move: track it, manage the idle timer, run the immediate
/// exit cleanup, synthesise enter/leave, and schedule the frame check.
fn pointer_moved(
    state: &mut AppState,
    p: Point,
    img_tx: &mpsc::UnboundedSender<ImageUpdate>,
    now: Instant,
) {
    state.pointer = p;

    let list = AppLayout::from_area(state.terminal_area).list_inner();

    // Every move replaces the pending idle deadline; only moves inside the
    // list bounds arm a new one.
    state.idle.disarm();
    if list.contains(p) {
        state.idle.arm(now);
    } else {
        // Outside the list: the whole preview stack goes, immediately.
        let fades = state.preview.clear_all();
        apply_preview_effects(state, &fades, now);
    }

    // Enter/leave synthesis against the live boxes.
    let rects = card_rects(list, state.records.len(), state.scroll.offset_rows());
    let hovered = rects.iter().position(|r| r.contains(p));
    if hovered != state.hovered_card {
        if let Some(old) = state.hovered_card {
            let effects = state.deck.pointer_leave(old, p, rects[old]);
            apply_hover_effects(state, &effects, img_tx, now);
        }
        if let Some(new) = hovered {
            tracing::debug!("hover enter: card {new}");
            let effects = state.deck.pointer_enter(new, p, rects[new]);
            apply_hover_effects(state, &effects, img_tx, now);
        }
        state.hovered_card = hovered;
    }

    state.scheduler.request_update();
}

/// Turn hover effects into tweens and preview pushes.
fn apply_hover_effects(
    state: &mut AppState,
    effects: &[HoverEffect],
    img_tx: &mpsc::UnboundedSender<ImageUpdate>,
    now: Instant,
) {
    for effect in effects {
        match *effect {
            HoverEffect::Move { card, to, duration } => {
                state.tweens.go(
                    TweenKey::CardOffset(card),
                    state.card_offsets[card],
                    to.offset_px(),
                    duration,
                    Easing::CubicOut,
                    now,
                );
            }
            HoverEffect::SpawnPreview { card } => {
                let (id, scale_in) = state.preview.push(card);
                apply_preview_effects(state, &[scale_in], now);
                // First hover on this card kicks off the asset decode.
                if !state.image_cache.contains_key(&card) {
                    state.image_cache.insert(card, ImageSlot::Pending);
                    image_runtime::spawn_decode(img_tx.clone(), &state.assets_dir, card);
                }
                tracing::debug!("preview push: card {card} image {id}");
            }
        }
    }
}

/// Turn preview effects into scale tweens.
fn apply_preview_effects(state: &mut AppState, effects: &[PreviewEffect], now: Instant) {
    for effect in effects {
        match *effect {
            PreviewEffect::ScaleIn(id) => {
                state.tweens.go(
                    TweenKey::PreviewScale(id),
                    0.0,
                    1.0,
                    PREVIEW_SCALE_DURATION,
                    Easing::CubicOut,
                    now,
                );
            }
            PreviewEffect::FadeOut(id) => {
                let from = state
                    .preview
                    .iter()
                    .find(|img| img.id == id)
                    .map(|img| img.scale)
                    .unwrap_or(0.0);
                state.tweens.go(
                    TweenKey::PreviewScale(id),
                    from,
                    0.0,
                    PREVIEW_SCALE_DURATION,
                    Easing::CubicOut,
                    now,
                );
            }
        }
    }
}

/// The once-per-frame pass.
pub fn run_frame(state: &mut AppState, img_tx: &mpsc::UnboundedSender<ImageUpdate>, now: Instant) {
    // Scroll clock first: boxes depend on the fresh offset. While the glide
    // is live the boxes keep moving under the pointer, so keep the check
    // scheduled — the terminal won't send events for a stationary mouse.
    state.scroll.tick(now);
    if state.scroll.is_animating() {
        state.scheduler.request_update();
    }

    // Animations: apply values, let completed fades remove their image.
    for update in state.tweens.advance(now) {
        match update.key {
            TweenKey::CardOffset(card) => {
                state.card_offsets[card] = update.value;
            }
            TweenKey::PreviewScale(id) => {
                if update.done {
                    state.preview.finish_scale(id, update.value);
                } else {
                    state.preview.set_scale(id, update.value);
                }
            }
        }
    }

    // Idle trim: keep only the most recent preview image.
    if state.idle.fired(now) {
        tracing::debug!("idle trim: {} images", state.preview.len());
        let fades = state.preview.trim_to_last();
        apply_preview_effects(state, &fades, now);
    }

    // The coalesced recompute. Exit cleanup runs before the hover pass.
    if state.scheduler.take_pending() {
        let list = AppLayout::from_area(state.terminal_area).list_inner();
        if !list.contains(state.pointer) {
            let fades = state.preview.clear_all();
            apply_preview_effects(state, &fades, now);
        }

        let rects = card_rects(list, state.records.len(), state.scroll.offset_rows());
        let effects = state.deck.frame_check(state.pointer, &rects);
        apply_hover_effects(state, &effects, img_tx, now);

        // Keep the enter/leave bookkeeping aligned with what the check
        // decided, so a card scrolled under the pointer doesn't produce a
        // spurious enter (and preview) on the next one-cell move.
        state.hovered_card = rects.iter().position(|r| r.contains(state.pointer));
    }
}

/// Apply a finished background decode.
pub fn apply_image_update(state: &mut AppState, update: ImageUpdate) {
    let slot = match update.result {
        Ok(pixels) => ImageSlot::Ready(pixels),
        Err(_) => ImageSlot::Failed,
    };
    state.image_cache.insert(update.card, slot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::hover::WrapPosition;
    use ratatui::layout::Rect;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_state(count: usize) -> (AppState, mpsc::UnboundedSender<ImageUpdate>) {
        let records = crate::core::project::sample_projects()
            .into_iter()
            .cycle()
            .take(count)
            .collect();
        let mut state = AppState::new(records, PathBuf::from("assets"), AppConfig::defaults());
        state.terminal_area = Rect::new(0, 0, 100, 30);
        let (tx, _rx) = mpsc::unbounded_channel();
        (state, tx)
    }

    fn move_to(state: &mut AppState, tx: &mpsc::UnboundedSender<ImageUpdate>, x: f64, y: f64, now: Instant) {
        pointer_moved(state, Point::new(x, y), tx, now);
    }

    fn settle(state: &mut AppState, tx: &mpsc::UnboundedSender<ImageUpdate>, now: Instant) {
        // Two frames a full second apart: plays out every tween and lets
        // completions apply.
        run_frame(state, tx, now + Duration::from_secs(1));
        run_frame(state, tx, now + Duration::from_secs(2));
    }

    fn card_center(state: &AppState, card: usize) -> Point {
        let list = AppLayout::from_area(state.terminal_area).list_inner();
        let rects = card_rects(list, state.records.len(), 0.0);
        Point::new(rects[card].left + 1.0, rects[card].center_y())
    }

    #[test]
    fn hover_then_idle_leaves_one_preview_image() {
        let t0 = Instant::now();
        let (mut state, tx) = test_state(4);

        for card in 0..3 {
            let p = card_center(&state, card);
            move_to(&mut state, &tx, p.x, p.y, t0);
            run_frame(&mut state, &tx, t0);
        }
        assert_eq!(state.preview.len(), 3);

        // 2s of silence inside the list, then the fades play out.
        run_frame(&mut state, &tx, t0 + Duration::from_millis(2001));
        settle(&mut state, &tx, t0 + Duration::from_millis(2001));
        assert_eq!(state.preview.len(), 1);
        assert_eq!(state.preview.iter().next().unwrap().card, 2);
    }

    #[test]
    fn leaving_the_list_clears_every_preview_image() {
        let t0 = Instant::now();
        let (mut state, tx) = test_state(4);

        let p = card_center(&state, 1);
        move_to(&mut state, &tx, p.x, p.y, t0);
        assert_eq!(state.preview.len(), 1);

        // Far outside every pane.
        move_to(&mut state, &tx, 99.0, 29.0, t0);
        settle(&mut state, &tx, t0);
        assert!(state.preview.is_empty());
        assert_eq!(state.deck.active(), None);
    }

    #[test]
    fn frame_check_after_scroll_hands_active_to_the_new_card() {
        let t0 = Instant::now();
        let (mut state, tx) = test_state(20);

        let p = card_center(&state, 0);
        move_to(&mut state, &tx, p.x, p.y, t0);
        run_frame(&mut state, &tx, t0);
        assert_eq!(state.deck.active(), Some(0));
        let images_before = state.preview.len();

        // Glide several cards down while the pointer stays put.
        scroll_by(&mut state, 9.0);
        let mut now = t0;
        for _ in 0..240 {
            now += Duration::from_millis(16);
            run_frame(&mut state, &tx, now);
        }
        let active = state.deck.active();
        assert!(active.is_some() && active != Some(0));
        // Scroll-driven activation never pushes preview images.
        assert_eq!(state.preview.len(), images_before);
    }

    #[test]
    fn enter_and_leave_animate_the_wrapper_offsets() {
        let t0 = Instant::now();
        let (mut state, tx) = test_state(2);

        // Enter card 0 through the top half.
        let list = AppLayout::from_area(state.terminal_area).list_inner();
        let rects = card_rects(list, 2, 0.0);
        move_to(&mut state, &tx, 5.0, rects[0].top, t0);
        settle(&mut state, &tx, t0);
        assert_eq!(state.card_offsets[0], WrapPosition::Middle.offset_px());

        // Leave through the bottom half into card 1's top half.
        move_to(&mut state, &tx, 5.0, rects[1].top + 0.2, t0 + Duration::from_secs(2));
        settle(&mut state, &tx, t0 + Duration::from_secs(2));
        assert_eq!(state.card_offsets[0], WrapPosition::Bottom.offset_px());
        assert_eq!(state.card_offsets[1], WrapPosition::Middle.offset_px());
        assert_eq!(state.deck.active(), Some(1));
    }

    #[test]
    fn wheel_input_clamps_to_content() {
        let (mut state, _tx) = test_state(2);
        // Two cards fit comfortably: no scrolling possible.
        scroll_by(&mut state, 10.0);
        assert_eq!(state.scroll.offset_rows(), 0.0);
        assert!(!state.scroll.is_animating());
    }
}
