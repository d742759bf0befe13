//! Hover state machine for the card list.
//!
//! Each card owns a text wrapper three blocks tall behind a one-block
//! viewport; the wrapper's vertical offset selects which block shows. The
//! offset sits at one of three positions and every transition between them
//! is animated. [`HoverDeck`] owns all of the mutable interaction state —
//! pointer-derived enter/leave events and the per-frame containment check
//! feed it, and it answers with effect values the app layer turns into
//! tweens and preview pushes.
//!
//! At most one card is active at a time. The frame check re-measures every
//! box (they move under scroll) and is the defensive path: any non-active
//! card left out of bounds is forced back to its resting position, and a
//! stale active card is released the moment its box stops containing the
//! pointer.

use std::time::Duration;

use crate::core::geometry::{Point, RectF};

/// Wrapper travel per position, in px. One text block is 80 px tall, so
/// each step down the list reveals the next block.
pub const OFFSET_TOP: f64 = -160.0;
pub const OFFSET_MIDDLE: f64 = -80.0;
pub const OFFSET_BOTTOM: f64 = 0.0;

/// Enter/leave and activation transitions.
pub const MOVE_DURATION: Duration = Duration::from_millis(400);
/// The per-frame forced reset of non-active cards is slightly snappier.
pub const RESET_DURATION: Duration = Duration::from_millis(350);

/// The three discrete wrapper positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapPosition {
    Top,
    Middle,
    Bottom,
}

impl WrapPosition {
    pub fn offset_px(self) -> f64 {
        match self {
            WrapPosition::Top => OFFSET_TOP,
            WrapPosition::Middle => OFFSET_MIDDLE,
            WrapPosition::Bottom => OFFSET_BOTTOM,
        }
    }
}

/// Per-card interaction state.
#[derive(Debug, Clone)]
struct CardHover {
    /// Where the wrapper is headed (or already sits).
    target: WrapPosition,
    /// The position the card returns to when not hovered — remembered from
    /// the last exit direction.
    resting: WrapPosition,
}

impl Default for CardHover {
    fn default() -> Self {
        Self { target: WrapPosition::Top, resting: WrapPosition::Top }
    }
}

/// What the app layer must do in response to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEffect {
    /// Animate `card`'s wrapper offset to `to.offset_px()` over `duration`.
    Move {
        card: usize,
        to: WrapPosition,
        duration: Duration,
    },
    /// Push a preview image for `card` onto the stack.
    SpawnPreview { card: usize },
}

/// All hover/pointer interaction state, one instance per app.
#[derive(Debug)]
pub struct HoverDeck {
    cards: Vec<CardHover>,
    active: Option<usize>,
}

impl HoverDeck {
    pub fn new(card_count: usize) -> Self {
        Self {
            cards: vec![CardHover::default(); card_count],
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The pointer crossed into `card`'s box at `pointer`.
    ///
    /// A preview image spawns unconditionally. The wrapper moves to MIDDLE
    /// when the entry point is in the top half of the box or the card was
    /// resting at BOTTOM — entering from below a BOTTOM-resting card would
    /// otherwise leave the wrapper parked on the exit block.
    pub fn pointer_enter(&mut self, card: usize, pointer: Point, rect: RectF) -> Vec<HoverEffect> {
        self.active = Some(card);
        let mut effects = Vec::new();

        let entered_top = pointer.y < rect.center_y();
        let state = &mut self.cards[card];
        if (entered_top || state.resting == WrapPosition::Bottom)
            && state.target != WrapPosition::Middle
        {
            state.target = WrapPosition::Middle;
            effects.push(HoverEffect::Move {
                card,
                to: WrapPosition::Middle,
                duration: MOVE_DURATION,
            });
        }

        effects.push(HoverEffect::SpawnPreview { card });
        effects
    }

    /// The pointer left `card`'s box at `pointer`. The exit half decides the
    /// new resting position, which the card also animates to.
    pub fn pointer_leave(&mut self, card: usize, pointer: Point, rect: RectF) -> Vec<HoverEffect> {
        if self.active == Some(card) {
            self.active = None;
        }

        let resting = if pointer.y < rect.center_y() {
            WrapPosition::Top
        } else {
            WrapPosition::Bottom
        };

        let state = &mut self.cards[card];
        state.resting = resting;
        if state.target == resting {
            return Vec::new();
        }
        state.target = resting;
        vec![HoverEffect::Move { card, to: resting, duration: MOVE_DURATION }]
    }

    /// The coalesced per-frame pass. `rects` are the live boxes, one per
    /// card, already adjusted for scroll.
    ///
    /// Order matters: stale non-active cards are reset first, then a stale
    /// active card is released, and only then may a new card activate — so
    /// a single frame can hand the active role from one card to the next
    /// without ever holding two.
    pub fn frame_check(&mut self, pointer: Point, rects: &[RectF]) -> Vec<HoverEffect> {
        debug_assert_eq!(rects.len(), self.cards.len());
        let mut effects = Vec::new();

        // Non-active cards the pointer is not inside get pulled to the
        // resting position their midpoint dictates. This is what cleans up
        // after cursor movement too fast to deliver leave events.
        for (i, rect) in rects.iter().enumerate() {
            if self.active == Some(i) || rect.contains(pointer) {
                continue;
            }
            let resting = if pointer.y < rect.center_y() {
                WrapPosition::Top
            } else {
                WrapPosition::Bottom
            };
            let state = &mut self.cards[i];
            state.resting = resting;
            if state.target != resting {
                state.target = resting;
                effects.push(HoverEffect::Move {
                    card: i,
                    to: resting,
                    duration: RESET_DURATION,
                });
            }
        }

        // Release the active card once its (possibly scrolled) box no
        // longer contains the pointer.
        if let Some(card) = self.active {
            let rect = rects[card];
            if !rect.contains(pointer) {
                self.active = None;
                let resting = if pointer.y < rect.center_y() {
                    WrapPosition::Top
                } else {
                    WrapPosition::Bottom
                };
                let state = &mut self.cards[card];
                state.resting = resting;
                if state.target != resting {
                    state.target = resting;
                    effects.push(HoverEffect::Move {
                        card,
                        to: resting,
                        duration: MOVE_DURATION,
                    });
                }
            }
        }

        // With no active card, the first box containing the pointer (list
        // order) takes over. No preview spawns on this path — only real
        // enter events push images.
        if self.active.is_none() {
            for (i, rect) in rects.iter().enumerate() {
                if rect.contains(pointer) {
                    self.active = Some(i);
                    let state = &mut self.cards[i];
                    if state.target != WrapPosition::Middle {
                        state.target = WrapPosition::Middle;
                        effects.push(HoverEffect::Move {
                            card: i,
                            to: WrapPosition::Middle,
                            duration: MOVE_DURATION,
                        });
                    }
                    break;
                }
            }
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::card_rects;
    use pretty_assertions::assert_eq;

    fn deck_and_rects(count: usize) -> (HoverDeck, Vec<RectF>) {
        let list = RectF::new(0.0, 0.0, 40.0, 30.0);
        (HoverDeck::new(count), card_rects(list, count, 0.0))
    }

    fn moves(effects: &[HoverEffect]) -> Vec<(usize, WrapPosition)> {
        effects
            .iter()
            .filter_map(|e| match e {
                HoverEffect::Move { card, to, .. } => Some((*card, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn enter_from_top_half_moves_to_middle_and_spawns_preview() {
        let (mut deck, rects) = deck_and_rects(3);
        let effects = deck.pointer_enter(1, Point::new(5.0, rects[1].top + 0.5), rects[1]);
        assert_eq!(moves(&effects), vec![(1, WrapPosition::Middle)]);
        assert!(effects.contains(&HoverEffect::SpawnPreview { card: 1 }));
        assert_eq!(deck.active(), Some(1));
    }

    #[test]
    fn enter_from_bottom_half_spawns_preview_without_moving() {
        let (mut deck, rects) = deck_and_rects(3);
        // Resting is TOP by default, entry from the bottom half: the frame
        // check confirms containment later; the enter itself only spawns.
        let effects = deck.pointer_enter(0, Point::new(5.0, rects[0].bottom() - 0.2), rects[0]);
        assert_eq!(effects, vec![HoverEffect::SpawnPreview { card: 0 }]);
    }

    #[test]
    fn enter_from_bottom_half_while_resting_bottom_moves_to_middle() {
        let (mut deck, rects) = deck_and_rects(1);
        deck.pointer_enter(0, Point::new(5.0, rects[0].bottom() - 0.2), rects[0]);
        deck.pointer_leave(0, Point::new(5.0, rects[0].bottom() + 0.5), rects[0]);
        assert_eq!(deck.cards[0].target, WrapPosition::Bottom);

        let effects = deck.pointer_enter(0, Point::new(5.0, rects[0].bottom() - 0.2), rects[0]);
        assert_eq!(moves(&effects), vec![(0, WrapPosition::Middle)]);
    }

    #[test]
    fn leave_direction_sets_resting_position() {
        let (mut deck, rects) = deck_and_rects(2);

        deck.pointer_enter(0, Point::new(5.0, rects[0].top), rects[0]);
        deck.pointer_leave(0, Point::new(5.0, rects[0].top - 0.5), rects[0]);
        assert_eq!(deck.cards[0].target, WrapPosition::Top);
        assert_eq!(deck.active(), None);

        deck.pointer_enter(1, Point::new(5.0, rects[1].top), rects[1]);
        deck.pointer_leave(1, Point::new(5.0, rects[1].bottom() + 0.5), rects[1]);
        assert_eq!(deck.cards[1].target, WrapPosition::Bottom);
    }

    #[test]
    fn frame_check_outside_everything_leaves_no_active_card() {
        let (mut deck, rects) = deck_and_rects(3);
        deck.pointer_enter(0, Point::new(5.0, rects[0].top), rects[0]);

        let outside = Point::new(100.0, 100.0);
        deck.frame_check(outside, &rects);
        assert_eq!(deck.active(), None);
    }

    #[test]
    fn frame_check_activates_first_containing_card() {
        let (mut deck, rects) = deck_and_rects(3);
        let inside = Point::new(5.0, rects[2].top + 1.0);
        let effects = deck.frame_check(inside, &rects);
        assert_eq!(deck.active(), Some(2));
        assert!(moves(&effects).contains(&(2, WrapPosition::Middle)));
        // Activation via the frame check never spawns a preview.
        assert!(!effects.iter().any(|e| matches!(e, HoverEffect::SpawnPreview { .. })));
    }

    #[test]
    fn at_most_one_active_card_across_a_handoff() {
        let (mut deck, rects) = deck_and_rects(3);
        deck.frame_check(Point::new(5.0, rects[0].top + 1.0), &rects);
        assert_eq!(deck.active(), Some(0));

        // Pointer jumps straight into card 2 with no leave event.
        let effects = deck.frame_check(Point::new(5.0, rects[2].top + 1.0), &rects);
        assert_eq!(deck.active(), Some(2));
        // Card 0 was released and card 2 activated in the same frame.
        assert!(moves(&effects).contains(&(2, WrapPosition::Middle)));
    }

    #[test]
    fn frame_check_resets_stale_cards_by_midpoint() {
        let (mut deck, rects) = deck_and_rects(2);
        // Card 1 is mid-hover when the pointer teleports above everything.
        deck.pointer_enter(1, Point::new(5.0, rects[1].top), rects[1]);
        deck.cards[0].target = WrapPosition::Middle; // stale from a missed leave

        let above = Point::new(5.0, -10.0);
        let effects = deck.frame_check(above, &rects);
        // Both cards end up at TOP: pointer is above both midpoints.
        assert!(moves(&effects).contains(&(0, WrapPosition::Top)));
        assert!(moves(&effects).contains(&(1, WrapPosition::Top)));
        assert_eq!(deck.active(), None);
    }

    #[test]
    fn scrolled_rects_release_the_active_card() {
        let list = RectF::new(0.0, 0.0, 40.0, 30.0);
        let mut deck = HoverDeck::new(2);
        let rects = card_rects(list, 2, 0.0);
        let pointer = Point::new(5.0, rects[0].top + 1.0);
        deck.frame_check(pointer, &rects);
        assert_eq!(deck.active(), Some(0));

        // Scroll far enough that card 0's box slides off the pointer.
        let scrolled = card_rects(list, 2, 10.0);
        deck.frame_check(pointer, &scrolled);
        assert_ne!(deck.active(), Some(0));
    }

    #[test]
    fn single_card_scenario_enter_top_leave_bottom() {
        let (mut deck, rects) = deck_and_rects(1);
        let rect = rects[0];

        let enter = deck.pointer_enter(0, Point::new(5.0, rect.top + 0.2), rect);
        assert_eq!(moves(&enter), vec![(0, WrapPosition::Middle)]);
        assert_eq!(
            enter.iter().filter(|e| matches!(e, HoverEffect::SpawnPreview { .. })).count(),
            1
        );

        let leave = deck.pointer_leave(0, Point::new(5.0, rect.bottom() + 0.3), rect);
        assert_eq!(moves(&leave), vec![(0, WrapPosition::Bottom)]);
        assert_eq!(deck.active(), None);
    }
}
