//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling). Single-writer: every mutation happens on the main loop.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::geometry::Point;
use crate::core::hover::{HoverDeck, OFFSET_TOP};
use crate::core::preview::{ImageId, PreviewStack};
use crate::core::project::ProjectRecord;
use crate::core::scheduler::{FrameScheduler, IdleTimer};
use crate::core::tween::TweenEngine;
use crate::ui::preview_pane::ImageSlot;
use crate::ui::smooth_scroll::SmoothScroll;

/// Quiet time inside the list before the preview stack trims to one image.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Scale-in and fade-out duration for preview images.
pub const PREVIEW_SCALE_DURATION: Duration = Duration::from_millis(400);

/// Every animated property, one tween per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenKey {
    /// A card's wrapper offset, px.
    CardOffset(usize),
    /// A preview image's scale factor.
    PreviewScale(ImageId),
}

/// Top-level application state.
pub struct AppState {
    /// The ordered project list. Immutable after startup.
    pub records: Vec<ProjectRecord>,
    /// Hover state machine: active card, per-card targets.
    pub deck: HoverDeck,
    /// Current animated wrapper offset per card, px.
    pub card_offsets: Vec<f64>,
    /// The preview image stack.
    pub preview: PreviewStack,
    /// One live tween per animated property.
    pub tweens: TweenEngine<TweenKey>,
    /// Coalesces input bursts into one recompute per frame.
    pub scheduler: FrameScheduler,
    /// Keep-last trim trigger; re-armed on qualifying pointer moves.
    pub idle: IdleTimer,
    /// Scroll glide for the card list.
    pub scroll: SmoothScroll,
    /// Last reported pointer position, fractional cells.
    pub pointer: Point,
    /// Which card the pointer was inside after the last hit-test — the
    /// basis for synthesising enter/leave events from raw moves.
    pub hovered_card: Option<usize>,
    /// Decoded preview assets by card index.
    pub image_cache: HashMap<usize, ImageSlot>,
    /// Directory the preview assets live in.
    pub assets_dir: PathBuf,
    /// Terminal size as of the last draw, for layout-dependent handling.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// User-configurable keybindings and scroll feel.
    pub config: AppConfig,
}

impl AppState {
    pub fn new(records: Vec<ProjectRecord>, assets_dir: PathBuf, config: AppConfig) -> Self {
        let count = records.len();
        Self {
            records,
            deck: HoverDeck::new(count),
            card_offsets: vec![OFFSET_TOP; count],
            preview: PreviewStack::default(),
            tweens: TweenEngine::default(),
            scheduler: FrameScheduler::default(),
            idle: IdleTimer::new(IDLE_TIMEOUT),
            scroll: SmoothScroll::new(config.scroll_speed),
            pointer: Point::default(),
            hovered_card: None,
            image_cache: HashMap::new(),
            assets_dir,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            config,
        }
    }
}
