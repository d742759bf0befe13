//! A hover-reactive project showcase for the terminal.
//!
//! Run the binary to launch the card list; point it at a TOML file of
//! `[[project]]` tables to show your own entries, or run bare for the
//! built-in sample list.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    image_runtime::ImageUpdate,
    state::AppState,
};
use crate::ui::{
    card_list::CardList, layout::AppLayout, preview_pane::PreviewPane, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Hover-reactive project showcase")]
struct Cli {
    /// Project list (TOML, `[[project]]` tables). Omit for the sample list.
    projects: Option<PathBuf>,

    /// Directory holding `project-<n>.png` preview assets.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Frame rate for animations.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Scroll easing factor (overrides the config file).
    #[arg(long)]
    speed: Option<f64>,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── load data ─────────────────────────────────────────────
    let records = match &cli.projects {
        Some(path) => core::project::load_projects(path)
            .with_context(|| format!("loading project list from {}", path.display()))?,
        None => core::project::sample_projects(),
    };
    tracing::debug!("loaded {} project records", records.len());

    let mut user_config = config::AppConfig::load();
    if let Some(speed) = cli.speed {
        user_config.scroll_speed = speed.clamp(0.05, 0.95);
    }
    let mut state = AppState::new(records, cli.assets, user_config);
    if !state.assets_dir.is_dir() {
        state.status_message = Some(format!(
            "no assets at {} — previews show placeholders",
            state.assets_dir.display()
        ));
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader();
    let (img_tx, mut img_rx) = tokio::sync::mpsc::unbounded_channel::<ImageUpdate>();

    let fps = cli.fps.clamp(10, 120);
    let mut frames = tokio::time::interval(Duration::from_millis(1000 / fps as u64));
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        // ── draw first ─────────────────────────────────────────
        // The frame tick below mutates animation state; rendering before
        // handling input keeps the UI responsive under event bursts.
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            let list_block = Block::default()
                .title(" projects ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let cards = CardList::new(&state.records, &state.card_offsets)
                .scroll_rows(state.scroll.offset_rows())
                .block(list_block);
            frame.render_widget(cards, layout.list_area);

            let preview_block = Block::default()
                .title(" preview ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let preview = PreviewPane::new(&state.preview, &state.records, &state.image_cache)
                .block(preview_block);
            frame.render_widget(preview, layout.preview_area);

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => {
                        handler::handle_mouse(&mut state, m, &img_tx, Instant::now());
                    }
                    AppEvent::Resize(_, _) => handler::handle_resize(&mut state),
                }
            }

            Some(update) = img_rx.recv() => {
                // Batch-drain whatever else is queued so several decodes
                // landing together cost one redraw, not one each.
                handler::apply_image_update(&mut state, update);
                while let Ok(more) = img_rx.try_recv() {
                    handler::apply_image_update(&mut state, more);
                }
            }

            _ = frames.tick() => {
                handler::run_frame(&mut state, &img_tx, Instant::now());
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
