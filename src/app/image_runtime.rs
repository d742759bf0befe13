//! Background preview-image decoding.
//!
//! Assets are decoded off-thread the first time a card is hovered and the
//! result lands back in the main loop over a channel. A decode failure is a
//! value, not an error path — the card keeps its placeholder and the file
//! is never retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

/// Result of one background decode.
#[derive(Debug)]
pub struct ImageUpdate {
    pub card: usize,
    pub result: Result<Arc<image::RgbaImage>, image::ImageError>,
}

/// Asset path for a card: `<assets>/project-<n>.png`, numbered from 1.
pub fn asset_path(assets_dir: &Path, card: usize) -> PathBuf {
    assets_dir.join(format!("project-{}.png", card + 1))
}

/// Decode `card`'s asset on a background thread and send the result.
pub fn spawn_decode(tx: mpsc::UnboundedSender<ImageUpdate>, assets_dir: &Path, card: usize) {
    let path = asset_path(assets_dir, card);
    std::thread::spawn(move || {
        let result = image::open(&path).map(|img| Arc::new(img.into_rgba8()));
        if let Err(ref err) = result {
            tracing::debug!("preview decode failed: {} ({err})", path.display());
        }
        let _ = tx.send(ImageUpdate { card, result });
    });
}
