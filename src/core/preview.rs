//! The preview image stack.
//!
//! Every hover-enter pushes one image; newer images render on top of older
//! ones. Two cleanup paths exist and may overlap: the idle trim keeps only
//! the most recent image, the exit clear removes everything once the
//! pointer leaves the list bounds. Both fade an image to zero scale and
//! remove it when the fade completes. Removal is deduplicated by image id —
//! a completion for an id that already left the stack is a no-op, and an
//! image that is already fading is never re-faded.

/// Stable identity of one preview image, unique for the process lifetime.
pub type ImageId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub id: ImageId,
    /// Index of the card that spawned this image (0-based; asset files are
    /// numbered from 1).
    pub card: usize,
    /// Animated scale factor: 0.0 = invisible, 1.0 = full size.
    pub scale: f64,
    /// Set once a fade-out has been issued for this image.
    pub fading: bool,
}

/// Fade requests the caller turns into scale tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEffect {
    /// Animate the new image from its current scale (0.0) up to 1.0.
    ScaleIn(ImageId),
    /// Animate the image down to 0.0 and remove it on completion.
    FadeOut(ImageId),
}

#[derive(Debug, Default)]
pub struct PreviewStack {
    images: Vec<PreviewImage>,
    next_id: ImageId,
}

impl PreviewStack {
    /// Push a fresh image for `card` at scale zero.
    pub fn push(&mut self, card: usize) -> (ImageId, PreviewEffect) {
        let id = self.next_id;
        self.next_id += 1;
        self.images.push(PreviewImage { id, card, scale: 0.0, fading: false });
        (id, PreviewEffect::ScaleIn(id))
    }

    /// Idle policy: fade everything except the most recently pushed image.
    pub fn trim_to_last(&mut self) -> Vec<PreviewEffect> {
        let last = match self.images.last() {
            Some(img) => img.id,
            None => return Vec::new(),
        };
        self.fade_matching(|img| img.id != last)
    }

    /// Exit policy: fade every image.
    pub fn clear_all(&mut self) -> Vec<PreviewEffect> {
        self.fade_matching(|_| true)
    }

    fn fade_matching(&mut self, select: impl Fn(&PreviewImage) -> bool) -> Vec<PreviewEffect> {
        let mut effects = Vec::new();
        for img in &mut self.images {
            if img.fading || !select(img) {
                continue;
            }
            img.fading = true;
            effects.push(PreviewEffect::FadeOut(img.id));
        }
        effects
    }

    /// Apply an animated scale value.
    pub fn set_scale(&mut self, id: ImageId, scale: f64) {
        if let Some(img) = self.images.iter_mut().find(|img| img.id == id) {
            img.scale = scale;
        }
    }

    /// A scale tween finished. Fading images leave the stack here; the
    /// scale-in completion just pins the final value.
    pub fn finish_scale(&mut self, id: ImageId, scale: f64) {
        let Some(pos) = self.images.iter().position(|img| img.id == id) else {
            return; // already removed — overlapping cleanup paths
        };
        if self.images[pos].fading {
            self.images.remove(pos);
        } else {
            self.images[pos].scale = scale;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PreviewImage> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
