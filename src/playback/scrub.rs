use crate::playback::controller::PlaybackController;

/// Horizontal geometry of the progress bar in display coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressBar {
    /// Left edge in display pixels.
    pub left: f64,
    /// Width in display pixels.
    pub width: f64,
}

impl ProgressBar {
    /// Fractional position of `pointer_x` along the bar, clamped into `[0, 1]`.
    ///
    /// A degenerate bar maps every pointer to 0.
    pub fn fraction_at(&self, pointer_x: f64) -> f64 {
        if !self.width.is_finite() || self.width <= 0.0 || !pointer_x.is_finite() {
            return 0.0;
        }
        ((pointer_x - self.left) / self.width).clamp(0.0, 1.0)
    }
}

/// Press/drag/release seek gesture over a [`ProgressBar`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrubGesture {
    active: bool,
}

impl ScrubGesture {
    /// Whether a scrub is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start scrubbing and seek to the pointer position.
    pub fn begin(
        &mut self,
        bar: &ProgressBar,
        pointer_x: f64,
        playback: &mut PlaybackController,
    ) -> f64 {
        self.active = true;
        playback.seek_fraction(bar.fraction_at(pointer_x))
    }

    /// Follow the pointer while scrubbing. Returns the applied time, if any.
    pub fn update(
        &mut self,
        bar: &ProgressBar,
        pointer_x: f64,
        playback: &mut PlaybackController,
    ) -> Option<f64> {
        if !self.active {
            return None;
        }
        Some(playback.seek_fraction(bar.fraction_at(pointer_x)))
    }

    /// Release the gesture. No seek happens here: the last move already applied.
    pub fn end(&mut self) -> bool {
        std::mem::take(&mut self.active)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scrub.rs"]
mod tests;
