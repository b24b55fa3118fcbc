use crate::foundation::core::{clamp_time, format_timecode, time_ratio};

/// Host-side media element driven by the [`PlaybackController`].
///
/// The controller stays authoritative for [`PlaybackState`]; a transport only mirrors the
/// commands it receives. Implementations must not call back into the controller.
pub trait MediaTransport {
    /// Start playback.
    fn play(&mut self);
    /// Pause playback.
    fn pause(&mut self);
    /// Move the media position, in seconds.
    fn set_position(&mut self, t: f64);
    /// Set output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
    /// Enable or disable looping.
    fn set_looping(&mut self, looping: bool);
}

/// Transport state for a single media source.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackState {
    /// Current playback time in seconds, within `[0, duration]`.
    pub current_time: f64,
    /// Media duration in seconds; 0 until metadata is known.
    pub duration: f64,
    /// Whether media is playing.
    pub is_playing: bool,
    /// Output volume in `[0, 1]`.
    pub volume: f64,
    /// Whether playback restarts at the end.
    pub is_looping: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            is_playing: false,
            volume: 1.0,
            is_looping: false,
        }
    }
}

impl PlaybackState {
    /// Playback progress in percent, 0 while the duration is unknown.
    pub fn progress_percent(&self) -> f64 {
        time_ratio(self.current_time, self.duration) * 100.0
    }

    /// `MM:SS` label for the current time.
    pub fn current_label(&self) -> String {
        format_timecode(self.current_time)
    }

    /// `MM:SS` label for the duration.
    pub fn duration_label(&self) -> String {
        format_timecode(self.duration)
    }

    /// Whether the media duration has been reported.
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }
}

/// Owner of the transport state and of the attached media handle.
#[derive(Default)]
pub struct PlaybackController {
    state: PlaybackState,
    premute_volume: Option<f64>,
    transport: Option<Box<dyn MediaTransport>>,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("premute_volume", &self.premute_volume)
            .field("transport_attached", &self.transport.is_some())
            .finish()
    }
}

impl PlaybackController {
    /// Controller with default state and no transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current transport state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Current playback time in seconds.
    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    /// Media duration in seconds (0 when unknown).
    pub fn duration(&self) -> f64 {
        self.state.duration
    }

    /// Attach the media handle and push the current state into it.
    pub fn attach(&mut self, mut transport: Box<dyn MediaTransport>) {
        transport.set_position(self.state.current_time);
        transport.set_volume(self.state.volume);
        transport.set_looping(self.state.is_looping);
        if self.state.is_playing {
            transport.play();
        } else {
            transport.pause();
        }
        self.transport = Some(transport);
    }

    /// Release the media handle. Playback is paused since nothing drives time anymore.
    pub fn detach(&mut self) -> Option<Box<dyn MediaTransport>> {
        self.state.is_playing = false;
        self.transport.take()
    }

    /// Whether a media handle is attached.
    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    fn with_transport(&mut self, f: impl FnOnce(&mut dyn MediaTransport)) {
        if let Some(t) = self.transport.as_deref_mut() {
            f(t);
        }
    }

    /// Toggle between playing and paused.
    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Start playback.
    pub fn play(&mut self) {
        self.state.is_playing = true;
        self.with_transport(|t| t.play());
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.state.is_playing = false;
        self.with_transport(|t| t.pause());
    }

    /// Seek to `t`, clamped into `[0, duration]`. Returns the applied time.
    pub fn seek(&mut self, t: f64) -> f64 {
        let t = clamp_time(t, self.state.duration);
        self.state.current_time = t;
        self.with_transport(|tr| tr.set_position(t));
        t
    }

    /// Seek to a fraction of the duration, clamped into `[0, 1]`.
    pub fn seek_fraction(&mut self, p: f64) -> f64 {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        self.seek(p * self.state.duration)
    }

    /// Set the volume, clamped into `[0, 1]`. An explicit change cancels any pending unmute.
    pub fn set_volume(&mut self, v: f64) {
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        self.state.volume = v;
        self.premute_volume = None;
        self.with_transport(|t| t.set_volume(v));
    }

    /// Mute when audible (remembering the volume), otherwise restore it.
    pub fn toggle_mute(&mut self) {
        let next = if self.state.volume > 0.0 {
            self.premute_volume = Some(self.state.volume);
            0.0
        } else {
            self.premute_volume.take().unwrap_or(1.0)
        };
        self.state.volume = next;
        self.with_transport(|t| t.set_volume(next));
    }

    /// Whether the output is currently silent.
    pub fn is_muted(&self) -> bool {
        self.state.volume == 0.0
    }

    /// Toggle looping.
    pub fn toggle_loop(&mut self) {
        let looping = !self.state.is_looping;
        self.state.is_looping = looping;
        self.with_transport(|t| t.set_looping(looping));
    }

    /// Media reported its duration. Invalid values are ignored.
    pub fn on_metadata_loaded(&mut self, duration: f64) {
        if !duration.is_finite() || duration < 0.0 {
            tracing::warn!(duration, "ignoring invalid media duration");
            return;
        }
        self.state.duration = duration;
        self.state.current_time = clamp_time(self.state.current_time, duration);
    }

    /// Media reported a new playback position.
    pub fn on_time_update(&mut self, t: f64) {
        self.state.current_time = clamp_time(t, self.state.duration);
    }

    /// Media reached its end.
    pub fn on_ended(&mut self) {
        if self.state.is_looping {
            self.seek(0.0);
            self.play();
        } else {
            self.state.current_time = self.state.duration;
            self.pause();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
