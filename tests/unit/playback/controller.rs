use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Play,
    Pause,
    Position(f64),
    Volume(f64),
    Looping(bool),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Call>>>);

impl MediaTransport for Recorder {
    fn play(&mut self) {
        self.0.borrow_mut().push(Call::Play);
    }
    fn pause(&mut self) {
        self.0.borrow_mut().push(Call::Pause);
    }
    fn set_position(&mut self, t: f64) {
        self.0.borrow_mut().push(Call::Position(t));
    }
    fn set_volume(&mut self, volume: f64) {
        self.0.borrow_mut().push(Call::Volume(volume));
    }
    fn set_looping(&mut self, looping: bool) {
        self.0.borrow_mut().push(Call::Looping(looping));
    }
}

fn loaded(duration: f64) -> PlaybackController {
    let mut c = PlaybackController::new();
    c.on_metadata_loaded(duration);
    c
}

#[test]
fn seek_clamps_into_duration() {
    let mut c = loaded(120.0);
    assert_eq!(c.seek(-5.0), 0.0);
    assert_eq!(c.seek(500.0), 120.0);
    assert_eq!(c.seek(33.5), 33.5);
    assert_eq!(c.current_time(), 33.5);
}

#[test]
fn seek_before_metadata_stays_at_zero() {
    let mut c = PlaybackController::new();
    assert_eq!(c.seek(10.0), 0.0);
    assert_eq!(c.state().progress_percent(), 0.0);
    assert_eq!(c.state().current_label(), "00:00");
}

#[test]
fn seek_fraction_matches_clamped_product() {
    let mut c = loaded(80.0);
    for p in [-0.5, 0.0, 0.25, 1.0, 1.7] {
        let applied = c.seek_fraction(p);
        assert_eq!(applied, (p * 80.0_f64).clamp(0.0, 80.0));
    }
}

#[test]
fn volume_is_clamped() {
    let mut c = PlaybackController::new();
    c.set_volume(1.5);
    assert_eq!(c.state().volume, 1.0);
    c.set_volume(-0.2);
    assert_eq!(c.state().volume, 0.0);
}

#[test]
fn mute_restores_previous_volume() {
    let mut c = PlaybackController::new();
    c.set_volume(0.4);
    c.toggle_mute();
    assert!(c.is_muted());
    c.toggle_mute();
    assert_eq!(c.state().volume, 0.4);
}

#[test]
fn unmute_without_memory_goes_full_volume() {
    let mut c = PlaybackController::new();
    c.set_volume(0.0);
    c.toggle_mute();
    assert_eq!(c.state().volume, 1.0);
}

#[test]
fn commands_reach_attached_transport_only() {
    let rec = Recorder::default();
    let mut c = loaded(10.0);
    c.play();
    c.attach(Box::new(rec.clone()));
    rec.0.borrow_mut().clear();

    c.toggle_play_pause();
    c.seek(4.0);
    c.toggle_loop();
    assert_eq!(
        *rec.0.borrow(),
        vec![Call::Pause, Call::Position(4.0), Call::Looping(true)]
    );

    assert!(c.detach().is_some());
    c.seek(2.0);
    assert_eq!(rec.0.borrow().len(), 3);
    assert_eq!(c.current_time(), 2.0);
}

#[test]
fn attach_syncs_existing_state() {
    let rec = Recorder::default();
    let mut c = loaded(10.0);
    c.seek(3.0);
    c.attach(Box::new(rec.clone()));
    assert_eq!(
        *rec.0.borrow(),
        vec![
            Call::Position(3.0),
            Call::Volume(1.0),
            Call::Looping(false),
            Call::Pause
        ]
    );
}

#[test]
fn invalid_metadata_is_ignored() {
    let mut c = loaded(30.0);
    c.on_metadata_loaded(f64::NAN);
    c.on_metadata_loaded(-1.0);
    assert_eq!(c.duration(), 30.0);
}

#[test]
fn shorter_metadata_reclamps_time() {
    let mut c = loaded(30.0);
    c.seek(25.0);
    c.on_metadata_loaded(20.0);
    assert_eq!(c.current_time(), 20.0);
}

#[test]
fn ended_loops_or_stops() {
    let mut c = loaded(10.0);
    c.play();
    c.on_time_update(10.0);
    c.on_ended();
    assert!(!c.state().is_playing);
    assert_eq!(c.current_time(), 10.0);

    c.toggle_loop();
    c.play();
    c.on_ended();
    assert!(c.state().is_playing);
    assert_eq!(c.current_time(), 0.0);
}
