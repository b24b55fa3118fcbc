use super::*;

struct BlankBackend;

impl OverlayBackend for BlankBackend {
    fn render(&mut self, plan: &crate::render::plan::OverlayPlan) -> ReelmarkResult<FrameRGBA> {
        let len = (plan.canvas.width * plan.canvas.height * 4) as usize;
        let mut data = vec![0; len];
        if !plan.ops.is_empty() {
            data[3] = 255;
        }
        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data,
            premultiplied: true,
        })
    }
}

const SCRIPT: &str = r##"{
    "config": {
        "video_url": "v.mp4",
        "item": { "identifier": "SH020" },
        "author": "dana",
        "canvas": { "width": 64, "height": 36 }
    },
    "steps": [
        { "op": "metadata", "duration": 120 },
        { "op": "tool", "tool": "pen" },
        { "op": "seek", "t": 10 },
        { "op": "draw", "points": [{"x": 1, "y": 1}, {"x": 30, "y": 20}] },
        { "op": "draw", "points": [{"x": 5, "y": 5}, {"x": 6, "y": 30}] },
        { "op": "seek", "t": 90 },
        { "op": "pen", "color": "#00ff00" },
        { "op": "draw", "points": [{"x": 2, "y": 2}, {"x": 40, "y": 2}] },
        { "op": "key", "key": { "char": "z" }, "ctrl": true },
        { "op": "text", "text": "test" },
        { "op": "submit" },
        { "op": "scrub", "fractions": [0.0, 0.5, 0.25] },
        { "op": "render", "out": "at_30.png" },
        { "op": "seek", "t": 10.2 },
        { "op": "render", "out": "at_10.png" }
    ]
}"##;

#[test]
fn scenario_a_replays_to_single_comment() {
    let script = ReviewScript::from_reader(SCRIPT.as_bytes()).unwrap();
    assert_eq!(script.steps.len(), 15);
    let report = replay_script(&script, &mut BlankBackend).unwrap();

    assert_eq!(report.comments.len(), 1);
    let comment = &report.comments[0];
    assert_eq!(comment.text(), "test");
    assert_eq!(comment.timestamps(), &[10.0]);
    assert_eq!(comment.strokes().len(), 2);
    assert!(report.pending.is_empty());
    assert_eq!(report.playback.current_time, 10.2);

    assert_eq!(report.frames.len(), 2);
    assert_eq!(report.frames[0].out, "at_30.png");
    assert_eq!(report.frames[0].time, 30.0);
    assert_eq!(report.frames[0].frame.data[3], 0);
    assert_eq!(report.frames[1].frame.data[3], 255);

    assert_eq!(report.events.len(), 2);
    assert!(matches!(
        report.events[0],
        ReviewEvent::StrokesDeleted { .. }
    ));
    assert!(matches!(
        report.events[1],
        ReviewEvent::CommentCreated { .. }
    ));
    assert_eq!(report.markers.len(), 2);
}

#[test]
fn report_serializes_without_pixels() {
    let script = ReviewScript::from_reader(SCRIPT.as_bytes()).unwrap();
    let report = replay_script(&script, &mut BlankBackend).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["frames"][0]["out"], "at_30.png");
    assert!(json["frames"][0].get("frame").is_none());
    assert_eq!(json["events"][1]["type"], "comment_created");
    assert_eq!(json["filter"], "all");
}

#[test]
fn seeded_script_can_reply_and_complete() {
    let json = r##"{
        "config": { "video_url": "v.mp4", "item": { "identifier": "SH030" }, "author": "dana" },
        "seed": {
            "comments": [{ "id": 7, "author": "ana", "text": "earlier note", "created_label": "1d ago" }]
        },
        "steps": [
            { "op": "reply_to", "comment": 7 },
            { "op": "text", "text": "ok" },
            { "op": "submit" },
            { "op": "toggle_completed", "comment": 7 },
            { "op": "filter", "filter": "pending" }
        ]
    }"##;
    let script = ReviewScript::from_reader(json.as_bytes()).unwrap();
    let report = replay_script(&script, &mut BlankBackend).unwrap();

    assert_eq!(report.comments.len(), 1);
    assert_eq!(report.comments[0].replies().len(), 1);
    assert!(report.comments[0].is_completed());
    assert_eq!(report.filter, CommentFilter::Pending);
    assert!(report.visible.is_empty());
}

#[test]
fn unknown_reply_target_fails_the_replay() {
    let json = r##"{
        "config": { "video_url": "v.mp4", "item": { "identifier": "SH030" }, "author": "dana" },
        "steps": [ { "op": "reply_to", "comment": 3 } ]
    }"##;
    let script = ReviewScript::from_reader(json.as_bytes()).unwrap();
    let err = replay_script(&script, &mut BlankBackend).unwrap_err();
    assert!(matches!(err, ReelmarkError::Validation(_)));
}

#[test]
fn unknown_op_is_a_parse_error() {
    let json = r##"{
        "config": { "video_url": "v.mp4", "item": { "identifier": "SH030" }, "author": "dana" },
        "steps": [ { "op": "explode" } ]
    }"##;
    assert!(matches!(
        ReviewScript::from_reader(json.as_bytes()),
        Err(ReelmarkError::Serde(_))
    ));
}

#[test]
fn replay_stays_live_for_follow_up_frames() {
    let script = ReviewScript::from_reader(SCRIPT.as_bytes()).unwrap();
    let mut backend = BlankBackend;
    let mut replay = Replay::run(&script, &mut backend).unwrap();
    assert_eq!(replay.frames().len(), 2);

    replay.session_mut().seek(90.0);
    let frame = replay.session_mut().render(&mut backend).unwrap();
    assert_eq!(frame.data[3], 0);
    assert_eq!(replay.session().playback().current_time, 90.0);
}
