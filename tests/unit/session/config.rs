use super::*;

#[test]
fn minimal_json_fills_defaults() {
    let json = r##"{
        "video_url": "https://media.example/shot_010.mp4",
        "item": { "identifier": "SH010" },
        "author": "dana"
    }"##;
    let cfg = ReviewConfig::from_reader(json.as_bytes()).unwrap();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.canvas, Canvas::default());
    assert_eq!(cfg.pen, PenStyle::default());
    assert_eq!(cfg.hover_hide_delay(), Duration::from_millis(1500));
    assert_eq!(cfg.item.due_date, None);
}

#[test]
fn partial_pen_keeps_other_defaults() {
    let json = r##"{
        "video_url": "v.mp4",
        "item": { "identifier": "SH010", "status": "wip" },
        "author": "dana",
        "pen": { "width": 8 }
    }"##;
    let cfg = ReviewConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.pen.width, 8.0);
    assert_eq!(cfg.pen.color, PenStyle::default().color);
    assert_eq!(cfg.item.status.as_deref(), Some("wip"));
}

#[test]
fn validation_rejects_missing_identity() {
    let mut cfg = ReviewConfig::new("v.mp4", "SH010", "dana");
    assert!(cfg.validate().is_ok());
    cfg.author = "  ".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = ReviewConfig::new("", "SH010", "dana");
    assert!(cfg.validate().is_err());
    cfg.video_url = "v.mp4".to_string();
    cfg.pen.width = 100.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ReviewConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, ReelmarkError::Serde(_)));
}

#[test]
fn seed_rederives_comment_timestamps() {
    let json = r##"{
        "comments": [{
            "id": 10,
            "author": "ana",
            "text": "flicker",
            "created_label": "2d ago",
            "completed": true,
            "replies": [{ "id": 11, "author": "bo", "text": "fixed", "created_label": "1d ago" }],
            "strokes": [
                { "id": 12, "path": [{"x": 0, "y": 0}, {"x": 4, "y": 4}], "color": "#ff0000", "width": 3, "timestamp": 9.5 },
                { "id": 13, "path": [{"x": 1, "y": 1}], "color": "#ff0000", "width": 3, "timestamp": 2.0 }
            ]
        }],
        "pending_strokes": [
            { "id": 20, "path": [{"x": 0, "y": 0}, {"x": 1, "y": 0}], "color": "#00ff00", "width": 2, "timestamp": 4.0 }
        ]
    }"##;
    let seed = ReviewSeed::from_reader(json.as_bytes()).unwrap();
    assert!(seed.validate().is_ok());
    assert_eq!(seed.max_raw_id(), 20);
    assert_eq!(
        seed.posted_ids().collect::<Vec<_>>(),
        vec![StrokeId(12), StrokeId(13)]
    );

    let comment = seed.comments[0].clone().into_comment();
    assert_eq!(comment.timestamps(), &[2.0, 9.5]);
    assert_eq!(comment.created_label(), "2d ago");
    assert!(comment.is_completed());
    assert_eq!(comment.replies().len(), 1);
}

#[test]
fn seed_rejects_bad_strokes() {
    let mut seed = ReviewSeed::default();
    seed.pending_strokes.push(Stroke {
        id: StrokeId(1),
        path: Vec::new(),
        color: crate::foundation::core::Rgba8::rgb(0, 0, 0),
        width: 2.0,
        timestamp: 0.0,
    });
    assert!(seed.validate().is_err());

    seed.pending_strokes[0].path.push(crate::foundation::core::Point::ZERO);
    seed.pending_strokes[0].timestamp = f64::NAN;
    assert!(seed.validate().is_err());
}

#[test]
fn from_path_reads_json_file() {
    let dir = std::path::PathBuf::from("target").join("config_from_path");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("review.json");
    std::fs::write(
        &path,
        r#"{ "video_url": "v.mp4", "item": { "identifier": "SH070" }, "author": "dana", "hover_hide_ms": 250 }"#,
    )
    .unwrap();

    let cfg = ReviewConfig::from_path(&path).unwrap();
    assert_eq!(cfg.item.identifier, "SH070");
    assert_eq!(cfg.hover_hide_delay(), Duration::from_millis(250));

    let missing = ReviewConfig::from_path(dir.join("missing.json")).unwrap_err();
    assert!(matches!(missing, ReelmarkError::Validation(_)));
}
