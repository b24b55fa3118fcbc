use super::*;
use crate::annotation::model::Stroke;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::ids::StrokeId;

fn comment(id: u64, completed: bool) -> Comment {
    Comment::new(CommentId(id), "ana", format!("c{id}"), Vec::new(), 0.0).with_completed(completed)
}

#[test]
fn filters_by_completion() {
    let comments = [comment(1, false), comment(2, true), comment(3, false)];
    let ids = |f: CommentFilter| -> Vec<u64> {
        filter_comments(&comments, f).map(|c| c.id().0).collect()
    };
    assert_eq!(ids(CommentFilter::All), vec![1, 2, 3]);
    assert_eq!(ids(CommentFilter::Pending), vec![1, 3]);
    assert_eq!(ids(CommentFilter::Completed), vec![2]);
}

#[test]
fn filter_parses_known_names_only() {
    for name in ["all", "pending", "completed"] {
        let f: CommentFilter = name.parse().unwrap();
        assert_eq!(f.as_str(), name);
    }
    let err = "done".parse::<CommentFilter>().unwrap_err();
    assert!(err.to_string().contains("Must be one of"));
}

#[test]
fn chips_follow_distinct_timestamps() {
    let stroke = |id: u64, t: f64| Stroke {
        id: StrokeId(id),
        path: vec![Point::ZERO, Point::new(1.0, 1.0)],
        color: Rgba8::rgb(0, 0, 0),
        width: 1.0,
        timestamp: t,
    };
    let c = Comment::new(
        CommentId(7),
        "ana",
        "x",
        vec![stroke(1, 75.0), stroke(2, 4.0), stroke(3, 75.0)],
        0.0,
    );
    let chips = timestamp_chips(&c);
    let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["00:04", "01:15"]);
    assert!(chips.iter().all(|chip| chip.comment == CommentId(7)));
}
