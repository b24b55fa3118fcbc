use super::*;

fn pen() -> DrawingCapture {
    let mut c = DrawingCapture::new(PenStyle::default());
    c.set_tool(Tool::Pen);
    c
}

#[test]
fn select_tool_ignores_pointer() {
    let mut c = DrawingCapture::new(PenStyle::default());
    assert!(!c.pointer_down(Point::new(1.0, 1.0)));
    assert!(!c.is_capturing());
    assert!(c.pointer_up(&mut IdAllocator::new(), 0.0).is_none());
}

#[test]
fn gesture_commits_stroke_with_style_and_time() {
    let mut ids = IdAllocator::new();
    let mut c = pen();
    c.pointer_down(Point::new(0.0, 0.0));
    c.pointer_move(Point::new(4.0, 4.0));
    c.pointer_move(Point::new(8.0, 2.0));
    let s = c.pointer_up(&mut ids, 12.5).unwrap();
    assert_eq!(s.path.len(), 3);
    assert_eq!(s.timestamp, 12.5);
    assert_eq!(s.color, PenStyle::default().color);
    assert_eq!(s.width, PenStyle::default().width);
    assert!(!c.is_capturing());
}

#[test]
fn press_release_without_move_is_discarded() {
    let mut ids = IdAllocator::new();
    let mut c = pen();
    c.pointer_down(Point::new(3.0, 3.0));
    assert!(c.pointer_up(&mut ids, 1.0).is_none());
    // No id was burned by the discarded gesture.
    assert_eq!(ids.stroke().0, 1);
}

#[test]
fn switching_tool_abandons_gesture() {
    let mut c = pen();
    c.pointer_down(Point::new(0.0, 0.0));
    c.pointer_move(Point::new(1.0, 1.0));
    assert!(c.set_tool(Tool::Select));
    assert!(c.in_progress().is_none());
    assert!(c.pointer_up(&mut IdAllocator::new(), 0.0).is_none());
}

#[test]
fn path_is_capped() {
    let mut c = pen();
    c.pointer_down(Point::ZERO);
    for i in 0..MAX_PATH_POINTS + 10 {
        c.pointer_move(Point::new(i as f64, 0.0));
    }
    assert_eq!(c.in_progress().unwrap().len(), MAX_PATH_POINTS);
}

#[test]
fn pen_width_bounds_are_enforced() {
    let mut c = pen();
    let mut style = PenStyle::default();
    style.width = 25.0;
    assert!(c.set_style(style).is_err());
    style.width = f64::NAN;
    assert!(c.set_style(style).is_err());
    style.width = MIN_STROKE_WIDTH;
    assert!(c.set_style(style).is_ok());
    assert_eq!(c.style().width, MIN_STROKE_WIDTH);
}

#[test]
fn tool_toggles() {
    assert_eq!(Tool::Select.toggled(), Tool::Pen);
    assert_eq!(Tool::Pen.toggled(), Tool::Select);
}
