use super::*;
use crate::annotation::model::Stroke;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::ids::StrokeId;

struct Fixture {
    log: CommentLog,
    composer: Composer,
    store: AnnotationStore,
    ids: IdAllocator,
}

impl Fixture {
    fn new() -> Self {
        Self {
            log: CommentLog::new(),
            composer: Composer::default(),
            store: AnnotationStore::new(),
            ids: IdAllocator::new(),
        }
    }

    fn draw(&mut self, timestamp: f64) -> StrokeId {
        let id = self.ids.stroke();
        self.store
            .insert(Stroke {
                id,
                path: vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)],
                color: Rgba8::rgb(255, 255, 255),
                width: 2.0,
                timestamp,
            })
            .unwrap();
        id
    }

    fn submit(&mut self, text: &str, now: f64) -> SubmitOutcome {
        self.composer.set_text(text);
        self.log.submit(
            &mut self.composer,
            &mut self.store,
            &mut self.ids,
            "reviewer",
            now,
        )
    }
}

#[test]
fn blank_text_is_ignored() {
    let mut f = Fixture::new();
    f.draw(1.0);
    assert_eq!(f.submit("   ", 0.0), SubmitOutcome::Ignored);
    assert!(f.log.is_empty());
    assert_eq!(f.store.pending_len(), 1);
}

#[test]
fn comment_takes_all_pending_strokes() {
    let mut f = Fixture::new();
    let a = f.draw(7.0);
    let b = f.draw(3.0);
    let SubmitOutcome::Commented(id) = f.submit(" needs fix ", 50.0) else {
        panic!("expected a comment");
    };
    let c = f.log.get(id).unwrap();
    assert_eq!(c.text(), "needs fix");
    assert_eq!(c.author(), "reviewer");
    assert_eq!(c.timestamps(), &[3.0, 7.0]);
    assert_eq!(c.primary_timestamp(), 3.0);
    assert_eq!(c.strokes().len(), 2);
    assert!(f.store.is_posted(a) && f.store.is_posted(b));
    assert_eq!(f.store.pending_len(), 0);
    assert_eq!(f.composer.text(), "");
}

#[test]
fn second_comment_does_not_repost_strokes() {
    let mut f = Fixture::new();
    f.draw(1.0);
    f.submit("first", 0.0);
    let SubmitOutcome::Commented(id) = f.submit("second", 9.0) else {
        panic!("expected a comment");
    };
    let c = f.log.get(id).unwrap();
    assert!(c.strokes().is_empty());
    assert_eq!(c.primary_timestamp(), 9.0);
}

#[test]
fn reply_appends_without_touching_store() {
    let mut f = Fixture::new();
    let SubmitOutcome::Commented(target) = f.submit("note", 0.0) else {
        panic!("expected a comment");
    };
    let pending = f.draw(4.0);

    f.composer.reply_to(target);
    let outcome = f.submit("ok", 0.0);
    let SubmitOutcome::Replied { comment, .. } = outcome else {
        panic!("expected a reply, got {outcome:?}");
    };
    assert_eq!(comment, target);
    assert_eq!(f.log.len(), 1);
    assert_eq!(f.log.get(target).unwrap().replies().len(), 1);
    assert_eq!(f.log.get(target).unwrap().replies()[0].created_label, "now");
    assert!(f.store.is_pending(pending));
    assert_eq!(f.composer.reply_target(), None);
    assert_eq!(f.composer.text(), "");
}

#[test]
fn missing_reply_target_keeps_text() {
    let mut f = Fixture::new();
    f.composer.reply_to(CommentId(404));
    assert_eq!(
        f.submit("hello?", 0.0),
        SubmitOutcome::MissingReplyTarget(CommentId(404))
    );
    assert_eq!(f.composer.text(), "hello?");
    assert_eq!(f.composer.reply_target(), None);
    assert!(f.log.is_empty());
}

#[test]
fn completion_toggles() {
    let mut f = Fixture::new();
    let SubmitOutcome::Commented(id) = f.submit("x", 0.0) else {
        panic!("expected a comment");
    };
    assert_eq!(f.log.toggle_completed(id), Some(true));
    assert_eq!(f.log.toggle_completed(id), Some(false));
    assert_eq!(f.log.toggle_completed(CommentId(999)), None);
}

#[test]
fn seeded_duplicates_are_rejected() {
    let mut log = CommentLog::new();
    let c = Comment::new(CommentId(1), "a", "b", Vec::new(), 0.0);
    log.insert_seeded(c.clone()).unwrap();
    assert!(log.insert_seeded(c).is_err());
}
