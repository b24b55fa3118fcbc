macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(
    /// Identifier of a captured stroke.
    StrokeId
);
id_newtype!(
    /// Identifier of a review comment.
    CommentId
);
id_newtype!(
    /// Identifier of a reply within a comment thread.
    ReplyId
);

/// Monotonic id source shared by strokes, comments and replies.
///
/// Ids start at 1. [`IdAllocator::observe`] moves the counter past externally supplied ids
/// (seeded state) so fresh ids never collide with them.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// Create an allocator starting at id 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Issue a fresh stroke id.
    pub fn stroke(&mut self) -> StrokeId {
        StrokeId(self.bump())
    }

    /// Issue a fresh comment id.
    pub fn comment(&mut self) -> CommentId {
        CommentId(self.bump())
    }

    /// Issue a fresh reply id.
    pub fn reply(&mut self) -> ReplyId {
        ReplyId(self.bump())
    }

    /// Ensure every id issued afterwards is strictly greater than `raw`.
    pub fn observe(&mut self, raw: u64) {
        if raw >= self.next {
            self.next = raw.saturating_add(1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
