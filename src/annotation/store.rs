use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::annotation::model::Stroke;
use crate::foundation::error::{ReelmarkError, ReelmarkResult};
use crate::foundation::ids::StrokeId;

/// Stroke log partitioned into pending and posted strokes.
///
/// `strokes` keeps global insertion order (render order). `pending` indexes the strokes not yet
/// attached to a comment, also in insertion order, so undo is a pop from its tail. `posted` only
/// ever grows.
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    strokes: IndexMap<StrokeId, Stroke>,
    pending: IndexSet<StrokeId>,
    posted: HashSet<StrokeId>,
}

impl AnnotationStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly captured stroke as pending.
    pub fn insert(&mut self, stroke: Stroke) -> ReelmarkResult<()> {
        if self.strokes.contains_key(&stroke.id) || self.posted.contains(&stroke.id) {
            return Err(ReelmarkError::validation(format!(
                "stroke id {} already exists",
                stroke.id
            )));
        }
        self.pending.insert(stroke.id);
        self.strokes.insert(stroke.id, stroke);
        Ok(())
    }

    /// Load persisted strokes. Strokes whose id is in `posted` are loaded as posted.
    pub fn seed(
        &mut self,
        strokes: impl IntoIterator<Item = Stroke>,
        posted: impl IntoIterator<Item = StrokeId>,
    ) -> ReelmarkResult<()> {
        self.mark_posted(posted);
        for stroke in strokes {
            let id = stroke.id;
            if self.strokes.contains_key(&id) {
                return Err(ReelmarkError::validation(format!(
                    "stroke id {id} already exists"
                )));
            }
            if !self.posted.contains(&id) {
                self.pending.insert(id);
            }
            self.strokes.insert(id, stroke);
        }
        Ok(())
    }

    /// Remove the most recently inserted pending stroke.
    pub fn undo(&mut self) -> Option<Stroke> {
        let id = self.pending.pop()?;
        self.strokes.shift_remove(&id)
    }

    /// Remove every pending stroke, returning them in insertion order.
    pub fn clear(&mut self) -> Vec<Stroke> {
        let ids: Vec<StrokeId> = self.pending.drain(..).collect();
        ids.into_iter()
            .filter_map(|id| self.strokes.shift_remove(&id))
            .collect()
    }

    /// Remove one pending stroke. Posted or unknown ids are left alone.
    pub fn remove_pending(&mut self, id: StrokeId) -> Option<Stroke> {
        if !self.pending.shift_remove(&id) {
            return None;
        }
        self.strokes.shift_remove(&id)
    }

    /// Permanently move `ids` into the posted partition.
    pub fn mark_posted(&mut self, ids: impl IntoIterator<Item = StrokeId>) {
        for id in ids {
            self.pending.shift_remove(&id);
            self.posted.insert(id);
        }
    }

    /// Clone the current pending strokes in insertion order.
    pub fn pending_snapshot(&self) -> Vec<Stroke> {
        self.pending_strokes().cloned().collect()
    }

    /// Pending strokes in insertion order.
    pub fn pending_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.pending.iter().filter_map(|id| self.strokes.get(id))
    }

    /// Every stroke in insertion order.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.values()
    }

    /// Look up a stroke by id.
    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(&id)
    }

    /// Whether `id` has been posted.
    pub fn is_posted(&self, id: StrokeId) -> bool {
        self.posted.contains(&id)
    }

    /// Whether `id` is a pending stroke.
    pub fn is_pending(&self, id: StrokeId) -> bool {
        self.pending.contains(&id)
    }

    /// Posted ids.
    pub fn posted_ids(&self) -> &HashSet<StrokeId> {
        &self.posted
    }

    /// Total number of strokes held.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Whether the store holds no strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Number of pending strokes.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/store.rs"]
mod tests;
