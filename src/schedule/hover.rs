use std::collections::HashMap;
use std::time::Duration;

use crate::schedule::timer::{TaskId, TaskScheduler};

/// UI elements that hide themselves a moment after the pointer leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverTarget {
    /// Player transport controls.
    Controls,
    /// Drawing tool / color menu.
    ToolMenu,
}

/// Delayed auto-hide for hover-revealed UI.
///
/// Leaving a target schedules its hide; re-entering cancels that hide. Each target owns at most
/// one scheduled task.
#[derive(Clone, Debug)]
pub struct AutoHide {
    delay: Duration,
    scheduler: TaskScheduler<HoverTarget>,
    pending: HashMap<HoverTarget, TaskId>,
    visible: HashMap<HoverTarget, bool>,
}

impl AutoHide {
    /// Auto-hide with the given delay; every target starts hidden.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduler: TaskScheduler::new(),
            pending: HashMap::new(),
            visible: HashMap::new(),
        }
    }

    /// Whether `target` is currently shown.
    pub fn is_visible(&self, target: HoverTarget) -> bool {
        self.visible.get(&target).copied().unwrap_or(false)
    }

    /// Whether a hide is scheduled for `target`.
    pub fn hide_pending(&self, target: HoverTarget) -> bool {
        self.pending.contains_key(&target)
    }

    /// Pointer entered `target`: show it and cancel its scheduled hide.
    pub fn enter(&mut self, target: HoverTarget) {
        if let Some(id) = self.pending.remove(&target) {
            self.scheduler.cancel(id);
        }
        self.visible.insert(target, true);
    }

    /// Pointer left `target`: schedule its hide, replacing any earlier one.
    pub fn leave(&mut self, target: HoverTarget, now: Duration) {
        if let Some(id) = self.pending.remove(&target) {
            self.scheduler.cancel(id);
        }
        let id = self.scheduler.schedule(now, self.delay, target);
        self.pending.insert(target, id);
    }

    /// Hide a target immediately and drop its scheduled task (element torn down).
    pub fn dismiss(&mut self, target: HoverTarget) {
        if let Some(id) = self.pending.remove(&target) {
            self.scheduler.cancel(id);
        }
        self.visible.insert(target, false);
    }

    /// Fire due hides. Returns the targets that were hidden.
    pub fn tick(&mut self, now: Duration) -> Vec<HoverTarget> {
        let mut hidden = Vec::new();
        for (id, target) in self.scheduler.fire_due(now) {
            if self.pending.get(&target) == Some(&id) {
                self.pending.remove(&target);
                self.visible.insert(target, false);
                hidden.push(target);
            }
        }
        hidden
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/hover.rs"]
mod tests;
