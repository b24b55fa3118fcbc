use std::collections::BTreeMap;
use std::time::Duration;

/// Handle of a scheduled task, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct Scheduled<T> {
    deadline: Duration,
    payload: T,
}

/// Single-threaded one-shot task queue driven by a host-supplied monotonic clock.
///
/// Every task is individually cancellable; a cancelled task never fires.
#[derive(Clone, Debug)]
pub struct TaskScheduler<T> {
    next_id: u64,
    tasks: BTreeMap<TaskId, Scheduled<T>>,
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: BTreeMap::new(),
        }
    }
}

impl<T> TaskScheduler<T> {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire at `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            Scheduled {
                deadline: now.saturating_add(delay),
                payload,
            },
        );
        id
    }

    /// Cancel a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Number of waiting tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.values().map(|t| t.deadline).min()
    }

    /// Remove and return every task due at `now`, ordered by deadline then scheduling order.
    pub fn fire_due(&mut self, now: Duration) -> Vec<(TaskId, T)> {
        let due: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, _)| *id)
            .collect();
        let mut fired: Vec<(Duration, TaskId, T)> = due
            .into_iter()
            .filter_map(|id| self.tasks.remove(&id).map(|t| (t.deadline, id, t.payload)))
            .collect();
        fired.sort_by_key(|(deadline, id, _)| (*deadline, *id));
        fired.into_iter().map(|(_, id, p)| (id, p)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timer.rs"]
mod tests;
