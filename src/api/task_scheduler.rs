use std::hash::Hash;

use indexmap::IndexMap;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
struct Timer<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

/// Host-clocked scheduler for keyed delayed tasks and next-frame tasks.
///
/// Scheduling a key that is already pending replaces the earlier task
/// (last-write-wins). Frame tasks queued during [`TaskScheduler::advance_to`]
/// are held for the following frame.
#[derive(Debug, Clone)]
pub struct TaskScheduler<K, T> {
    now_ms: u64,
    seq: u64,
    timers: IndexMap<K, Timer<T>>,
    frame_queue: Vec<T>,
}

impl<K, T> Default for TaskScheduler<K, T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            seq: 0,
            timers: IndexMap::new(),
            frame_queue: Vec::new(),
        }
    }
}

impl<K, T> TaskScheduler<K, T>
where
    K: Eq + Hash + Copy + std::fmt::Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler whose clock resumes at `now_ms`, e.g. after a scene rebuild.
    #[must_use]
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    /// Clock value of the last frame.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Runs `task` once `after_ms` have elapsed, cancelling any pending task for `key`.
    pub fn schedule(&mut self, key: K, after_ms: u64, task: T) {
        self.seq += 1;
        let due_ms = self.now_ms.saturating_add(after_ms);
        let replaced = self
            .timers
            .insert(
                key,
                Timer {
                    due_ms,
                    seq: self.seq,
                    task,
                },
            )
            .is_some();
        trace!(?key, due_ms, replaced, "task scheduled");
    }

    pub fn cancel(&mut self, key: K) -> bool {
        self.timers.shift_remove(&key).is_some()
    }

    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.timers.contains_key(&key)
    }

    /// Queues `task` for the next frame.
    pub fn request_frame(&mut self, task: T) {
        self.frame_queue.push(task);
    }

    #[must_use]
    pub fn has_frame_tasks(&self) -> bool {
        !self.frame_queue.is_empty()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.values().map(|timer| timer.due_ms).min()
    }

    /// Advances the clock and returns the tasks to run, frame tasks first,
    /// then timers in due order.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.max(now_ms);
        let mut ready = std::mem::take(&mut self.frame_queue);

        let mut due: Vec<(K, u64, u64)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= self.now_ms)
            .map(|(key, timer)| (*key, timer.due_ms, timer.seq))
            .collect();
        due.sort_by_key(|&(_, due_ms, seq)| (due_ms, seq));
        for (key, _, _) in due {
            if let Some(timer) = self.timers.shift_remove(&key) {
                ready.push(timer.task);
            }
        }
        ready
    }

    pub fn clear(&mut self) {
        self.timers.clear();
        self.frame_queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::TaskScheduler;

    #[test]
    fn rescheduling_a_key_keeps_only_the_last_task() {
        let mut scheduler: TaskScheduler<&str, u32> = TaskScheduler::new();
        scheduler.schedule("rescale", 100, 1);
        scheduler.advance_to(50);
        scheduler.schedule("rescale", 100, 2);

        assert!(scheduler.advance_to(120).is_empty());
        assert_eq!(scheduler.advance_to(150), vec![2]);
        assert!(!scheduler.is_pending("rescale"));
    }

    #[test]
    fn frame_tasks_run_before_timers() {
        let mut scheduler: TaskScheduler<&str, u32> = TaskScheduler::new();
        scheduler.schedule("late", 10, 20);
        scheduler.schedule("early", 5, 10);
        scheduler.request_frame(1);

        assert_eq!(scheduler.advance_to(10), vec![1, 10, 20]);
    }
}
