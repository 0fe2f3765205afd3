//! Deferred task queue driven by an external clock.
//!
//! Tasks run in `(due_at, order)` order, so two tasks due at the same instant
//! run in the order they were scheduled.

use crate::Millis;

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    due_at: Millis,
    order: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_order: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_order: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run `delay_ms` after `now`
    pub fn schedule(&mut self, now: Millis, delay_ms: u64, task: T) {
        let order = self.next_order;
        self.next_order += 1;
        self.tasks.push(ScheduledTask {
            due_at: now.saturating_add(delay_ms),
            order,
            task,
        });
    }

    /// Remove and return the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: Millis) -> Option<T> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at <= now)
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(index, _)| index)?;
        Some(self.tasks.remove(index).task)
    }

    /// Earliest due time among pending tasks
    pub fn next_due(&self) -> Option<Millis> {
        self.tasks.iter().map(|task| task.due_at).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
