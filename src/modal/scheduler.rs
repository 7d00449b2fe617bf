use std::collections::VecDeque;

/// Queue of work deferred until the current synchronous turn has finished.
///
/// Tasks run in the order they were scheduled. `take_ready` hands out only the
/// tasks queued before the call; anything scheduled while those run waits for
/// the next tick.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: VecDeque<T>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn defer(&mut self, task: T) {
        self.queue.push_back(task);
    }

    pub fn take_ready(&mut self) -> Vec<T> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
