//! Pick task staging queue.

use std::collections::VecDeque;

use stockflow_core::{Sku, ValueObject};

/// One unit of picking work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickTask {
    pub sku: Sku,
    pub qty: u64,
}

impl PickTask {
    pub fn new(sku: Sku, qty: u64) -> Self {
        Self { sku, qty }
    }
}

impl ValueObject for PickTask {}

/// FIFO of pick tasks.
///
/// The fulfillment path enqueues and immediately dequeues, so it never holds
/// more than one task across a call.
#[derive(Debug, Clone, Default)]
pub struct PickTaskQueue {
    tasks: VecDeque<PickTask>,
}

impl PickTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, task: PickTask) {
        self.tasks.push_back(task);
    }

    pub fn dequeue(&mut self) -> Option<PickTask> {
        self.tasks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
