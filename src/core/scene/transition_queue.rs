//=========================================================================
// Transition Queue
//=========================================================================
//
// Scene switch requests issued by scenes while they run.
//
// A scene cannot switch itself out while the manager is calling into it,
// so `GlobalContext::set_scene` records the target here; the manager
// applies the queue as soon as the hook returns.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== Transition Queue ====================================================

/// FIFO of requested scene keys.
#[derive(Debug)]
pub struct TransitionQueue<S: SceneKey> {
    queue: Vec<S>,
}

impl<S: SceneKey> TransitionQueue<S> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Requests a switch to `key`.
    pub fn push(&mut self, key: S) {
        self.queue.push(key);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all requests in the order they were made, leaving it empty.
    pub fn take(&mut self) -> Vec<S> {
        std::mem::take(&mut self.queue)
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
