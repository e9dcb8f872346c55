//=========================================================================
// Input Buffer
//=========================================================================
//
// Holds the input gathered between two redraws.
//
// - discrete: keys and buttons in arrival order, consecutive repeats
//   (OS key repeat) collapsed
// - continuous: one slot per kind (cursor position), latest wins
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    /// Stores a continuous event, replacing any previous one of its kind.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Appends a discrete event unless it repeats the previous one.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Takes everything buffered, or `None` if nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    /// Puts back a batch the frame loop could not take yet.
    ///
    /// Restored discrete events go before anything buffered since; a newer
    /// continuous event of the same kind wins over the restored one.
    pub(crate) fn restore(&mut self, discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) {
        let newer = std::mem::replace(&mut self.discrete, discrete);
        for event in newer {
            self.push_discrete(event);
        }

        for event in continuous {
            if !self.continuous.contains(&event) {
                self.continuous.insert(event);
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
