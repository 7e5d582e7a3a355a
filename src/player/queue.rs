use std::collections::VecDeque;

use rand::{Rng, rng};

use crate::player::track::TrackRef;

pub struct TrackQueue {
    entries: VecDeque<TrackRef>,
    shuffle: bool,
}

impl TrackQueue {
    pub fn new(shuffle: bool) -> Self {
        Self {
            entries: VecDeque::new(),
            shuffle,
        }
    }

    pub fn enqueue(&mut self, reference: TrackRef) {
        self.entries.push_back(reference);
    }

    // Sequential order consumes the reference; shuffle rotates it back to
    // the tail so the queue keeps playing indefinitely.
    pub fn next(&mut self) -> Option<TrackRef> {
        if !self.shuffle {
            return self.entries.pop_front();
        }
        if self.entries.is_empty() {
            return None;
        }
        let index = rng().random_range(0..self.entries.len());
        let picked = self.entries.remove(index)?;
        self.entries.push_back(picked.clone());
        Some(picked)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn snapshot(&self) -> Vec<TrackRef> {
        self.entries.iter().cloned().collect()
    }

    pub fn restore(&mut self, entries: impl IntoIterator<Item = TrackRef>) {
        self.entries = entries.into_iter().collect();
    }
}
