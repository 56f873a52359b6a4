use std::collections::VecDeque;

use crate::frame::Frame;

/// An event tagged with the frame it happened in.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    pub frame_index: u64,
    pub event: E,
}

/// Frame-stamped trace of session events.
///
/// A page session can run for hours, so the bus keeps at most `capacity`
/// events and drops the oldest first.
#[derive(Debug)]
pub struct EventBus<E> {
    events: VecDeque<Stamped<E>>,
    capacity: usize,
    dropped: u64,
}

impl<E> EventBus<E> {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            dropped: 0,
        }
    }

    pub fn emit(&mut self, frame: Frame, event: E) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(Stamped {
            frame_index: frame.index,
            event,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stamped<E>> + '_ {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events evicted because the bus was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn drain(&mut self) -> Vec<Stamped<E>> {
        self.events.drain(..).collect()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
