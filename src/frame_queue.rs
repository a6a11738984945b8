use std::collections::VecDeque;
use std::fmt;

use crate::error::{Error, Result};
use crate::frame::Frame;

/// Bounded reorder buffer between a detector running ahead and the tracker.
///
/// Slot `k` holds frame `next_index + k`. Frames are handed out strictly in
/// index order, a missing frame blocks until it arrives or is skipped.
pub struct FrameQueue {
    slots: VecDeque<Option<Frame>>,
    capacity: usize,
    next_index: u64,
    len: usize,
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("next_index", &self.next_index)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl FrameQueue {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::starting_at(0, capacity)
    }

    pub fn starting_at(next_index: u64, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig("frame queue capacity is zero".into()));
        }

        Ok(Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
            next_index,
            len: 0,
        })
    }

    pub fn push(&mut self, frame: Frame) -> Result<()> {
        if frame.index < self.next_index {
            return Err(Error::StaleFrame {
                index: frame.index,
                expected: self.next_index,
            });
        }

        let offset = frame.index - self.next_index;
        if offset >= self.capacity as u64 {
            return Err(Error::QueueFull {
                capacity: self.capacity,
            });
        }

        let offset = offset as usize;
        while self.slots.len() <= offset {
            self.slots.push_back(None);
        }

        let slot = &mut self.slots[offset];
        if slot.is_some() {
            return Err(Error::DuplicateFrame(frame.index));
        }

        *slot = Some(frame);
        self.len += 1;

        Ok(())
    }

    /// Next frame in index order, if it has arrived
    pub fn pop(&mut self) -> Option<Frame> {
        if !matches!(self.slots.front(), Some(Some(_))) {
            return None;
        }

        let frame = self.slots.pop_front().flatten()?;

        // u64::MAX is the last index there is
        self.next_index = self.next_index.saturating_add(1);
        self.len -= 1;

        Some(frame)
    }

    /// Gives up on every frame below `index`, returns how many queued frames
    /// were dropped
    pub fn skip_to(&mut self, index: u64) -> usize {
        if index <= self.next_index {
            return 0;
        }

        let count = (index - self.next_index).min(self.slots.len() as u64) as usize;
        let dropped = self.slots.drain(..count).flatten().count();

        self.len -= dropped;
        self.next_index = index;

        dropped
    }

    /// Moves past the missing frames in front of the first queued one,
    /// returns how many indexes were skipped
    pub fn skip_gap(&mut self) -> u64 {
        let gap = self.slots.iter().take_while(|s| s.is_none()).count();

        self.slots.drain(..gap);
        self.next_index += gap as u64;

        gap as u64
    }

    #[inline]
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
