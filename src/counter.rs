use crate::association::{check_inputs, Associator};
use crate::config::CounterConfig;
use crate::error::Result;
use crate::frame::Frame;
use crate::table::TrackTable;

/// Counts vehicles over one video session.
///
/// Owns the track table between frames and accumulates the number of tracks
/// started per sampled frame.
#[derive(Debug, Clone)]
pub struct Counter {
    stride: u64,
    associator: Associator,
    table: Option<TrackTable>,
    total: u64,
}

impl Counter {
    pub fn new(config: CounterConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            stride: config.stride,
            associator: Associator::new(config.tracker)?,
            table: None,
            total: 0,
        })
    }

    #[inline]
    pub fn is_sampled(&self, index: u64) -> bool {
        index == 0 || index % self.stride == self.stride - 1
    }

    /// Tracks one frame. Returns the number of new vehicles, or `None` when
    /// the frame is skipped by the sampling stride.
    pub fn update(&mut self, frame: &Frame) -> Result<Option<usize>> {
        if !self.is_sampled(frame.index) {
            return Ok(None);
        }

        // keep the current table on bad input
        check_inputs(&frame.boxes, frame.height)?;

        let previous = self.table.take();
        let (table, new) = self
            .associator
            .step(&frame.boxes, frame.height, previous)?;

        self.total += new as u64;

        log::debug!(
            "frame {}: {} detections, {} new, {} on screen, {} total",
            frame.index,
            frame.len(),
            new,
            table.len(),
            self.total
        );

        self.table = Some(table);

        Ok(Some(new))
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Vehicles currently tracked
    #[inline]
    pub fn current(&self) -> usize {
        self.table.as_ref().map_or(0, TrackTable::len)
    }

    #[inline]
    pub fn tracks(&self) -> Option<&TrackTable> {
        self.table.as_ref()
    }

    /// Drops the tracks, the next sampled frame starts over with fresh ids.
    /// The total is kept.
    pub fn reset(&mut self) {
        self.table = None;
    }

    pub fn clear(&mut self) {
        self.table = None;
        self.total = 0;
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            stride: 1,
            associator: Associator::default(),
            table: None,
            total: 0,
        }
    }
}
