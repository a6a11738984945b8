pub mod association;
pub mod bbox;
pub mod config;
pub mod counter;
pub mod error;
pub mod frame;
pub mod frame_queue;
pub mod geometry;
pub mod table;

mod track;

pub use association::{associate, step, Association, Associator};
pub use bbox::{BBox, Center};
pub use config::{ClaimRule, ConflictPolicy, CounterConfig, TrackerConfig};
pub use counter::Counter;
pub use error::{Error, Result};
pub use frame::Frame;
pub use frame_queue::FrameQueue;
pub use table::TrackTable;
pub use track::Track;
