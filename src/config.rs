use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::TRACKING_EDGE_MARGIN_PERCENT;

/// What to do when several tracks pick the same box as their nearest one
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Every track within its radius takes the box, contested or not.
    Ignore,

    /// Only the closest contender takes the box, the rest stay stale.
    NearestWins,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        ConflictPolicy::Ignore
    }
}

/// Which boxes count as taken when looking for new tracks
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClaimRule {
    /// A box is taken once it is the nearest box of any track, even if the
    /// track rejected it as too far.
    Nearest,

    /// Only boxes that some track actually moved to are taken.
    Accepted,
}

impl Default for ClaimRule {
    fn default() -> Self {
        ClaimRule::Nearest
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub edge_margin_percent: f32,
    pub conflict_policy: ConflictPolicy,
    pub claim_rule: ClaimRule,
}

impl TrackerConfig {
    pub fn new(edge_margin_percent: f32) -> Self {
        Self {
            edge_margin_percent,
            conflict_policy: ConflictPolicy::Ignore,
            claim_rule: ClaimRule::Nearest,
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_claim_rule(mut self, rule: ClaimRule) -> Self {
        self.claim_rule = rule;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.edge_margin_percent) {
            return Err(Error::InvalidConfig(format!(
                "edge margin must be within 0..=100 percent, got {}",
                self.edge_margin_percent
            )));
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(TRACKING_EDGE_MARGIN_PERCENT)
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
    /// Track every `stride`-th frame, the first frame is always tracked
    pub stride: u64,
    pub tracker: TrackerConfig,
}

impl CounterConfig {
    pub fn new(stride: u64) -> Self {
        Self {
            stride,
            tracker: TrackerConfig::default(),
        }
    }

    /// Stride that samples `target_fps` out of a `source_fps` stream
    pub fn for_frame_rates(source_fps: u32, target_fps: u32) -> Result<Self> {
        if target_fps == 0 {
            return Err(Error::InvalidConfig("target frame rate is zero".into()));
        }

        Ok(Self::new(((source_fps / target_fps) as u64).max(1)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(Error::InvalidConfig("stride must be positive".into()));
        }

        self.tracker.validate()
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
