use ndarray::{Array2, ArrayView1};

use crate::bbox::{BBox, Center};
use crate::config::{ClaimRule, ConflictPolicy, TrackerConfig};
use crate::error::{Error, Result};
use crate::geometry::{center_distance, center_of, is_near_bottom_edge};
use crate::table::TrackTable;

/// Matching of the previous tracks (rows, ascending id) against the boxes of
/// the current frame (columns, input order).
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub ids: Vec<u32>,

    /// Centers of the current boxes
    pub centers: Vec<Center>,

    /// Center distance of every (track, box) pair
    pub distances: Array2<f32>,

    /// Nearest box of every track, `None` when the frame has no boxes
    pub best: Vec<Option<usize>>,
    pub best_distance: Vec<Option<f32>>,

    /// Match radius of every track
    pub threshold: Vec<f32>,
    pub too_far: Vec<bool>,

    /// Nearest box is also the nearest box of another track
    pub contested: Vec<bool>,

    pub accepted: Vec<bool>,

    /// Boxes that start new tracks, ascending
    pub unclaimed: Vec<usize>,
}

// lowest index wins ties
fn nearest(row: ArrayView1<'_, f32>) -> Option<(usize, f32)> {
    row.iter()
        .enumerate()
        .fold(None, |best, (j, &d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((j, d)),
        })
}

pub fn associate(table: &TrackTable, boxes: &[BBox], config: &TrackerConfig) -> Association {
    let ids: Vec<u32> = table.iter().map(|t| t.id()).collect();
    let prev: Vec<Center> = table.iter().map(|t| t.center()).collect();
    let centers: Vec<Center> = boxes.iter().map(center_of).collect();

    let distances = Array2::from_shape_fn((prev.len(), centers.len()), |(i, j)| {
        center_distance(&prev[i], &centers[j])
    });

    let (best, best_distance): (Vec<_>, Vec<_>) = distances
        .outer_iter()
        .map(|row| match nearest(row) {
            Some((j, d)) => (Some(j), Some(d)),
            None => (None, None),
        })
        .unzip();

    let threshold: Vec<f32> = table.iter().map(|t| t.bbox().match_radius()).collect();

    let too_far: Vec<bool> = best_distance
        .iter()
        .zip(&threshold)
        .map(|(d, &t)| d.map_or(true, |d| d > t))
        .collect();

    let mut claims = vec![0usize; centers.len()];
    for &j in best.iter().flatten() {
        claims[j] += 1;
    }

    let contested: Vec<bool> = best
        .iter()
        .map(|b| b.map_or(false, |j| claims[j] > 1))
        .collect();

    // With `Ignore` the contested flag has no effect on acceptance.
    let mut accepted: Vec<bool> = too_far.iter().map(|far| !far).collect();

    if config.conflict_policy == ConflictPolicy::NearestWins {
        let mut winners: Vec<Option<(usize, f32)>> = vec![None; centers.len()];

        for (i, (b, d)) in best.iter().zip(&best_distance).enumerate() {
            if let (true, Some(j), Some(d)) = (accepted[i], *b, *d) {
                if winners[j].map_or(true, |(_, wd)| d < wd) {
                    winners[j] = Some((i, d));
                }
            }
        }

        for (i, b) in best.iter().enumerate() {
            if let Some(j) = *b {
                if winners[j].map(|(w, _)| w) != Some(i) {
                    accepted[i] = false;
                }
            }
        }
    }

    let mut taken = vec![false; centers.len()];
    for (i, b) in best.iter().enumerate() {
        if let Some(j) = *b {
            if config.claim_rule == ClaimRule::Nearest || accepted[i] {
                taken[j] = true;
            }
        }
    }

    let unclaimed = taken
        .iter()
        .enumerate()
        .filter(|(_, t)| !**t)
        .map(|(j, _)| j)
        .collect();

    Association {
        ids,
        centers,
        distances,
        best,
        best_distance,
        threshold,
        too_far,
        contested,
        accepted,
        unclaimed,
    }
}

pub fn check_inputs(boxes: &[BBox], frame_height: u32) -> Result<()> {
    if frame_height == 0 {
        return Err(Error::InvalidFrameHeight(frame_height));
    }

    boxes.iter().try_for_each(BBox::validate)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Associator {
    config: TrackerConfig,
}

impl Associator {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Moves the tracks of `previous` to the boxes of the current frame.
    ///
    /// Returns the next table and the number of tracks started in this frame.
    /// Without a previous table every box starts a track and nothing is
    /// pruned. Otherwise every track takes its nearest box if it lies within
    /// the track's radius, boxes nobody picked start new tracks, and finally
    /// every track whose center lies in the bottom edge band is dropped.
    /// Tracks dropped right after being started are still counted.
    pub fn step(
        &self,
        boxes: &[BBox],
        frame_height: u32,
        previous: Option<TrackTable>,
    ) -> Result<(TrackTable, usize)> {
        check_inputs(boxes, frame_height)?;

        let mut table = match previous {
            Some(table) => table,
            None => return Ok((TrackTable::create_initial(boxes)?, boxes.len())),
        };

        let assoc = associate(&table, boxes, &self.config);

        for (row, &id) in assoc.ids.iter().enumerate() {
            if assoc.contested[row] {
                log::trace!(
                    "track {} contests box {:?}, accepted: {}",
                    id,
                    assoc.best[row],
                    assoc.accepted[row]
                );
            }

            if let (true, Some(j)) = (assoc.accepted[row], assoc.best[row]) {
                table.update(id, boxes[j], assoc.centers[j])?;
            }
        }

        for &j in &assoc.unclaimed {
            table.insert_new(boxes[j])?;
        }

        let margin = self.config.edge_margin_percent;
        let pruned = table.prune(|t| is_near_bottom_edge(t.bbox(), frame_height, margin));

        if !pruned.is_empty() {
            log::trace!("tracks {:?} left the frame", pruned);
        }

        Ok((table, assoc.unclaimed.len()))
    }
}

pub fn step(
    boxes: &[BBox],
    frame_height: u32,
    previous: Option<TrackTable>,
    config: &TrackerConfig,
) -> Result<(TrackTable, usize)> {
    Associator::new(*config)?.step(boxes, frame_height, previous)
}
