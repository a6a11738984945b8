use nalgebra as na;

use crate::bbox::{BBox, Center};

/// Margin for ad-hoc edge checks on a single box
pub const DEFAULT_EDGE_MARGIN_PERCENT: f32 = 10.0;

/// Margin the tracker prunes with
pub const TRACKING_EDGE_MARGIN_PERCENT: f32 = 35.0;

#[inline]
pub fn center_of(bbox: &BBox) -> Center {
    na::Point2::new(
        (bbox.x + bbox.w / 2.0) as i32,
        (bbox.y + bbox.h / 2.0) as i32,
    )
}

/// Only the bottom edge is considered, objects leave the view downwards.
pub fn is_near_bottom_edge(bbox: &BBox, frame_height: u32, margin_percent: f32) -> bool {
    let limit = frame_height as f32 * (1.0 - margin_percent / 100.0);

    center_of(bbox).y as f32 >= limit
}

#[inline]
pub fn center_distance(a: &Center, b: &Center) -> f32 {
    na::distance(&a.cast::<f32>(), &b.cast::<f32>())
}
