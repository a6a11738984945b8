use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer pixel center of a bbox
pub type Center = na::Point2<i32>;

/// Left-top-width-height bbox as produced by the detector
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BBox {
    #[inline]
    pub fn ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            x: left,
            y: top,
            w: width,
            h: height,
        }
    }

    /// Builds a box of the given size around a center point
    #[inline]
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::ltwh(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Half of the larger side, the match radius of a track holding this box
    #[inline]
    pub fn match_radius(&self) -> f32 {
        self.w.max(self.h) / 2.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite())
        {
            return Err(Error::NonFiniteBox);
        }

        if self.w < 0.0 || self.h < 0.0 {
            return Err(Error::InvalidBox {
                width: self.w,
                height: self.h,
            });
        }

        Ok(())
    }
}
