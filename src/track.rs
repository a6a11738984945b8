use serde_derive::Serialize;

use crate::bbox::{BBox, Center};
use crate::geometry::center_of;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Track {
    pub(crate) id: u32,
    pub(crate) bbox: BBox,

    // always center_of(bbox)
    pub(crate) center: Center,
}

impl Track {
    pub(crate) fn new(id: u32, bbox: BBox) -> Self {
        Self {
            id,
            bbox,
            center: center_of(&bbox),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    #[inline]
    pub fn center(&self) -> Center {
        self.center
    }

    pub(crate) fn update(&mut self, bbox: BBox, center: Center) {
        debug_assert_eq!(center, center_of(&bbox));

        self.bbox = bbox;
        self.center = center;
    }
}
