use serde_derive::{Deserialize, Serialize};

use crate::bbox::BBox;
use crate::error::Result;

/// Detector output for one frame of the stream
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub height: u32, // in px
    #[serde(default)]
    pub boxes: Vec<BBox>,
}

impl Frame {
    pub fn new(index: u64, height: u32, boxes: Vec<BBox>) -> Self {
        Self {
            index,
            height,
            boxes,
        }
    }

    /// Parses one line of a detections dump
    pub fn from_json_line(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line.trim())?)
    }

    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_json_line() {
        let frame =
            Frame::from_json_line(r#"{"index":3,"height":720,"boxes":[{"x":1,"y":2,"w":3,"h":4}]}"#)
                .unwrap();

        assert_eq!(frame.index, 3);
        assert_eq!(frame.height, 720);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.boxes[0], BBox::ltwh(1.0, 2.0, 3.0, 4.0));

        let line = frame.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(Frame::from_json_line(&line).unwrap(), frame);
    }

    #[test]
    fn test_json_line_without_boxes() {
        let frame = Frame::from_json_line("{\"index\":0,\"height\":10}\n").unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_json_line_malformed() {
        assert!(matches!(
            Frame::from_json_line("{\"index\":0"),
            Err(Error::Json(_))
        ));
    }
}
