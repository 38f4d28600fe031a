use itertools::Itertools;

use crate::frame::{GrayFrame, FRAME_SIZE};
use crate::prelude::DebugVisualizer;

/// Stacked grayscale frames, oldest first
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    frames: Vec<GrayFrame>,
}

impl Observation {
    pub fn new(frames: Vec<GrayFrame>) -> Self { Self { frames } }

    pub fn len(&self) -> usize { self.frames.len() }

    pub fn is_empty(&self) -> bool { self.frames.is_empty() }

    pub fn frames(&self) -> &[GrayFrame] { &self.frames }

    pub fn latest(&self) -> Option<&GrayFrame> { self.frames.last() }
}

impl DebugVisualizer for Observation {
    fn one_line_info(&self) -> String {
        let mean = |f: &GrayFrame| f.as_raw().iter().map(|&p| p as f32).sum::<f32>() / f.as_raw().len() as f32;
        let means = self.frames.iter().map(|f| format!("{:.1}", mean(f))).join(", ");
        format!("Observation: {} frames, mean luminance [{}]", self.frames.len(), means)
    }
}
