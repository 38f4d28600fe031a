use crate::frame::{blank_frame, GrayFrame};
use crate::observation::Observation;

/// History of the `len` most recent preprocessed frames
#[derive(Clone, Debug)]
pub struct FrameRingBuffer {
    buffer: Vec<GrayFrame>,
    next_slot: usize,
}

impl FrameRingBuffer {
    /// A history of `len` blank frames
    pub fn new(len: usize) -> Self {
        assert!(len > 0);
        Self {
            buffer: (0..len).map(|_| blank_frame()).collect(),
            next_slot: 0,
        }
    }

    pub fn len(&self) -> usize { self.buffer.len() }

    /// Overwrites the oldest frame
    pub fn add(
        &mut self,
        element: GrayFrame,
    ) {
        self.buffer[self.next_slot] = element;
        self.next_slot = (self.next_slot + 1) % self.buffer.len();
    }

    /// 0 = most recent frame
    pub fn get(
        &self,
        steps_into_history: usize,
    ) -> &GrayFrame {
        let len = self.buffer.len();
        assert!(steps_into_history < len, "available steps into history: 0..{}", len - 1);
        let slot = (self.next_slot + len - 1 - steps_into_history) % len;
        &self.buffer[slot]
    }

    /// Copy of the history, oldest frame first
    pub fn to_observation(&self) -> Observation {
        let len = self.buffer.len();
        Observation::new((0..len).rev().map(|s| self.get(s).clone()).collect())
    }
}
