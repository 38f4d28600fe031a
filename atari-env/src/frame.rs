use anyhow::Result;
use image::imageops::FilterType;
use image::{imageops, ImageBuffer, Luma};

use crate::prelude::AleError;

// Gray-scaled image
pub type GrayFrame = ImageBuffer<Luma<u8>, Vec<u8>>;

/// Edge length of the square frames fed to the model
pub const FRAME_SIZE: u32 = 84;

pub fn blank_frame() -> GrayFrame { GrayFrame::new(FRAME_SIZE, FRAME_SIZE) }

/// Wraps a native grayscale screen buffer (row major, one byte per pixel) into a frame
pub fn screen_to_frame(
    screen: &[u8],
    width: usize,
    height: usize,
) -> Result<GrayFrame> {
    GrayFrame::from_raw(width as u32, height as u32, screen.to_vec()).ok_or_else(|| {
        AleError(format!(
            "screen buffer of {} bytes does not match {}x{}",
            screen.len(),
            width,
            height
        ))
        .into()
    })
}

/// Scales a native resolution frame down to [FRAME_SIZE]x[FRAME_SIZE] (bilinear)
pub fn downscale(native: &GrayFrame) -> GrayFrame { imageops::resize(native, FRAME_SIZE, FRAME_SIZE, FilterType::Triangle) }

/// Pixel-wise maximum of two equally sized frames
pub fn max_pool(
    a: &GrayFrame,
    b: &GrayFrame,
) -> GrayFrame {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let (width, height) = a.dimensions();
    GrayFrame::from_fn(width, height, |x, y| {
        Luma([a.get_pixel(x, y).0[0].max(b.get_pixel(x, y).0[0])])
    })
}

/// The two most recently captured frames of a skip window
#[derive(Clone, Debug)]
pub struct FramePair {
    previous: GrayFrame,
    latest: GrayFrame,
}

impl FramePair {
    pub fn new(
        previous: GrayFrame,
        latest: GrayFrame,
    ) -> Self {
        Self { previous, latest }
    }

    pub fn push(
        &mut self,
        frame: GrayFrame,
    ) {
        self.previous = std::mem::replace(&mut self.latest, frame);
    }

    pub fn previous(&self) -> &GrayFrame { &self.previous }

    pub fn latest(&self) -> &GrayFrame { &self.latest }

    /// Removes sprite flicker by combining both frames
    pub fn max_pooled(&self) -> GrayFrame { max_pool(&self.previous, &self.latest) }
}

impl Default for FramePair {
    fn default() -> Self { Self::new(blank_frame(), blank_frame()) }
}
