use std::time::{Duration, Instant};

use anyhow::Result;
use console_engine::pixel;
use console_engine::screen::Screen;
use console_engine::ConsoleEngine;

use crate::frame::GrayFrame;

/// Console columns of the viewer
const VIEWER_COLUMNS: u32 = 80;
/// Console rows of the viewer
const VIEWER_ROWS: u32 = 52;
const REFRESH_RATE: u32 = 60;

/// Characters ordered from dark to bright
const SHADES: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

pub fn shade(luminance: u8) -> char { SHADES[luminance as usize * SHADES.len() / 256] }

/// Nearest-neighbour sampling of `frame` onto a `columns` x `rows` console screen
pub fn render_frame(
    frame: &GrayFrame,
    columns: u32,
    rows: u32,
) -> Screen {
    let (width, height) = frame.dimensions();
    let mut screen = Screen::new_fill(columns, rows, pixel::pxl(' '));
    for row in 0..rows {
        for column in 0..columns {
            let x = column * width / columns;
            let y = row * height / rows;
            screen.set_pxl(column as i32, row as i32, pixel::pxl(shade(frame.get_pixel(x, y).0[0])));
        }
    }
    screen
}

/// Lets a refresh through only when more than `interval` has elapsed since the last one
#[derive(Debug)]
pub struct RefreshThrottle {
    interval: Duration,
    last_refresh: Instant,
}

impl RefreshThrottle {
    pub fn new(
        interval: Duration,
        now: Instant,
    ) -> Self {
        Self {
            interval,
            last_refresh: now,
        }
    }

    pub fn due(
        &mut self,
        now: Instant,
    ) -> bool {
        if now.saturating_duration_since(self.last_refresh) > self.interval {
            self.last_refresh = now;
            true
        } else {
            false
        }
    }
}

/// Shows the native emulator screen in the terminal, at most [REFRESH_RATE] times per second
pub struct ConsoleViewer {
    engine: ConsoleEngine,
    throttle: RefreshThrottle,
}

impl ConsoleViewer {
    pub fn new() -> Result<Self> {
        let engine = ConsoleEngine::init(VIEWER_COLUMNS, VIEWER_ROWS, REFRESH_RATE)?;
        Ok(Self {
            engine,
            throttle: RefreshThrottle::new(Duration::from_millis(1000 / REFRESH_RATE as u64), Instant::now()),
        })
    }

    /// Draws `frame` unless the previous draw happened too recently
    pub fn refresh(
        &mut self,
        frame: &GrayFrame,
    ) {
        if self.throttle.due(Instant::now()) {
            self.engine.set_screen(&render_frame(frame, VIEWER_COLUMNS, VIEWER_ROWS));
            self.engine.draw();
        }
    }
}
