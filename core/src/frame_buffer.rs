use std::fmt;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame Buffer
/// The Chip-8 display is composed of 64x32 monochrome pixels, indexed as `[y][x]`.
///
/// Only 00E0 and DXYN mutate it.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Whether the pixel is lit; coordinates wrap
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    /// Sets a single pixel; coordinates wrap
    pub fn set_pixel(&mut self, x: usize, y: usize, lit: bool) {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] = lit;
    }

    /// XORs an 8-pixel-wide sprite onto the buffer with its origin at (x, y).
    ///
    /// Each byte of `sprite` is one row, most significant bit leftmost.
    /// The origin wraps, and so does every sprite pixel: sprites are never clipped.
    /// Returns true if any lit pixel was toggled off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            let py = (origin_y + row) % DISPLAY_HEIGHT;
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let px = (origin_x + col) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel ^= true;
            }
        }

        collision
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    pub fn lit_pixels(&self) -> usize {
        self.rows().flatten().filter(|p| **p).count()
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|p| if *p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
