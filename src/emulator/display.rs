//! The monochrome framebuffer and the XOR sprite compositor.

use std::fmt;

use super::config::SpriteEdges;
use super::error::EmulatorError;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
const SCREEN_CELLS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// A 64x32 grid of single-bit pixels, stored row by row.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [bool; SCREEN_CELLS],
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            cells: [false; SCREEN_CELLS],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [false; SCREEN_CELLS];
    }

    /// The pixel at `(x, y)`, or `false` outside the screen.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < SCREEN_WIDTH && y < SCREEN_HEIGHT && self.cells[y * SCREEN_WIDTH + x]
    }

    /// All cells, row by row.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| !c)
    }

    /// XOR a sprite onto the screen with its top-left corner at `(x, y)`.
    ///
    /// Each byte of `rows` is one 8 pixel row, most significant bit leftmost.
    /// Returns whether any set pixel was cleared, which is the collision flag.
    /// With [`SpriteEdges::Error`] nothing is drawn if any set pixel falls
    /// outside the screen.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8], edges: SpriteEdges) -> Result<bool, EmulatorError> {
        if edges == SpriteEdges::Error {
            for (dy, &row) in rows.iter().enumerate() {
                for dx in 0..8 {
                    if row >> (7 - dx) & 1 == 1 && (x + dx >= SCREEN_WIDTH || y + dy >= SCREEN_HEIGHT) {
                        return Err(EmulatorError::SpriteOutOfBounds { x: x + dx, y: y + dy });
                    }
                }
            }
        }

        let (x, y) = match edges {
            SpriteEdges::Clip => (x % SCREEN_WIDTH, y % SCREEN_HEIGHT),
            _ => (x, y),
        };

        let mut collision = false;
        for (dy, &row) in rows.iter().enumerate() {
            for dx in 0..8 {
                if row >> (7 - dx) & 1 == 0 {
                    continue;
                }
                let (px, py) = match edges {
                    SpriteEdges::Wrap => ((x + dx) % SCREEN_WIDTH, (y + dy) % SCREEN_HEIGHT),
                    _ => (x + dx, y + dy),
                };
                if px >= SCREEN_WIDTH || py >= SCREEN_HEIGHT {
                    continue;
                }
                let cell = &mut self.cells[py * SCREEN_WIDTH + px];
                // Set pixel is unset, so we set the collision flag
                collision |= *cell;
                *cell = !*cell;
            }
        }

        Ok(collision)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SCREEN_WIDTH) {
            for c in row {
                write!(f, "{}", if *c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.cells.iter().filter(|c| **c).count();
        write!(f, "Framebuffer {{ lit: {} }}", lit)
    }
}
