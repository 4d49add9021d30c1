//! Packed bitmap glyph representation for Neo fonts.
//!
//! Each glyph owns a fixed-capacity pixel grid sized for the maximum glyph
//! dimensions (128×66). Rows are stored as packed bytes with MSB-first bit
//! ordering: bit 7 of byte 0 is pixel (0, y), bit 6 is pixel (1, y), and so
//! on. The on-disk applet layout packs bits differently; that mapping lives
//! in the applet codec, not here.

/// Minimum glyph width in pixels
pub const MIN_GLYPH_WIDTH: usize = 1;
/// Maximum glyph width in pixels
pub const MAX_GLYPH_WIDTH: usize = 128;
/// Minimum glyph height in pixels
pub const MIN_GLYPH_HEIGHT: usize = 1;
/// Maximum glyph height in pixels
pub const MAX_GLYPH_HEIGHT: usize = 66;

/// Bytes per bitmap row (128 pixels, one bit each)
const ROW_BYTES: usize = MAX_GLYPH_WIDTH / 8;

/// How [`Glyph::change_pixel`] should modify the addressed pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelChange {
    Set,
    Clear,
    Flip,
}

/// A single bitmapped character cell.
///
/// Out-of-bounds pixel coordinates follow one consistent policy: reads
/// return `false`, writes are ignored. Coordinates are valid when
/// `x < width` and `y < height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Bitmap rows: one `ROW_BYTES` slice per row, MSB = leftmost pixel
    data: [[u8; ROW_BYTES]; MAX_GLYPH_HEIGHT],
    /// Glyph width in pixels (1-128)
    width: u8,
    /// Glyph height in pixels (1-66)
    height: u8,
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl Glyph {
    /// Create a new glyph with the given dimensions (clamped to the valid
    /// ranges). All pixels are initially off.
    pub fn new(width: u8, height: u8) -> Self {
        let mut glyph = Self {
            data: [[0; ROW_BYTES]; MAX_GLYPH_HEIGHT],
            width: 8,
            height: 16,
        };
        glyph.set_width(width as i32);
        glyph.set_height(height as i32);
        glyph
    }

    /// Glyph width in pixels.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Set the glyph width, clamped to [1, 128].
    ///
    /// Returns the width actually applied.
    pub fn set_width(&mut self, width: i32) -> u8 {
        self.width = width.clamp(MIN_GLYPH_WIDTH as i32, MAX_GLYPH_WIDTH as i32) as u8;
        self.width
    }

    /// Set the glyph height, clamped to [1, 66].
    ///
    /// Rows exposed by growing the glyph are cleared, so stale bits from an
    /// earlier, taller shape never reappear. Returns the height actually
    /// applied.
    pub fn set_height(&mut self, height: i32) -> u8 {
        let height = height.clamp(MIN_GLYPH_HEIGHT as i32, MAX_GLYPH_HEIGHT as i32) as u8;
        if height > self.height {
            for y in self.height as usize..height as usize {
                self.data[y] = [0; ROW_BYTES];
            }
        }
        self.height = height;
        self.height
    }

    /// Clear all pixels, independent of the current width and height.
    pub fn clear(&mut self) {
        self.data = [[0; ROW_BYTES]; MAX_GLYPH_HEIGHT];
    }

    /// Get a pixel value. Returns `false` if the coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width as usize || y >= self.height as usize {
            return false;
        }
        (self.data[y][x / 8] & (0x80 >> (x % 8))) != 0
    }

    /// Set a pixel. Does nothing if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if x < self.width as usize && y < self.height as usize {
            self.data[y][x / 8] |= 0x80 >> (x % 8);
        }
    }

    /// Clear a pixel. Does nothing if the coordinates are out of bounds.
    #[inline]
    pub fn clear_pixel(&mut self, x: usize, y: usize) {
        if x < self.width as usize && y < self.height as usize {
            self.data[y][x / 8] &= !(0x80 >> (x % 8));
        }
    }

    /// Flip a pixel. Does nothing if the coordinates are out of bounds.
    #[inline]
    pub fn flip_pixel(&mut self, x: usize, y: usize) {
        if x < self.width as usize && y < self.height as usize {
            self.data[y][x / 8] ^= 0x80 >> (x % 8);
        }
    }

    /// Apply a [`PixelChange`] to a single pixel.
    pub fn change_pixel(&mut self, x: usize, y: usize, change: PixelChange) {
        match change {
            PixelChange::Set => self.set_pixel(x, y),
            PixelChange::Clear => self.clear_pixel(x, y),
            PixelChange::Flip => self.flip_pixel(x, y),
        }
    }

    /// Shift all set pixels by `(dx, dy)`. Pixels shifted outside the glyph
    /// bounds are dropped; vacated cells become unset.
    pub fn transform_translate(&mut self, dx: i32, dy: i32) {
        let src = self.clone();
        self.clear();
        for y in 0..src.height as usize {
            for x in 0..src.width as usize {
                if !src.get_pixel(x, y) {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx >= 0 && ny >= 0 {
                    self.set_pixel(nx as usize, ny as usize);
                }
            }
        }
    }

    /// Mirror the glyph vertically within the current width and height.
    pub fn transform_flip_v(&mut self) {
        let src = self.clone();
        self.clear();
        let h = src.height as usize;
        for y in 0..h {
            for x in 0..src.width as usize {
                if src.get_pixel(x, y) {
                    self.set_pixel(x, h - 1 - y);
                }
            }
        }
    }

    /// Mirror the glyph horizontally within the current width and height.
    pub fn transform_flip_h(&mut self) {
        let src = self.clone();
        self.clear();
        let w = src.width as usize;
        for y in 0..src.height as usize {
            for x in 0..w {
                if src.get_pixel(x, y) {
                    self.set_pixel(w - 1 - x, y);
                }
            }
        }
    }

    /// Thicken vertical strokes: every set pixel also sets its right-hand
    /// neighbor, when that neighbor is in bounds.
    pub fn transform_bold(&mut self) {
        let src = self.clone();
        for y in 0..src.height as usize {
            for x in 0..src.width as usize {
                if src.get_pixel(x, y) {
                    self.set_pixel(x + 1, y);
                }
            }
        }
    }

    /// Check if the glyph is empty (all pixels off).
    pub fn is_empty(&self) -> bool {
        self.data[..self.height as usize]
            .iter()
            .all(|row| row.iter().all(|&b| b == 0))
    }
}
