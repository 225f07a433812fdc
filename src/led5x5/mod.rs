//! The 5×5 NeoPixel-style (WS2812) matrix: addressing, pixel buffer, and flush.
//!
//! The matrix is a single 25-LED strip folded into five rows. Rows alternate
//! direction, and the data line enters at the bottom-right cell, so strip
//! index 24 is the top-left cell. [`led_index`] hides that wiring: callers
//! work in `(row, col)` and the [`Frame5x5`] stays in strip order, ready to be
//! sent as-is.
//!
//! # Example
//!
//! ```rust
//! use panel_envoy::glyph::Glyph;
//! use panel_envoy::led5x5::{Frame5x5, LedMatrix, MatrixChannel};
//!
//! struct Recorder(Vec<Frame5x5>);
//!
//! impl MatrixChannel for Recorder {
//!     async fn write_frame(&mut self, frame: &Frame5x5) {
//!         self.0.push(*frame);
//!     }
//! }
//!
//! let mut matrix = LedMatrix::new(Recorder(Vec::new()));
//! embassy_futures::block_on(matrix.draw_glyph(Glyph::North));
//! assert_eq!(matrix.channel().0.len(), 1);
//! ```

pub mod layout;

use core::ops::{Deref, DerefMut};

use crate::glyph::Glyph;
use layout::LedLayout;

/// RGB color type used by LED matrix frames.
pub use smart_leds::RGB8;

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = RGB8;

/// Number of columns.
pub const WIDTH: usize = 5;

/// Number of rows.
pub const HEIGHT: usize = 5;

/// Number of LEDs on the strip.
pub const LED_COUNT: usize = WIDTH * HEIGHT;

/// Bytes per frame on the wire: three channels per LED.
pub const FRAME_BYTES: usize = LED_COUNT * 3;

/// Wiring of the panel: serpentine rows, fed from the last cell.
pub const MATRIX_LAYOUT: LedLayout<LED_COUNT, WIDTH, HEIGHT> =
    LedLayout::serpentine_row_major().reverse();

const XY_TO_INDEX: [u16; LED_COUNT] = MATRIX_LAYOUT.xy_to_index();

/// Strip index of the cell at `(row, col)`.
///
/// Even rows run left-to-right and odd rows right-to-left, and the whole strip
/// is numbered from the far end:
/// - even row: `24 - (row * 5 + col)`
/// - odd row: `24 - (row * 5 + (4 - col))`
///
/// # Panics
///
/// Panics if `row` or `col` is outside `0..5`.
///
/// ```rust
/// use panel_envoy::led5x5::led_index;
///
/// assert_eq!(led_index(0, 0), 24);
/// assert_eq!(led_index(1, 0), 15);
/// ```
#[must_use]
#[expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "row and col are asserted in range"
)]
pub const fn led_index(row: usize, col: usize) -> usize {
    assert!(row < HEIGHT, "row must be within the matrix");
    assert!(col < WIDTH, "col must be within the matrix");
    XY_TO_INDEX[row * WIDTH + col] as usize
}

// ============================================================================
// Frame5x5 - the pixel buffer
// ============================================================================

/// Pixel buffer for the matrix, in strip order.
///
/// Frames deref to `[Rgb; 25]`. Index them with strip indices from
/// [`led_index`]; the frame is sent to the strip in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame5x5(pub [Rgb; LED_COUNT]);

impl Frame5x5 {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([Rgb::new(0, 0, 0); LED_COUNT])
    }

    /// Create a frame showing a glyph.
    #[must_use]
    pub fn from_glyph(glyph: Glyph) -> Self {
        let mut frame = Self::new();
        frame.draw_glyph(glyph);
        frame
    }

    /// Overwrite one LED.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a strip index (`0..25`).
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        let Some(pixel) = self.0.get_mut(index) else {
            panic!("index must be a strip index");
        };
        *pixel = color;
    }

    /// Copy every cell of a glyph into the frame.
    pub fn draw_glyph(&mut self, glyph: Glyph) {
        for (row, cells) in glyph.bitmap().iter().enumerate() {
            for (col, color) in cells.iter().enumerate() {
                self.set_pixel(led_index(row, col), *color);
            }
        }
    }

    /// Color at `(row, col)` in grid coordinates.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "led_index only returns strip indices")]
    pub fn at(&self, row: usize, col: usize) -> Rgb {
        self.0[led_index(row, col)]
    }

    /// The frame as it goes down the data line: `r, g, b` for strip index 0,
    /// then index 1, and so on.
    ///
    /// The board's PIO driver is built with the same RGB byte order, so these
    /// are the bytes on the data line.
    #[must_use]
    pub fn to_wire_bytes(&self) -> [u8; FRAME_BYTES] {
        let mut bytes = [0u8; FRAME_BYTES];
        for (chunk, color) in bytes.chunks_exact_mut(3).zip(self.0.iter()) {
            chunk.copy_from_slice(&[color.r, color.g, color.b]);
        }
        bytes
    }
}

impl Deref for Frame5x5 {
    type Target = [Rgb; LED_COUNT];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Frame5x5 {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<[Rgb; LED_COUNT]> for Frame5x5 {
    fn from(array: [Rgb; LED_COUNT]) -> Self {
        Self(array)
    }
}

impl Default for Frame5x5 {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MatrixChannel - the hardware seam
// ============================================================================

/// Transmit side of the matrix.
///
/// `write_frame` returns once the hardware has accepted the whole frame and
/// the inter-frame idle gap has elapsed, so two back-to-back calls always
/// produce two distinct frames on the wire.
pub trait MatrixChannel {
    /// Send all 25 pixels in strip order.
    async fn write_frame(&mut self, frame: &Frame5x5);
}

// ============================================================================
// LedMatrix - buffer + channel
// ============================================================================

/// The matrix device: a [`Frame5x5`] mutated in place and flushed as a unit.
pub struct LedMatrix<C> {
    frame: Frame5x5,
    channel: C,
}

impl<C: MatrixChannel> LedMatrix<C> {
    /// Wrap a channel. The buffer starts all off; nothing is sent until the first flush.
    #[must_use]
    pub const fn new(channel: C) -> Self {
        Self {
            frame: Frame5x5::new(),
            channel,
        }
    }

    /// Overwrite one LED in the buffer. Takes effect on the next [`flush`](Self::flush).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a strip index (`0..25`).
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.frame.set_pixel(index, color);
    }

    /// Send the whole buffer to the strip.
    pub async fn flush(&mut self) {
        self.channel.write_frame(&self.frame).await;
    }

    /// Turn every LED off and flush.
    pub async fn clear(&mut self) {
        self.frame = Frame5x5::new();
        self.flush().await;
    }

    /// Draw a glyph over the whole buffer and flush once.
    pub async fn draw_glyph(&mut self, glyph: Glyph) {
        self.frame.draw_glyph(glyph);
        self.flush().await;
    }

    /// The buffer as it stands (possibly not yet flushed).
    #[must_use]
    pub const fn frame(&self) -> &Frame5x5 {
        &self.frame
    }

    /// The underlying channel.
    #[must_use]
    pub const fn channel(&self) -> &C {
        &self.channel
    }
}
