#![cfg(feature = "host")]
//! PNG previews of the matrix and the status screen, for the host build.
//!
//! Matrix frames are drawn as round LEDs on a black board, one cell per LED,
//! in grid order (row 0 at the top). The status screen is drawn pixel for
//! pixel, scaled up by an integer factor.
#![expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "host-only preview; offsets stay inside buffers sized from the same constants"
)]

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PointsIter, Rectangle},
};
use png::{BitDepth, ColorType, Encoder};

use crate::led5x5::{Frame5x5, HEIGHT, WIDTH};
use crate::status::StatusSurface;

/// Width of the status display in pixels.
pub const STATUS_WIDTH: usize = 128;

/// Height of the status display in pixels.
pub const STATUS_HEIGHT: usize = 64;

/// Render a frame into a PNG file, `cell_size` pixels per LED.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_frame_png(
    frame: &Frame5x5,
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    let (width, height, pixels) = frame_pixels(frame, cell_size);
    write_rgb_png(output_path.as_ref(), width, height, &[pixels], None)
}

/// Render several frames into a looping APNG, `frame_delay_ms` per frame.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded, or if
/// `frame_delay_ms` does not fit in a `u16`.
///
/// # Panics
///
/// Panics if `frames` is empty or `frame_delay_ms` is zero.
pub fn write_frames_apng(
    frames: &[Frame5x5],
    output_path: impl AsRef<Path>,
    cell_size: u32,
    frame_delay_ms: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(!frames.is_empty(), "frames must not be empty");
    assert!(frame_delay_ms > 0, "frame_delay_ms must be positive");
    let delay = u16::try_from(frame_delay_ms)?;
    let mut width = 0;
    let mut height = 0;
    let mut images = Vec::with_capacity(frames.len());
    for frame in frames {
        let (frame_width, frame_height, pixels) = frame_pixels(frame, cell_size);
        width = frame_width;
        height = frame_height;
        images.push(pixels);
    }
    write_rgb_png(output_path.as_ref(), width, height, &images, Some(delay))
}

fn frame_pixels(frame: &Frame5x5, cell_size: u32) -> (u32, u32, Vec<u8>) {
    assert!(cell_size >= 4, "cell_size must be at least 4");
    let width = WIDTH as u32 * cell_size;
    let height = HEIGHT as u32 * cell_size;
    let mut bytes = vec![0u8; (width * height * 3) as usize];
    let center = (cell_size as i64 - 1) / 2;
    let radius = (cell_size as i64 - (cell_size / 4).max(1) as i64) / 2;

    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let color = frame.at(row, col);
            for local_y in 0..cell_size {
                for local_x in 0..cell_size {
                    let dx = local_x as i64 - center;
                    let dy = local_y as i64 - center;
                    if dx * dx + dy * dy > radius * radius {
                        continue;
                    }
                    let x = col as u32 * cell_size + local_x;
                    let y = row as u32 * cell_size + local_y;
                    let index = ((y * width + x) * 3) as usize;
                    bytes[index..index + 3].copy_from_slice(&[color.r, color.g, color.b]);
                }
            }
        }
    }

    (width, height, bytes)
}

fn write_rgb_png(
    output_path: &Path,
    width: u32,
    height: u32,
    images: &[Vec<u8>],
    frame_delay_ms: Option<u16>,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    if frame_delay_ms.is_some() {
        encoder.set_animated(u32::try_from(images.len())?, 0)?;
    }
    let mut writer = encoder.write_header()?;
    for image in images {
        if let Some(delay) = frame_delay_ms {
            writer.set_frame_delay(delay, 1000)?;
        }
        writer.write_image_data(image)?;
    }
    writer.finish()?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

// ============================================================================
// StatusPreview - in-memory status display
// ============================================================================

/// A 128×64 in-memory status display.
///
/// Drawing lands in a back buffer; [`show`](StatusSurface::show) copies it to
/// the visible screen, the way the real panel only changes on a flush.
#[derive(Clone, Debug)]
pub struct StatusPreview {
    buffer: [[bool; STATUS_WIDTH]; STATUS_HEIGHT],
    screen: [[bool; STATUS_WIDTH]; STATUS_HEIGHT],
    show_count: usize,
}

impl StatusPreview {
    /// Blank preview, nothing shown yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [[false; STATUS_WIDTH]; STATUS_HEIGHT],
            screen: [[false; STATUS_WIDTH]; STATUS_HEIGHT],
            show_count: 0,
        }
    }

    /// Whether the pixel at `(x, y)` is lit on the visible screen.
    ///
    /// # Panics
    ///
    /// Panics if the point is off the 128×64 screen.
    #[must_use]
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.screen[y][x]
    }

    /// Number of lit pixels on the visible screen.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.screen.iter().flatten().filter(|lit| **lit).count()
    }

    /// Number of lit pixels inside a rectangle of the visible screen.
    #[must_use]
    pub fn lit_count_in(&self, top_left: Point, size: Size) -> usize {
        let area = Rectangle::new(top_left, size);
        area.points()
            .filter(|point| self.screen_point(*point).unwrap_or(false))
            .count()
    }

    /// How many times the buffer has been shown.
    #[must_use]
    pub const fn show_count(&self) -> usize {
        self.show_count
    }

    /// Render the visible screen into a PNG file, `scale` pixels per dot.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or encoded.
    pub fn write_png(&self, output_path: impl AsRef<Path>, scale: u32) -> Result<(), Box<dyn Error>> {
        assert!(scale > 0, "scale must be positive");
        let width = STATUS_WIDTH as u32 * scale;
        let height = STATUS_HEIGHT as u32 * scale;
        let mut bytes = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let lit = self.screen[(y / scale) as usize][(x / scale) as usize];
                let level = if lit { 0xFF } else { 0x00 };
                bytes.extend_from_slice(&[level, level, level]);
            }
        }
        write_rgb_png(output_path.as_ref(), width, height, &[bytes], None)
    }

    fn screen_point(&self, point: Point) -> Option<bool> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        self.screen.get(y)?.get(x).copied()
    }
}

impl Default for StatusPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for StatusPreview {
    fn size(&self) -> Size {
        Size::new(STATUS_WIDTH as u32, STATUS_HEIGHT as u32)
    }
}

impl DrawTarget for StatusPreview {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if let Some(cell) = self.buffer.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = color.is_on();
            }
        }
        Ok(())
    }
}

impl StatusSurface for StatusPreview {
    fn show(&mut self) -> crate::Result<()> {
        self.screen = self.buffer;
        self.show_count += 1;
        Ok(())
    }
}
