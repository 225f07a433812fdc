#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the glyph table and the matrix device.

use std::collections::HashSet;

use embassy_futures::block_on;
use panel_envoy::glyph::{Glyph, OFF, ON};
use panel_envoy::led5x5::{Frame5x5, LED_COUNT, LedMatrix, MatrixChannel, Rgb, led_index};

#[derive(Default)]
struct RecordingChannel {
    frames: Vec<Frame5x5>,
}

impl MatrixChannel for RecordingChannel {
    async fn write_frame(&mut self, frame: &Frame5x5) {
        self.frames.push(*frame);
    }
}

#[test]
fn arrows_are_pairwise_distinct() {
    let bitmaps: HashSet<_> = Glyph::ARROWS.iter().map(|glyph| *glyph.bitmap()).collect();
    assert_eq!(bitmaps.len(), Glyph::ARROWS.len());
}

#[test]
fn every_glyph_is_distinct() {
    let bitmaps: HashSet<_> = Glyph::ALL.iter().map(|glyph| *glyph.bitmap()).collect();
    assert_eq!(bitmaps.len(), Glyph::ALL.len());
}

#[test]
fn glyphs_use_only_on_and_off() {
    for glyph in Glyph::ALL {
        assert!(
            glyph.bitmap().iter().flatten().all(|cell| *cell == ON || *cell == OFF),
            "{glyph:?} has a stray color"
        );
        assert!(glyph.lit_count() > 0, "{glyph:?} is blank");
    }
}

#[test]
fn east_arrow_has_full_middle_row() {
    let bitmap = Glyph::East.bitmap();
    assert_eq!(bitmap[2], [ON; 5]);
    assert_eq!(bitmap[0], [OFF, OFF, ON, OFF, OFF]);
    assert_eq!(Glyph::East.lit_count(), 9);
}

#[test]
fn west_mirrors_east() {
    for (east_row, west_row) in Glyph::East.bitmap().iter().zip(Glyph::West.bitmap()) {
        let mut mirrored = *east_row;
        mirrored.reverse();
        assert_eq!(mirrored, *west_row);
    }
}

#[test]
fn frame_from_glyph_places_cells_through_led_index() {
    let frame = Frame5x5::from_glyph(Glyph::North);
    for (row, cells) in Glyph::North.bitmap().iter().enumerate() {
        for (col, color) in cells.iter().enumerate() {
            assert_eq!(frame[led_index(row, col)], *color);
            assert_eq!(frame.at(row, col), *color);
        }
    }
}

#[test]
fn draw_glyph_flushes_exactly_once() {
    let mut matrix = LedMatrix::new(RecordingChannel::default());
    block_on(matrix.draw_glyph(Glyph::SouthWest));

    let frames = &matrix.channel().frames;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0], Frame5x5::from_glyph(Glyph::SouthWest));
}

#[test]
fn draw_glyph_overwrites_every_cell() {
    let mut matrix = LedMatrix::new(RecordingChannel::default());
    block_on(async {
        matrix.draw_glyph(Glyph::East).await;
        matrix.draw_glyph(Glyph::West).await;
    });
    assert_eq!(*matrix.frame(), Frame5x5::from_glyph(Glyph::West));
    assert_eq!(matrix.channel().frames.len(), 2);
}

#[test]
fn set_pixel_waits_for_flush() {
    let mut matrix = LedMatrix::new(RecordingChannel::default());
    matrix.set_pixel(24, ON);
    assert!(matrix.channel().frames.is_empty());
    assert_eq!(matrix.frame().at(0, 0), ON);

    block_on(matrix.flush());
    assert_eq!(matrix.channel().frames.len(), 1);
    assert_eq!(matrix.channel().frames[0][24], ON);
}

#[test]
#[should_panic(expected = "index must be a strip index")]
fn set_pixel_rejects_out_of_range_index() {
    let mut frame = Frame5x5::new();
    frame.set_pixel(LED_COUNT, ON);
}

#[test]
fn clear_sends_an_all_off_frame() {
    let mut matrix = LedMatrix::new(RecordingChannel::default());
    block_on(async {
        matrix.draw_glyph(Glyph::North).await;
        matrix.clear().await;
    });
    let frames = &matrix.channel().frames;
    assert_eq!(frames.len(), 2);
    assert!(frames[1].iter().all(|pixel| *pixel == Rgb::default()));
}

#[test]
fn wire_bytes_are_rgb_in_strip_order() {
    let mut frame = Frame5x5::new();
    frame.set_pixel(0, Rgb::new(1, 2, 3));
    frame.set_pixel(24, Rgb::new(7, 8, 9));

    let bytes = frame.to_wire_bytes();
    assert_eq!(bytes.len(), 75);
    assert_eq!(bytes[0..3], [1, 2, 3]);
    assert_eq!(bytes[72..75], [7, 8, 9]);
    assert!(bytes[3..72].iter().all(|byte| *byte == 0));
}

#[test]
fn red_pixel_sends_red_byte_first() {
    let mut frame = Frame5x5::new();
    frame.set_pixel(led_index(0, 0), Rgb::new(0xFF, 0, 0));
    frame.set_pixel(led_index(4, 4), Rgb::new(0, 0xFF, 0));

    let bytes = frame.to_wire_bytes();
    // Top-left is the last LED on the strip, bottom-right the first.
    assert_eq!(bytes[72..75], [0xFF, 0x00, 0x00]);
    assert_eq!(bytes[0..3], [0x00, 0xFF, 0x00]);
}
