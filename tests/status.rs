#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the status screen and the main-loop tick.

use embassy_futures::block_on;
use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X9},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use panel_envoy::config::{BANNER_ORIGIN, COUNTER_ORIGIN, LEVEL_ORIGIN};
use panel_envoy::glyph::Glyph;
use panel_envoy::indicator::{IndicatorLeds, PanelState};
use panel_envoy::led5x5::{Frame5x5, LedMatrix, MatrixChannel};
use panel_envoy::selector::{AnimationDriver, TickSelector, TimerSelector};
use panel_envoy::status::{
    PanelLoop, StatusSurface, TickCounter, counter_text, draw_border, render_status,
};
use panel_envoy::to_png::StatusPreview;
use panel_envoy::{Error, Result};

const fn leds(green: bool, blue: bool, red: bool) -> IndicatorLeds {
    IndicatorLeds { green, blue, red }
}

/// What `render_status` should produce, drawn independently.
fn expected_screen(lines: &[(&str, Point)]) -> StatusPreview {
    let mut preview = StatusPreview::new();
    let style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
    draw_border(&mut preview).expect("preview never fails");
    for (text, origin) in lines {
        Text::with_baseline(text, *origin, style, Baseline::Top)
            .draw(&mut preview)
            .expect("preview never fails");
    }
    preview.show().expect("preview never fails");
    preview
}

fn assert_same_screen(actual: &StatusPreview, expected: &StatusPreview) {
    for y in 0..64 {
        for x in 0..128 {
            assert_eq!(
                actual.is_lit(x, y),
                expected.is_lit(x, y),
                "pixel ({x}, {y}) differs"
            );
        }
    }
}

/// Surface whose every operation fails, counting `show` attempts.
#[derive(Default)]
struct BrokenSurface {
    shows: usize,
}

impl OriginDimensions for BrokenSurface {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

impl DrawTarget for BrokenSurface {
    type Color = BinaryColor;
    type Error = ();

    fn draw_iter<I>(&mut self, _pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Err(())
    }
}

impl StatusSurface for BrokenSurface {
    fn show(&mut self) -> Result<()> {
        self.shows += 1;
        Err(Error::DisplayBus)
    }
}

struct FailingSelector;

impl TickSelector for FailingSelector {
    async fn on_tick(&mut self) -> Result<Option<Glyph>> {
        Err(Error::Adc)
    }
}

struct FixedSelector(Option<Glyph>);

impl TickSelector for FixedSelector {
    async fn on_tick(&mut self) -> Result<Option<Glyph>> {
        Ok(self.0)
    }
}

// ============================================================================
// TickCounter
// ============================================================================

#[test]
fn counter_wraps_after_one_hundred() {
    let mut counter = TickCounter::new();
    for _ in 0..100 {
        counter.advance();
    }
    assert_eq!(counter.value(), 100);
    counter.advance();
    assert_eq!(counter.value(), 0);
    counter.advance();
    assert_eq!(counter.value(), 1);
}

#[test]
fn counter_text_format() {
    assert_eq!(counter_text(0).as_str(), "0 km|h");
    assert_eq!(counter_text(42).as_str(), "42 km|h");
    assert_eq!(counter_text(100).as_str(), "100 km|h");
    assert_eq!(counter_text(u8::MAX).as_str(), "255 km|h");
}

// ============================================================================
// render_status
// ============================================================================

#[test]
fn all_off_shows_counter_and_border() {
    let mut preview = StatusPreview::new();
    render_status(&mut preview, leds(false, false, false), 7).expect("preview never fails");

    assert_eq!(preview.show_count(), 1);
    assert_same_screen(&preview, &expected_screen(&[("7 km|h", COUNTER_ORIGIN)]));
    assert!(preview.is_lit(3, 3));
    assert!(preview.is_lit(124, 60));
    assert!(!preview.is_lit(64, 55));
}

#[test]
fn green_replaces_counter_with_banner() {
    let mut preview = StatusPreview::new();
    render_status(&mut preview, leds(true, false, false), 7).expect("preview never fails");

    assert_same_screen(&preview, &expected_screen(&[("MM On", BANNER_ORIGIN)]));
}

#[test]
fn blue_shows_five_liters() {
    let mut preview = StatusPreview::new();
    render_status(&mut preview, leds(false, true, false), 3).expect("preview never fails");

    assert_same_screen(
        &preview,
        &expected_screen(&[("3 km|h", COUNTER_ORIGIN), ("Gas 5L", LEVEL_ORIGIN)]),
    );
}

#[test]
fn red_shows_two_liters() {
    let mut preview = StatusPreview::new();
    render_status(&mut preview, leds(true, false, true), 3).expect("preview never fails");

    assert_same_screen(
        &preview,
        &expected_screen(&[("MM On", BANNER_ORIGIN), ("Gas 2L", LEVEL_ORIGIN)]),
    );
}

#[test]
fn blue_wins_over_red() {
    let mut both = StatusPreview::new();
    render_status(&mut both, leds(false, true, true), 9).expect("preview never fails");
    let mut blue = StatusPreview::new();
    render_status(&mut blue, leds(false, true, false), 9).expect("preview never fails");

    assert_same_screen(&both, &blue);
}

#[test]
fn each_render_replaces_the_previous_screen() {
    let mut preview = StatusPreview::new();
    render_status(&mut preview, leds(true, true, false), 0).expect("preview never fails");
    render_status(&mut preview, leds(false, false, false), 12).expect("preview never fails");

    assert_eq!(preview.show_count(), 2);
    assert_same_screen(&preview, &expected_screen(&[("12 km|h", COUNTER_ORIGIN)]));
}

#[test]
fn draw_failure_is_a_display_bus_error() {
    let mut surface = BrokenSurface::default();
    let outcome = render_status(&mut surface, leds(false, false, false), 0);
    assert!(matches!(outcome, Err(Error::DisplayBus)));
    assert_eq!(surface.shows, 0);
}

// ============================================================================
// PanelLoop
// ============================================================================

#[test]
fn tick_renders_state_and_advances_counter() {
    let state = PanelState::new();
    let mut panel_loop = PanelLoop::new();
    let mut preview = StatusPreview::new();
    let mut selector = FixedSelector(Some(Glyph::North));

    let first = block_on(panel_loop.tick(&mut selector, &mut preview, &state));
    assert!(matches!(first, Ok(Some(Glyph::North))));
    assert_same_screen(&preview, &expected_screen(&[("0 km|h", COUNTER_ORIGIN)]));

    block_on(panel_loop.tick(&mut selector, &mut preview, &state)).expect("preview never fails");
    assert_same_screen(&preview, &expected_screen(&[("1 km|h", COUNTER_ORIGIN)]));
    assert_eq!(panel_loop.counter().value(), 2);
    assert_eq!(preview.show_count(), 2);
}

#[test]
fn tick_still_renders_and_counts_when_selector_fails() {
    let state = PanelState::new();
    let mut panel_loop = PanelLoop::new();
    let mut preview = StatusPreview::new();

    let outcome = block_on(panel_loop.tick(&mut FailingSelector, &mut preview, &state));

    assert!(matches!(outcome, Err(Error::Adc)));
    assert_eq!(preview.show_count(), 1);
    assert_eq!(panel_loop.counter().value(), 1);
}

#[test]
fn tick_counts_when_display_fails() {
    let state = PanelState::new();
    let mut panel_loop = PanelLoop::new();
    let mut surface = BrokenSurface::default();

    for _ in 0..3 {
        let outcome = block_on(panel_loop.tick(&mut FixedSelector(None), &mut surface, &state));
        assert!(matches!(outcome, Err(Error::DisplayBus)));
    }
    assert_eq!(panel_loop.counter().value(), 3);
}

#[test]
fn counter_wraps_across_ticks() {
    let state = PanelState::new();
    let mut panel_loop = PanelLoop::new();
    let mut preview = StatusPreview::new();
    let mut selector = FixedSelector(None);

    for _ in 0..101 {
        block_on(panel_loop.tick(&mut selector, &mut preview, &state)).expect("preview never fails");
    }
    assert_same_screen(&preview, &expected_screen(&[("100 km|h", COUNTER_ORIGIN)]));

    block_on(panel_loop.tick(&mut selector, &mut preview, &state)).expect("preview never fails");
    assert_same_screen(&preview, &expected_screen(&[("0 km|h", COUNTER_ORIGIN)]));
}

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
fn timer_mode_ticks_do_not_disturb_the_animation() {
    let state = PanelState::new();
    let mut panel_loop = PanelLoop::new();
    let mut preview = StatusPreview::new();
    let mut selector = TimerSelector;
    let mut driver = AnimationDriver::new(LedMatrix::new(RecordingChannel::default()));

    // Six ticks per firing: a 3 s animation period over a 500 ms tick.
    let shown = block_on(async {
        let mut shown = vec![driver.start().await];
        for _ in 0..3 {
            for _ in 0..6 {
                let outcome = panel_loop.tick(&mut selector, &mut preview, &state).await;
                assert!(matches!(outcome, Ok(None)));
            }
            shown.push(driver.on_timer().await);
        }
        shown
    });

    assert_eq!(shown, [Glyph::One, Glyph::Two, Glyph::Three, Glyph::One]);
    let frames = &driver.matrix().channel().frames;
    let expected: Vec<Frame5x5> = shown.iter().map(|glyph| Frame5x5::from_glyph(*glyph)).collect();
    assert_eq!(
        *frames, expected,
        "one frame per start or firing, none from the ticks"
    );
    assert_eq!(panel_loop.counter().value(), 18);
    assert_eq!(preview.show_count(), 18);
}
