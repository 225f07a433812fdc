//! Status screen on the monochrome display.
//!
//! Each tick the whole screen is redrawn: a border box, one line for the green
//! LED (a banner when on, the tick counter when off), and one line for the
//! blue/red pair (blue wins when both are lit). The screen is shown once the
//! whole frame is drawn.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X9},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::config::{
    BANNER_ORIGIN, BORDER_SIZE, BORDER_TOP_LEFT, COUNTER_LIMIT, COUNTER_ORIGIN, LEVEL_ORIGIN,
};
use crate::glyph::Glyph;
use crate::indicator::{IndicatorLeds, PanelState};
use crate::selector::TickSelector;
use crate::{Error, Result};

/// Text shown while the green LED is lit.
pub const GREEN_ON_TEXT: &str = "MM On";

/// Text shown while the blue LED is lit.
pub const BLUE_ON_TEXT: &str = "Gas 5L";

/// Text shown while the red LED is lit and the blue one is not.
pub const RED_ON_TEXT: &str = "Gas 2L";

/// A display the status screen can be drawn on.
///
/// Drawing only touches an off-screen buffer; [`show`](Self::show) sends it.
pub trait StatusSurface: DrawTarget<Color = BinaryColor> {
    /// Send the buffer to the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplayBus`] if the transfer fails.
    fn show(&mut self) -> Result<()>;
}

/// Counter shown on the status screen: `0..=100`, then back to `0`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TickCounter(u8);

impl TickCounter {
    /// Counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Current value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Step once, wrapping past [`COUNTER_LIMIT`] to zero.
    pub const fn advance(&mut self) {
        let next = self.0.saturating_add(1);
        self.0 = if next > COUNTER_LIMIT { 0 } else { next };
    }
}

/// Counter readout, e.g. `"42 km|h"`.
#[must_use]
pub fn counter_text(counter: u8) -> String<16> {
    let mut text = String::new();
    // At most "255 km|h" (8 bytes), so the write cannot run out of room.
    if write!(text, "{counter} km|h").is_err() {
        text.clear();
    }
    text
}

/// Redraw the whole status screen and show it.
///
/// # Errors
///
/// Returns [`Error::DisplayBus`] if drawing or the final transfer fails.
pub fn render_status<D: StatusSurface>(
    surface: &mut D,
    leds: IndicatorLeds,
    counter: u8,
) -> Result<()> {
    let text_style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);

    surface
        .clear(BinaryColor::Off)
        .map_err(|_| Error::DisplayBus)?;
    draw_border(surface)?;

    if leds.green {
        draw_text(surface, GREEN_ON_TEXT, BANNER_ORIGIN, text_style)?;
    } else {
        draw_text(surface, &counter_text(counter), COUNTER_ORIGIN, text_style)?;
    }

    if leds.blue {
        draw_text(surface, BLUE_ON_TEXT, LEVEL_ORIGIN, text_style)?;
    } else if leds.red {
        draw_text(surface, RED_ON_TEXT, LEVEL_ORIGIN, text_style)?;
    } else {
        draw_border(surface)?;
    }

    surface.show()
}

/// Draw the border box: one-pixel outline, interior untouched.
///
/// # Errors
///
/// Returns [`Error::DisplayBus`] if the draw fails.
pub fn draw_border<D: DrawTarget<Color = BinaryColor>>(surface: &mut D) -> Result<()> {
    Rectangle::new(BORDER_TOP_LEFT, BORDER_SIZE)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(surface)
        .map_err(|_| Error::DisplayBus)
}

fn draw_text<D: DrawTarget<Color = BinaryColor>>(
    surface: &mut D,
    text: &str,
    origin: Point,
    style: MonoTextStyle<'static, BinaryColor>,
) -> Result<()> {
    Text::with_baseline(text, origin, style, Baseline::Top)
        .draw(surface)
        .map(|_| ())
        .map_err(|_| Error::DisplayBus)
}

// ============================================================================
// PanelLoop - one main-loop tick
// ============================================================================

/// Everything the main loop does once per [`TICK_PERIOD`](crate::config::TICK_PERIOD).
///
/// A tick runs the selector, redraws the status screen from the current
/// indicator levels, then advances the counter. The counter advances even when
/// the selector or the display fails, so the readout keeps moving after a
/// transient fault.
#[derive(Debug, Default)]
pub struct PanelLoop {
    counter: TickCounter,
}

impl PanelLoop {
    /// Loop with the counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: TickCounter::new(),
        }
    }

    /// Run one tick. Returns the glyph the selector drew, if any.
    ///
    /// # Errors
    ///
    /// Returns the selector's error if it failed, otherwise the display's.
    /// Both steps are attempted either way.
    pub async fn tick<T, D>(
        &mut self,
        selector: &mut T,
        surface: &mut D,
        state: &PanelState,
    ) -> Result<Option<Glyph>>
    where
        T: TickSelector,
        D: StatusSurface,
    {
        let selected = selector.on_tick().await;
        let rendered = render_status(surface, state.snapshot(), self.counter.value());
        self.counter.advance();
        let glyph = selected?;
        rendered?;
        Ok(glyph)
    }

    /// Value the next tick will display.
    #[must_use]
    pub const fn counter(&self) -> TickCounter {
        self.counter
    }
}
