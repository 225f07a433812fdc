//! Choosing which glyph the matrix shows.
//!
//! Two strategies, picked once at startup with [`SelectorMode`]:
//!
//! - **Joystick**: every main-loop tick samples the stick and maps it onto one
//!   of eight arrows with [`select_octant`]. A centered stick selects nothing
//!   and the previous glyph stays lit.
//! - **Timer**: a periodic timer advances an [`AnimationState`] through the
//!   numerals and redraws the matrix itself; the main loop leaves the matrix
//!   alone.

use crate::Result;
use crate::glyph::Glyph;
use crate::led5x5::{LedMatrix, MatrixChannel};

// ============================================================================
// Joystick octant selection
// ============================================================================

/// Axis reading below which the X axis counts as low.
pub const X_LOW_BELOW: u16 = 1900;
/// Lower (exclusive) bound of the middle band.
pub const MID_ABOVE: u16 = 1800;
/// Upper (exclusive) bound of the middle band; readings above it are high.
pub const HIGH_ABOVE: u16 = 2400;
/// Y reading below which the stick counts as pulled down while X is centered.
pub const Y_LOW_BELOW: u16 = 1900;

/// One reading of both joystick axes, 12-bit (`0..=4095`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct JoystickSample {
    /// Horizontal axis (ADC0).
    pub x: u16,
    /// Vertical axis (ADC1).
    pub y: u16,
}

impl JoystickSample {
    /// Create a sample from raw axis readings.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Map a joystick reading to an arrow, or `None` to keep the current glyph.
///
/// The bands overlap (`1800 < mid < 2400` against `low < 1900`) and exactly
/// 2400 falls in no band on either axis. Both quirks are part of the panel's
/// established behavior and are kept as-is:
///
/// | x \ y             | `y > 2400` | `1800 < y < 2400` | `y <= 1800` |
/// | ----------------- | ---------- | ----------------- | ----------- |
/// | `x < 1900`        | NorthEast  | East              | SouthEast   |
/// | `1900 <= x < 2400`| North      | South below 1900  | South       |
/// | `x > 2400`        | NorthWest  | West              | SouthWest   |
///
/// `x == 2400` selects nothing, whatever `y` is. With the stick centered on X,
/// `1900 <= y <= 2400` selects nothing. Elsewhere `y == 2400` selects nothing.
///
/// ```rust
/// use panel_envoy::glyph::Glyph;
/// use panel_envoy::selector::{JoystickSample, select_octant};
///
/// assert_eq!(select_octant(JoystickSample::new(1000, 2000)), Some(Glyph::East));
/// assert_eq!(select_octant(JoystickSample::new(2000, 2000)), None);
/// ```
#[must_use]
pub const fn select_octant(sample: JoystickSample) -> Option<Glyph> {
    let JoystickSample { x, y } = sample;
    let y_mid = y < HIGH_ABOVE && y > MID_ABOVE;

    if x < X_LOW_BELOW {
        if y_mid {
            Some(Glyph::East)
        } else if y > HIGH_ABOVE {
            Some(Glyph::NorthEast)
        } else if y < HIGH_ABOVE {
            Some(Glyph::SouthEast)
        } else {
            None
        }
    } else if x < HIGH_ABOVE && x > MID_ABOVE {
        if y > HIGH_ABOVE {
            Some(Glyph::North)
        } else if y < Y_LOW_BELOW {
            Some(Glyph::South)
        } else {
            None
        }
    } else if x > HIGH_ABOVE {
        if y > HIGH_ABOVE {
            Some(Glyph::NorthWest)
        } else if y_mid {
            Some(Glyph::West)
        } else if y < HIGH_ABOVE {
            Some(Glyph::SouthWest)
        } else {
            None
        }
    } else {
        None
    }
}

// ============================================================================
// Timer-driven animation
// ============================================================================

/// Position in the three-step numeral animation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, defmt::Format)]
pub enum AnimationState {
    /// Showing [`Glyph::One`].
    #[default]
    First,
    /// Showing [`Glyph::Two`].
    Second,
    /// Showing [`Glyph::Three`].
    Third,
}

impl AnimationState {
    /// The following state; `Third` wraps to `First`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::Third,
            Self::Third => Self::First,
        }
    }

    /// Glyph shown in this state.
    #[must_use]
    pub const fn glyph(self) -> Glyph {
        match self {
            Self::First => Glyph::One,
            Self::Second => Glyph::Two,
            Self::Third => Glyph::Three,
        }
    }
}

/// Owns the matrix while the timer drives it.
///
/// Each [`on_timer`](Self::on_timer) call is one timer firing. Firings are
/// serialized by the caller, so the state advances exactly once per firing no
/// matter how many main-loop ticks pass in between.
pub struct AnimationDriver<C> {
    state: AnimationState,
    matrix: LedMatrix<C>,
}

impl<C: MatrixChannel> AnimationDriver<C> {
    /// Take over the matrix, starting at [`AnimationState::First`].
    #[must_use]
    pub const fn new(matrix: LedMatrix<C>) -> Self {
        Self {
            state: AnimationState::First,
            matrix,
        }
    }

    /// Draw the current state without advancing. Call once before the first firing.
    pub async fn start(&mut self) -> Glyph {
        let glyph = self.state.glyph();
        self.matrix.draw_glyph(glyph).await;
        glyph
    }

    /// Advance one step and draw the new glyph.
    pub async fn on_timer(&mut self) -> Glyph {
        self.state = self.state.next();
        let glyph = self.state.glyph();
        self.matrix.draw_glyph(glyph).await;
        glyph
    }

    /// Current animation state.
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// The matrix being driven.
    #[must_use]
    pub const fn matrix(&self) -> &LedMatrix<C> {
        &self.matrix
    }
}

// ============================================================================
// Per-tick strategy
// ============================================================================

/// Which strategy picks the glyph. Chosen once at startup.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum SelectorMode {
    /// Sample the joystick every tick.
    Joystick,
    /// Cycle the numerals on [`ANIMATION_PERIOD`](crate::config::ANIMATION_PERIOD).
    Timer,
}

/// Source of joystick readings.
pub trait JoystickSampler {
    /// Read both axes, X first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Adc`](crate::Error::Adc) if a conversion fails.
    async fn sample(&mut self) -> Result<JoystickSample>;
}

/// Joystick axis, by ADC input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Axis {
    /// ADC0.
    X,
    /// ADC1.
    Y,
}

/// An ADC whose conversion also selects its input.
pub trait AxisAdc {
    /// Switch to `axis` and convert it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Adc`](crate::Error::Adc) if the conversion fails.
    async fn convert(&mut self, axis: Axis) -> Result<u16>;

    /// Wait [`ADC_SETTLE`](crate::config::ADC_SETTLE).
    async fn settle(&mut self);
}

/// Read X then Y.
///
/// Each axis is converted twice and the first result dropped: it was taken
/// right after the input switch, before the sample capacitor settled.
///
/// # Errors
///
/// Returns the first conversion error.
pub async fn sample_axes<A: AxisAdc>(adc: &mut A) -> Result<JoystickSample> {
    let x = read_settled(adc, Axis::X).await?;
    let y = read_settled(adc, Axis::Y).await?;
    Ok(JoystickSample::new(x, y))
}

async fn read_settled<A: AxisAdc>(adc: &mut A, axis: Axis) -> Result<u16> {
    adc.convert(axis).await?;
    adc.settle().await;
    adc.convert(axis).await
}

/// Glyph selection run once per main-loop tick.
pub trait TickSelector {
    /// Run one selection step. Returns the glyph drawn this tick, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the input could not be read. The matrix is left unchanged.
    async fn on_tick(&mut self) -> Result<Option<Glyph>>;
}

/// Joystick strategy: owns the sampler and the matrix.
pub struct JoystickSelector<S, C> {
    sampler: S,
    matrix: LedMatrix<C>,
    last_glyph: Option<Glyph>,
}

impl<S: JoystickSampler, C: MatrixChannel> JoystickSelector<S, C> {
    /// Combine a sampler with the matrix it steers.
    #[must_use]
    pub const fn new(sampler: S, matrix: LedMatrix<C>) -> Self {
        Self {
            sampler,
            matrix,
            last_glyph: None,
        }
    }

    /// Glyph currently lit, if the stick has left center at least once.
    #[must_use]
    pub const fn last_glyph(&self) -> Option<Glyph> {
        self.last_glyph
    }

    /// The matrix being steered.
    #[must_use]
    pub const fn matrix(&self) -> &LedMatrix<C> {
        &self.matrix
    }
}

impl<S: JoystickSampler, C: MatrixChannel> TickSelector for JoystickSelector<S, C> {
    async fn on_tick(&mut self) -> Result<Option<Glyph>> {
        let sample = self.sampler.sample().await?;
        let Some(glyph) = select_octant(sample) else {
            return Ok(None);
        };
        self.matrix.draw_glyph(glyph).await;
        self.last_glyph = Some(glyph);
        Ok(Some(glyph))
    }
}

/// Timer strategy seen from the main loop: nothing to do, the timer task owns the matrix.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerSelector;

impl TickSelector for TimerSelector {
    async fn on_tick(&mut self) -> Result<Option<Glyph>> {
        Ok(None)
    }
}
