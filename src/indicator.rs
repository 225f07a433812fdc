//! Debounced buttons driving the three indicator LEDs.
//!
//! Two pull-up buttons fire on their falling edge:
//!
//! - **Confirm** toggles the green LED.
//! - **Cycle** steps the blue/red pair through [`CycleState`]: blue, then red,
//!   then both off, then blue again.
//!
//! Both buttons share one [`Debouncer`]: an edge on either button is ignored
//! unless more than [`DEBOUNCE_WINDOW`] has passed since the last accepted
//! edge on *either* button.
//!
//! [`ButtonController`] is the edge handler. It runs in a single context that
//! is never re-entered, and it is the only writer of [`PanelState`]; the main
//! loop only reads the state.

use core::convert::Infallible;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::{PinState, StatefulOutputPin};
use portable_atomic::{AtomicBool, Ordering};

use crate::config::DEBOUNCE_WINDOW;

// ============================================================================
// PanelButton
// ============================================================================

/// The two front-panel buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum PanelButton {
    /// Toggles the green LED.
    Confirm,
    /// Steps the blue/red pair.
    Cycle,
}

// ============================================================================
// Debouncer
// ============================================================================

/// Single timestamp debounce shared by every button.
///
/// The window starts at boot, so edges in the first [`DEBOUNCE_WINDOW`] after
/// boot are ignored too.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Instant,
}

impl Debouncer {
    /// Debouncer with the given window, as if an edge was accepted at boot.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: Instant::from_ticks(0),
        }
    }

    /// Accept `now` if strictly more than the window has passed since the last
    /// accepted edge. Accepting restarts the window.
    pub fn accept(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_accepted) > self.window {
            self.last_accepted = now;
            true
        } else {
            false
        }
    }

    /// Time of the last accepted edge.
    #[must_use]
    pub const fn last_accepted(&self) -> Instant {
        self.last_accepted
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

// ============================================================================
// CycleState
// ============================================================================

/// Blue/red output pattern applied by the next Cycle press.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, defmt::Format)]
pub enum CycleState {
    /// Blue on, red off.
    #[default]
    BlueOn,
    /// Blue off, red on.
    RedOn,
    /// Both off.
    BothOff,
}

impl CycleState {
    /// `(blue, red)` output levels for this state.
    #[must_use]
    pub const fn outputs(self) -> (bool, bool) {
        match self {
            Self::BlueOn => (true, false),
            Self::RedOn => (false, true),
            Self::BothOff => (false, false),
        }
    }

    /// The following state; `BothOff` wraps to `BlueOn`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::BlueOn => Self::RedOn,
            Self::RedOn => Self::BothOff,
            Self::BothOff => Self::BlueOn,
        }
    }
}

// ============================================================================
// PanelState - shared between the edge handler and the main loop
// ============================================================================

/// Indicator LED output levels at one instant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, defmt::Format)]
pub struct IndicatorLeds {
    /// Green LED (Confirm button).
    pub green: bool,
    /// Blue LED (Cycle button).
    pub blue: bool,
    /// Red LED (Cycle button).
    pub red: bool,
}

/// State shared by the button handler and the main loop.
///
/// Written only by [`ButtonController`]; everything else reads it through
/// [`snapshot`](Self::snapshot). Each field is a single atomic, so no lock is
/// needed.
#[derive(Debug, Default)]
pub struct PanelState {
    green: AtomicBool,
    blue: AtomicBool,
    red: AtomicBool,
}

impl PanelState {
    /// All indicators off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            green: AtomicBool::new(false),
            blue: AtomicBool::new(false),
            red: AtomicBool::new(false),
        }
    }

    /// Current indicator levels.
    #[must_use]
    pub fn snapshot(&self) -> IndicatorLeds {
        IndicatorLeds {
            green: self.green.load(Ordering::Acquire),
            blue: self.blue.load(Ordering::Acquire),
            red: self.red.load(Ordering::Acquire),
        }
    }

    fn publish(&self, leds: IndicatorLeds) {
        self.green.store(leds.green, Ordering::Release);
        self.blue.store(leds.blue, Ordering::Release);
        self.red.store(leds.red, Ordering::Release);
    }
}

// ============================================================================
// ButtonController - the edge handler
// ============================================================================

/// Handles debounced button edges and drives the indicator LEDs.
///
/// Pins are any `embedded-hal` stateful outputs that cannot fail (GPIO outputs
/// on the Pico never do).
pub struct ButtonController<'a, G, B, R> {
    green: G,
    blue: B,
    red: R,
    debouncer: Debouncer,
    cycle: CycleState,
    state: &'a PanelState,
}

impl<'a, G, B, R> ButtonController<'a, G, B, R>
where
    G: StatefulOutputPin<Error = Infallible>,
    B: StatefulOutputPin<Error = Infallible>,
    R: StatefulOutputPin<Error = Infallible>,
{
    /// Take the LED pins, drive them all low, and publish that to `state`.
    pub fn new(mut green: G, mut blue: B, mut red: R, state: &'a PanelState) -> Self {
        let Ok(()) = green.set_low();
        let Ok(()) = blue.set_low();
        let Ok(()) = red.set_low();
        state.publish(IndicatorLeds::default());
        Self {
            green,
            blue,
            red,
            debouncer: Debouncer::default(),
            cycle: CycleState::default(),
            state,
        }
    }

    /// Handle a falling edge seen at `now`.
    ///
    /// Returns the new LED levels, or `None` if the edge fell inside the
    /// debounce window and was ignored.
    pub fn on_edge(&mut self, button: PanelButton, now: Instant) -> Option<IndicatorLeds> {
        if !self.debouncer.accept(now) {
            return None;
        }

        match button {
            PanelButton::Confirm => {
                let Ok(()) = self.green.toggle();
            }
            PanelButton::Cycle => {
                let (blue, red) = self.cycle.outputs();
                let Ok(()) = self.blue.set_state(PinState::from(blue));
                let Ok(()) = self.red.set_state(PinState::from(red));
                self.cycle = self.cycle.next();
            }
        }

        let leds = self.read_leds();
        self.state.publish(leds);
        Some(leds)
    }

    /// Pattern the next Cycle press applies.
    #[must_use]
    pub const fn cycle_state(&self) -> CycleState {
        self.cycle
    }

    /// The shared debouncer.
    #[must_use]
    pub const fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    fn read_leds(&mut self) -> IndicatorLeds {
        let Ok(green) = self.green.is_set_high();
        let Ok(blue) = self.blue.is_set_high();
        let Ok(red) = self.red.is_set_high();
        IndicatorLeds { green, blue, red }
    }
}
