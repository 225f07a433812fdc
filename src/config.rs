//! Compile-time configuration for the panel.
//!
//! Nothing here changes at runtime. Pin assignments are fixed by the
//! signatures in the `board` module; they are listed here for reference:
//!
//! | Function                | GPIO            |
//! | ----------------------- | --------------- |
//! | LED matrix data (PIO0)  | 7               |
//! | Green indicator LED     | 11              |
//! | Blue indicator LED      | 12              |
//! | Red indicator LED       | 13              |
//! | Confirm button          | 5 (pull-up)     |
//! | Cycle button            | 6 (pull-up)     |
//! | Joystick X (ADC0)       | 26              |
//! | Joystick Y (ADC1)       | 27              |
//! | Display SDA / SCL (I2C1)| 14 / 15         |

use embassy_time::Duration;
use embedded_graphics::prelude::{Point, Size};

// ============================================================================
// Timing
// ============================================================================

/// Minimum time between accepted button edges, shared by both buttons.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Main loop period.
pub const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Period of the timer-driven glyph animation.
pub const ANIMATION_PERIOD: Duration = Duration::from_millis(3000);

/// Idle gap after each LED-matrix frame. WS2812 framing is timing-only, so a
/// shorter gap merges two frames.
pub const FRAME_GAP: Duration = Duration::from_micros(100);

/// Settling time between ADC channel select and conversion.
pub const ADC_SETTLE: Duration = Duration::from_micros(20);

// ============================================================================
// Display
// ============================================================================

/// I2C bus frequency for the status display.
pub const DISPLAY_I2C_FREQUENCY: u32 = 400_000;

/// 7-bit I2C address of the SSD1306 status display.
pub const DISPLAY_ADDRESS: u8 = 0x3C;

/// Top-left corner of the border box.
pub const BORDER_TOP_LEFT: Point = Point::new(3, 3);

/// Size of the border box.
pub const BORDER_SIZE: Size = Size::new(122, 58);

/// Origin of the "green LED on" banner.
pub const BANNER_ORIGIN: Point = Point::new(10, 10);

/// Origin of the counter readout shown while the green LED is off.
pub const COUNTER_ORIGIN: Point = Point::new(45, 25);

/// Origin of the blue/red status line.
pub const LEVEL_ORIGIN: Point = Point::new(10, 50);

/// Largest value the tick counter shows before wrapping to zero.
pub const COUNTER_LIMIT: u8 = 100;
