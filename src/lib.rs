//! Firmware core for a small instrument panel on a Pico 1 or 2 (BitDogLab-style board).
//!
//! The panel has:
//!
//! - a 5×5 WS2812 LED matrix showing an arrow that follows the joystick, or a
//!   1-2-3 animation driven by a timer ([`selector`]);
//! - three indicator LEDs driven by two debounced buttons ([`indicator`]);
//! - an SSD1306 128×64 display showing the LED states and a tick counter
//!   ([`status`]).
//!
//! Everything except `board` is hardware independent and runs on the
//! development machine with `cargo test --no-default-features --features host`.
//!
//! # Glossary
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   generates the WS2812 bit timing for the matrix.
//! - **Tick:** one pass of the main loop, every [`TICK_PERIOD`](config::TICK_PERIOD).
//! - **Glyph:** a fixed 5×5 bitmap for the matrix ([`glyph::Glyph`]).
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: the firmware only targets the ARM cores
#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature");

// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod board;
pub mod config;
mod error;
pub mod glyph;
pub mod indicator;
pub mod led5x5;
pub mod selector;
pub mod status;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
