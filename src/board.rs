//! Board bring-up and the embassy tasks that run the panel.
//!
//! Everything in here touches RP2040 peripherals, owns a timer, or logs, so it
//! is left out of the host build.
//!
//! [`Panel::run`] brings up the matrix, the indicator LEDs, the buttons, the
//! joystick, and the status display, spawns the background tasks, and then
//! runs the main loop forever:
//!
//! - the **button task** waits for a falling edge on either button and feeds it
//!   to the [`ButtonController`];
//! - in [`SelectorMode::Timer`], the **animation task** owns the matrix and
//!   steps the numeral animation every [`ANIMATION_PERIOD`];
//! - the **main loop** ticks every [`TICK_PERIOD`]: it runs the selector and
//!   redraws the status screen.

use core::convert::Infallible;

use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::adc::{self, Adc, Async, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program, Rgb};
use embassy_time::{Instant, Ticker, Timer};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

use crate::config::{
    ADC_SETTLE, ANIMATION_PERIOD, DISPLAY_ADDRESS, DISPLAY_I2C_FREQUENCY, FRAME_GAP, TICK_PERIOD,
};
use crate::glyph::Glyph;
use crate::indicator::{ButtonController, PanelButton, PanelState};
use crate::led5x5::{Frame5x5, LED_COUNT, LedMatrix, MatrixChannel};
use crate::selector::{
    AnimationDriver, Axis, AxisAdc, JoystickSample, JoystickSampler, JoystickSelector,
    SelectorMode, TickSelector, TimerSelector, sample_axes,
};
use crate::status::{PanelLoop, StatusSurface, draw_border};
use crate::{Error, Result};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// ============================================================================
// LED matrix channel
// ============================================================================

// The panel LEDs take red first; this order matches `Frame5x5::to_wire_bytes`.
type MatrixDriver = PioWs2812<'static, PIO0, 0, LED_COUNT, Rgb>;

/// WS2812 output on PIO0 state machine 0, fed by DMA.
pub struct Ws2812Channel {
    driver: MatrixDriver,
}

impl MatrixChannel for Ws2812Channel {
    async fn write_frame(&mut self, frame: &Frame5x5) {
        self.driver.write(frame).await;
        Timer::after(FRAME_GAP).await;
    }
}

// ============================================================================
// Joystick
// ============================================================================

/// Two-axis joystick on ADC0 (X) and ADC1 (Y).
pub struct AdcJoystick {
    adc: Adc<'static, Async>,
    x: Channel<'static>,
    y: Channel<'static>,
}

impl AxisAdc for AdcJoystick {
    async fn convert(&mut self, axis: Axis) -> Result<u16> {
        let channel = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        // `read` switches the mux and starts the conversion together.
        self.adc.read(channel).await.map_err(|_| Error::Adc)
    }

    async fn settle(&mut self) {
        Timer::after(ADC_SETTLE).await;
    }
}

impl JoystickSampler for AdcJoystick {
    async fn sample(&mut self) -> Result<JoystickSample> {
        sample_axes(self).await
    }
}

// ============================================================================
// Status display
// ============================================================================

/// SSD1306 128×64 on I2C1, buffered.
pub type StatusDisplay = Ssd1306<
    I2CInterface<I2c<'static, I2C1, i2c::Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

impl StatusSurface for StatusDisplay {
    fn show(&mut self) -> Result<()> {
        self.flush().map_err(|_| Error::DisplayBus)
    }
}

// ============================================================================
// Tasks
// ============================================================================

type PanelButtons = ButtonController<'static, Output<'static>, Output<'static>, Output<'static>>;

#[embassy_executor::task]
async fn button_task(
    mut confirm: Input<'static>,
    mut cycle: Input<'static>,
    mut controller: PanelButtons,
) -> ! {
    loop {
        let button = match select(confirm.wait_for_falling_edge(), cycle.wait_for_falling_edge())
            .await
        {
            Either::First(()) => PanelButton::Confirm,
            Either::Second(()) => PanelButton::Cycle,
        };
        if let Some(leds) = controller.on_edge(button, Instant::now()) {
            debug!(
                "{} pressed: green={} blue={} red={}",
                button, leds.green, leds.blue, leds.red
            );
        }
    }
}

#[embassy_executor::task]
async fn animation_task(mut driver: AnimationDriver<Ws2812Channel>) -> ! {
    let mut ticker = Ticker::every(ANIMATION_PERIOD);
    let glyph = driver.start().await;
    debug!("animation start: {}", glyph);
    loop {
        ticker.next().await;
        let glyph = driver.on_timer().await;
        debug!("animation step: {} ({})", driver.state(), glyph);
    }
}

// ============================================================================
// Panel
// ============================================================================

static PANEL_STATE: PanelState = PanelState::new();

/// The whole panel.
pub struct Panel;

impl Panel {
    /// Bring up every peripheral, spawn the tasks, and run the main loop.
    ///
    /// Only returns on a bring-up failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplayBus`] if the display does not initialize, or
    /// [`Error::TaskSpawn`] if a task cannot be spawned.
    pub async fn run(
        p: embassy_rp::Peripherals,
        mode: SelectorMode,
        spawner: Spawner,
    ) -> Result<Infallible> {
        info!("panel starting in {} mode", mode);

        let Pio {
            mut common, sm0, ..
        } = Pio::new(p.PIO0, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let driver: MatrixDriver = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);
        let mut matrix = LedMatrix::new(Ws2812Channel { driver });
        matrix.clear().await;
        info!("LED matrix cleared");

        let controller = ButtonController::new(
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
            &PANEL_STATE,
        );
        let confirm = Input::new(p.PIN_5, Pull::Up);
        let cycle = Input::new(p.PIN_6, Pull::Up);

        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = DISPLAY_I2C_FREQUENCY;
        let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_ADDRESS);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| Error::DisplayBus)?;
        DrawTarget::clear(&mut display, BinaryColor::Off).map_err(|_| Error::DisplayBus)?;
        draw_border(&mut display)?;
        display.show()?;
        info!("status display ready");

        let token = button_task(confirm, cycle, controller);
        spawner.spawn(token).map_err(Error::TaskSpawn)?;

        match mode {
            SelectorMode::Joystick => {
                let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
                let joystick = AdcJoystick {
                    adc,
                    x: Channel::new_pin(p.PIN_26, Pull::None),
                    y: Channel::new_pin(p.PIN_27, Pull::None),
                };
                main_loop(JoystickSelector::new(joystick, matrix), &mut display).await
            }
            SelectorMode::Timer => {
                let token = animation_task(AnimationDriver::new(matrix));
                spawner.spawn(token).map_err(Error::TaskSpawn)?;
                main_loop(TimerSelector, &mut display).await
            }
        }
    }
}

async fn main_loop<T: TickSelector>(mut selector: T, display: &mut StatusDisplay) -> ! {
    let mut panel_loop = PanelLoop::new();
    let mut ticker = Ticker::every(TICK_PERIOD);
    let mut shown: Option<Glyph> = None;
    loop {
        match panel_loop.tick(&mut selector, display, &PANEL_STATE).await {
            Ok(Some(glyph)) if shown != Some(glyph) => {
                debug!("glyph: {}", glyph);
                shown = Some(glyph);
            }
            Ok(_) => {}
            Err(err) => warn!("tick failed: {}", err),
        }
        ticker.next().await;
    }
}
