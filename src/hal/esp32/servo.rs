//! SG90 servo implementation using ESP32 LEDC PWM.
//!
//! Hobby servos expect a 50 Hz PWM signal whose pulse width encodes the
//! angle: roughly 500µs at 0° through 2500µs at 180° for an SG90. The LEDC
//! peripheral generates the signal; angle writes translate to duty updates.

use crate::traits::ServoActuator;
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;

/// SG90 latch servo on ESP32 LEDC PWM.
///
/// Uses the LEDC peripheral at 50 Hz with 14-bit resolution, giving
/// sub-degree pulse-width granularity across the 500-2500µs band.
///
/// # Example
///
/// ```ignore
/// use servo_latch::hal::esp32::Esp32Servo;
/// use servo_latch::traits::ServoActuator;
///
/// let peripherals = Peripherals::take()?;
/// let mut servo = Esp32Servo::new(
///     peripherals.pins.gpio2,
///     peripherals.ledc.timer0,
///     peripherals.ledc.channel0,
/// )?;
///
/// servo.set_angle(90)?;
/// ```
pub struct Esp32Servo<'d> {
    pwm: LedcDriver<'d>,
    max_duty: u32,
}

impl<'d> Esp32Servo<'d> {
    /// PWM frequency in Hz (standard hobby servo frame rate)
    const PWM_FREQ_HZ: u32 = 50;

    /// PWM resolution (14-bit = 16384 steps per 20ms frame)
    const PWM_RESOLUTION: Resolution = Resolution::Bits14;

    /// PWM period in microseconds (50 Hz = 20ms)
    const PERIOD_US: u32 = 20_000;

    /// Pulse width at 0 degrees
    const MIN_PULSE_US: u32 = 500;

    /// Pulse width at 180 degrees
    const MAX_PULSE_US: u32 = 2_500;

    /// Creates a new SG90 servo driver.
    ///
    /// # Arguments
    ///
    /// * `pwm_pin` - GPIO for the servo signal (typically GPIO2)
    /// * `timer` - LEDC timer peripheral
    /// * `channel` - LEDC channel for the PWM output
    ///
    /// # Errors
    ///
    /// Returns an error if PWM initialization fails.
    pub fn new<T, TI, C, CI, P, PI>(
        pwm_pin: P,
        timer: T,
        channel: C,
    ) -> Result<Self, esp_idf_hal::sys::EspError>
    where
        TI: esp_idf_hal::ledc::LedcTimer + 'd,
        T: Peripheral<P = TI> + 'd,
        CI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
        C: Peripheral<P = CI> + 'd,
        PI: esp_idf_hal::gpio::OutputPin + 'd,
        P: Peripheral<P = PI> + 'd,
    {
        // Configure LEDC timer: 50Hz, 14-bit resolution
        let timer_config = TimerConfig::default()
            .frequency(Self::PWM_FREQ_HZ.Hz())
            .resolution(Self::PWM_RESOLUTION);
        let timer_driver = LedcTimerDriver::new(timer, &timer_config)?;

        let pwm = LedcDriver::new(channel, &timer_driver, pwm_pin)?;
        let max_duty = pwm.get_max_duty();

        Ok(Self { pwm, max_duty })
    }

    /// Converts an angle (0-180) to an LEDC duty value.
    fn angle_to_duty(&self, angle: u8) -> u32 {
        let angle = u32::from(angle.min(180));
        let pulse_us =
            Self::MIN_PULSE_US + (angle * (Self::MAX_PULSE_US - Self::MIN_PULSE_US)) / 180;
        (pulse_us * self.max_duty) / Self::PERIOD_US
    }
}

impl ServoActuator for Esp32Servo<'_> {
    type Error = esp_idf_hal::sys::EspError;

    fn set_angle(&mut self, angle: u8) -> Result<(), Self::Error> {
        let duty = self.angle_to_duty(angle);
        self.pwm.set_duty(duty)
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        // Zero pulse width: the servo stops holding position
        self.pwm.set_duty(0)
    }
}
