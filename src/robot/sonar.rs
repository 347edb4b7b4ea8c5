// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ultrasonic ranger on a single trigger/echo wire.
//!
//! One measurement is: release the pull resistor, hold the line low for [`SETTLE_US`], raise it
//! for a [`TRIGGER_US`] trigger pulse, drop it, then time the echo's high pulse. The echo wait is
//! bounded by [`ECHO_TIMEOUT_US`] (the round trip to [`MAX_DISTANCE_CM`]), which blocks the caller
//! for up to ~29 ms.
//!
//! A missing echo reads as `0`, the same as an object touching the sensor.

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::{
    error::{self, Result},
    hw::EchoPin,
};

/// Farthest distance worth waiting for.
pub const MAX_DISTANCE_CM: u32 = 500;
/// Round-trip echo time per centimeter.
pub const US_PER_CM: u32 = 58;
/// Round-trip echo time per inch.
pub const US_PER_INCH: u32 = 148;
/// Echo wait bound.
pub const ECHO_TIMEOUT_US: u32 = MAX_DISTANCE_CM * US_PER_CM;

/// Low time before the trigger so it starts on a clean edge.
pub const SETTLE_US: u32 = 2;
/// Trigger pulse width.
pub const TRIGGER_US: u32 = 10;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DistanceUnit {
    /// Raw echo width.
    #[default]
    Microseconds,
    Centimeters,
    Inches,
}

impl DistanceUnit {
    /// Convert a raw echo width. Truncates.
    #[inline]
    pub const fn convert(self, echo_us: u32) -> u32 {
        match self {
            DistanceUnit::Microseconds => echo_us,
            DistanceUnit::Centimeters => echo_us / US_PER_CM,
            DistanceUnit::Inches => echo_us / US_PER_INCH,
        }
    }
}

impl From<u8> for DistanceUnit {
    /// Host unit codes. Unknown codes report raw microseconds.
    fn from(code: u8) -> Self {
        match code {
            1 => DistanceUnit::Centimeters,
            2 => DistanceUnit::Inches,
            _ => DistanceUnit::Microseconds,
        }
    }
}

pub struct Ranger<P, D> {
    pin: P,
    delay: D,
}

impl<P: EchoPin, D: DelayNs> Ranger<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Fire one ping and return the echo width in microseconds, or `0` on timeout.
    pub fn ping(&mut self) -> Result<u32> {
        self.pin.disable_pull().map_err(error::digital)?;

        self.pin.set_low().map_err(error::digital)?;
        self.delay.delay_us(SETTLE_US);
        self.pin.set_high().map_err(error::digital)?;
        self.delay.delay_us(TRIGGER_US);
        self.pin.set_low().map_err(error::digital)?;

        let echo = self
            .pin
            .pulse_in_high(ECHO_TIMEOUT_US)
            .map_err(error::digital)?;

        if echo == 0 || echo >= ECHO_TIMEOUT_US {
            trace!("sonar: no echo within {ECHO_TIMEOUT_US} us (got {echo})");
            return Ok(0);
        }
        Ok(echo)
    }

    /// Distance to the nearest object in `unit`; `0` when nothing echoes back in range.
    pub fn measure(&mut self, unit: DistanceUnit) -> Result<u32> {
        Ok(unit.convert(self.ping()?))
    }

    pub fn free(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
