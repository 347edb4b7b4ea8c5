// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-wire trigger/echo pin.
//!
//! Some ultrasonic rangers bring trigger and echo out on the same wire. The pin is driven as an
//! output for the trigger pulse and then read back as an input while the echo comes in, so both
//! halves live behind one trait and one owner.

use embedded_hal::digital::OutputPin;

/// A GPIO that can fire an ultrasonic trigger and then time the echo on the same wire.
///
/// The [`OutputPin`] half drives the trigger. Implementations switch the pin back to an input
/// inside [`pulse_in_high`](EchoPin::pulse_in_high).
pub trait EchoPin: OutputPin {
    /// Disconnect the internal pull-up/pull-down resistors.
    fn disable_pull(&mut self) -> Result<(), Self::Error>;

    /// Wait for the next high pulse and return its width in microseconds.
    ///
    /// Returns `0` if no complete pulse is seen within `timeout_us`.
    fn pulse_in_high(&mut self, timeout_us: u32) -> Result<u32, Self::Error>;
}
