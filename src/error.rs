// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Crate-wide error type.
//!
//! Nothing in this layer fails on its own account: motor speeds are clamped, ranging timeouts read
//! as zero and unknown distance units fall back to microseconds. Every variant below is a failure
//! reported by a hardware collaborator and handed back to the caller unchanged.

use embedded_hal::{digital, pwm};
use snafu::Snafu;

/// Failure reported by one of the hardware collaborators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Snafu)]
pub enum Error {
    /// A digital pin read or write failed.
    #[snafu(display("digital pin error: {kind:?}"))]
    Digital {
        /// What the pin reported.
        kind: digital::ErrorKind,
    },

    /// A PWM channel rejected a duty cycle.
    #[snafu(display("PWM channel error: {kind:?}"))]
    Pwm {
        /// What the channel reported.
        kind: pwm::ErrorKind,
    },

    /// The LED serial driver could not push a frame to the strip.
    #[snafu(display("LED strip write failed"))]
    LedWrite,

    /// The LED strip handle was already locked, e.g. an LED operation issued from inside
    /// `LedStrip::with_strip`.
    #[snafu(display("LED strip is busy"))]
    LedBusy,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[inline]
pub(crate) fn digital<E: digital::Error>(err: E) -> Error {
    Error::Digital { kind: err.kind() }
}

#[inline]
pub(crate) fn pwm<E: pwm::Error>(err: E) -> Error {
    Error::Pwm { kind: err.kind() }
}
