// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reflective line sensors, one digital input per side.

use embedded_hal::digital::InputPin;

use super::Side;
use crate::error::{self, Result};

pub struct LineSensors<L, R> {
    left: L,
    right: R,
}

impl<L: InputPin, R: InputPin> LineSensors<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Raw level of one sensor: `1` for high, `0` for low.
    pub fn read(&mut self, side: Side) -> Result<u8> {
        let high = match side {
            Side::Left => self.left.is_high().map_err(error::digital)?,
            Side::Right => self.right.is_high().map_err(error::digital)?,
        };
        Ok(u8::from(high))
    }

    pub fn free(self) -> (L, R) {
        (self.left, self.right)
    }
}
