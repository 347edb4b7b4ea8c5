// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

use embedded_hal::digital::OutputPin;

use crate::error::{self, Result};

/// Whether the buzzer sounds on a high or a low pin level.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ActiveLevel {
    #[default]
    High,
    Low,
}

/// On/off buzzer on one GPIO. Keeps no state; every call writes the pin.
pub struct Buzzer<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
}

impl<PIN: OutputPin> Buzzer<PIN> {
    /// Wrap `pin` without touching it.
    pub fn new(pin: PIN, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Host-facing control: `0` silences the buzzer, any other value sounds it.
    #[inline]
    pub fn set(&mut self, flag: i32) -> Result<()> {
        self.set_on(flag != 0)
    }

    pub fn set_on(&mut self, on: bool) -> Result<()> {
        let res = match (self.active, on) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high(),
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low(),
        };
        res.map_err(error::digital)
    }

    #[inline]
    pub fn on(&mut self) -> Result<()> {
        self.set_on(true)
    }

    #[inline]
    pub fn off(&mut self) -> Result<()> {
        self.set_on(false)
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

impl<PIN: OutputPin> Buzzer<PIN> {
    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }
    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }
}
