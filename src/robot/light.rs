// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Light sensors sharing one analog input through a two-way mux.
//!
//! A read is always select-then-sample on the same owner, so two reads can never interleave on
//! the shared channel. There is no settle time between switching the mux and sampling; fast
//! alternating reads rely on the ADC's own sample time for the input to follow the switch.

use embedded_hal::digital::{OutputPin, PinState};

use super::Side;
use crate::{
    error::{self, Result},
    hw::AdcRead,
};

pub struct LightSensors<SEL, ADC> {
    select: SEL,
    adc: ADC,
    channel: u8,
}

impl<SEL, ADC> LightSensors<SEL, ADC>
where
    SEL: OutputPin,
    ADC: AdcRead,
{
    /// `channel` is the ADC channel wired to the shared sensor output.
    pub fn new(select: SEL, adc: ADC, channel: u8) -> Self {
        Self {
            select,
            adc,
            channel,
        }
    }

    /// Route `side` to the shared input and return one raw sample.
    pub fn read(&mut self, side: Side) -> Result<u16> {
        let level = match side {
            Side::Left => PinState::Low,
            Side::Right => PinState::High,
        };
        self.select.set_state(level).map_err(error::digital)?;
        Ok(self.adc.read_channel(self.channel))
    }

    pub fn free(self) -> (SEL, ADC) {
        (self.select, self.adc)
    }
}
