// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! GPIO adapters for the embedded-hal 1.0 traits the robot layer is written against.
//!
//! - [`Out`] / [`In`] wrap HAL push-pull outputs and floating inputs.
//! - [`SonarPin`] drives the ranger's shared trigger/echo wire on PE4, flipping MODER at runtime
//!   and timing the echo with the DWT cycle counter.
//! - [`SysDelay`] puts the SysTick delay behind `DelayNs`.

use core::{convert::Infallible, ops::Deref};

use cortex_m::peripheral::{DWT, SYST};
use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin},
};
use stm32f7xx_hal::{
    gpio::{self, gpioe, Floating, Input, Output, PushPull},
    pac,
};

use crate::hw::EchoPin;

/// Push-pull output.
pub struct Out<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> Out<P, N> {
    pub fn new(pin: gpio::Pin<P, N, Output<PushPull>>) -> Self {
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for Out<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for Out<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}

/// Floating input.
pub struct In<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Input<Floating>>,
}

impl<const P: char, const N: u8> In<P, N> {
    pub fn new(pin: gpio::Pin<P, N, Input<Floating>>) -> Self {
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Input<Floating>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for In<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> InputPin for In<P, N> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_high())
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pin.is_high())
    }
}

const SONAR_PIN: u32 = 4;

/// PE4 as a single-wire trigger/echo line.
///
/// The DWT cycle counter must be running (`DCB::enable_trace` + `DWT::enable_cycle_counter`).
pub struct SonarPin {
    pin: gpioe::PE4<Input<Floating>>,
    cycles_per_us: u32,
}

impl SonarPin {
    pub fn new(pin: gpioe::PE4<Input<Floating>>, sysclk_hz: u32) -> Self {
        Self {
            pin,
            cycles_per_us: (sysclk_hz / 1_000_000).max(1),
        }
    }

    #[inline]
    fn regs() -> &'static <pac::GPIOE as Deref>::Target {
        unsafe { &*pac::GPIOE::ptr() }
    }

    fn set_mode(&mut self, output: bool) {
        let shift = SONAR_PIN * 2;
        let mode = u32::from(output);
        Self::regs()
            .moder
            .modify(|r, w| unsafe { w.bits((r.bits() & !(0b11 << shift)) | (mode << shift)) });
    }

    fn drive(&mut self, high: bool) {
        self.set_mode(true);
        let bit = if high { SONAR_PIN } else { SONAR_PIN + 16 };
        Self::regs().bsrr.write(|w| unsafe { w.bits(1 << bit) });
    }

    #[inline]
    fn level() -> bool {
        Self::regs().idr.read().bits() & (1 << SONAR_PIN) != 0
    }

    /// Spin until the line reads `level` or `deadline` cycles have passed since `start`.
    fn wait_for(&self, level: bool, start: u32, deadline: u32) -> bool {
        while Self::level() != level {
            if DWT::cycle_count().wrapping_sub(start) >= deadline {
                return false;
            }
        }
        true
    }

    /// Leave the line as an input and give the pin back.
    pub fn free(mut self) -> gpioe::PE4<Input<Floating>> {
        self.set_mode(false);
        self.pin
    }
}

impl ErrorType for SonarPin {
    type Error = Infallible;
}

impl OutputPin for SonarPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl EchoPin for SonarPin {
    fn disable_pull(&mut self) -> Result<(), Self::Error> {
        let shift = SONAR_PIN * 2;
        Self::regs()
            .pupdr
            .modify(|r, w| unsafe { w.bits(r.bits() & !(0b11 << shift)) });
        Ok(())
    }

    fn pulse_in_high(&mut self, timeout_us: u32) -> Result<u32, Self::Error> {
        self.set_mode(false);

        let budget = timeout_us.saturating_mul(self.cycles_per_us);
        let start = DWT::cycle_count();

        // Finish any pulse already in progress, then catch the next rising edge.
        if !self.wait_for(false, start, budget) || !self.wait_for(true, start, budget) {
            return Ok(0);
        }
        let rise = DWT::cycle_count();
        if !self.wait_for(false, start, budget) {
            return Ok(0);
        }
        let width = DWT::cycle_count().wrapping_sub(rise);

        Ok(width / self.cycles_per_us)
    }
}

/// SysTick-backed blocking delay.
pub struct SysDelay {
    delay: cortex_m::delay::Delay,
}

impl SysDelay {
    pub fn new(syst: SYST, sysclk_hz: u32) -> Self {
        Self {
            delay: cortex_m::delay::Delay::new(syst, sysclk_hz),
        }
    }
}

impl DelayNs for SysDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
