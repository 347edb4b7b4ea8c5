// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Recording stand-ins for the hardware collaborators, used by the host tests.
//!
//! Every mock shares one [`Journal`], so a test can assert on the exact interleaving of pin
//! writes, duty writes, delays and ADC samples across several collaborators.

use core::{cell::Cell, cell::RefCell, convert::Infallible};
use std::{rc::Rc, vec::Vec};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, ErrorType, InputPin, OutputPin},
    pwm::{self, SetDutyCycle},
};
use smart_leds::{SmartLedsWrite, RGB8};

use crate::hw::{AdcRead, EchoPin};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Level(&'static str, bool),
    Duty(&'static str, u16),
    Sample(u8),
    PullDisabled(&'static str),
    DelayUs(u32),
    DelayNs(u32),
    PulseIn(&'static str, u32),
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Return and forget everything recorded so far.
    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Digital pin whose level is shared with any clones, so a test can flip an input.
#[derive(Clone)]
pub struct Pin {
    name: &'static str,
    level: Rc<Cell<bool>>,
    journal: Journal,
}

impl Pin {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            level: Rc::new(Cell::new(false)),
            journal: journal.clone(),
        }
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn drive(&self, high: bool) {
        self.level.set(high);
    }
}

impl ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        self.journal.push(Event::Level(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        self.journal.push(Event::Level(self.name, true));
        Ok(())
    }
}

impl InputPin for Pin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// Pin that fails every access.
pub struct FaultyPin;

impl ErrorType for FaultyPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

impl InputPin for FaultyPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

impl EchoPin for FaultyPin {
    fn disable_pull(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn pulse_in_high(&mut self, _timeout_us: u32) -> Result<u32, Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

/// PWM channel with a configurable resolution.
pub struct Pwm {
    name: &'static str,
    max: u16,
    journal: Journal,
}

impl Pwm {
    pub fn new(name: &'static str, max: u16, journal: &Journal) -> Self {
        Self {
            name,
            max,
            journal: journal.clone(),
        }
    }
}

impl pwm::ErrorType for Pwm {
    type Error = Infallible;
}

impl SetDutyCycle for Pwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.journal.push(Event::Duty(self.name, duty));
        Ok(())
    }
}

/// PWM channel that rejects every duty cycle.
pub struct FaultyPwm;

impl pwm::ErrorType for FaultyPwm {
    type Error = pwm::ErrorKind;
}

impl SetDutyCycle for FaultyPwm {
    fn max_duty_cycle(&self) -> u16 {
        1023
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Err(pwm::ErrorKind::Other)
    }
}

/// ADC behind a two-way mux: returns `samples[0]` while `select` is low and `samples[1]` while
/// it is high.
pub struct Adc {
    select: Pin,
    samples: [u16; 2],
    journal: Journal,
}

impl Adc {
    pub fn new(select: &Pin, samples: [u16; 2], journal: &Journal) -> Self {
        Self {
            select: select.clone(),
            samples,
            journal: journal.clone(),
        }
    }
}

impl AdcRead for Adc {
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.journal.push(Event::Sample(ch));
        self.samples[usize::from(self.select.level())]
    }
}

pub struct Delay {
    journal: Journal,
}

impl Delay {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.journal.push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.journal.push(Event::DelayUs(us));
    }
}

/// Trigger/echo line that answers with a fixed echo width.
///
/// With `honor_timeout`, echoes at or beyond the timeout read as 0 the way real pulse timers do.
/// Without it the raw width is reported regardless.
pub struct Echo {
    pin: Pin,
    echo_us: Rc<Cell<u32>>,
    honor_timeout: bool,
}

impl Echo {
    pub fn new(journal: &Journal, echo_us: u32) -> Self {
        Self {
            pin: Pin::new("sonar", journal),
            echo_us: Rc::new(Cell::new(echo_us)),
            honor_timeout: true,
        }
    }

    pub fn ignoring_timeout(mut self) -> Self {
        self.honor_timeout = false;
        self
    }

    /// Handle for changing the echo width after the pin has been moved into a ranger.
    pub fn echo_handle(&self) -> Rc<Cell<u32>> {
        self.echo_us.clone()
    }
}

impl ErrorType for Echo {
    type Error = Infallible;
}

impl OutputPin for Echo {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }
}

impl EchoPin for Echo {
    fn disable_pull(&mut self) -> Result<(), Self::Error> {
        self.pin.journal.push(Event::PullDisabled(self.pin.name));
        Ok(())
    }

    fn pulse_in_high(&mut self, timeout_us: u32) -> Result<u32, Self::Error> {
        self.pin.journal.push(Event::PulseIn(self.pin.name, timeout_us));
        let echo = self.echo_us.get();
        if self.honor_timeout && echo >= timeout_us {
            return Ok(0);
        }
        Ok(echo)
    }
}

/// LED serial writer keeping every frame it was handed.
#[derive(Clone, Default)]
pub struct LedWriter {
    frames: Rc<RefCell<Vec<Vec<RGB8>>>>,
    fail: bool,
}

impl LedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> Vec<Vec<RGB8>> {
        self.frames.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<Vec<RGB8>> {
        self.frames.borrow().last().cloned()
    }
}

impl SmartLedsWrite for LedWriter {
    type Error = ();
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.fail {
            return Err(());
        }
        let frame = iterator.into_iter().map(Into::into).collect();
        self.frames.borrow_mut().push(frame);
        Ok(())
    }
}
