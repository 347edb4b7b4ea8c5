// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Differential drive.
//!
//! Each side is an H-bridge fed by one PWM channel (speed magnitude) and one GPIO (direction).
//! A signed speed is clamped to ±[`MAX_SPEED`], split into magnitude and [`Direction`], and
//! written to the selected side(s): duty first, then direction.
//!
//! ```ignore
//! let mut drive = MotorDriver::new(Motor::new(l_pwm, l_dir), Motor::new(r_pwm, r_dir));
//! drive.drive(MotorSelector::All, 600)?;
//! drive.drive(MotorSelector::Right, -5000)?; // clamped to -1023
//! ```

use embedded_hal::{
    digital::{OutputPin, PinState},
    pwm::SetDutyCycle,
};
use log::trace;

use crate::error::{self, Result};

/// Largest speed magnitude; anything beyond is clamped.
pub const MAX_SPEED: u16 = 1023;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MotorSelector {
    Left,
    Right,
    All,
}

impl MotorSelector {
    #[inline]
    const fn left(self) -> bool {
        matches!(self, MotorSelector::Left | MotorSelector::All)
    }

    #[inline]
    const fn right(self) -> bool {
        matches!(self, MotorSelector::Right | MotorSelector::All)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Which direction pin level means "forward" on a given H-bridge wiring.
///
/// The default suits the STM32F777 board. The edge-connector wiring in `PinMap::BIT_ROBOT` reads a
/// low direction pin as forward and needs [`DirPolarity::BIT_ROBOT`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DirPolarity {
    #[default]
    ForwardHigh,
    ForwardLow,
}

impl DirPolarity {
    /// Polarity of the motor drivers on the `PinMap::BIT_ROBOT` wiring.
    pub const BIT_ROBOT: Self = DirPolarity::ForwardLow;

    #[inline]
    pub const fn level(self, dir: Direction) -> PinState {
        match (self, dir) {
            (DirPolarity::ForwardHigh, Direction::Forward)
            | (DirPolarity::ForwardLow, Direction::Reverse) => PinState::High,
            _ => PinState::Low,
        }
    }
}

/// Split a signed speed into a clamped magnitude and a direction. Zero counts as forward.
#[inline]
pub fn encode_speed(speed: i32) -> (u16, Direction) {
    let magnitude = speed.unsigned_abs().min(u32::from(MAX_SPEED)) as u16;
    let dir = if speed < 0 {
        Direction::Reverse
    } else {
        Direction::Forward
    };
    (magnitude, dir)
}

/// One side of the drive: PWM channel plus direction pin.
pub struct Motor<PWM, DIR> {
    pwm: PWM,
    dir: DIR,
}

impl<PWM, DIR> Motor<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    pub fn new(pwm: PWM, dir: DIR) -> Self {
        Self { pwm, dir }
    }

    fn apply(&mut self, magnitude: u16, level: PinState) -> Result<()> {
        self.pwm
            .set_duty_cycle_fraction(magnitude, MAX_SPEED)
            .map_err(error::pwm)?;
        self.dir.set_state(level).map_err(error::digital)
    }

    pub fn free(self) -> (PWM, DIR) {
        (self.pwm, self.dir)
    }
}

/// Left and right motors.
pub struct MotorDriver<L, R> {
    left: L,
    right: R,
    polarity: DirPolarity,
}

impl<LP, LD, RP, RD> MotorDriver<Motor<LP, LD>, Motor<RP, RD>>
where
    LP: SetDutyCycle,
    LD: OutputPin,
    RP: SetDutyCycle,
    RD: OutputPin,
{
    pub fn new(left: Motor<LP, LD>, right: Motor<RP, RD>) -> Self {
        Self {
            left,
            right,
            polarity: DirPolarity::default(),
        }
    }

    pub fn with_polarity(mut self, polarity: DirPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Drive the selected motor(s) at `speed`, clamped to ±1023.
    pub fn drive(&mut self, selector: MotorSelector, speed: i32) -> Result<()> {
        let (magnitude, dir) = encode_speed(speed);
        let level = self.polarity.level(dir);
        trace!("motor {selector:?}: speed {speed} -> duty {magnitude} {dir:?}");

        if selector.left() {
            self.left.apply(magnitude, level)?;
        }
        if selector.right() {
            self.right.apply(magnitude, level)?;
        }
        Ok(())
    }

    #[inline]
    pub fn stop(&mut self, selector: MotorSelector) -> Result<()> {
        self.drive(selector, 0)
    }

    pub fn free(self) -> (Motor<LP, LD>, Motor<RP, RD>) {
        (self.left, self.right)
    }
}
