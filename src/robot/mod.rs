// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Robot Components
//!
//! The host-facing operations, one component per subsystem. Each owns the collaborators it
//! drives and no component calls another.
//!
//! - [`motor`] – differential drive with speed clamping
//! - [`buzzer`] – on/off buzzer
//! - [`line`] – digital line sensors
//! - [`light`] – muxed analog light sensors
//! - [`leds`] – lazily created 12-pixel LED strip
//! - [`sonar`] – single-wire ultrasonic ranger

pub mod buzzer;
pub mod leds;
pub mod light;
pub mod line;
pub mod motor;
pub mod sonar;

pub use buzzer::Buzzer;
pub use leds::{LedStrip, LED_COUNT};
pub use light::LightSensors;
pub use line::LineSensors;
pub use motor::{DirPolarity, Motor, MotorDriver, MotorSelector};
pub use sonar::{DistanceUnit, Ranger};

/// Which of a left/right sensor pair to read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}
