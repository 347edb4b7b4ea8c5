// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # bitrobot
//!
//! Hardware control layer for a small two-wheeled robot: drive motors, buzzer, line and light
//! sensors, a 12-pixel addressable LED strip and a single-wire ultrasonic ranger. Components are
//! generic over `embedded-hal` 1.0 and `smart-leds`; the `board` feature adds STM32F777 bindings
//! and a self-test firmware image.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Collaborator traits, pin table, MCU-level GPIO/PWM/ADC/SPI/USART wrappers |
//! | [`drivers`] | Device-level drivers (LED strip buffer, WS2812 encoder) |
//! | [`robot`] | Host-facing components (motors, buzzer, sensors, LEDs, ranger) |
//! | [`error`] | Crate error type |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

#[cfg(test)]
extern crate std;

pub mod drivers;
pub mod error;
pub mod hw;
pub mod robot;

#[cfg(test)]
mod mock;

pub use error::{Error, Result};
