// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! Collaborator seams the robot layer is generic over, and their STM32F777 implementations.
//!
//! - [`adc`] – `AdcRead` trait, plus ADC1 on the board
//! - [`echo`] – `EchoPin` trait for single-wire trigger/echo rangers
//! - [`pins`] – role → pin table, plus `BoardPins` on the board
//!
//! With the `board` feature:
//!
//! - [`gpio`] – embedded-hal 1.0 GPIO adapters, sonar line, SysTick delay
//! - [`pwm`] – TIM4 motor PWM channels
//! - [`spi`] – SPI bus wrapper feeding the LED strip
//! - [`usart`] – debug serial port and `log` sink

pub mod adc;
pub mod echo;
pub mod pins;

#[cfg(feature = "board")]
pub mod gpio;
#[cfg(feature = "board")]
pub mod pwm;
#[cfg(feature = "board")]
pub mod spi;
#[cfg(feature = "board")]
pub mod usart;

pub use adc::AdcRead;
pub use echo::EchoPin;
pub use pins::{PinId, PinMap};

#[cfg(feature = "board")]
pub use adc::Adc;
#[cfg(feature = "board")]
pub use gpio::{In, Out, SonarPin, SysDelay};
#[cfg(feature = "board")]
pub use pins::BoardPins;
#[cfg(feature = "board")]
pub use spi::SpiBus;
#[cfg(feature = "board")]
pub use usart::{init_logger, Usart};
