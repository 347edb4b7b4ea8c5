// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! Device-level drivers that sit above the raw `hw/` layer and below the robot components.
//!
//! ## Existing drivers
//!
//! - [`neopixel`] – addressable LED strip buffer over any `smart-leds` writer
//! - [`ws2812`] – WS2812 bit encoding, sent over SPI with the `board` feature

pub mod neopixel;
pub mod ws2812;

pub use neopixel::{unpack_rgb, ColorOrder, NeoStrip, StripConfig};

#[cfg(feature = "board")]
pub use ws2812::Ws2812Spi;
