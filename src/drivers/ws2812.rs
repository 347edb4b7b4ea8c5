// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! WS2812 serial protocol over SPI.
//!
//! The SPI clock runs at [`SPI_FREQ_HZ`], so one SPI byte spans two WS2812 bit slots and every
//! color byte expands into four SPI bytes. Only MOSI is wired to the strip.
//!
//! [`encode`] sends a pixel's fields in `r, g, b` order. WS2812 parts latch green first, which is
//! why `StripConfig` defaults to `ColorOrder::Grb`: the strip swaps the channels before they get
//! here. A frame ends with a low reset period.

use smart_leds::RGB8;

/// SPI clock for the encoding below (312.5 ns per SPI bit).
pub const SPI_FREQ_HZ: u32 = 3_200_000;

/// SPI bytes per pixel: three color bytes, four SPI bytes each.
pub const PIXEL_BYTES: usize = 12;

/// Two WS2812 bits per SPI byte: `0` = 1000, `1` = 1110.
const PATTERNS: [u8; 4] = [0x88, 0x8E, 0xE8, 0xEE];

/// SPI bytes for one color byte, most significant bit first.
#[inline]
fn encode_byte(mut data: u8) -> [u8; 4] {
    let mut out = [0u8; 4];
    for slot in out.iter_mut() {
        *slot = PATTERNS[usize::from((data & 0b1100_0000) >> 6)];
        data <<= 2;
    }
    out
}

/// SPI bytes for one pixel, fields sent as `r, g, b`.
pub fn encode(c: RGB8) -> [u8; PIXEL_BYTES] {
    let mut out = [0u8; PIXEL_BYTES];
    for (chunk, byte) in out.chunks_exact_mut(4).zip([c.r, c.g, c.b]) {
        chunk.copy_from_slice(&encode_byte(byte));
    }
    out
}

#[cfg(feature = "board")]
pub use self::board::Ws2812Spi;

#[cfg(feature = "board")]
mod board {
    use smart_leds::{SmartLedsWrite, RGB8};
    use stm32f7xx_hal::spi;

    use super::encode;
    use crate::hw::SpiBus;

    /// Zero bytes sent after a frame; 120 bytes at 3.2 MHz hold the line low for 300 µs.
    const RESET_BYTES: usize = 120;

    pub struct Ws2812Spi<I, P> {
        bus: SpiBus<I, P>,
    }

    impl<I, P> Ws2812Spi<I, P>
    where
        I: spi::Instance,
        P: spi::Pins<I>,
    {
        pub fn new(bus: SpiBus<I, P>) -> Self {
            Self { bus }
        }

        pub fn free(self) -> SpiBus<I, P> {
            self.bus
        }
    }

    impl<I, P> SmartLedsWrite for Ws2812Spi<I, P>
    where
        I: spi::Instance,
        P: spi::Pins<I>,
    {
        type Error = spi::Error;
        type Color = RGB8;

        fn write<T, J>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = J>,
            J: Into<Self::Color>,
        {
            for item in iterator {
                self.bus.write(&encode(item.into()))?;
            }
            self.bus.write(&[0u8; RESET_BYTES])
        }
    }
}
