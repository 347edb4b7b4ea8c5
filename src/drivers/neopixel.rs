// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Addressable LED strip driver.
//!
//! [`NeoStrip`] keeps a full-scale pixel buffer and pushes it through any `smart-leds` writer on
//! [`show`](NeoStrip::show). Brightness and channel order are applied on the way out, so buffer
//! edits (`shift`, `rotate`, ...) always see the colors as they were set.
//!
//! ```ignore
//! let mut strip = NeoStrip::<_, 12>::new(writer, StripConfig::new(PinId::Edge(13)));
//! strip.set_all(unpack_rgb(0xFF_00_00));
//! strip.show()?;
//! ```

use core::fmt::Debug;

use log::warn;
use smart_leds::{
    brightness,
    hsv::{hsv2rgb, Hsv},
    SmartLedsWrite, RGB8,
};

use crate::{
    error::{Error, Result},
    hw::PinId,
};

/// Brightness a freshly created strip starts with.
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Decode a `0x00RRGGBB` packed color.
#[inline]
pub const fn unpack_rgb(packed: u32) -> RGB8 {
    RGB8 {
        r: (packed >> 16) as u8,
        g: (packed >> 8) as u8,
        b: packed as u8,
    }
}

/// Channel order expected by the strip's serial protocol. WS2812 parts latch green first.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ColorOrder {
    Rgb,
    #[default]
    Grb,
}

impl ColorOrder {
    /// Reorder `c` so that a writer sending `r, g, b` in turn produces this order on the wire.
    #[inline]
    pub const fn apply(self, c: RGB8) -> RGB8 {
        match self {
            ColorOrder::Rgb => c,
            ColorOrder::Grb => RGB8 {
                r: c.g,
                g: c.r,
                b: c.b,
            },
        }
    }
}

/// Static description of a strip.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StripConfig {
    pub data_pin: PinId,
    pub order: ColorOrder,
    pub brightness: u8,
}

impl StripConfig {
    pub const fn new(data_pin: PinId) -> Self {
        Self {
            data_pin,
            order: ColorOrder::Grb,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    pub const fn with_order(mut self, order: ColorOrder) -> Self {
        self.order = order;
        self
    }

    pub const fn with_brightness(mut self, level: u8) -> Self {
        self.brightness = level;
        self
    }
}

/// `N` pixels behind a `smart-leds` writer.
pub struct NeoStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    order: ColorOrder,
    brightness: u8,
}

impl<W, const N: usize> NeoStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
    W::Error: Debug,
{
    /// Create a strip with every pixel off. Nothing is written until [`show`](Self::show).
    pub fn new(writer: W, config: StripConfig) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
            order: config.order,
            brightness: config.brightness,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline]
    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    /// Buffered color at `offset`, or `None` past the end of the strip.
    #[inline]
    pub fn pixel(&self, offset: usize) -> Option<RGB8> {
        self.pixels.get(offset).copied()
    }

    pub fn set_all(&mut self, color: RGB8) {
        self.pixels.fill(color);
    }

    /// Set one pixel. Offsets past the end of the strip are ignored.
    pub fn set_pixel(&mut self, offset: usize, color: RGB8) {
        if let Some(p) = self.pixels.get_mut(offset) {
            *p = color;
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(RGB8::default());
    }

    /// Spread the hue wheel evenly over the strip, starting at red on pixel 0.
    pub fn rainbow(&mut self) {
        for (i, p) in self.pixels.iter_mut().enumerate() {
            let hue = (i * 256 / N) as u8;
            *p = hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: 255,
            });
        }
    }

    /// Move every pixel one slot toward the end; pixel 0 goes dark and the last one falls off.
    pub fn shift(&mut self) {
        if N == 0 {
            return;
        }
        self.pixels.copy_within(0..N - 1, 1);
        self.pixels[0] = RGB8::default();
    }

    /// Move every pixel one slot toward the end, wrapping the last one around to pixel 0.
    pub fn rotate(&mut self) {
        if N == 0 {
            return;
        }
        self.pixels.rotate_right(1);
    }

    #[inline]
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    #[inline]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Push the buffer to the strip, scaled by the current brightness.
    pub fn show(&mut self) -> Result<()> {
        let order = self.order;
        let frame = self.pixels.iter().map(|&c| order.apply(c));
        self.writer
            .write(brightness(frame, self.brightness))
            .map_err(|err| {
                warn!("LED strip write failed: {err:?}");
                Error::LedWrite
            })
    }

    pub fn free(self) -> W {
        self.writer
    }
}
