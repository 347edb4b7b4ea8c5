// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Lazily created LED strip.
//!
//! [`LedStrip`] holds a factory for the strip's serial writer and builds the [`NeoStrip`] handle
//! the first time any operation needs it. Every operation, including [`LedStrip::with_strip`],
//! goes through the same accessor, so the handle is created exactly once no matter which call
//! comes first or how many contexts race for it. The handle's lock is taken with `try_lock`, so a
//! call that finds it held fails with `Error::LedBusy` rather than spinning forever.
//!
//! ```ignore
//! let leds = LedStrip::new(StripConfig::new(pins.led_data), || Ws2812Spi::new(bus));
//! leds.set_all_color(0x00_00_FF)?; // creates the strip, fills it blue and shows it
//! leds.rotate()?;
//! leds.show()?;
//! ```

use core::fmt::Debug;

use log::debug;
use smart_leds::{SmartLedsWrite, RGB8};
use spin::{Mutex, MutexGuard, Once};

use crate::{
    drivers::{neopixel::unpack_rgb, NeoStrip, StripConfig},
    error::{Error, Result},
};

/// Pixels on the robot's strip.
pub const LED_COUNT: usize = 12;

pub type Strip<W> = NeoStrip<W, LED_COUNT>;

pub struct LedStrip<W, F> {
    config: StripConfig,
    create: Mutex<Option<F>>,
    strip: Once<Mutex<Strip<W>>>,
}

impl<W, F> LedStrip<W, F>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
    W::Error: Debug,
    F: FnOnce() -> W,
{
    /// Nothing is created until the first LED operation.
    pub const fn new(config: StripConfig, create: F) -> Self {
        Self {
            config,
            create: Mutex::new(Some(create)),
            strip: Once::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Whether the strip handle exists yet.
    #[inline]
    pub fn is_created(&self) -> bool {
        self.strip.is_completed()
    }

    /// Lock the strip handle, creating it on first use. The lock is never waited on: a caller
    /// that finds it held, e.g. an LED operation issued from inside
    /// [`with_strip`](Self::with_strip), gets [`Error::LedBusy`].
    fn strip(&self) -> Result<MutexGuard<'_, Strip<W>>> {
        let strip = self.strip.try_call_once(|| -> Result<_> {
            let create = self.create.try_lock().and_then(|mut f| f.take());
            let create = create.ok_or(Error::LedBusy)?;
            debug!(
                "LED strip: {} pixels on {}, {:?} order",
                LED_COUNT, self.config.data_pin, self.config.order
            );
            Ok(Mutex::new(NeoStrip::new(create(), self.config)))
        })?;
        strip.try_lock().ok_or(Error::LedBusy)
    }

    /// Run `f` with exclusive access to the strip handle. `f` must not call back into this
    /// `LedStrip`; such calls fail with [`Error::LedBusy`].
    pub fn with_strip<R>(&self, f: impl FnOnce(&mut Strip<W>) -> R) -> Result<R> {
        Ok(f(&mut *self.strip()?))
    }

    /// Paint every pixel `0x00RRGGBB` and show it.
    pub fn set_all_color(&self, packed: u32) -> Result<()> {
        let mut strip = self.strip()?;
        strip.set_all(unpack_rgb(packed));
        strip.show()
    }

    /// Set one buffered pixel; offsets past the end of the strip are ignored.
    pub fn set_pixel_color(&self, offset: usize, packed: u32) -> Result<()> {
        self.strip()?.set_pixel(offset, unpack_rgb(packed));
        Ok(())
    }

    pub fn show(&self) -> Result<()> {
        self.strip()?.show()
    }

    /// Turn every buffered pixel off. Call [`show`](Self::show) to push it out.
    pub fn clear(&self) -> Result<()> {
        self.strip()?.clear();
        Ok(())
    }

    /// Fill the strip with a hue sweep and show it.
    pub fn rainbow(&self) -> Result<()> {
        let mut strip = self.strip()?;
        strip.rainbow();
        strip.show()
    }

    pub fn shift(&self) -> Result<()> {
        self.strip()?.shift();
        Ok(())
    }

    pub fn rotate(&self) -> Result<()> {
        self.strip()?.rotate();
        Ok(())
    }

    /// Output scale for the next [`show`](Self::show): `0` is dark, `255` full.
    pub fn set_brightness(&self, level: u8) -> Result<()> {
        self.strip()?.set_brightness(level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        drivers::{neopixel::DEFAULT_BRIGHTNESS, ColorOrder},
        hw::PinId,
        mock::LedWriter,
    };
    use core::cell::Cell;
    use std::{boxed::Box, rc::Rc};

    const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

    type Counted = LedStrip<LedWriter, Box<dyn FnOnce() -> LedWriter>>;

    fn counted(writer: &LedWriter) -> (Counted, Rc<Cell<u32>>) {
        let created = Rc::new(Cell::new(0));
        let writer = writer.clone();
        let count = created.clone();
        let factory: Box<dyn FnOnce() -> LedWriter> = Box::new(move || {
            count.set(count.get() + 1);
            writer
        });
        let config = StripConfig::new(PinId::Edge(13))
            .with_order(ColorOrder::Rgb)
            .with_brightness(255);
        (LedStrip::new(config, factory), created)
    }

    fn all_ops() -> [fn(&Counted) -> Result<()>; 8] {
        [
            |s| s.set_all_color(0x10_20_30),
            |s| s.set_pixel_color(3, 0xFF_FF_FF),
            |s| s.show(),
            |s| s.clear(),
            |s| s.rainbow(),
            |s| s.shift(),
            |s| s.rotate(),
            |s| s.set_brightness(40),
        ]
    }

    #[test]
    fn construction_is_lazy() {
        let (leds, created) = counted(&LedWriter::new());
        assert!(!leds.is_created());
        assert_eq!(created.get(), 0);
    }

    #[test]
    fn every_operation_creates_the_strip_on_first_use() {
        for op in all_ops() {
            let (leds, created) = counted(&LedWriter::new());
            op(&leds).unwrap();
            assert!(leds.is_created());
            assert_eq!(created.get(), 1);
        }
    }

    #[test]
    fn strip_is_created_exactly_once() {
        let (leds, created) = counted(&LedWriter::new());
        for _ in 0..3 {
            for op in all_ops() {
                op(&leds).unwrap();
            }
        }
        leds.with_strip(|strip| strip.rotate()).unwrap();
        assert_eq!(created.get(), 1);
    }

    #[test]
    fn with_strip_creates_on_first_use() {
        let (leds, created) = counted(&LedWriter::new());
        let n = leds.with_strip(|strip| strip.len()).unwrap();
        assert_eq!(n, LED_COUNT);
        assert_eq!(created.get(), 1);
    }

    #[test]
    fn set_all_color_and_rainbow_show_immediately() {
        let writer = LedWriter::new();
        let (leds, _) = counted(&writer);

        leds.set_all_color(0x00_FF_00).unwrap();
        assert_eq!(writer.frames().len(), 1);
        assert!(writer.last_frame().unwrap().iter().all(|&p| p == RGB8::new(0, 255, 0)));

        leds.rainbow().unwrap();
        assert_eq!(writer.frames().len(), 2);
        let frame = writer.last_frame().unwrap();
        assert_eq!(frame.len(), LED_COUNT);
        assert_ne!(frame[0], frame[6]);
    }

    #[test]
    fn buffer_operations_wait_for_show() {
        let writer = LedWriter::new();
        let (leds, _) = counted(&writer);
        leds.set_pixel_color(0, 0xFF_00_00).unwrap();
        leds.set_pixel_color(LED_COUNT, 0xFF_00_00).unwrap();
        leds.rotate().unwrap();
        leds.shift().unwrap();
        leds.set_brightness(255).unwrap();
        assert!(writer.frames().is_empty());

        leds.show().unwrap();
        let mut expected = [OFF; LED_COUNT];
        expected[2] = RGB8::new(255, 0, 0);
        assert_eq!(writer.last_frame().unwrap(), expected);

        leds.clear().unwrap();
        assert_eq!(writer.frames().len(), 1);
        leds.show().unwrap();
        assert_eq!(writer.last_frame().unwrap(), [OFF; LED_COUNT]);
    }

    #[test]
    fn brightness_applies_on_the_next_show() {
        let writer = LedWriter::new();
        let (leds, _) = counted(&writer);
        leds.set_pixel_color(0, 0xFF_FF_FF).unwrap();
        leds.set_brightness(0).unwrap();
        leds.show().unwrap();
        assert_eq!(writer.last_frame().unwrap(), [OFF; LED_COUNT]);
        let pixel = leds.with_strip(|strip| strip.pixel(0)).unwrap();
        assert_eq!(pixel, Some(RGB8::new(255, 255, 255)));
    }

    #[test]
    fn default_brightness_is_half_scale() {
        let leds = LedStrip::new(StripConfig::new(PinId::Edge(13)), LedWriter::new);
        assert_eq!(leds.with_strip(|s| s.brightness()), Ok(DEFAULT_BRIGHTNESS));
    }

    #[test]
    fn writer_failures_surface_from_flushing_operations() {
        let leds = LedStrip::new(StripConfig::new(PinId::Edge(13)), LedWriter::failing);
        assert_eq!(leds.set_all_color(0), Err(Error::LedWrite));
        assert_eq!(leds.rainbow(), Err(Error::LedWrite));
        assert_eq!(leds.show(), Err(Error::LedWrite));
        assert!(leds.rotate().is_ok());
    }

    #[test]
    fn default_strip_puts_green_first() {
        let writer = LedWriter::new();
        let config = StripConfig::new(PinId::Edge(13)).with_brightness(255);
        let leds = LedStrip::new(config, || writer.clone());
        leds.set_all_color(0xFF_00_00).unwrap();
        let frame = writer.last_frame().unwrap();
        // The writer sends each pixel's fields in order, so `r` is the first byte on the wire.
        assert_eq!(frame[0].r, 0);
        assert_eq!(frame[0].g, 255);
    }

    #[test]
    fn reentrant_calls_fail_instead_of_deadlocking() {
        let writer = LedWriter::new();
        let (leds, created) = counted(&writer);

        assert_eq!(leds.with_strip(|_| leds.show()), Ok(Err(Error::LedBusy)));
        assert_eq!(
            leds.with_strip(|_| leds.with_strip(|s| s.len())),
            Ok(Err(Error::LedBusy))
        );
        assert!(writer.frames().is_empty());

        // The lock is released once the outer call returns.
        leds.show().unwrap();
        assert_eq!(writer.frames().len(), 1);
        assert_eq!(created.get(), 1);
    }
}
