// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer and log sink.
//!
//! [`Usart`] is a blocking transmit-only wrapper. [`init_logger`] hands one to the `log` facade so
//! `debug!`/`warn!` calls anywhere in the crate end up on the attached debug terminal.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt::{self, Write as _};
use nb::block;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;
use stm32f7xx_hal::{
    pac::USART1,
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// `log` backend writing one CRLF-terminated line per record to USART1.
pub struct UsartLogger {
    port: Mutex<Option<Usart<USART1>>>,
}

static LOGGER: UsartLogger = UsartLogger {
    port: Mutex::new(None),
};

impl Log for UsartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(usart) = self.port.lock().as_mut() {
            let _ = write!(
                usart,
                "[{:<5} {}] {}\r\n",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Some(usart) = self.port.lock().as_mut() {
            usart.flush();
        }
    }
}

/// Install `usart` as the global log sink. Fails if a logger is already set.
pub fn init_logger(usart: Usart<USART1>, level: LevelFilter) -> Result<(), SetLoggerError> {
    *LOGGER.port.lock() = Some(usart);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
