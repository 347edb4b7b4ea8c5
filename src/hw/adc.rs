// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Analog input.
//!
//! [`AdcRead`] is the seam the light sensors sample through. With the `board` feature, [`Adc`]
//! implements it for ADC1 on the STM32F7 using direct PAC register access and blocking
//! single-channel reads.
//!
//! Example:
//! ```ignore
//! let mut adc1 = Adc::adc1(dp.ADC1);
//! let value = adc1.read_channel(8);
//! ```

/// Trait for reading a single channel from an ADC peripheral.
pub trait AdcRead {
    /// Take one blocking sample of channel `ch` and return the raw conversion result.
    fn read_channel(&mut self, ch: u8) -> u16;
}

#[cfg(feature = "board")]
pub use self::stm32f7::Adc;

#[cfg(feature = "board")]
mod stm32f7 {
    use stm32f7xx_hal::pac;

    use super::AdcRead;

    /// ADC1 wrapper over the PAC peripheral.
    pub struct Adc {
        adc: pac::ADC1,
    }

    impl Adc {
        /// Enable, configure and power on ADC1.
        pub fn adc1(adc1: pac::ADC1) -> Self {
            let rcc = unsafe { &*pac::RCC::ptr() };
            rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

            let common = unsafe { &*pac::ADC_COMMON::ptr() };
            // ADC prescaler: PCLK2 / 4
            common.ccr.modify(|_, w| w.adcpre().div4());

            // Power off to configure
            adc1.cr2.modify(|_, w| w.adon().clear_bit());

            // 12-bit, right-aligned, software trigger
            adc1.cr1.modify(|_, w| w.res().bits(0b00));
            adc1.cr2.modify(|_, w| {
                w.cont().clear_bit();
                w.align().right();
                w.exten().disabled();
                w
            });

            adc1.cr2.modify(|_, w| w.adon().set_bit());

            Self { adc: adc1 }
        }

        #[inline]
        pub fn free(self) -> pac::ADC1 {
            self.adc
        }
    }

    impl AdcRead for Adc {
        fn read_channel(&mut self, ch: u8) -> u16 {
            let adc = &self.adc;
            let ch = ch & 0x1F;

            // Longest sample time (480 cycles); photoresistor dividers are high impedance.
            let smp = 0b111u32;
            if ch <= 9 {
                let shift = u32::from(ch) * 3;
                adc.smpr2
                    .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (smp << shift)) });
            } else if ch <= 18 {
                let shift = u32::from(ch - 10) * 3;
                adc.smpr1
                    .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (smp << shift)) });
            }

            // Sequence length = 1 conversion
            adc.sqr1.modify(|_, w| w.l().bits(0));
            adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(ch) });

            adc.cr2.modify(|_, w| w.swstart().set_bit());
            while adc.sr.read().eoc().bit_is_clear() {}

            adc.dr.read().data().bits() as u16
        }
    }
}
