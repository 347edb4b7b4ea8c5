// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motor PWM on TIM4.
//!
//! TIM4 runs edge-aligned PWM mode 1 on CH1 (PD12, left motor) and CH2 (PD13, right motor) with an
//! auto-reload of [`PWM_TOP`], so a duty value maps one-to-one onto a motor magnitude. Each channel
//! is exposed as an embedded-hal [`SetDutyCycle`].

use core::{convert::Infallible, ops::Deref};

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::{
    gpio::{gpiod, Alternate},
    pac,
};

/// Counter top; duty cycles run `0..=PWM_TOP`.
pub const PWM_TOP: u16 = 1023;

/// Target switching frequency for the H-bridges.
pub const PWM_FREQ_HZ: u32 = 20_000;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Channel {
    Ch1,
    Ch2,
}

/// One TIM4 output compare channel.
pub struct PwmChannel<PIN> {
    ch: Channel,
    pin: PIN,
}

impl<PIN> PwmChannel<PIN> {
    #[inline]
    fn tim() -> &'static <pac::TIM4 as Deref>::Target {
        unsafe { &*pac::TIM4::ptr() }
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

impl<PIN> ErrorType for PwmChannel<PIN> {
    type Error = Infallible;
}

impl<PIN> SetDutyCycle for PwmChannel<PIN> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        PWM_TOP
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let tim = Self::tim();
        let duty = u32::from(duty.min(PWM_TOP));
        match self.ch {
            Channel::Ch1 => tim.ccr1.write(|w| unsafe { w.bits(duty) }),
            Channel::Ch2 => tim.ccr2.write(|w| unsafe { w.bits(duty) }),
        }
        Ok(())
    }
}

pub type LeftPwm = PwmChannel<gpiod::PD12<Alternate<2>>>;
pub type RightPwm = PwmChannel<gpiod::PD13<Alternate<2>>>;

/// Configure TIM4 for two-channel motor PWM and hand out the channels, both at 0% duty.
///
/// `timer_clk_hz` is the APB1 timer clock (`clocks.timclk1().raw()`).
pub fn split(
    tim4: pac::TIM4,
    left: gpiod::PD12<Alternate<2>>,
    right: gpiod::PD13<Alternate<2>>,
    timer_clk_hz: u32,
) -> (LeftPwm, RightPwm) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

    let tim = tim4;

    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    let ticks = PWM_FREQ_HZ * (u32::from(PWM_TOP) + 1);
    let psc = (timer_clk_hz / ticks).saturating_sub(1).min(0xFFFF);
    tim.psc.write(|w| unsafe { w.bits(psc) });
    tim.arr.write(|w| unsafe { w.bits(u32::from(PWM_TOP)) });

    tim.ccr1.write(|w| unsafe { w.bits(0) });
    tim.ccr2.write(|w| unsafe { w.bits(0) });

    // OCxM = PWM mode 1, OCxPE = preload, for CH1 and CH2
    tim.ccmr1_output()
        .write(|w| unsafe { w.bits(0x0060 | 0x0008 | 0x6000 | 0x0800) });

    // CC1E | CC2E, active high
    tim.ccer.write(|w| unsafe { w.bits(0b1_0001) });

    // Latch PSC/ARR/CCR through an update event
    tim.egr.write(|w| w.ug().set_bit());

    tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

    (
        PwmChannel {
            ch: Channel::Ch1,
            pin: left,
        },
        PwmChannel {
            ch: Channel::Ch2,
            pin: right,
        },
    )
}
