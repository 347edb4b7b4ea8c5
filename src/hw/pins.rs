// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin assignment table.
//!
//! [`PinMap`] maps every logical role on the robot (left motor PWM, buzzer, trigger/echo, ...) to
//! the physical pin it is wired to, so porting to another board revision means adding one more
//! constant instead of chasing literals through the drivers.
//!
//! With the `board` feature, [`BoardPins`] claims the matching STM32F777 GPIOs.

use core::fmt;

/// Identifier of a physical pin.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PinId {
    /// Numbered pin on the robot's edge connector (`P0`, `P13`, ...).
    Edge(u8),
    /// MCU GPIO, e.g. port `'E'` pin `4` for `PE4`.
    Gpio { port: char, num: u8 },
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinId::Edge(n) => write!(f, "P{n}"),
            PinId::Gpio { port, num } => write!(f, "P{port}{num}"),
        }
    }
}

/// Role → pin assignment for one board revision.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PinMap {
    pub left_motor_pwm: PinId,
    pub left_motor_dir: PinId,
    pub right_motor_pwm: PinId,
    pub right_motor_dir: PinId,
    pub buzzer: PinId,
    pub left_line: PinId,
    pub right_line: PinId,
    /// Shared analog input of both light sensors.
    pub light_sense: PinId,
    /// ADC channel behind `light_sense`.
    pub light_channel: u8,
    /// Mux select: low = left light sensor, high = right.
    pub light_select: PinId,
    /// Shared trigger/echo wire of the ultrasonic ranger.
    pub sonar: PinId,
    pub led_data: PinId,
}

impl PinMap {
    /// Reference wiring on the robot's edge connector.
    ///
    /// The motor drivers on this wiring treat a low direction pin as forward, the reverse of the
    /// `MotorDriver` default. Build the driver with
    /// `.with_polarity(DirPolarity::BIT_ROBOT)` (which is `ForwardLow`).
    pub const BIT_ROBOT: Self = Self {
        left_motor_pwm: PinId::Edge(0),
        left_motor_dir: PinId::Edge(8),
        right_motor_pwm: PinId::Edge(1),
        right_motor_dir: PinId::Edge(12),
        buzzer: PinId::Edge(14),
        left_line: PinId::Edge(11),
        right_line: PinId::Edge(5),
        light_sense: PinId::Edge(2),
        light_channel: 2,
        light_select: PinId::Edge(16),
        sonar: PinId::Edge(15),
        led_data: PinId::Edge(13),
    };

    /// The same roles on the STM32F777 controller board (see [`BoardPins`]).
    pub const STM32F777: Self = Self {
        left_motor_pwm: PinId::Gpio { port: 'D', num: 12 },
        left_motor_dir: PinId::Gpio { port: 'A', num: 4 },
        right_motor_pwm: PinId::Gpio { port: 'D', num: 13 },
        right_motor_dir: PinId::Gpio { port: 'D', num: 2 },
        buzzer: PinId::Gpio { port: 'D', num: 8 },
        left_line: PinId::Gpio { port: 'A', num: 2 },
        right_line: PinId::Gpio { port: 'D', num: 0 },
        light_sense: PinId::Gpio { port: 'B', num: 0 },
        light_channel: 8,
        light_select: PinId::Gpio { port: 'A', num: 3 },
        sonar: PinId::Gpio { port: 'E', num: 4 },
        led_data: PinId::Gpio { port: 'E', num: 14 },
    };
}

#[cfg(feature = "board")]
pub use self::board::*;

#[cfg(feature = "board")]
mod board {
    use stm32f7xx_hal::{
        gpio::{
            gpioa, gpiob, gpiod, gpioe, Alternate, Analog, Floating, Input, Output, PushPull,
        },
        pac,
        prelude::*,
    };

    /// All robot pins on the STM32F777. Construct this once at startup using:
    ///
    /// ```ignore
    /// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE);
    /// ```
    pub struct BoardPins {
        pub usart1: Usart1Pins,
        pub motors: MotorPins,
        pub buzzer: gpiod::PD8<Output<PushPull>>,
        pub line: LinePins,
        pub light: LightPins,
        /// Trigger/echo; the ranger switches its mode at runtime.
        pub sonar: gpioe::PE4<Input<Floating>>,
        pub spi4: Spi4Pins,
    }

    pub struct Usart1Pins {
        pub tx: gpioa::PA9<Alternate<7>>,
        pub rx: gpioa::PA10<Alternate<7>>,
    }

    pub struct MotorPins {
        pub left_pwm: gpiod::PD12<Alternate<2>>,  // TIM4_CH1
        pub right_pwm: gpiod::PD13<Alternate<2>>, // TIM4_CH2
        pub left_dir: gpioa::PA4<Output<PushPull>>,
        pub right_dir: gpiod::PD2<Output<PushPull>>,
    }

    pub struct LinePins {
        pub left: gpioa::PA2<Input<Floating>>,
        pub right: gpiod::PD0<Input<Floating>>,
    }

    pub struct LightPins {
        pub sense: gpiob::PB0<Analog>, // ADC12_IN8
        pub select: gpioa::PA3<Output<PushPull>>,
    }

    /// SPI4; only MOSI carries the LED data stream.
    pub struct Spi4Pins {
        pub sck: gpioe::PE12<Alternate<5>>,
        pub miso: gpioe::PE13<Alternate<5>>,
        pub mosi: gpioe::PE14<Alternate<5>>,
    }

    impl BoardPins {
        /// Create all named pins from raw GPIO peripherals.
        pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
            let gpioa = gpioa.split();
            let gpiob = gpiob.split();
            let gpiod = gpiod.split();
            let gpioe = gpioe.split();

            Self {
                usart1: Usart1Pins {
                    tx: gpioa.pa9.into_alternate::<7>(),
                    rx: gpioa.pa10.into_alternate::<7>(),
                },

                motors: MotorPins {
                    left_pwm: gpiod.pd12.into_alternate::<2>(),
                    right_pwm: gpiod.pd13.into_alternate::<2>(),
                    left_dir: gpioa.pa4.into_push_pull_output(),
                    right_dir: gpiod.pd2.into_push_pull_output(),
                },

                buzzer: gpiod.pd8.into_push_pull_output(),

                line: LinePins {
                    left: gpioa.pa2.into_floating_input(),
                    right: gpiod.pd0.into_floating_input(),
                },

                light: LightPins {
                    sense: gpiob.pb0.into_analog(),
                    select: gpioa.pa3.into_push_pull_output(),
                },

                sonar: gpioe.pe4.into_floating_input(),

                spi4: Spi4Pins {
                    sck: gpioe.pe12.into_alternate::<5>(),
                    miso: gpioe.pe13.into_alternate::<5>(),
                    mosi: gpioe.pe14.into_alternate::<5>(),
                },
            }
        }
    }
}
