// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Self-test firmware: brings every robot component up on the STM32F777 and exercises it in a loop,
//! logging results to USART1.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use log::{info, warn, LevelFilter};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
    spi::{Mode, Phase, Polarity, Spi},
};
use stm32f7xx_hal as hal;

use bitrobot::{
    drivers::{ws2812, StripConfig, Ws2812Spi},
    hw::{init_logger, pwm, Adc, BoardPins, In, Out, PinMap, SonarPin, SpiBus, SysDelay, Usart},
    robot::{
        Buzzer, DistanceUnit, LedStrip, LightSensors, LineSensors, Motor, MotorDriver,
        MotorSelector, Ranger, Side,
    },
    Result,
};

const SYSCLK_MHZ: u32 = 216;

fn report(what: &str, res: Result<()>) {
    if let Err(e) = res {
        warn!("{what}: {e}");
    }
}

fn pause_ms(ms: u32) {
    cortex_m::asm::delay(ms * SYSCLK_MHZ * 1_000);
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(SYSCLK_MHZ.MHz()).freeze();
    let mut apb2 = rcc.apb2;

    // Cycle counter for echo timing
    cp.DCB.enable_trace();
    cp.DWT.enable_cycle_counter();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE);
    let map = PinMap::STM32F777;

    // USART1 (DBG) as log sink
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
    init_logger(Usart::new(serial), LevelFilter::Debug).ok();
    info!("bitrobot self-test, sysclk {} Hz", clocks.sysclk().raw());

    // Motors on TIM4
    let (left_pwm, right_pwm) = pwm::split(
        dp.TIM4,
        pins.motors.left_pwm,
        pins.motors.right_pwm,
        clocks.timclk1().raw(),
    );
    let mut drive = MotorDriver::new(
        Motor::new(left_pwm, Out::new(pins.motors.left_dir)),
        Motor::new(right_pwm, Out::new(pins.motors.right_dir)),
    );

    let mut buzzer = Buzzer::active_high(Out::new(pins.buzzer));
    let mut line = LineSensors::new(In::new(pins.line.left), In::new(pins.line.right));
    let mut light = LightSensors::new(
        Out::new(pins.light.select),
        Adc::adc1(dp.ADC1),
        map.light_channel,
    );

    // LED strip on SPI4 MOSI, created on first use
    let spi_mode = Mode {
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };
    let spi4 = Spi::new(dp.SPI4, (pins.spi4.sck, pins.spi4.miso, pins.spi4.mosi)).enable::<u8>(
        spi_mode,
        ws2812::SPI_FREQ_HZ.Hz(),
        &clocks,
        &mut apb2,
    );
    let leds = LedStrip::new(StripConfig::new(map.led_data), move || {
        Ws2812Spi::new(SpiBus::new(spi4))
    });

    let mut ranger = Ranger::new(
        SonarPin::new(pins.sonar, clocks.sysclk().raw()),
        SysDelay::new(cp.SYST, clocks.sysclk().raw()),
    );

    report("leds", leds.rainbow());

    let mut speed: i32 = 0;
    let mut step: i32 = 128;

    loop {
        report("drive", drive.drive(MotorSelector::All, speed));
        speed += step;
        if speed.abs() >= 1023 {
            step = -step;
        }

        match (line.read(Side::Left), line.read(Side::Right)) {
            (Ok(l), Ok(r)) => info!("line L={l} R={r}"),
            (Err(e), _) | (_, Err(e)) => warn!("line: {e}"),
        }
        match (light.read(Side::Left), light.read(Side::Right)) {
            (Ok(l), Ok(r)) => info!("light L={l} R={r}"),
            (Err(e), _) | (_, Err(e)) => warn!("light: {e}"),
        }
        match ranger.measure(DistanceUnit::Centimeters) {
            Ok(cm) => info!("range {cm} cm"),
            Err(e) => warn!("range: {e}"),
        }

        report("buzzer", buzzer.set(i32::from(speed == 0)));
        report("leds", leds.rotate().and_then(|()| leds.show()));

        pause_ms(200);
    }
}
