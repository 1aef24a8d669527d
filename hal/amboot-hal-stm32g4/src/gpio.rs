//! Signal line on a STM32G4 GPIO port
//!
//! Two-bit mode and pull fields per pin; set/reset go through the
//! write-only `BSRR`/`BRR` registers so no read-modify-write is needed.

use amboot_hal::{Cpu, Drive, LineControl, Pin, Pull, RegisterBus};

use crate::regs::{gpio, gpio_base, rcc};
use crate::Stm32g4;

/// Mask of a two-bit per-pin field
const fn field2(pin: Pin) -> u32 {
    0b11 << (2 * pin.index())
}

impl<B: RegisterBus, C: Cpu> Stm32g4<B, C> {
    fn gpio_reg(&self, offset: u32) -> u32 {
        gpio_base(self.port) + offset
    }

    fn set_mode(&mut self, pin: Pin, mode: u32) {
        let reg = self.gpio_reg(gpio::MODER);
        self.bus
            .write_field(reg, field2(pin), mode << (2 * pin.index()));
    }
}

impl<B: RegisterBus, C: Cpu> LineControl for Stm32g4<B, C> {
    fn init_line(&mut self, pin: Pin) {
        self.bus.set_bits(
            rcc::AHB2ENR,
            rcc::AHB2ENR_GPIOAEN | rcc::AHB2ENR_GPIOBEN,
        );
        // Idle state: push-pull output, no pull
        self.set_output_mode(pin, Drive::PushPull);
        let pupdr = self.gpio_reg(gpio::PUPDR);
        self.bus.clear_bits(pupdr, field2(pin));
        trace!("gpio: line {} initialised", pin.index());
    }

    fn set_input_mode(&mut self, pin: Pin, pull: Pull) {
        self.set_mode(pin, gpio::MODE_INPUT);
        let bits = match pull {
            Pull::None => gpio::PULL_NONE,
            Pull::Up => gpio::PULL_UP,
            Pull::Down => gpio::PULL_DOWN,
        };
        let pupdr = self.gpio_reg(gpio::PUPDR);
        self.bus
            .write_field(pupdr, field2(pin), bits << (2 * pin.index()));
    }

    fn set_output_mode(&mut self, pin: Pin, drive: Drive) {
        self.set_mode(pin, gpio::MODE_OUTPUT);
        let otyper = self.gpio_reg(gpio::OTYPER);
        match drive {
            Drive::PushPull => self.bus.clear_bits(otyper, pin.mask()),
        }
    }

    fn set_line(&mut self, pin: Pin) {
        let bsrr = self.gpio_reg(gpio::BSRR);
        self.bus.write(bsrr, pin.mask());
    }

    fn clear_line(&mut self, pin: Pin) {
        let brr = self.gpio_reg(gpio::BRR);
        self.bus.write(brr, pin.mask());
    }

    fn read_line(&self, pin: Pin) -> bool {
        self.bus.read(self.gpio_reg(gpio::IDR)) & pin.mask() != 0
    }
}
