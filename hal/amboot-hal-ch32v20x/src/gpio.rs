//! Signal line on a CH32V203 GPIO port
//!
//! Each pin has a four-bit CNF:MODE nibble, pins 0-7 in `CFGLR` and 8-15 in
//! `CFGHR`. There is a single "pulled input" configuration; the output
//! register bit picks between pull-up (1) and pull-down (0), so it must be
//! written before the nibble is switched.

use amboot_hal::{Cpu, Drive, LineControl, Pin, Pull, RegisterBus};

use crate::regs::{gpio, gpio_base, rcc};
use crate::Ch32v20x;

/// Configuration register and nibble shift for `pin`
const fn cfg_slot(pin: Pin) -> (u32, u32) {
    let index = pin.index();
    let reg = if index < gpio::PINS_PER_CFGR {
        gpio::CFGLR
    } else {
        gpio::CFGHR
    };
    (reg, 4 * (index % gpio::PINS_PER_CFGR))
}

impl<B: RegisterBus, C: Cpu> Ch32v20x<B, C> {
    fn gpio_reg(&self, offset: u32) -> u32 {
        gpio_base(self.port) + offset
    }

    fn set_config(&mut self, pin: Pin, nibble: u32) {
        let (offset, shift) = cfg_slot(pin);
        let reg = self.gpio_reg(offset);
        self.bus
            .write_field(reg, gpio::CFG_MASK << shift, nibble << shift);
    }
}

impl<B: RegisterBus, C: Cpu> LineControl for Ch32v20x<B, C> {
    fn init_line(&mut self, pin: Pin) {
        self.bus.set_bits(
            rcc::APB2PCENR,
            rcc::APB2PCENR_IOPAEN | rcc::APB2PCENR_IOPBEN,
        );
        self.set_input_mode(pin, Pull::None);
        trace!("gpio: line {} initialised", pin.index());
    }

    fn set_input_mode(&mut self, pin: Pin, pull: Pull) {
        let outdr = self.gpio_reg(gpio::OUTDR);
        let nibble = match pull {
            Pull::None => gpio::CFG_INPUT_FLOATING,
            Pull::Up => {
                self.bus.set_bits(outdr, pin.mask());
                gpio::CFG_INPUT_PULLED
            }
            Pull::Down => {
                self.bus.clear_bits(outdr, pin.mask());
                gpio::CFG_INPUT_PULLED
            }
        };
        self.set_config(pin, nibble);
    }

    fn set_output_mode(&mut self, pin: Pin, drive: Drive) {
        let nibble = match drive {
            Drive::PushPull => gpio::CFG_OUTPUT_PUSH_PULL_2MHZ,
        };
        self.set_config(pin, nibble);
    }

    fn set_line(&mut self, pin: Pin) {
        let bshr = self.gpio_reg(gpio::BSHR);
        self.bus.write(bshr, pin.mask());
    }

    fn clear_line(&mut self, pin: Pin) {
        let bcr = self.gpio_reg(gpio::BCR);
        self.bus.write(bcr, pin.mask());
    }

    fn read_line(&self, pin: Pin) -> bool {
        self.bus.read(self.gpio_reg(gpio::INDR)) & pin.mask() != 0
    }
}
