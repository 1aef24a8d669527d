//! TIM2 as the microsecond counter

use amboot_hal::timer::prescaler_for;
use amboot_hal::{Cpu, MicrosTimer, RegisterBus};

use crate::clock::SYSCLK_HZ;
use crate::regs::{rcc, tim2};
use crate::Ch32v20x;

/// Full 16-bit reload
const RELOAD: u32 = 0xFFFF;

impl<B: RegisterBus, C: Cpu> MicrosTimer for Ch32v20x<B, C> {
    fn init_timer(&mut self) {
        self.bus.set_bits(rcc::APB1PCENR, rcc::APB1PCENR_TIM2EN);

        self.bus.clear_bits(
            tim2::CTLR1,
            tim2::CTLR1_DIR | tim2::CTLR1_CMS | tim2::CTLR1_CKD,
        );
        self.bus.write(tim2::ATRLR, RELOAD);
        // PCLK1 is HCLK / 2, so the timer clock is doubled back to SYSCLK
        self.bus.write(tim2::PSC, prescaler_for(SYSCLK_HZ));
        self.bus.write(tim2::SWEVGR, tim2::SWEVGR_UG);
        self.bus.write(tim2::CNT, 0);

        self.bus.set_bits(tim2::CTLR1, tim2::CTLR1_ARPE);
        self.bus.set_bits(tim2::CTLR1, tim2::CTLR1_CEN);
    }

    fn read_timer(&self) -> u16 {
        self.bus.read(tim2::CNT) as u16
    }

    fn disable_timer(&mut self) {
        self.bus.clear_bits(tim2::CTLR1, tim2::CTLR1_CEN);
        self.bus.clear_bits(rcc::APB1PCENR, rcc::APB1PCENR_TIM2EN);
    }
}
