//! TIM2 as the microsecond counter
//!
//! TIM2 is a 32-bit timer on the G4; only the low 16 bits are used so the
//! wrap behaviour matches the other families.

use amboot_hal::timer::prescaler_for;
use amboot_hal::{Cpu, MicrosTimer, RegisterBus};

use crate::clock::SYSCLK_HZ;
use crate::regs::{rcc, tim2};
use crate::Stm32g4;

impl<B: RegisterBus, C: Cpu> MicrosTimer for Stm32g4<B, C> {
    fn init_timer(&mut self) {
        self.bus.set_bits(rcc::APB1ENR1, rcc::APB1ENR1_TIM2EN);

        // Up-counting, edge-aligned, no clock division, ARR not buffered
        self.bus.clear_bits(
            tim2::CR1,
            tim2::CR1_DIR | tim2::CR1_CMS | tim2::CR1_CKD | tim2::CR1_ARPE,
        );
        self.bus.write(tim2::PSC, prescaler_for(SYSCLK_HZ));
        self.bus.write(tim2::ARR, u32::MAX);
        // Load PSC now rather than at the first overflow
        self.bus.write(tim2::EGR, tim2::EGR_UG);

        // Internal clock, no master/slave coupling
        self.bus
            .clear_bits(tim2::SMCR, tim2::SMCR_SMS | tim2::SMCR_MSM);
        self.bus.clear_bits(tim2::CR2, tim2::CR2_MMS);

        self.bus.set_bits(tim2::CR1, tim2::CR1_CEN);
        trace!("timer: TIM2 running, psc={}", prescaler_for(SYSCLK_HZ));
    }

    fn read_timer(&self) -> u16 {
        self.bus.read(tim2::CNT) as u16
    }

    fn disable_timer(&mut self) {
        self.bus.clear_bits(tim2::CR1, tim2::CR1_CEN);
        // Return TIM2 to its reset state for the application
        self.bus.set_bits(rcc::APB1RSTR1, rcc::APB1RSTR1_TIM2RST);
        self.bus.clear_bits(rcc::APB1RSTR1, rcc::APB1RSTR1_TIM2RST);
        self.bus.clear_bits(rcc::APB1ENR1, rcc::APB1ENR1_TIM2EN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sim_board, NoCpu};
    use amboot_hal::Port;

    #[test]
    fn test_init_programs_one_mhz_free_running() {
        let bus = sim_board();
        bus.preset(tim2::CR1, tim2::CR1_DIR | tim2::CR1_ARPE);
        let mut hal = Stm32g4::new(&bus, NoCpu, Port::B);
        hal.init_timer();

        assert_eq!(bus.peek(tim2::PSC), 159);
        assert_eq!(bus.peek(tim2::ARR), u32::MAX);
        assert_eq!(bus.peek(tim2::CR1), tim2::CR1_CEN);
        assert_ne!(bus.peek(rcc::APB1ENR1) & rcc::APB1ENR1_TIM2EN, 0);
    }

    #[test]
    fn test_update_event_before_enable() {
        let bus = sim_board();
        let mut hal = Stm32g4::new(&bus, NoCpu, Port::B);
        hal.init_timer();

        let psc = bus.first_write(tim2::PSC, |_| true).unwrap();
        let ug = bus.first_write(tim2::EGR, |v| v & tim2::EGR_UG != 0).unwrap();
        let cen = bus
            .first_write(tim2::CR1, |v| v & tim2::CR1_CEN != 0)
            .unwrap();
        assert!(psc < ug);
        assert!(ug < cen);
    }

    #[test]
    fn test_read_timer_truncates_to_16_bits() {
        let bus = sim_board();
        let hal = Stm32g4::new(&bus, NoCpu, Port::B);

        bus.preset(tim2::CNT, 0x0003_FFFE);
        assert_eq!(hal.read_timer(), 0xFFFE);
        bus.preset(tim2::CNT, 0x0004_0010);
        assert_eq!(hal.elapsed_since(0xFFFE), 0x12);
    }

    #[test]
    fn test_disable_resets_and_gates_timer() {
        let bus = sim_board();
        let mut hal = Stm32g4::new(&bus, NoCpu, Port::B);
        hal.init_timer();
        bus.preset(tim2::CNT, 1234);

        hal.disable_timer();

        assert_eq!(bus.peek(tim2::CR1) & tim2::CR1_CEN, 0);
        assert_eq!(bus.peek(tim2::CNT), 0);
        assert_eq!(bus.peek(tim2::PSC), 0);
        assert_eq!(bus.peek(rcc::APB1RSTR1) & rcc::APB1RSTR1_TIM2RST, 0);
        assert_eq!(bus.peek(rcc::APB1ENR1) & rcc::APB1ENR1_TIM2EN, 0);
    }
}
