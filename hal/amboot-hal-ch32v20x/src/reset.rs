use amboot_hal::{Cpu, RegisterBus, ResetCause};

use crate::regs::rcc;
use crate::Ch32v20x;

impl<B: RegisterBus, C: Cpu> ResetCause for Ch32v20x<B, C> {
    fn was_software_reset(&self) -> bool {
        self.bus.read(rcc::RSTSCKR) & rcc::RSTSCKR_SFTRSTF != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sim_board, NoCpu};
    use amboot_hal::Port;

    #[test]
    fn test_software_reset_then_power_cycle() {
        let bus = sim_board();
        let hal = Ch32v20x::new(&bus, NoCpu, Port::A);

        bus.preset(rcc::RSTSCKR, rcc::RSTSCKR_SFTRSTF);
        assert!(hal.was_software_reset());
        assert!(hal.was_software_reset());

        // PORRSTF only
        bus.preset(rcc::RSTSCKR, 1 << 27);
        assert!(!hal.was_software_reset());
    }
}
