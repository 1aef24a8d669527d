use amboot_hal::{Cpu, RegisterBus, ResetCause};

use crate::regs::rcc;
use crate::Stm32g4;

impl<B: RegisterBus, C: Cpu> ResetCause for Stm32g4<B, C> {
    fn was_software_reset(&self) -> bool {
        self.bus.read(rcc::CSR) & rcc::CSR_SFTRSTF != 0
    }
}
