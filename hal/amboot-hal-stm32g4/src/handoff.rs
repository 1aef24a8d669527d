//! Jump to the application through its vector table

use amboot_hal::{AppHeader, AppLayout, Cpu, Handoff, HandoffTarget, MicrosTimer, RegisterBus};

use crate::regs::scb;
use crate::Stm32g4;

impl<B: RegisterBus, C: Cpu> Handoff for Stm32g4<B, C> {
    type Cpu = C;

    fn layout(&self) -> &AppLayout {
        &self.layout
    }

    fn application_header(&self) -> Option<AppHeader> {
        self.layout.read_header(&self.bus)
    }

    fn prepare_handoff(&mut self, header: Option<AppHeader>) -> HandoffTarget {
        self.cpu.disable_interrupts();
        self.disable_timer();

        let target = self.layout.resolve(&self.bus, header);
        if let Some(table) = target.vector_table {
            self.bus.write(scb::VTOR, table);
            self.cpu.barrier();
        }
        target
    }

    fn into_cpu(self) -> C {
        self.cpu
    }
}
