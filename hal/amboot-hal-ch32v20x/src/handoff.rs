//! Jump to a headerless application image

use amboot_hal::{AppHeader, AppLayout, Cpu, Handoff, HandoffTarget, MicrosTimer, RegisterBus};

use crate::Ch32v20x;

impl<B: RegisterBus, C: Cpu> Handoff for Ch32v20x<B, C> {
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
        // The application installs its own trap vector
        self.layout.resolve(&self.bus, header)
    }

    fn into_cpu(self) -> C {
        self.cpu
    }
}
