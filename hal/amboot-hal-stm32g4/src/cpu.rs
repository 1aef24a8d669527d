//! Cortex-M4 core operations

use amboot_hal::Cpu;

/// The Cortex-M4F core
pub struct CortexM {
    _private: (),
}

impl CortexM {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for CortexM {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu for CortexM {
    fn disable_interrupts(&mut self) {
        cortex_m::interrupt::disable();
    }

    fn barrier(&mut self) {
        cortex_m::asm::dsb();
        cortex_m::asm::isb();
    }

    #[allow(unsafe_code)]
    unsafe fn start_application(&mut self, stack_top: u32, entry: u32) -> ! {
        // `bootstrap` loads MSP and branches; it never returns
        cortex_m::asm::bootstrap(stack_top as usize as *const u32, entry as usize as *const u32)
    }
}
