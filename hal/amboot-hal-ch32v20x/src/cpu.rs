//! QingKe V4 core operations

use core::arch::asm;

use amboot_hal::Cpu;

/// The QingKe V4B RISC-V core
pub struct Qingke {
    _private: (),
}

impl Qingke {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for Qingke {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(unsafe_code)]
impl Cpu for Qingke {
    fn disable_interrupts(&mut self) {
        // SAFETY: clearing mstatus.MIE only masks interrupts
        unsafe { asm!("csrci mstatus, 0x8") };
    }

    unsafe fn start_application(&mut self, stack_top: u32, entry: u32) -> ! {
        asm!(
            "mv sp, {0}",
            "jr {1}",
            in(reg) stack_top,
            in(reg) entry,
            options(noreturn),
        )
    }
}
