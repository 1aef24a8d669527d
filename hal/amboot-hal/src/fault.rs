//! Terminal fault handling
//!
//! A bare-metal bootloader has no supervisor to report to. Faults it cannot
//! recover from end in a busy loop.

/// Stop forever
pub fn halt() -> ! {
    warn!("halted");
    loop {
        core::hint::spin_loop();
    }
}
