//! CPU core operations
//!
//! The only place raw machine instructions are allowed. Each chip crate
//! implements [`Cpu`] for its core in a target-gated `cpu` module.

/// Core-level operations needed around the application handoff
pub trait Cpu {
    /// Mask all interrupts globally
    fn disable_interrupts(&mut self);

    /// Complete outstanding memory accesses and flush the pipeline
    ///
    /// Needed after relocating the vector table on cores that cache it.
    fn barrier(&mut self) {}

    /// Load the stack pointer and branch to `entry`
    ///
    /// This is a jump, not a call: no frame is pushed and nothing of the
    /// bootloader's stack survives.
    ///
    /// # Safety
    ///
    /// `stack_top` must be a valid initial stack pointer and `entry` the
    /// address of executable application code. Interrupts must be
    /// disabled and the vector table already set up for the application.
    #[allow(unsafe_code)]
    unsafe fn start_application(&mut self, stack_top: u32, entry: u32) -> !;
}
