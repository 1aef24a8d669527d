//! Register access context
//!
//! All peripheral access in the chip crates goes through a [`RegisterBus`].
//! Owning the bus is what grants the right to touch hardware; on target the
//! bus is [`Mmio`], on the host it is the simulated register file in
//! [`crate::sim`].

use core::sync::atomic::{AtomicBool, Ordering};

/// 32-bit memory-mapped register access
pub trait RegisterBus {
    /// Read the register at `addr`
    fn read(&self, addr: u32) -> u32;

    /// Write `value` to the register at `addr`
    fn write(&mut self, addr: u32, value: u32);

    /// Read-modify-write a register
    ///
    /// Not atomic with respect to interrupt handlers. The bootloader runs
    /// a single execution context, so this is only a problem for callers
    /// that install their own handlers.
    fn modify(&mut self, addr: u32, f: impl FnOnce(u32) -> u32) {
        let value = self.read(addr);
        self.write(addr, f(value));
    }

    /// Set `bits` in the register at `addr`
    fn set_bits(&mut self, addr: u32, bits: u32) {
        self.modify(addr, |v| v | bits);
    }

    /// Clear `bits` in the register at `addr`
    fn clear_bits(&mut self, addr: u32, bits: u32) {
        self.modify(addr, |v| v & !bits);
    }

    /// Replace the field selected by `mask` with `value` (already shifted)
    fn write_field(&mut self, addr: u32, mask: u32, value: u32) {
        self.modify(addr, |v| (v & !mask) | (value & mask));
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn read(&self, addr: u32) -> u32 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u32, value: u32) {
        (**self).write(addr, value)
    }
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Volatile access to the real peripheral address space
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Take the register bus
    ///
    /// Returns `None` if it was already taken during this boot.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { _private: () })
        }
    }
}

#[allow(unsafe_code)]
impl RegisterBus for Mmio {
    #[inline(always)]
    fn read(&self, addr: u32) -> u32 {
        // SAFETY: owning `Mmio` means exclusive access to the peripheral
        // space, and the chip crates only pass aligned register addresses.
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline(always)]
    fn write(&mut self, addr: u32, value: u32) {
        // SAFETY: as for `read`.
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_once_per_boot() {
        assert!(Mmio::take().is_some());
        assert!(Mmio::take().is_none());
    }
}
