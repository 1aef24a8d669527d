//! STM32G431 HAL for the amboot bootloader
//!
//! Implements the `amboot-hal` capability traits for the STM32G4 family
//! (Cortex-M4F):
//!
//! - Clocks: HSI16 through the PLL to 160 MHz, flash latency and voltage
//!   range set first
//! - Signal line on GPIO port A or B, atomic set/reset through `BSRR`/`BRR`
//! - TIM2 as the free-running microsecond counter
//! - Reset cause from `RCC_CSR.SFTRSTF`
//! - Application handoff through the image's vector table header, with
//!   `SCB.VTOR` relocated to the application
//!
//! # Usage
//!
//! ```ignore
//! let bus = Mmio::take().unwrap();
//! let mut hal = Stm32g4::new(bus, CortexM::new(), Port::B);
//! hal.configure_clocks();
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

mod clock;
#[cfg(target_arch = "arm")]
pub mod cpu;
mod gpio;
mod handoff;
pub mod regs;
mod reset;
mod timer;

#[cfg(test)]
mod testing;

use amboot_hal::{AppEntry, AppLayout, Cpu, Port, RegisterBus};

pub use clock::SYSCLK_HZ;
#[cfg(target_arch = "arm")]
pub use cpu::CortexM;

// Re-export the capability traits so boards only need this crate
pub use amboot_hal::{ClockControl, Handoff, LineControl, MicrosTimer, ResetCause};

/// Flash and RAM layout shared with the application
///
/// 64 KiB of flash is used, the first 4 KiB by the bootloader. Only the
/// first 32 KiB of SRAM are assumed.
pub const LAYOUT: AppLayout = AppLayout {
    flash_base: 0x0800_0000,
    flash_size: 64 * 1024,
    app_offset: 0x1000,
    ram_base: 0x2000_0000,
    ram_size: 32 * 1024,
    entry: AppEntry::VectorTable,
};

/// STM32G431 bootloader HAL
///
/// Owns the register bus and the CPU core for as long as the bootloader
/// runs. Both are given up at the application handoff.
pub struct Stm32g4<B, C> {
    bus: B,
    cpu: C,
    port: Port,
    layout: AppLayout,
}

impl<B: RegisterBus, C: Cpu> Stm32g4<B, C> {
    /// Create the HAL with the signal line on `port`
    pub fn new(bus: B, cpu: C, port: Port) -> Self {
        Self {
            bus,
            cpu,
            port,
            layout: LAYOUT,
        }
    }

    /// Use a different application layout
    pub fn with_layout(mut self, layout: AppLayout) -> Self {
        self.layout = layout;
        self
    }
}
