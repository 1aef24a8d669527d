//! CH32V203 HAL for the amboot bootloader
//!
//! Implements the `amboot-hal` capability traits for the WCH CH32V203
//! (QingKe V4B, RV32IMAC):
//!
//! - Clocks: HSI through the PLL (x18) to 144 MHz, the vendor default
//! - Signal line on GPIO port A or B with four-bit configuration nibbles;
//!   pulls are selected through the output register
//! - TIM2 as the free-running microsecond counter
//! - Reset cause from `RCC_RSTSCKR.SFTRSTF`
//! - Application handoff without a header: the stack starts at the top of
//!   RAM and execution at the application start
//!
//! # Usage
//!
//! ```ignore
//! let bus = Mmio::take().unwrap();
//! let mut hal = Ch32v20x::new(bus, Qingke::new(), Port::A);
//! hal.configure_clocks();
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

mod clock;
#[cfg(target_arch = "riscv32")]
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
#[cfg(target_arch = "riscv32")]
pub use cpu::Qingke;

pub use amboot_hal::{ClockControl, Handoff, LineControl, MicrosTimer, ResetCause};

/// Flash and RAM layout shared with the application
///
/// Flash is aliased at address 0. The application image has no header, so
/// its stack starts at the top of the 20 KiB SRAM.
pub const LAYOUT: AppLayout = AppLayout {
    flash_base: 0x0000_0000,
    flash_size: 64 * 1024,
    app_offset: 0x1000,
    ram_base: 0x2000_0000,
    ram_size: 20 * 1024,
    entry: AppEntry::FixedStackTop,
};

/// CH32V203 bootloader HAL
pub struct Ch32v20x<B, C> {
    bus: B,
    cpu: C,
    port: Port,
    layout: AppLayout,
}

impl<B: RegisterBus, C: Cpu> Ch32v20x<B, C> {
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
