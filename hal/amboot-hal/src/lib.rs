//! amboot Hardware Abstraction Layer
//!
//! This crate defines the capability traits the portable bootloader logic
//! is written against. Each supported MCU family implements them in its
//! own crate, so the bootloader never names a family-specific register.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Boot sequence (amboot-core)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  amboot-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ amboot-hal-   │       │ amboot-hal-   │
//! │   stm32g4     │       │   ch32v20x    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::ClockControl`] - Run-frequency bring-up
//! - [`gpio::LineControl`] - The shared bootloader signal line
//! - [`timer::MicrosTimer`] - 16-bit wrapping microsecond counter
//! - [`reset::ResetCause`] - Software vs power-on reset
//! - [`handoff::Handoff`] - One-shot transfer to the application
//! - [`mmio::RegisterBus`] - Owned register access context
//! - [`cpu::Cpu`] - Core instructions (interrupt mask, stack/PC handoff)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod clock;
pub mod cpu;
pub mod fault;
pub mod gpio;
pub mod handoff;
pub mod mmio;
pub mod reset;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use clock::ClockControl;
pub use cpu::Cpu;
pub use gpio::{Drive, LineControl, Pin, Port, Pull};
pub use handoff::{AppEntry, AppHeader, AppLayout, Handoff, HandoffTarget, HeaderError};
pub use mmio::{Mmio, RegisterBus};
pub use reset::{BootReason, ResetCause};
pub use timer::MicrosTimer;

/// Everything the portable bootloader needs from a chip family
pub trait BootHal: ClockControl + LineControl + MicrosTimer + ResetCause + Handoff {}

// Blanket implementation
impl<T: ClockControl + LineControl + MicrosTimer + ResetCause + Handoff> BootHal for T {}
