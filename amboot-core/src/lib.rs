//! Portable boot sequence for the amboot ESC bootloader
//!
//! This crate holds the logic that does not depend on a chip family:
//!
//! - Entry policy configuration
//! - The signal-line entry check
//! - The boot sequence: bring-up, decision, application handoff
//! - Board selection by Cargo feature (`stm32g431` or `ch32v203`)
//!
//! # Usage
//!
//! ```ignore
//! let mut boot = BootSequence::start(board::take(), board::CONFIG);
//! match boot.decide() {
//!     BootDecision::StartApplication => unsafe { boot.start_application() },
//!     BootDecision::StayInBootloader(_) => run_protocol(boot.hal_mut()),
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[cfg(all(feature = "stm32g431", feature = "ch32v203"))]
compile_error!("features `stm32g431` and `ch32v203` are mutually exclusive");

#[macro_use]
mod fmt;

// Only on the family's own target; host builds test against the simulator
#[cfg(any(
    all(feature = "stm32g431", target_arch = "arm"),
    all(feature = "ch32v203", target_arch = "riscv32"),
))]
pub mod board;
pub mod config;
pub mod entry;
pub mod sequence;

#[cfg(test)]
mod mock;

pub use config::BootConfig;
pub use entry::EntrySignal;
pub use sequence::{BootDecision, BootSequence, StayReason};
