//! Build-time board selection
//!
//! Exactly one family feature picks the HAL the bootloader is linked
//! against. Both families export the same names so the firmware entry
//! point does not change between them.

use amboot_hal::{fault, Mmio, Pin, Port};

use crate::config::BootConfig;

#[cfg(feature = "stm32g431")]
mod family {
    use amboot_hal::{Mmio, Pin, Port};
    pub use amboot_hal_stm32g4::{CortexM as Core, Stm32g4 as Hal, LAYOUT, SYSCLK_HZ};

    pub const SIGNAL_PORT: Port = Port::B;
    pub const SIGNAL_PIN: Pin = Pin::new(4);

    pub fn hal(bus: Mmio) -> Hal<Mmio, Core> {
        Hal::new(bus, Core::new(), SIGNAL_PORT)
    }
}

#[cfg(feature = "ch32v203")]
mod family {
    use amboot_hal::{Mmio, Pin, Port};
    pub use amboot_hal_ch32v20x::{Ch32v20x as Hal, Qingke as Core, LAYOUT, SYSCLK_HZ};

    pub const SIGNAL_PORT: Port = Port::A;
    pub const SIGNAL_PIN: Pin = Pin::new(2);

    pub fn hal(bus: Mmio) -> Hal<Mmio, Core> {
        Hal::new(bus, Core::new(), SIGNAL_PORT)
    }
}

pub use family::{LAYOUT, SYSCLK_HZ};

/// The HAL for the selected board
pub type Board = family::Hal<Mmio, family::Core>;

/// Port of the ESC signal input
pub const SIGNAL_PORT: Port = family::SIGNAL_PORT;

/// ESC signal input
pub const SIGNAL_PIN: Pin = family::SIGNAL_PIN;

/// Entry-check configuration for the selected board
pub const CONFIG: BootConfig = BootConfig::new(SIGNAL_PIN);

/// Take the board's HAL
///
/// Halts if the register bus was already taken this boot.
pub fn take() -> Board {
    match Mmio::take() {
        Some(bus) => family::hal(bus),
        None => fault::halt(),
    }
}
