//! Signal line abstractions
//!
//! The bootloader uses a single GPIO line (the ESC signal input) for both
//! entry detection and the host protocol. Chip crates implement
//! [`LineControl`] against their own port register layout.

/// Number of lines in one GPIO port register
pub const LINES_PER_PORT: u8 = 16;

/// A single line within a port, stored as a one-hot bit mask
///
/// Exactly one bit is ever set. Pins are meant to be compile-time
/// constants:
///
/// ```
/// use amboot_hal::Pin;
///
/// const SIGNAL: Pin = Pin::new(4);
/// assert_eq!(SIGNAL.mask(), 1 << 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin {
    mask: u16,
}

impl Pin {
    /// Pin `n` of a port
    ///
    /// Fails to compile when evaluated in a const context with
    /// `n >= LINES_PER_PORT`.
    pub const fn new(n: u8) -> Self {
        assert!(n < LINES_PER_PORT, "pin number out of range");
        Self { mask: 1 << n }
    }

    /// Pin from a raw mask, if exactly one bit is set
    pub const fn from_mask(mask: u16) -> Option<Self> {
        if mask.count_ones() == 1 {
            Some(Self { mask })
        } else {
            None
        }
    }

    /// One-hot mask, widened to register width
    pub const fn mask(self) -> u32 {
        self.mask as u32
    }

    /// Line number within the port (0-15)
    pub const fn index(self) -> u32 {
        self.mask.trailing_zeros()
    }
}

/// GPIO port holding the signal line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
}

/// Input bias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Weak pull-up
    Up,
    /// Weak pull-down
    Down,
}

/// Output driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    #[default]
    PushPull,
}

/// Control of the bootloader signal line
///
/// None of these operations block. They are called from the single
/// bootloader execution context only.
pub trait LineControl {
    /// Enable GPIO port clocks and put `pin` in the family's idle state
    fn init_line(&mut self, pin: Pin);

    /// Configure `pin` as an input with the given bias
    fn set_input_mode(&mut self, pin: Pin, pull: Pull);

    /// Configure `pin` as an output
    fn set_output_mode(&mut self, pin: Pin, drive: Drive);

    /// Drive `pin` high
    fn set_line(&mut self, pin: Pin);

    /// Drive `pin` low
    fn clear_line(&mut self, pin: Pin);

    /// Sampled input level of `pin`
    fn read_line(&self, pin: Pin) -> bool;

    /// Drive `pin` to a specific level
    fn write_line(&mut self, pin: Pin, high: bool) {
        if high {
            self.set_line(pin);
        } else {
            self.clear_line(pin);
        }
    }
}
