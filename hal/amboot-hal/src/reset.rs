//! Reset cause

/// Reset-status register inspection
pub trait ResetCause {
    /// True if this boot was caused by a software reset
    ///
    /// Hardware redefines the flag on the next reset, so sample it early,
    /// before anything that could itself reset the MCU.
    fn was_software_reset(&self) -> bool;
}

/// Why the bootloader is running, captured once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootReason {
    /// The application (or the bootloader itself) requested a reset
    SoftwareReset,
    /// Power-on, brown-out, or external reset pin
    PowerOnOrExternal,
}

impl BootReason {
    /// Sample the reset cause
    pub fn capture<R: ResetCause + ?Sized>(source: &R) -> Self {
        if source.was_software_reset() {
            BootReason::SoftwareReset
        } else {
            BootReason::PowerOnOrExternal
        }
    }

    pub fn is_software_reset(self) -> bool {
        self == BootReason::SoftwareReset
    }
}
