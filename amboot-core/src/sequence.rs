//! Boot sequence
//!
//! ```text
//! reset ──> start() ──> decide() ──┬──> StartApplication ──> start_application() ──> app
//!                                  │
//!                                  └──> StayInBootloader ──> host protocol
//! ```
//!
//! The sequence owns the HAL. Handing off consumes it, so the application
//! can only be started once.

use amboot_hal::{AppHeader, BootHal, BootReason, HeaderError};

use crate::config::BootConfig;
use crate::entry::{self, EntrySignal};

/// Why the bootloader stays resident
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StayReason {
    /// The application asked for the bootloader by resetting
    SoftwareReset,
    /// The host is holding the signal line
    HostPresent,
    /// The application header failed the shape check
    InvalidImage(HeaderError),
}

/// What to do after the entry checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootDecision {
    StayInBootloader(StayReason),
    StartApplication,
}

/// A running bootloader
pub struct BootSequence<H: BootHal> {
    hal: H,
    config: BootConfig,
    reason: BootReason,
    header: Option<AppHeader>,
}

impl<H: BootHal> BootSequence<H> {
    /// Bring the MCU up
    ///
    /// Configures clocks, captures the reset cause, starts the microsecond
    /// timer and puts the signal line in its idle state.
    pub fn start(mut hal: H, config: BootConfig) -> Self {
        hal.configure_clocks();
        let reason = BootReason::capture(&hal);
        hal.init_timer();
        hal.init_line(config.signal_pin);

        info!("boot: {} at {} Hz", reason, hal.sysclk_hz());
        Self {
            hal,
            config,
            reason,
            header: None,
        }
    }

    /// Reset cause sampled at startup
    pub fn boot_reason(&self) -> BootReason {
        self.reason
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    /// The HAL, for the host protocol
    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Sample the signal line for a waiting host
    pub fn check_for_signal(&mut self) -> EntrySignal {
        entry::check_for_signal(&mut self.hal, &self.config)
    }

    /// Decide between staying resident and starting the application
    ///
    /// The line is only sampled when the reset was not requested by
    /// software.
    pub fn decide(&mut self) -> BootDecision {
        let decision = self.evaluate();
        info!("boot: {}", decision);
        decision
    }

    fn evaluate(&mut self) -> BootDecision {
        if self.reason.is_software_reset() {
            return BootDecision::StayInBootloader(StayReason::SoftwareReset);
        }
        if self.check_for_signal() == EntrySignal::HostPresent {
            return BootDecision::StayInBootloader(StayReason::HostPresent);
        }
        if let Some(header) = self.hal.application_header() {
            if let Err(err) = header.check(self.hal.layout()) {
                warn!("boot: application header rejected: {}", err);
                return BootDecision::StayInBootloader(StayReason::InvalidImage(err));
            }
            self.header = Some(header);
        }
        BootDecision::StartApplication
    }

    /// Hand the MCU to the application
    ///
    /// # Safety
    ///
    /// An application image must be present at the layout's application
    /// address. For layouts with a header, [`decide`](Self::decide)
    /// returning [`BootDecision::StartApplication`] covers the shape
    /// check, and the header it accepted is the one jumped through;
    /// headerless images are not checked at all.
    #[allow(unsafe_code)]
    pub unsafe fn start_application(self) -> ! {
        info!("boot: starting application");
        self.hal.jump_to_application(self.header)
    }
}
