//! Entry-policy configuration
//!
//! Everything here is fixed at build time by the board; there is no
//! persisted configuration.

use amboot_hal::Pin;

/// Default settle time after changing the line's pull, in microseconds
pub const DEFAULT_SETTLE_US: u16 = 500;

/// Default number of samples per phase of the entry check
pub const DEFAULT_SAMPLES: u16 = 500;

/// Default gap between samples, in microseconds
pub const DEFAULT_SAMPLE_INTERVAL_US: u16 = 10;

/// Knobs for the signal-line entry check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootConfig {
    /// Line shared with the host (the ESC signal input)
    pub signal_pin: Pin,
    /// Wait after switching the pull before sampling
    pub settle_us: u16,
    /// Samples taken per phase
    pub samples: u16,
    /// Wait between samples
    pub sample_interval_us: u16,
}

impl BootConfig {
    /// Configuration with the default timing
    pub const fn new(signal_pin: Pin) -> Self {
        Self {
            signal_pin,
            settle_us: DEFAULT_SETTLE_US,
            samples: DEFAULT_SAMPLES,
            sample_interval_us: DEFAULT_SAMPLE_INTERVAL_US,
        }
    }

    pub const fn with_settle_us(mut self, settle_us: u16) -> Self {
        self.settle_us = settle_us;
        self
    }

    pub const fn with_samples(mut self, samples: u16) -> Self {
        self.samples = samples;
        self
    }

    pub const fn with_sample_interval_us(mut self, sample_interval_us: u16) -> Self {
        self.sample_interval_us = sample_interval_us;
        self
    }

    /// Worst-case duration of one sampling phase in microseconds
    pub const fn phase_duration_us(&self) -> u32 {
        self.settle_us as u32 + self.samples as u32 * self.sample_interval_us as u32
    }
}
