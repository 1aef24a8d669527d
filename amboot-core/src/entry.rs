//! Signal-line entry check
//!
//! A host that wants the bootloader holds the ESC signal line high. The
//! line is sampled twice: first against the internal pull-down, then
//! floating. A line that never reads low in either phase is being held
//! high by something outside the MCU.

use amboot_hal::{LineControl, MicrosTimer, Pull};

use crate::config::BootConfig;

/// Outcome of the entry check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntrySignal {
    /// Line held high; a host is waiting for the bootloader
    HostPresent,
    /// Line seen low in both phases
    NoHost,
}

/// Number of low samples with the line biased by `pull`
pub fn count_low<H>(hal: &mut H, config: &BootConfig, pull: Pull) -> u16
where
    H: LineControl + MicrosTimer + ?Sized,
{
    hal.set_input_mode(config.signal_pin, pull);
    hal.delay_us(config.settle_us);

    let mut low = 0;
    for _ in 0..config.samples {
        if !hal.read_line(config.signal_pin) {
            low += 1;
        }
        hal.delay_us(config.sample_interval_us);
    }
    low
}

/// Run both sampling phases
///
/// Leaves the line as a floating input unless the first phase already
/// found the host.
pub fn check_for_signal<H>(hal: &mut H, config: &BootConfig) -> EntrySignal
where
    H: LineControl + MicrosTimer + ?Sized,
{
    let low = count_low(hal, config, Pull::Down);
    if low == 0 {
        debug!("entry: line high against pull-down");
        return EntrySignal::HostPresent;
    }

    let low = count_low(hal, config, Pull::None);
    if low == 0 {
        debug!("entry: floating line idles high");
        return EntrySignal::HostPresent;
    }

    trace!("entry: {} low samples floating", low);
    EntrySignal::NoHost
}
