//! Clock bring-up

/// Brings the MCU from its reset clock to the bootloader run frequency
pub trait ClockControl {
    /// Configure flash wait-states, voltage scaling, oscillators and PLL
    ///
    /// Wait-state and voltage changes are committed and read back before
    /// the frequency is raised. Every ready flag is polled without a
    /// timeout: a clock tree that never reports ready hangs here.
    fn configure_clocks(&mut self);

    /// System clock frequency after [`configure_clocks`](Self::configure_clocks)
    fn sysclk_hz(&self) -> u32;
}

/// A clock bring-up step that waits on a hardware flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStage {
    /// Flash latency read-back
    FlashLatency,
    /// Regulator voltage scaling settled
    VoltageScaling,
    /// Internal RC oscillator ready
    Hsi,
    /// PLL locked
    Pll,
    /// System clock switch acknowledged
    SysclkSwitch,
}

/// Busy-poll until `ready` returns true
///
/// There is no timeout. The stage is logged first so a debug probe
/// attached to a hung board shows which flag never came up.
pub fn wait_for(stage: ClockStage, mut ready: impl FnMut() -> bool) {
    trace!("clock: waiting for {}", stage);
    while !ready() {
        core::hint::spin_loop();
    }
}
