//! Microsecond timer
//!
//! A polled, free-running 16-bit counter at 1 tick per microsecond. The
//! counter wraps every 65.536 ms; all interval arithmetic is modular.

use embedded_hal::delay::DelayNs;

/// Counter rate in ticks per second
pub const TICK_HZ: u32 = 1_000_000;

/// Longest wait a single modular comparison can express safely
pub const MAX_WAIT_US: u16 = 0x8000;

/// Prescaler register value giving [`TICK_HZ`] from `timer_clock_hz`
pub const fn prescaler_for(timer_clock_hz: u32) -> u32 {
    timer_clock_hz / TICK_HZ - 1
}

/// Microseconds from `start` to `now`, modulo 2^16
///
/// Correct as long as the two reads are less than 65.536 ms apart.
#[inline]
pub const fn elapsed(start: u16, now: u16) -> u16 {
    now.wrapping_sub(start)
}

/// Free-running microsecond counter
pub trait MicrosTimer {
    /// Start the counter: 1 tick/us, full-range wrap, no interrupts
    fn init_timer(&mut self);

    /// Current count
    fn read_timer(&self) -> u16;

    /// Stop the counter and gate its peripheral clock
    ///
    /// Called once, right before the application handoff.
    fn disable_timer(&mut self);

    /// Microseconds since `start`, modulo 2^16
    fn elapsed_since(&self, start: u16) -> u16 {
        elapsed(start, self.read_timer())
    }

    /// Busy-wait for `us` microseconds
    fn delay_us(&self, us: u16) {
        let start = self.read_timer();
        while self.elapsed_since(start) < us {
            core::hint::spin_loop();
        }
    }
}

/// Deadline tracked against the wrapping counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    start: u16,
    limit_us: u16,
}

impl Timeout {
    /// Deadline `limit_us` after `start`
    pub const fn new(start: u16, limit_us: u16) -> Self {
        Self { start, limit_us }
    }

    /// Deadline `limit_us` from the timer's current count
    pub fn start<T: MicrosTimer + ?Sized>(timer: &T, limit_us: u16) -> Self {
        Self::new(timer.read_timer(), limit_us)
    }

    /// True once `now` is at least `limit_us` past the start
    pub const fn expired_at(&self, now: u16) -> bool {
        elapsed(self.start, now) >= self.limit_us
    }

    /// True once the deadline has passed on `timer`
    pub fn expired<T: MicrosTimer + ?Sized>(&self, timer: &T) -> bool {
        self.expired_at(timer.read_timer())
    }

    /// Restart the deadline at `now`
    pub fn reset(&mut self, now: u16) {
        self.start = now;
    }
}

/// [`DelayNs`] adapter over a [`MicrosTimer`]
///
/// Resolution is one microsecond; shorter requests round up.
pub struct TimerDelay<'a, T: ?Sized> {
    timer: &'a T,
}

impl<'a, T: MicrosTimer + ?Sized> TimerDelay<'a, T> {
    pub fn new(timer: &'a T) -> Self {
        Self { timer }
    }
}

impl<T: MicrosTimer + ?Sized> DelayNs for TimerDelay<'_, T> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, mut us: u32) {
        while us > 0 {
            let chunk = us.min(MAX_WAIT_US as u32) as u16;
            self.timer.delay_us(chunk);
            us -= chunk as u32;
        }
    }
}
