//! Scripted HAL for host tests of the boot sequence

use core::cell::{Cell, RefCell};

use amboot_hal::sim::SimBus;
use amboot_hal::timer::elapsed;
use amboot_hal::{
    AppEntry, AppHeader, AppLayout, ClockControl, Cpu, Drive, Handoff, HandoffTarget, LineControl,
    MicrosTimer, Pin, Pull, ResetCause,
};
use heapless::Vec;

pub const HEADER_LAYOUT: AppLayout = AppLayout {
    flash_base: 0x0800_0000,
    flash_size: 64 * 1024,
    app_offset: 0x1000,
    ram_base: 0x2000_0000,
    ram_size: 32 * 1024,
    entry: AppEntry::VectorTable,
};

pub const FIXED_LAYOUT: AppLayout = AppLayout {
    flash_base: 0,
    flash_size: 64 * 1024,
    app_offset: 0x1000,
    ram_base: 0x2000_0000,
    ram_size: 20 * 1024,
    entry: AppEntry::FixedStackTop,
};

/// What the pad reads under one bias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
    /// High except for the n-th sample after the bias changed
    LowAt(u16),
}

impl Level {
    fn is_high(self, sample: u16) -> bool {
        match self {
            Level::High => true,
            Level::Low => false,
            Level::LowAt(n) => n != sample,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Clocks,
    ResetRead,
    TimerOn,
    LineInit(Pin),
    IrqOff,
    TimerOff,
}

pub struct MockHal {
    down: Level,
    floating: Level,
    pull: Pull,
    output: Option<bool>,
    sample: Cell<u16>,
    line_reads: Cell<u32>,
    pull_changed_at: u16,
    first_sample_at: Cell<Option<u16>>,
    now: Cell<u16>,
    software_reset: bool,
    layout: AppLayout,
    bus: SimBus,
    events: RefCell<Vec<Event, 16>>,
}

impl MockHal {
    /// Pad levels with the pull-down on and with the line floating
    pub fn new(down: Level, floating: Level) -> Self {
        Self {
            down,
            floating,
            pull: Pull::None,
            output: None,
            sample: Cell::new(0),
            line_reads: Cell::new(0),
            pull_changed_at: 0,
            first_sample_at: Cell::new(None),
            now: Cell::new(0),
            software_reset: false,
            layout: FIXED_LAYOUT,
            bus: SimBus::new(),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn with_software_reset(mut self) -> Self {
        self.software_reset = true;
        self
    }

    /// Header layout with `header` programmed at the application start
    pub fn with_header(mut self, header: AppHeader) -> Self {
        self.layout = HEADER_LAYOUT;
        let start = HEADER_LAYOUT.app_start();
        self.bus.preset(start, header.stack_pointer);
        self.bus.preset(start + 4, header.entry);
        self
    }

    pub fn last_pull(&self) -> Pull {
        self.pull
    }

    pub fn line_reads(&self) -> u32 {
        self.line_reads.get()
    }

    /// Microseconds between the last bias change and the first sample
    pub fn first_sample_at(&self) -> Option<u16> {
        self.first_sample_at.get()
    }

    /// Flash reads of the application header words
    pub fn header_reads(&self) -> usize {
        let start = HEADER_LAYOUT.app_start();
        self.bus.reads_in(start..start + 8)
    }

    pub fn events(&self) -> Vec<Event, 16> {
        self.events.borrow().clone()
    }

    fn record(&self, event: Event) {
        let _ = self.events.borrow_mut().push(event);
    }
}

impl ClockControl for MockHal {
    fn configure_clocks(&mut self) {
        self.record(Event::Clocks);
    }

    fn sysclk_hz(&self) -> u32 {
        1_000_000
    }
}

impl LineControl for MockHal {
    fn init_line(&mut self, pin: Pin) {
        self.record(Event::LineInit(pin));
    }

    fn set_input_mode(&mut self, _pin: Pin, pull: Pull) {
        self.pull = pull;
        self.output = None;
        self.sample.set(0);
        self.pull_changed_at = self.now.get();
        self.first_sample_at.set(None);
    }

    fn set_output_mode(&mut self, _pin: Pin, _drive: Drive) {
        self.output = Some(false);
    }

    fn set_line(&mut self, _pin: Pin) {
        self.output = Some(true);
    }

    fn clear_line(&mut self, _pin: Pin) {
        self.output = Some(false);
    }

    fn read_line(&self, _pin: Pin) -> bool {
        if let Some(level) = self.output {
            return level;
        }
        if self.first_sample_at.get().is_none() {
            self.first_sample_at
                .set(Some(elapsed(self.pull_changed_at, self.now.get())));
        }
        let n = self.sample.get();
        self.sample.set(n + 1);
        self.line_reads.set(self.line_reads.get() + 1);
        match self.pull {
            Pull::Down => self.down.is_high(n),
            Pull::None => self.floating.is_high(n),
            Pull::Up => true,
        }
    }
}

impl MicrosTimer for MockHal {
    fn init_timer(&mut self) {
        self.record(Event::TimerOn);
    }

    /// Advances one microsecond per read
    fn read_timer(&self) -> u16 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(1));
        t
    }

    fn disable_timer(&mut self) {
        self.record(Event::TimerOff);
    }
}

impl ResetCause for MockHal {
    fn was_software_reset(&self) -> bool {
        self.record(Event::ResetRead);
        self.software_reset
    }
}

impl Handoff for MockHal {
    type Cpu = MockCpu;

    fn layout(&self) -> &AppLayout {
        &self.layout
    }

    fn application_header(&self) -> Option<AppHeader> {
        self.layout.read_header(&self.bus)
    }

    fn prepare_handoff(&mut self, header: Option<AppHeader>) -> HandoffTarget {
        self.record(Event::IrqOff);
        self.disable_timer();
        self.layout.resolve(&self.bus, header)
    }

    fn into_cpu(self) -> MockCpu {
        MockCpu
    }
}

pub struct MockCpu;

impl Cpu for MockCpu {
    fn disable_interrupts(&mut self) {}

    #[allow(unsafe_code)]
    unsafe fn start_application(&mut self, stack_top: u32, entry: u32) -> ! {
        panic!("jump sp={:#010x} entry={:#010x}", stack_top, entry);
    }
}
