//! Simulated CH32V203 for host tests

use amboot_hal::sim::{RegisterFile, SimBus};
use amboot_hal::Cpu;

use crate::regs::{gpio, rcc};

/// Bus with the RCC and both GPIO ports modelled
pub fn sim_board() -> SimBus {
    let bus = SimBus::new();
    bus.on_write(rcc::CTLR, rcc_ctlr);
    bus.on_write(rcc::CFGR0, rcc_cfgr0);
    for base in [gpio::GPIOA, gpio::GPIOB] {
        bus.on_write(base + gpio::CFGLR, settle);
        bus.on_write(base + gpio::CFGHR, settle);
        bus.on_write(base + gpio::OUTDR, settle);
        bus.on_write(base + gpio::BSHR, bshr);
        bus.on_write(base + gpio::BCR, bcr);
    }
    bus
}

fn rcc_ctlr(regs: &mut RegisterFile, addr: u32, value: u32) {
    let mut ready = 0;
    if value & rcc::CTLR_HSION != 0 {
        ready |= rcc::CTLR_HSIRDY;
    }
    if value & rcc::CTLR_PLLON != 0 {
        ready |= rcc::CTLR_PLLRDY;
    }
    regs.set(addr, (value & !(rcc::CTLR_HSIRDY | rcc::CTLR_PLLRDY)) | ready);
}

fn rcc_cfgr0(regs: &mut RegisterFile, addr: u32, value: u32) {
    let sws = (value & rcc::CFGR0_SW) << 2;
    regs.set(addr, (value & !rcc::CFGR0_SWS) | sws);
}

fn bshr(regs: &mut RegisterFile, addr: u32, value: u32) {
    let base = addr - gpio::BSHR;
    let outdr = regs.get(base + gpio::OUTDR);
    regs.set(base + gpio::OUTDR, (outdr | (value & 0xFFFF)) & !(value >> 16));
    regs.set(addr, 0);
    settle(regs, base, 0);
}

fn bcr(regs: &mut RegisterFile, addr: u32, value: u32) {
    let base = addr - gpio::BCR;
    let outdr = regs.get(base + gpio::OUTDR);
    regs.set(base + gpio::OUTDR, outdr & !(value & 0xFFFF));
    regs.set(addr, 0);
    settle(regs, base, 0);
}

/// Recompute INDR from the configuration nibbles and output register
///
/// Outputs and pulled inputs follow `OUTDR`. Floating and analog inputs
/// keep whatever level the test put on the pad.
fn settle(regs: &mut RegisterFile, addr: u32, _value: u32) {
    let base = addr & !0x3FF;
    let outdr = regs.get(base + gpio::OUTDR);
    let mut indr = regs.get(base + gpio::INDR);

    for n in 0..16u32 {
        let cfgr = if n < 8 {
            regs.get(base + gpio::CFGLR)
        } else {
            regs.get(base + gpio::CFGHR)
        };
        let nibble = (cfgr >> (4 * (n % 8))) & gpio::CFG_MASK;
        let is_output = nibble & 0b11 != 0;
        if is_output || nibble == gpio::CFG_INPUT_PULLED {
            let bit = 1 << n;
            if outdr & bit != 0 {
                indr |= bit;
            } else {
                indr &= !bit;
            }
        }
    }
    regs.set(base + gpio::INDR, indr);
}

/// Core that must never be asked to do anything
pub struct NoCpu;

impl Cpu for NoCpu {
    fn disable_interrupts(&mut self) {
        panic!("unexpected interrupt disable");
    }

    #[allow(unsafe_code)]
    unsafe fn start_application(&mut self, _stack_top: u32, _entry: u32) -> ! {
        panic!("unexpected jump");
    }
}

/// Core that records its actions into the bus log and stops at the jump
pub struct RecordingCpu<'a> {
    pub bus: &'a SimBus,
}

impl Cpu for RecordingCpu<'_> {
    fn disable_interrupts(&mut self) {
        self.bus.mark("irq-off");
    }

    fn barrier(&mut self) {
        self.bus.mark("barrier");
    }

    #[allow(unsafe_code)]
    unsafe fn start_application(&mut self, stack_top: u32, entry: u32) -> ! {
        self.bus.mark("jump");
        panic!("jump sp={:#010x} entry={:#010x}", stack_top, entry);
    }
}
