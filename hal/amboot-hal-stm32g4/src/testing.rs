//! Simulated STM32G431 for host tests
//!
//! Models just enough hardware on a [`SimBus`]: oscillator and PLL ready
//! flags, the SYSCLK switch status, TIM2 reset, and GPIO pads whose input
//! register follows the output latch or the pull resistor.

use amboot_hal::sim::{RegisterFile, SimBus};
use amboot_hal::Cpu;

use crate::regs::{gpio, rcc, tim2};

/// Bus with the RCC and both GPIO ports modelled
pub fn sim_board() -> SimBus {
    let bus = SimBus::new();
    attach_rcc(&bus);
    attach_gpio(&bus, gpio::GPIOA);
    attach_gpio(&bus, gpio::GPIOB);
    bus
}

pub fn attach_rcc(bus: &SimBus) {
    bus.on_write(rcc::CR, rcc_cr);
    bus.on_write(rcc::CFGR, rcc_cfgr);
    bus.on_write(rcc::APB1RSTR1, rcc_apb1rstr1);
}

pub fn attach_gpio(bus: &SimBus, base: u32) {
    bus.on_write(base + gpio::MODER, settle);
    bus.on_write(base + gpio::PUPDR, settle);
    bus.on_write(base + gpio::BSRR, bsrr);
    bus.on_write(base + gpio::BRR, brr);
}

fn rcc_cr(regs: &mut RegisterFile, addr: u32, value: u32) {
    let mut ready = 0;
    if value & rcc::CR_HSION != 0 {
        ready |= rcc::CR_HSIRDY;
    }
    if value & rcc::CR_PLLON != 0 {
        ready |= rcc::CR_PLLRDY;
    }
    regs.set(addr, (value & !(rcc::CR_HSIRDY | rcc::CR_PLLRDY)) | ready);
}

fn rcc_cfgr(regs: &mut RegisterFile, addr: u32, value: u32) {
    let sws = (value & rcc::CFGR_SW) << 2;
    regs.set(addr, (value & !rcc::CFGR_SWS) | sws);
}

fn rcc_apb1rstr1(regs: &mut RegisterFile, _addr: u32, value: u32) {
    if value & rcc::APB1RSTR1_TIM2RST != 0 {
        for reg in [tim2::CR1, tim2::CR2, tim2::SMCR, tim2::CNT, tim2::PSC] {
            regs.set(reg, 0);
        }
        regs.set(tim2::ARR, u32::MAX);
    }
}

fn bsrr(regs: &mut RegisterFile, addr: u32, value: u32) {
    let base = addr - gpio::BSRR;
    let odr = regs.get(base + gpio::ODR);
    regs.set(base + gpio::ODR, (odr | (value & 0xFFFF)) & !(value >> 16));
    // write-only
    regs.set(addr, 0);
    settle(regs, base, 0);
}

fn brr(regs: &mut RegisterFile, addr: u32, value: u32) {
    let base = addr - gpio::BRR;
    let odr = regs.get(base + gpio::ODR);
    regs.set(base + gpio::ODR, odr & !(value & 0xFFFF));
    regs.set(addr, 0);
    settle(regs, base, 0);
}

/// Recompute IDR from mode, pull and output latch
///
/// Floating inputs keep whatever level the test put on the pad.
fn settle(regs: &mut RegisterFile, addr: u32, _value: u32) {
    let base = addr & !0x3FF;
    let moder = regs.get(base + gpio::MODER);
    let pupdr = regs.get(base + gpio::PUPDR);
    let odr = regs.get(base + gpio::ODR);
    let mut idr = regs.get(base + gpio::IDR);

    for n in 0..16 {
        let bit = 1 << n;
        let level = match (moder >> (2 * n)) & 0b11 {
            gpio::MODE_OUTPUT => Some(odr & bit != 0),
            gpio::MODE_INPUT => match (pupdr >> (2 * n)) & 0b11 {
                gpio::PULL_UP => Some(true),
                gpio::PULL_DOWN => Some(false),
                _ => None,
            },
            _ => None,
        };
        match level {
            Some(true) => idr |= bit,
            Some(false) => idr &= !bit,
            None => {}
        }
    }
    regs.set(base + gpio::IDR, idr);
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
