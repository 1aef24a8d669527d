//! Clock bring-up: HSI -> PLL x18 -> 144 MHz

use amboot_hal::clock::{wait_for, ClockStage};
use amboot_hal::{ClockControl, Cpu, RegisterBus};

use crate::regs::{exten, flash, rcc};
use crate::Ch32v20x;

/// SYSCLK after bring-up: 8 MHz HSI * 18
pub const SYSCLK_HZ: u32 = 144_000_000;

/// Flash wait-states above 48 MHz
const FLASH_LATENCY: u32 = 2;

impl<B: RegisterBus, C: Cpu> ClockControl for Ch32v20x<B, C> {
    fn configure_clocks(&mut self) {
        debug!("clock: bring-up to {} Hz", SYSCLK_HZ);

        self.bus.set_bits(rcc::CTLR, rcc::CTLR_HSION);
        wait_for(ClockStage::Hsi, || {
            self.bus.read(rcc::CTLR) & rcc::CTLR_HSIRDY != 0
        });

        // HCLK = SYSCLK, PCLK2 = HCLK, PCLK1 = HCLK / 2
        self.bus.write_field(
            rcc::CFGR0,
            rcc::CFGR0_HPRE | rcc::CFGR0_PPRE1 | rcc::CFGR0_PPRE2,
            rcc::PPRE1_DIV2,
        );

        self.bus
            .write_field(flash::ACTLR, flash::ACTLR_LATENCY, FLASH_LATENCY);
        wait_for(ClockStage::FlashLatency, || {
            self.bus.read(flash::ACTLR) & flash::ACTLR_LATENCY == FLASH_LATENCY
        });

        self.bus.set_bits(exten::CTR, exten::CTR_PLL_HSI_PRE);
        // PLLSRC and PLLXTPRE cleared selects HSI
        self.bus.write_field(
            rcc::CFGR0,
            rcc::CFGR0_PLLSRC | rcc::CFGR0_PLLXTPRE | rcc::CFGR0_PLLMULL,
            rcc::PLLMULL_X18,
        );
        self.bus.set_bits(rcc::CTLR, rcc::CTLR_PLLON);
        wait_for(ClockStage::Pll, || {
            self.bus.read(rcc::CTLR) & rcc::CTLR_PLLRDY != 0
        });

        self.bus.write_field(rcc::CFGR0, rcc::CFGR0_SW, rcc::SW_PLL);
        wait_for(ClockStage::SysclkSwitch, || {
            self.bus.read(rcc::CFGR0) & rcc::CFGR0_SWS == rcc::SWS_PLL
        });
    }

    fn sysclk_hz(&self) -> u32 {
        SYSCLK_HZ
    }
}
