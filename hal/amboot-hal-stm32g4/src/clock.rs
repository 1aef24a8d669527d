//! Clock bring-up: HSI16 -> PLL -> 160 MHz

use amboot_hal::clock::{wait_for, ClockStage};
use amboot_hal::{ClockControl, Cpu, RegisterBus};

use crate::regs::{flash, pwr, rcc};
use crate::Stm32g4;

/// SYSCLK after bring-up: 16 MHz / M(2) * N(40) / R(2)
pub const SYSCLK_HZ: u32 = 160_000_000;

/// Flash wait-states required above 136 MHz in range 1
const FLASH_LATENCY: u32 = 4;

/// PLLM field value for /2
const PLL_M_DIV2: u32 = 1;
const PLL_N: u32 = 40;
/// PLLR field value for /2
const PLL_R_DIV2: u32 = 0;

impl<B: RegisterBus, C: Cpu> ClockControl for Stm32g4<B, C> {
    fn configure_clocks(&mut self) {
        debug!("clock: bring-up to {} Hz", SYSCLK_HZ);

        self.bus
            .write_field(flash::ACR, flash::ACR_LATENCY, FLASH_LATENCY);
        wait_for(ClockStage::FlashLatency, || {
            self.bus.read(flash::ACR) & flash::ACR_LATENCY == FLASH_LATENCY
        });

        self.bus.set_bits(rcc::APB1ENR1, rcc::APB1ENR1_PWREN);
        self.bus.write_field(pwr::CR1, pwr::CR1_VOS, pwr::VOS_RANGE1);
        wait_for(ClockStage::VoltageScaling, || {
            self.bus.read(pwr::SR2) & pwr::SR2_VOSF == 0
        });

        self.bus.set_bits(rcc::CR, rcc::CR_HSION);
        wait_for(ClockStage::Hsi, || self.bus.read(rcc::CR) & rcc::CR_HSIRDY != 0);

        self.bus.write_field(
            rcc::PLLCFGR,
            rcc::PLLCFGR_PLLSRC | rcc::PLLCFGR_PLLM | rcc::PLLCFGR_PLLN | rcc::PLLCFGR_PLLR,
            rcc::PLLSRC_HSI16
                | (PLL_M_DIV2 << rcc::PLLM_SHIFT)
                | (PLL_N << rcc::PLLN_SHIFT)
                | (PLL_R_DIV2 << rcc::PLLR_SHIFT),
        );
        self.bus.set_bits(rcc::PLLCFGR, rcc::PLLCFGR_PLLREN);
        self.bus.set_bits(rcc::CR, rcc::CR_PLLON);
        wait_for(ClockStage::Pll, || self.bus.read(rcc::CR) & rcc::CR_PLLRDY != 0);

        self.bus.write_field(rcc::CFGR, rcc::CFGR_SW, rcc::SW_PLL);
        wait_for(ClockStage::SysclkSwitch, || {
            self.bus.read(rcc::CFGR) & rcc::CFGR_SWS == rcc::SWS_PLL
        });

        // AHB, APB1, APB2 undivided
        self.bus.clear_bits(
            rcc::CFGR,
            rcc::CFGR_HPRE | rcc::CFGR_PPRE1 | rcc::CFGR_PPRE2,
        );
    }

    fn sysclk_hz(&self) -> u32 {
        SYSCLK_HZ
    }
}
