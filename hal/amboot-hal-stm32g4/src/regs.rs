//! STM32G431 register map (RM0440)
//!
//! Only the registers and fields the bootloader touches.

use amboot_hal::Port;

pub mod rcc {
    pub const BASE: u32 = 0x4002_1000;

    pub const CR: u32 = BASE + 0x00;
    pub const CFGR: u32 = BASE + 0x08;
    pub const PLLCFGR: u32 = BASE + 0x0C;
    pub const APB1RSTR1: u32 = BASE + 0x38;
    pub const AHB2ENR: u32 = BASE + 0x4C;
    pub const APB1ENR1: u32 = BASE + 0x58;
    pub const CSR: u32 = BASE + 0x94;

    pub const CR_HSION: u32 = 1 << 8;
    pub const CR_HSIRDY: u32 = 1 << 10;
    pub const CR_PLLON: u32 = 1 << 24;
    pub const CR_PLLRDY: u32 = 1 << 25;

    pub const CFGR_SW: u32 = 0b11;
    pub const CFGR_SWS: u32 = 0b11 << 2;
    pub const CFGR_HPRE: u32 = 0xF << 4;
    pub const CFGR_PPRE1: u32 = 0b111 << 8;
    pub const CFGR_PPRE2: u32 = 0b111 << 11;
    pub const SW_PLL: u32 = 0b11;
    pub const SWS_PLL: u32 = 0b11 << 2;

    pub const PLLCFGR_PLLSRC: u32 = 0b11;
    pub const PLLCFGR_PLLM: u32 = 0xF << 4;
    pub const PLLCFGR_PLLN: u32 = 0x7F << 8;
    pub const PLLCFGR_PLLREN: u32 = 1 << 24;
    pub const PLLCFGR_PLLR: u32 = 0b11 << 25;
    pub const PLLSRC_HSI16: u32 = 0b10;
    pub const PLLM_SHIFT: u32 = 4;
    pub const PLLN_SHIFT: u32 = 8;
    pub const PLLR_SHIFT: u32 = 25;

    pub const APB1RSTR1_TIM2RST: u32 = 1 << 0;

    pub const AHB2ENR_GPIOAEN: u32 = 1 << 0;
    pub const AHB2ENR_GPIOBEN: u32 = 1 << 1;

    pub const APB1ENR1_TIM2EN: u32 = 1 << 0;
    pub const APB1ENR1_PWREN: u32 = 1 << 28;

    pub const CSR_SFTRSTF: u32 = 1 << 28;
}

pub mod flash {
    pub const BASE: u32 = 0x4002_2000;

    pub const ACR: u32 = BASE + 0x00;
    pub const ACR_LATENCY: u32 = 0xF;
}

pub mod pwr {
    pub const BASE: u32 = 0x4000_7000;

    pub const CR1: u32 = BASE + 0x00;
    pub const SR2: u32 = BASE + 0x14;

    pub const CR1_VOS: u32 = 0b11 << 9;
    pub const VOS_RANGE1: u32 = 0b01 << 9;
    pub const SR2_VOSF: u32 = 1 << 10;
}

pub mod gpio {
    pub const GPIOA: u32 = 0x4800_0000;
    pub const GPIOB: u32 = 0x4800_0400;

    pub const MODER: u32 = 0x00;
    pub const OTYPER: u32 = 0x04;
    pub const PUPDR: u32 = 0x0C;
    pub const IDR: u32 = 0x10;
    pub const ODR: u32 = 0x14;
    pub const BSRR: u32 = 0x18;
    pub const BRR: u32 = 0x28;

    pub const MODE_INPUT: u32 = 0b00;
    pub const MODE_OUTPUT: u32 = 0b01;

    pub const PULL_NONE: u32 = 0b00;
    pub const PULL_UP: u32 = 0b01;
    pub const PULL_DOWN: u32 = 0b10;
}

pub mod tim2 {
    pub const BASE: u32 = 0x4000_0000;

    pub const CR1: u32 = BASE + 0x00;
    pub const CR2: u32 = BASE + 0x04;
    pub const SMCR: u32 = BASE + 0x08;
    pub const EGR: u32 = BASE + 0x14;
    pub const CNT: u32 = BASE + 0x24;
    pub const PSC: u32 = BASE + 0x28;
    pub const ARR: u32 = BASE + 0x2C;

    pub const CR1_CEN: u32 = 1 << 0;
    pub const CR1_DIR: u32 = 1 << 4;
    pub const CR1_CMS: u32 = 0b11 << 5;
    pub const CR1_ARPE: u32 = 1 << 7;
    pub const CR1_CKD: u32 = 0b11 << 8;

    pub const CR2_MMS: u32 = 0b111 << 4;

    pub const SMCR_SMS: u32 = 0b111 | (1 << 16);
    pub const SMCR_MSM: u32 = 1 << 7;

    pub const EGR_UG: u32 = 1 << 0;
}

pub mod scb {
    pub const VTOR: u32 = 0xE000_ED08;
}

/// Base address of a GPIO port
pub const fn gpio_base(port: Port) -> u32 {
    match port {
        Port::A => gpio::GPIOA,
        Port::B => gpio::GPIOB,
    }
}
