//! CH32V203 register map (CH32FV2x_V3x reference manual)
//!
//! Only the registers and fields the bootloader touches.

use amboot_hal::Port;

pub mod rcc {
    pub const BASE: u32 = 0x4002_1000;

    pub const CTLR: u32 = BASE + 0x00;
    pub const CFGR0: u32 = BASE + 0x04;
    pub const APB2PCENR: u32 = BASE + 0x18;
    pub const APB1PCENR: u32 = BASE + 0x1C;
    pub const RSTSCKR: u32 = BASE + 0x24;

    pub const CTLR_HSION: u32 = 1 << 0;
    pub const CTLR_HSIRDY: u32 = 1 << 1;
    pub const CTLR_PLLON: u32 = 1 << 24;
    pub const CTLR_PLLRDY: u32 = 1 << 25;

    pub const CFGR0_SW: u32 = 0b11;
    pub const CFGR0_SWS: u32 = 0b11 << 2;
    pub const CFGR0_HPRE: u32 = 0xF << 4;
    pub const CFGR0_PPRE1: u32 = 0b111 << 8;
    pub const CFGR0_PPRE2: u32 = 0b111 << 11;
    pub const CFGR0_PLLSRC: u32 = 1 << 16;
    pub const CFGR0_PLLXTPRE: u32 = 1 << 17;
    pub const CFGR0_PLLMULL: u32 = 0xF << 18;

    pub const SW_PLL: u32 = 0b10;
    pub const SWS_PLL: u32 = 0b10 << 2;
    pub const PPRE1_DIV2: u32 = 0b100 << 8;
    pub const PLLMULL_X18: u32 = 0b1111 << 18;

    pub const APB2PCENR_IOPAEN: u32 = 1 << 2;
    pub const APB2PCENR_IOPBEN: u32 = 1 << 3;

    pub const APB1PCENR_TIM2EN: u32 = 1 << 0;

    pub const RSTSCKR_SFTRSTF: u32 = 1 << 28;
}

/// Extended configuration block
pub mod exten {
    pub const CTR: u32 = 0x4002_3800;

    /// Feed HSI to the PLL undivided
    pub const CTR_PLL_HSI_PRE: u32 = 1 << 4;
}

pub mod flash {
    pub const BASE: u32 = 0x4002_2000;

    pub const ACTLR: u32 = BASE + 0x00;
    pub const ACTLR_LATENCY: u32 = 0b11;
}

pub mod gpio {
    pub const GPIOA: u32 = 0x4001_0800;
    pub const GPIOB: u32 = 0x4001_0C00;

    pub const CFGLR: u32 = 0x00;
    pub const CFGHR: u32 = 0x04;
    pub const INDR: u32 = 0x08;
    pub const OUTDR: u32 = 0x0C;
    pub const BSHR: u32 = 0x10;
    pub const BCR: u32 = 0x14;

    /// Pins per configuration register
    pub const PINS_PER_CFGR: u32 = 8;

    // Four-bit CNF:MODE nibbles
    pub const CFG_INPUT_FLOATING: u32 = 0x4;
    pub const CFG_INPUT_PULLED: u32 = 0x8;
    pub const CFG_OUTPUT_PUSH_PULL_2MHZ: u32 = 0x2;
    pub const CFG_MASK: u32 = 0xF;
}

pub mod tim2 {
    pub const BASE: u32 = 0x4000_0000;

    pub const CTLR1: u32 = BASE + 0x00;
    pub const SWEVGR: u32 = BASE + 0x14;
    pub const CNT: u32 = BASE + 0x24;
    pub const PSC: u32 = BASE + 0x28;
    pub const ATRLR: u32 = BASE + 0x2C;

    pub const CTLR1_CEN: u32 = 1 << 0;
    pub const CTLR1_DIR: u32 = 1 << 4;
    pub const CTLR1_CMS: u32 = 0b11 << 5;
    pub const CTLR1_ARPE: u32 = 1 << 7;
    pub const CTLR1_CKD: u32 = 0b11 << 8;

    pub const SWEVGR_UG: u32 = 1 << 0;
}

/// Base address of a GPIO port
pub const fn gpio_base(port: Port) -> u32 {
    match port {
        Port::A => gpio::GPIOA,
        Port::B => gpio::GPIOB,
    }
}
