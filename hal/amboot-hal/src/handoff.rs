//! Application handoff
//!
//! The bootloader is either active or has handed off; there is no way back.
//! [`Handoff::jump_to_application`] consumes the HAL so the transfer cannot
//! be issued twice.
//!
//! Two entry strategies exist, selected by the family's [`AppLayout`]:
//!
//! - [`AppEntry::VectorTable`]: the image starts with a two-word header
//!   (initial stack pointer at offset 0, entry address at offset 4). The
//!   vector table base is moved to the image start before the jump.
//! - [`AppEntry::FixedStackTop`]: the image starts with code. The stack
//!   pointer is the top of RAM and execution starts at the image start.
//!   No flash is read and no vector relocation happens.

use crate::cpu::Cpu;
use crate::mmio::RegisterBus;

/// How the application's initial stack pointer and entry are found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppEntry {
    /// Read both from the header at the image start
    VectorTable,
    /// Top of RAM and the image start
    FixedStackTop,
}

/// Compile-time memory layout shared by bootloader and application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppLayout {
    /// Address flash executes from
    pub flash_base: u32,
    /// Bytes of flash the bootloader and application may use
    pub flash_size: u32,
    /// Application image offset from `flash_base`
    pub app_offset: u32,
    /// Start of SRAM
    pub ram_base: u32,
    /// Bytes of SRAM available to the application stack
    pub ram_size: u32,
    /// Where the initial stack pointer and entry come from
    pub entry: AppEntry,
}

impl AppLayout {
    /// Absolute address of the application image
    pub const fn app_start(&self) -> u32 {
        self.flash_base + self.app_offset
    }

    /// First address past the usable flash
    pub const fn flash_end(&self) -> u32 {
        self.flash_base + self.flash_size
    }

    /// Initial stack pointer for [`AppEntry::FixedStackTop`]
    pub const fn stack_top(&self) -> u32 {
        self.ram_base + self.ram_size
    }

    /// Same layout with the application at a different offset
    pub const fn with_app_offset(mut self, app_offset: u32) -> Self {
        self.app_offset = app_offset;
        self
    }

    /// Read the application header, if this layout has one
    pub fn read_header<B: RegisterBus + ?Sized>(&self, bus: &B) -> Option<AppHeader> {
        match self.entry {
            AppEntry::VectorTable => Some(AppHeader::read(bus, self.app_start())),
            AppEntry::FixedStackTop => None,
        }
    }

    /// Work out where the application starts
    ///
    /// `known` is a header already read with [`read_header`](Self::read_header);
    /// flash is only read when it is `None` and the layout has a header.
    pub fn resolve<B: RegisterBus + ?Sized>(
        &self,
        bus: &B,
        known: Option<AppHeader>,
    ) -> HandoffTarget {
        let target = match self.entry {
            AppEntry::VectorTable => {
                let header = match known {
                    Some(header) => header,
                    None => AppHeader::read(bus, self.app_start()),
                };
                HandoffTarget {
                    stack_top: header.stack_pointer,
                    entry: header.entry,
                    vector_table: Some(self.app_start()),
                }
            }
            AppEntry::FixedStackTop => HandoffTarget {
                stack_top: self.stack_top(),
                entry: self.app_start(),
                vector_table: None,
            },
        };
        debug!(
            "handoff: sp={:#x} entry={:#x}",
            target.stack_top,
            target.entry
        );
        target
    }
}

/// The two words at the start of a header-carrying application image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppHeader {
    pub stack_pointer: u32,
    pub entry: u32,
}

/// Reasons an application header fails the sanity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderError {
    /// Both words read as erased flash
    Erased,
    /// Initial stack pointer outside RAM
    StackOutOfRam,
    /// Entry address outside the application's flash window
    EntryOutOfFlash,
}

impl AppHeader {
    pub const STACK_POINTER_OFFSET: u32 = 0;
    pub const ENTRY_OFFSET: u32 = 4;

    /// Read the header at `base`
    pub fn read<B: RegisterBus + ?Sized>(bus: &B, base: u32) -> Self {
        Self {
            stack_pointer: bus.read(base + Self::STACK_POINTER_OFFSET),
            entry: bus.read(base + Self::ENTRY_OFFSET),
        }
    }

    /// Shape check of the header words against the memory layout
    ///
    /// This does not prove the image is intact; image integrity is
    /// verified by the update protocol before any handoff.
    pub fn check(&self, layout: &AppLayout) -> Result<(), HeaderError> {
        if self.stack_pointer == u32::MAX && self.entry == u32::MAX {
            return Err(HeaderError::Erased);
        }
        if self.stack_pointer <= layout.ram_base || self.stack_pointer > layout.stack_top() {
            return Err(HeaderError::StackOutOfRam);
        }
        if self.entry < layout.app_start() || self.entry >= layout.flash_end() {
            return Err(HeaderError::EntryOutOfFlash);
        }
        Ok(())
    }
}

/// Resolved control-transfer parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandoffTarget {
    /// Initial stack pointer
    pub stack_top: u32,
    /// Branch target
    pub entry: u32,
    /// Vector table base written before the jump, if relocated
    pub vector_table: Option<u32>,
}

/// Transfer of control to the application
pub trait Handoff: Sized {
    type Cpu: Cpu;

    /// Memory layout this HAL was built for
    fn layout(&self) -> &AppLayout;

    /// Application header, for layouts that have one
    fn application_header(&self) -> Option<AppHeader>;

    /// Everything up to the jump
    ///
    /// Disables interrupts, stops the microsecond timer, resolves the
    /// target, and relocates the vector table where the layout asks for
    /// it. Leaves the MCU ready for [`Cpu::start_application`].
    ///
    /// `header` is the value [`application_header`](Self::application_header)
    /// already returned, if the caller checked it; `None` reads it here.
    fn prepare_handoff(&mut self, header: Option<AppHeader>) -> HandoffTarget;

    /// Give up peripheral ownership, keeping only the core
    fn into_cpu(self) -> Self::Cpu;

    /// Hand the MCU to the application; never returns
    ///
    /// # Safety
    ///
    /// A valid application image must be present at the layout's
    /// application address. Nothing here verifies that.
    #[allow(unsafe_code)]
    unsafe fn jump_to_application(mut self, header: Option<AppHeader>) -> ! {
        let target = self.prepare_handoff(header);
        let mut cpu = self.into_cpu();
        cpu.start_application(target.stack_top, target.entry)
    }
}
