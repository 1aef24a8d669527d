//! Simulated register bus for host-side testing
//!
//! [`SimBus`] is a sparse 32-bit register file with an access log. Chip
//! crates model the hardware behaviour they depend on (ready flags coming
//! up, output latches reaching the input register) by attaching
//! [`Reaction`]s to register addresses.
//!
//! The bus uses interior mutability so that a HAL under test and a stub
//! [`Cpu`](crate::cpu::Cpu) can share it by reference and record their
//! actions into one ordered log.

use core::cell::RefCell;
use core::ops::Range;

use heapless::{FnvIndexMap, Vec};

use crate::mmio::RegisterBus;

/// Maximum number of distinct registers the simulator tracks
pub const MAX_REGISTERS: usize = 128;

/// Maximum number of logged accesses
pub const LOG_CAPACITY: usize = 1024;

/// Maximum number of write reactions
pub const MAX_REACTIONS: usize = 32;

/// Hardware model hook, called after a write has been stored
pub type Reaction = fn(regs: &mut RegisterFile, addr: u32, value: u32);

/// One logged bus event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read { addr: u32, value: u32 },
    Write { addr: u32, value: u32 },
    /// Non-register event recorded by a test double (e.g. "irq-off")
    Marker(&'static str),
}

/// Sparse register storage; unwritten registers read as zero
#[derive(Debug, Default)]
pub struct RegisterFile {
    regs: FnvIndexMap<u32, u32, MAX_REGISTERS>,
}

impl RegisterFile {
    /// Current value of a register
    pub fn get(&self, addr: u32) -> u32 {
        self.regs.get(&addr).copied().unwrap_or(0)
    }

    /// Overwrite a register
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_REGISTERS`] distinct addresses are used.
    pub fn set(&mut self, addr: u32, value: u32) {
        if self.regs.insert(addr, value).is_err() {
            panic!("sim: register file full at {:#010x}", addr);
        }
    }

    pub fn set_bits(&mut self, addr: u32, bits: u32) {
        let value = self.get(addr) | bits;
        self.set(addr, value);
    }

    pub fn clear_bits(&mut self, addr: u32, bits: u32) {
        let value = self.get(addr) & !bits;
        self.set(addr, value);
    }
}

#[derive(Default)]
struct State {
    file: RegisterFile,
    reactions: Vec<(u32, Reaction), MAX_REACTIONS>,
    log: Vec<Access, LOG_CAPACITY>,
}

impl State {
    fn record(&mut self, access: Access) {
        if self.log.push(access).is_err() {
            panic!("sim: access log full");
        }
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.file.set(addr, value);
        self.record(Access::Write { addr, value });
        for i in 0..self.reactions.len() {
            let (watched, reaction) = self.reactions[i];
            if watched == addr {
                reaction(&mut self.file, addr, value);
            }
        }
    }

    fn read(&mut self, addr: u32) -> u32 {
        let value = self.file.get(addr);
        self.record(Access::Read { addr, value });
        value
    }
}

/// Simulated register bus
#[derive(Default)]
pub struct SimBus {
    state: RefCell<State>,
}

impl SimBus {
    /// Create an empty bus (all registers zero, no reactions)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register without logging or triggering reactions
    pub fn preset(&self, addr: u32, value: u32) {
        self.state.borrow_mut().file.set(addr, value);
    }

    /// Read a register without logging
    pub fn peek(&self, addr: u32) -> u32 {
        self.state.borrow().file.get(addr)
    }

    /// Call `reaction` after every write to `addr`
    pub fn on_write(&self, addr: u32, reaction: Reaction) {
        if self.state.borrow_mut().reactions.push((addr, reaction)).is_err() {
            panic!("sim: too many reactions");
        }
    }

    /// Record a non-register event in the access log
    pub fn mark(&self, label: &'static str) {
        self.state.borrow_mut().record(Access::Marker(label));
    }

    /// Forget all logged accesses, keeping register contents
    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    /// Copy of the access log
    pub fn log(&self) -> Vec<Access, LOG_CAPACITY> {
        self.state.borrow().log.clone()
    }

    /// Index of the first logged access matching `pred`
    pub fn position(&self, pred: impl Fn(&Access) -> bool) -> Option<usize> {
        self.state.borrow().log.iter().position(pred)
    }

    /// Index of the last logged access matching `pred`
    pub fn last_position(&self, pred: impl Fn(&Access) -> bool) -> Option<usize> {
        self.state.borrow().log.iter().rposition(pred)
    }

    /// Index of the first write to `addr` whose value satisfies `pred`
    pub fn first_write(&self, addr: u32, pred: impl Fn(u32) -> bool) -> Option<usize> {
        self.position(|a| matches!(*a, Access::Write { addr: w, value } if w == addr && pred(value)))
    }

    /// Index of the first read of `addr` after log index `after`
    pub fn first_read_after(&self, addr: u32, after: usize) -> Option<usize> {
        self.state
            .borrow()
            .log
            .iter()
            .enumerate()
            .skip(after + 1)
            .find(|(_, a)| matches!(**a, Access::Read { addr: r, .. } if r == addr))
            .map(|(i, _)| i)
    }

    /// Index of the marker `label`
    pub fn marker(&self, label: &'static str) -> Option<usize> {
        self.position(|a| *a == Access::Marker(label))
    }

    /// All values written to `addr`, in order
    pub fn writes_to(&self, addr: u32) -> Vec<u32, 64> {
        let mut out = Vec::new();
        for access in self.state.borrow().log.iter() {
            if let Access::Write { addr: w, value } = *access {
                if w == addr {
                    let _ = out.push(value);
                }
            }
        }
        out
    }

    /// Number of reads that fell inside `range`
    pub fn reads_in(&self, range: Range<u32>) -> usize {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|a| matches!(**a, Access::Read { addr, .. } if range.contains(&addr)))
            .count()
    }
}

impl RegisterBus for SimBus {
    fn read(&self, addr: u32) -> u32 {
        self.state.borrow_mut().read(addr)
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.state.get_mut().write(addr, value)
    }
}

impl RegisterBus for &SimBus {
    fn read(&self, addr: u32) -> u32 {
        self.state.borrow_mut().read(addr)
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.state.borrow_mut().write(addr, value)
    }
}
