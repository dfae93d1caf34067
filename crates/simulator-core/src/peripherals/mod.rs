//! Peripheral observer contract and shipped peripherals.

use crate::machine::Machine;

pub mod usi;
pub use usi::UsiShifter;

/// Synchronous observer around memory access and the instruction cycle.
///
/// All hooks default to no-ops so a peripheral implements only what it
/// needs. Addresses passed to the access hooks are data-space addresses
/// inside the I/O register window (`0x20..=0x5F`). Hooks run in the same
/// call stack as the cycle driver and must not suspend; the pre hooks run
/// strictly before the backing store is touched and the post hooks
/// strictly after.
#[allow(unused_variables)]
pub trait Peripheral {
    /// Called before an I/O-range data read.
    fn pre_get(&mut self, machine: &mut Machine, addr: u16) {}

    /// Called after an I/O-range data read.
    fn post_get(&mut self, machine: &mut Machine, addr: u16) {}

    /// Called before an I/O-range data write.
    fn pre_set(&mut self, machine: &mut Machine, addr: u16) {}

    /// Called after an I/O-range data write.
    fn post_set(&mut self, machine: &mut Machine, addr: u16) {}

    /// Called at the start of every cycle, before fetch.
    fn pre_tick(&mut self, machine: &mut Machine) {}

    /// Called at the end of every cycle, after execution.
    fn post_tick(&mut self, machine: &mut Machine) {}

    /// Called when a BREAK instruction retires.
    fn debug_break(&mut self, machine: &mut Machine) {}
}

/// Observer that ignores every hook; the default for plain runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPeripheral;

impl Peripheral for NullPeripheral {}
