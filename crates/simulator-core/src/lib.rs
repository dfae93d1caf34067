//! Instruction-set simulator core for AVRe-class 8-bit microcontrollers,
//! configured for the ATtiny85 profile.
//!
//! The crate models the architectural state of the device (program
//! counter, general registers, status flags, I/O registers, SRAM, EEPROM,
//! stack), loads a raw program-memory image, and executes fetched
//! instructions until the program reaches a quiescent halt (a jump to
//! itself).
//!
//! ## Architecture
//!
//! - [`Machine`] — architectural state and the unified data-memory overlay
//! - [`isa`] — declarative instruction catalog (mnemonic + bit pattern)
//! - [`DispatchTable`] — longest-specific-match decoder built at startup
//! - [`execute()`] — one executor per instruction form
//! - [`Simulator`] — fetch/decode/execute cycle driver and halt detector
//! - [`Peripheral`] — synchronous observer hooks around memory access and
//!   each cycle, with [`UsiShifter`] as the shipped serial-output peripheral

/// Platform memory constants and the data-space segment map.
pub mod memory;
pub use memory::{
    decode_data_segment, wrap_data_address, DataSegment, DATA_MEM_SIZE, EEPROM_SIZE, FLASH_SIZE,
    GP_REGISTERS, IO_BASE, IO_REGISTERS, PC_MASK, PROG_MEM_WORDS, SPH_ADDR, SPL_ADDR, SP_MASK,
    SP_MIN, SRAM_BASE, SRAM_SIZE, SREG_ADDR,
};

/// Status register model.
pub mod sreg;
pub use sreg::{StatusFlag, StatusRegister};

/// Declarative instruction catalog.
pub mod isa;
pub use isa::{Mnemonic, OpSpec, OPCODE_PATTERN_TABLE};

/// Opcode dispatch built from the catalog.
pub mod decoder;
pub use decoder::{DispatchTable, DispatchTableError, Instruction};

/// Instruction executors.
pub mod execute;
pub use execute::execute;

/// Architectural machine state.
pub mod machine;
pub use machine::{LoadError, Machine, MachineConfig};

/// Cycle driver and halt detection.
pub mod runner;
pub use runner::Simulator;

/// Peripheral observer contract and shipped peripherals.
pub mod peripherals;
pub use peripherals::{NullPeripheral, Peripheral, UsiShifter};

#[cfg(test)]
use proptest as _;
