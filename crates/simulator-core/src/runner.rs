//! Cycle driver and halt detection.

use crate::decoder::{DispatchTable, DispatchTableError, Instruction};
use crate::execute::execute;
use crate::machine::Machine;
use crate::peripherals::Peripheral;

/// Execution engine: the compiled dispatch table plus the cycle driver.
///
/// The engine is separate from [`Machine`] state so one engine can drive
/// any number of machines and state stays plain data.
#[derive(Debug, Clone)]
pub struct Simulator {
    table: DispatchTable,
}

impl Simulator {
    /// Builds the engine, compiling the instruction catalog.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchTableError`] when the catalog fails to compile;
    /// this is a construction-time failure, reported once at startup.
    pub fn new() -> Result<Self, DispatchTableError> {
        Ok(Self {
            table: DispatchTable::new()?,
        })
    }

    /// Borrows the compiled dispatch table.
    #[must_use]
    pub const fn dispatch_table(&self) -> &DispatchTable {
        &self.table
    }

    /// Runs one fetch/decode/execute cycle.
    ///
    /// The program counter is advanced past the fetched word before
    /// semantic execution, so branch and call executors see the address of
    /// the next instruction. A latched skip suppresses execution while
    /// still consuming the instruction's word or words. Undefined opcode
    /// words execute as no-ops.
    pub fn cycle(&self, machine: &mut Machine, peripheral: &mut dyn Peripheral) {
        peripheral.pre_tick(machine);

        let opcode = machine.prog_word(machine.pc());
        machine.set_pc(machine.pc().wrapping_add(1));
        let decoded = self.table.decode(opcode);

        if machine.skip {
            machine.skip = false;
            if decoded.is_some_and(|instruction| instruction.word_count() == 2) {
                machine.set_pc(machine.pc().wrapping_add(1));
            }
        } else if let Some(instruction) = decoded {
            execute(machine, peripheral, instruction);
        }

        peripheral.post_tick(machine);
    }

    /// Runs cycles until one of them leaves the program counter unchanged.
    ///
    /// The idiomatic halt on this architecture is a relative jump to
    /// itself, which pins the program counter.
    pub fn run_until_halt(&self, machine: &mut Machine, peripheral: &mut dyn Peripheral) {
        loop {
            let last = machine.pc();
            self.cycle(machine, peripheral);
            if machine.pc() == last {
                break;
            }
        }
    }

    /// Decodes one opcode word without executing it.
    #[must_use]
    pub fn decode(&self, word: u16) -> Option<Instruction> {
        self.table.decode(word)
    }
}
