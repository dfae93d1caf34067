//! Architectural machine state and the unified data-memory model.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::memory::{
    decode_data_segment, wrap_data_address, DataSegment, DATA_MEM_SIZE, EEPROM_SIZE, GP_REGISTERS,
    IO_BASE, IO_REGISTERS, PC_MASK, PROG_MEM_WORDS, SPH_ADDR, SPL_ADDR, SP_MASK, SRAM_BASE,
    SRAM_SIZE, SREG_ADDR,
};
use crate::peripherals::Peripheral;
use crate::sreg::StatusRegister;

/// Low byte of the X pointer pair.
pub const REG_XL: usize = 26;
/// High byte of the X pointer pair.
pub const REG_XH: usize = 27;
/// Low byte of the Y pointer pair.
pub const REG_YL: usize = 28;
/// High byte of the Y pointer pair.
pub const REG_YH: usize = 29;
/// Low byte of the Z pointer pair.
pub const REG_ZL: usize = 30;
/// High byte of the Z pointer pair.
pub const REG_ZH: usize = 31;

/// Program image ingestion failures.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be opened or read.
    #[error("failed to read program image: {0}")]
    Io(#[from] io::Error),
}

/// Runtime options for a machine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineConfig {
    /// When set, pushes that move SP below this mark emit a one-line
    /// warning on stderr. Off by default.
    pub stack_low_water: Option<u16>,
}

/// Complete architectural state of one simulated device.
///
/// Created zero-initialized; a program image is loaded into FLASH and the
/// cycle driver mutates the rest in place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Machine {
    /// Status flags, packed/unpacked through data address 0x5F.
    pub sreg: StatusRegister,
    /// General-purpose register file `R0..R31`.
    pub r: [u8; GP_REGISTERS],
    /// Latched skip request set by CPSE/SBRC/SBRS/SBIC/SBIS.
    pub skip: bool,
    pc: u16,
    io: Box<[u8]>,
    sram: Box<[u8]>,
    flash: Box<[u16]>,
    eeprom: Box<[u8]>,
    config: MachineConfig,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates a zero-initialized machine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Creates a zero-initialized machine with explicit options.
    #[must_use]
    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            sreg: StatusRegister::default(),
            r: [0; GP_REGISTERS],
            skip: false,
            pc: 0,
            io: vec![0; IO_REGISTERS].into_boxed_slice(),
            sram: vec![0; SRAM_SIZE].into_boxed_slice(),
            flash: vec![0; PROG_MEM_WORDS].into_boxed_slice(),
            eeprom: vec![0; EEPROM_SIZE].into_boxed_slice(),
            config,
        }
    }

    /// Current program counter (word-addressed).
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the program counter, masked to the FLASH word range.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value & PC_MASK;
    }

    /// Current stack pointer, assembled from its I/O register pair.
    #[must_use]
    pub fn sp(&self) -> u16 {
        let low = self.io[(SPL_ADDR - IO_BASE) as usize];
        let high = self.io[(SPH_ADDR - IO_BASE) as usize];
        (u16::from(high) << 8 | u16::from(low)) & SP_MASK
    }

    /// Writes the stack pointer into its I/O register pair.
    pub fn set_sp(&mut self, value: u16) {
        let masked = value & SP_MASK;
        self.io[(SPL_ADDR - IO_BASE) as usize] = (masked & 0xFF) as u8;
        self.io[(SPH_ADDR - IO_BASE) as usize] = (masked >> 8) as u8;
    }

    /// X pointer pair (`R27:R26`).
    #[must_use]
    pub const fn x(&self) -> u16 {
        (self.r[REG_XH] as u16) << 8 | self.r[REG_XL] as u16
    }

    /// Writes the X pointer pair.
    pub fn set_x(&mut self, value: u16) {
        self.r[REG_XL] = (value & 0xFF) as u8;
        self.r[REG_XH] = (value >> 8) as u8;
    }

    /// Y pointer pair (`R29:R28`).
    #[must_use]
    pub const fn y(&self) -> u16 {
        (self.r[REG_YH] as u16) << 8 | self.r[REG_YL] as u16
    }

    /// Writes the Y pointer pair.
    pub fn set_y(&mut self, value: u16) {
        self.r[REG_YL] = (value & 0xFF) as u8;
        self.r[REG_YH] = (value >> 8) as u8;
    }

    /// Z pointer pair (`R31:R30`).
    #[must_use]
    pub const fn z(&self) -> u16 {
        (self.r[REG_ZH] as u16) << 8 | self.r[REG_ZL] as u16
    }

    /// Writes the Z pointer pair.
    pub fn set_z(&mut self, value: u16) {
        self.r[REG_ZL] = (value & 0xFF) as u8;
        self.r[REG_ZH] = (value >> 8) as u8;
    }

    /// Reads one program-memory word; the index wraps modulo FLASH size.
    #[must_use]
    pub fn prog_word(&self, addr: u16) -> u16 {
        self.flash[usize::from(addr) % PROG_MEM_WORDS]
    }

    /// Writes one program-memory word; the index wraps modulo FLASH size.
    pub fn set_prog_word(&mut self, addr: u16, value: u16) {
        self.flash[usize::from(addr) % PROG_MEM_WORDS] = value;
    }

    /// Reads program memory as bytes, little-endian within each word.
    #[must_use]
    pub fn prog_byte(&self, addr: u16) -> u8 {
        let word = self.prog_word(addr >> 1);
        (word >> (8 * (addr & 1)) & 0xFF) as u8
    }

    /// Reads one I/O register by its I/O-space index.
    #[must_use]
    pub fn io_reg(&self, index: u8) -> u8 {
        self.io[usize::from(index) % IO_REGISTERS]
    }

    /// Writes one I/O register by its I/O-space index.
    pub fn set_io_reg(&mut self, index: u8, value: u8) {
        self.io[usize::from(index) % IO_REGISTERS] = value;
    }

    /// Reads one EEPROM byte; the index wraps modulo EEPROM size.
    #[must_use]
    pub fn eeprom_byte(&self, addr: u16) -> u8 {
        self.eeprom[usize::from(addr) % EEPROM_SIZE]
    }

    /// Writes one EEPROM byte; the index wraps modulo EEPROM size.
    pub fn set_eeprom_byte(&mut self, addr: u16, value: u8) {
        self.eeprom[usize::from(addr) % EEPROM_SIZE] = value;
    }

    /// Reads one byte through the unified data-memory overlay.
    ///
    /// The address wraps modulo the data-space size. A read of the SREG
    /// image returns the packed live flags. The peripheral observer is
    /// notified before and after I/O-register reads.
    pub fn data_get(&mut self, addr: u16, peripheral: &mut dyn Peripheral) -> u8 {
        let wrapped = wrap_data_address(addr);
        match decode_data_segment(wrapped) {
            DataSegment::Gpr => self.r[usize::from(wrapped)],
            DataSegment::Io => {
                if wrapped == SREG_ADDR {
                    return self.sreg.pack();
                }
                peripheral.pre_get(self, wrapped);
                let value = self.io[usize::from(wrapped - IO_BASE)];
                peripheral.post_get(self, wrapped);
                value
            }
            DataSegment::Sram => self.sram[usize::from(wrapped - SRAM_BASE)],
        }
    }

    /// Writes one byte through the unified data-memory overlay.
    ///
    /// A write to the SREG image unpacks into the live flags in addition
    /// to updating the raw register byte. The peripheral observer is
    /// notified before and after I/O-register writes.
    pub fn data_set(&mut self, addr: u16, value: u8, peripheral: &mut dyn Peripheral) {
        let wrapped = wrap_data_address(addr);
        match decode_data_segment(wrapped) {
            DataSegment::Gpr => self.r[usize::from(wrapped)] = value,
            DataSegment::Io => {
                if wrapped == SREG_ADDR {
                    self.sreg.unpack(value);
                }
                peripheral.pre_set(self, wrapped);
                self.io[usize::from(wrapped - IO_BASE)] = value;
                peripheral.post_set(self, wrapped);
            }
            DataSegment::Sram => self.sram[usize::from(wrapped - SRAM_BASE)] = value,
        }
    }

    /// Pushes one byte; the stack grows downward.
    pub fn push8(&mut self, value: u8, peripheral: &mut dyn Peripheral) {
        self.warn_on_low_stack();
        self.data_set(self.sp(), value, peripheral);
        self.set_sp(self.sp().wrapping_sub(1));
    }

    /// Pops one byte.
    pub fn pop8(&mut self, peripheral: &mut dyn Peripheral) -> u8 {
        self.set_sp(self.sp().wrapping_add(1));
        self.data_get(self.sp(), peripheral)
    }

    /// Pushes a 16-bit value: low byte at SP, high byte at SP-1.
    ///
    /// The resulting in-memory order (high byte at the lower address) is
    /// what compiled code expects for return addresses.
    pub fn push16(&mut self, value: u16, peripheral: &mut dyn Peripheral) {
        self.warn_on_low_stack();
        self.data_set(self.sp(), (value & 0xFF) as u8, peripheral);
        self.data_set(self.sp().wrapping_sub(1), (value >> 8) as u8, peripheral);
        self.set_sp(self.sp().wrapping_sub(2));
    }

    /// Pops a 16-bit value pushed by [`Self::push16`].
    pub fn pop16(&mut self, peripheral: &mut dyn Peripheral) -> u16 {
        self.set_sp(self.sp().wrapping_add(2));
        let low = self.data_get(self.sp(), peripheral);
        let high = self.data_get(self.sp().wrapping_sub(1), peripheral);
        u16::from(high) << 8 | u16::from(low)
    }

    fn warn_on_low_stack(&self) {
        if let Some(mark) = self.config.stack_low_water {
            let sp = self.sp();
            if sp < mark {
                eprintln!(
                    "warning: stack pointer {sp:#06x} below low-water mark {mark:#06x} \
                     at pc {:#06x}",
                    self.pc
                );
            }
        }
    }

    /// Loads a raw program image into FLASH and resets PC and SKIP.
    ///
    /// Byte `2i` is the low byte of word `i`. Bytes beyond the FLASH size
    /// are ignored; a short image leaves the remainder of FLASH zeroed.
    pub fn load_image(&mut self, bytes: &[u8]) {
        for (index, pair) in bytes.chunks_exact(2).take(PROG_MEM_WORDS).enumerate() {
            self.flash[index] = u16::from(pair[0]) | u16::from(pair[1]) << 8;
        }
        self.pc = 0;
        self.skip = false;
    }

    /// Loads a program image from a file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the file cannot be read; the machine
    /// state is unchanged in that case.
    pub fn load_image_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let bytes = fs::read(path)?;
        self.load_image(&bytes);
        Ok(())
    }

    /// Formats the register file, pointer pairs, PC, and SP, one line per
    /// register.
    #[must_use]
    pub fn dump_registers(&self) -> String {
        let mut out = String::new();
        for (index, value) in self.r.iter().enumerate() {
            let _ = writeln!(out, "R{index:02} = {value:#04x}");
        }
        let _ = writeln!(out, "X   = {:#06x}", self.x());
        let _ = writeln!(out, "Y   = {:#06x}", self.y());
        let _ = writeln!(out, "Z   = {:#06x}", self.z());
        let _ = writeln!(out, "PC  = {:#06x}", self.pc);
        let _ = writeln!(out, "SP  = {:#06x}", self.sp());
        out
    }

    /// Formats the live stack bytes, from SP+1 up to the top of data
    /// memory, one line per byte.
    ///
    /// An SP outside the SRAM stack region (notably the zero-initialized
    /// machine before the program's prologue) has no live stack.
    #[must_use]
    pub fn dump_stack(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "stack (SP = {:#06x}):", self.sp());
        let first = usize::from(self.sp()) + 1;
        if first < usize::from(SRAM_BASE) || first >= DATA_MEM_SIZE {
            let _ = writeln!(out, "  empty");
            return out;
        }
        for addr in first..DATA_MEM_SIZE {
            let value = self.sram[addr - usize::from(SRAM_BASE)];
            let _ = writeln!(out, "  {addr:#06x} = {value:#04x}");
        }
        out
    }
}
