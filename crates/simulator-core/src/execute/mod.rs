//! Instruction executors.
//!
//! One match arm per decoded instruction form, mutating architectural
//! state per the AVRe semantics. The program counter has already been
//! advanced past the instruction word when an executor runs, so relative
//! branches and calls operate on the address of the next instruction.

mod flags;

use flags::{add_flags, adiw_flags, logic_flags, sbiw_flags, shift_flags, sub_flags};

use crate::decoder::Instruction;
use crate::machine::Machine;
use crate::memory::IO_BASE;
use crate::peripherals::Peripheral;

fn reg(machine: &Machine, index: u8) -> u8 {
    machine.r[usize::from(index)]
}

fn set_reg(machine: &mut Machine, index: u8, value: u8) {
    machine.r[usize::from(index)] = value;
}

const fn io_data_addr(a: u8) -> u16 {
    a as u16 + IO_BASE
}

fn relative_jump(machine: &mut Machine, offset: i16) {
    machine.set_pc(machine.pc().wrapping_add(offset as u16));
}

/// Applies one decoded instruction to the machine.
#[allow(clippy::too_many_lines)]
pub fn execute(machine: &mut Machine, peripheral: &mut dyn Peripheral, instruction: Instruction) {
    match instruction {
        Instruction::Nop | Instruction::Sleep | Instruction::Wdr => {}

        Instruction::Add { d, r } => {
            let (a, b) = (reg(machine, d), reg(machine, r));
            let result = a.wrapping_add(b);
            add_flags(&mut machine.sreg, a, b, result);
            set_reg(machine, d, result);
        }
        Instruction::Adc { d, r } => {
            let (a, b) = (reg(machine, d), reg(machine, r));
            let result = a.wrapping_add(b).wrapping_add(u8::from(machine.sreg.c));
            add_flags(&mut machine.sreg, a, b, result);
            set_reg(machine, d, result);
        }
        Instruction::Sub { d, r } => {
            let (a, b) = (reg(machine, d), reg(machine, r));
            let result = a.wrapping_sub(b);
            sub_flags(&mut machine.sreg, a, b, result, false);
            set_reg(machine, d, result);
        }
        Instruction::Sbc { d, r } => {
            let (a, b) = (reg(machine, d), reg(machine, r));
            let result = a.wrapping_sub(b).wrapping_sub(u8::from(machine.sreg.c));
            sub_flags(&mut machine.sreg, a, b, result, true);
            set_reg(machine, d, result);
        }
        Instruction::Subi { d, k } => {
            let a = reg(machine, d);
            let result = a.wrapping_sub(k);
            sub_flags(&mut machine.sreg, a, k, result, false);
            set_reg(machine, d, result);
        }
        Instruction::Sbci { d, k } => {
            let a = reg(machine, d);
            let result = a.wrapping_sub(k).wrapping_sub(u8::from(machine.sreg.c));
            sub_flags(&mut machine.sreg, a, k, result, true);
            set_reg(machine, d, result);
        }
        Instruction::Cp { d, r } => {
            let (a, b) = (reg(machine, d), reg(machine, r));
            sub_flags(&mut machine.sreg, a, b, a.wrapping_sub(b), false);
        }
        Instruction::Cpc { d, r } => {
            let (a, b) = (reg(machine, d), reg(machine, r));
            let result = a.wrapping_sub(b).wrapping_sub(u8::from(machine.sreg.c));
            sub_flags(&mut machine.sreg, a, b, result, true);
        }
        Instruction::Cpi { d, k } => {
            let a = reg(machine, d);
            sub_flags(&mut machine.sreg, a, k, a.wrapping_sub(k), false);
        }

        Instruction::And { d, r } => {
            let result = reg(machine, d) & reg(machine, r);
            logic_flags(&mut machine.sreg, result);
            set_reg(machine, d, result);
        }
        Instruction::Andi { d, k } => {
            let result = reg(machine, d) & k;
            logic_flags(&mut machine.sreg, result);
            set_reg(machine, d, result);
        }
        Instruction::Or { d, r } => {
            let result = reg(machine, d) | reg(machine, r);
            logic_flags(&mut machine.sreg, result);
            set_reg(machine, d, result);
        }
        Instruction::Ori { d, k } => {
            let result = reg(machine, d) | k;
            logic_flags(&mut machine.sreg, result);
            set_reg(machine, d, result);
        }
        Instruction::Eor { d, r } => {
            let result = reg(machine, d) ^ reg(machine, r);
            logic_flags(&mut machine.sreg, result);
            set_reg(machine, d, result);
        }
        Instruction::Com { d } => {
            let result = 0xFF - reg(machine, d);
            logic_flags(&mut machine.sreg, result);
            machine.sreg.c = true;
            set_reg(machine, d, result);
        }
        Instruction::Neg { d } => {
            let input = reg(machine, d);
            let result = 0u8.wrapping_sub(input);
            sub_flags(&mut machine.sreg, 0, input, result, false);
            set_reg(machine, d, result);
        }
        Instruction::Inc { d } => {
            let input = reg(machine, d);
            let result = input.wrapping_add(1);
            machine.sreg.v = input == 0x7F;
            machine.sreg.n = result & 0x80 != 0;
            machine.sreg.z = result == 0;
            machine.sreg.s = machine.sreg.n != machine.sreg.v;
            set_reg(machine, d, result);
        }
        Instruction::Dec { d } => {
            let input = reg(machine, d);
            let result = input.wrapping_sub(1);
            machine.sreg.v = input == 0x80;
            machine.sreg.n = result & 0x80 != 0;
            machine.sreg.z = result == 0;
            machine.sreg.s = machine.sreg.n != machine.sreg.v;
            set_reg(machine, d, result);
        }

        Instruction::Asr { d } => {
            let input = reg(machine, d);
            let result = input >> 1 | input & 0x80;
            shift_flags(&mut machine.sreg, input, result);
            set_reg(machine, d, result);
        }
        Instruction::Lsr { d } => {
            let input = reg(machine, d);
            let result = input >> 1;
            shift_flags(&mut machine.sreg, input, result);
            set_reg(machine, d, result);
        }
        Instruction::Ror { d } => {
            let input = reg(machine, d);
            let result = input >> 1 | if machine.sreg.c { 0x80 } else { 0 };
            shift_flags(&mut machine.sreg, input, result);
            set_reg(machine, d, result);
        }
        Instruction::Swap { d } => {
            let input = reg(machine, d);
            set_reg(machine, d, input << 4 | input >> 4);
        }

        Instruction::Mov { d, r } => {
            let value = reg(machine, r);
            set_reg(machine, d, value);
        }
        Instruction::Movw { d, r } => {
            let low = reg(machine, r);
            let high = reg(machine, r + 1);
            set_reg(machine, d, low);
            set_reg(machine, d + 1, high);
        }
        Instruction::Ldi { d, k } => set_reg(machine, d, k),

        Instruction::Adiw { d, k } => {
            let low = reg(machine, d);
            let high = reg(machine, d + 1);
            let input = u16::from(high) << 8 | u16::from(low);
            let result = input.wrapping_add(u16::from(k));
            adiw_flags(&mut machine.sreg, high, result);
            set_reg(machine, d, (result & 0xFF) as u8);
            set_reg(machine, d + 1, (result >> 8) as u8);
        }
        Instruction::Sbiw { d, k } => {
            let low = reg(machine, d);
            let high = reg(machine, d + 1);
            let input = u16::from(high) << 8 | u16::from(low);
            let result = input.wrapping_sub(u16::from(k));
            sbiw_flags(&mut machine.sreg, high, result);
            set_reg(machine, d, (result & 0xFF) as u8);
            set_reg(machine, d + 1, (result >> 8) as u8);
        }

        Instruction::Bset { s } => machine.sreg.set_flag(s, true),
        Instruction::Bclr { s } => machine.sreg.set_flag(s, false),
        Instruction::Bld { d, b } => {
            let input = reg(machine, d);
            let result = if machine.sreg.t {
                input | 1 << b
            } else {
                input & !(1 << b)
            };
            set_reg(machine, d, result);
        }
        Instruction::Bst { d, b } => {
            machine.sreg.t = reg(machine, d) & (1 << b) != 0;
        }

        Instruction::Brbs { s, k } => {
            if machine.sreg.flag(s) {
                relative_jump(machine, i16::from(k));
            }
        }
        Instruction::Brbc { s, k } => {
            if !machine.sreg.flag(s) {
                relative_jump(machine, i16::from(k));
            }
        }
        Instruction::Rjmp { k } => relative_jump(machine, k),
        Instruction::Rcall { k } => {
            machine.push16(machine.pc(), peripheral);
            relative_jump(machine, k);
        }
        Instruction::Ijmp => machine.set_pc(machine.z()),
        Instruction::Icall => {
            machine.push16(machine.pc(), peripheral);
            machine.set_pc(machine.z());
        }
        Instruction::Ret => {
            let target = machine.pop16(peripheral);
            machine.set_pc(target);
        }
        Instruction::Reti => {
            let target = machine.pop16(peripheral);
            machine.set_pc(target);
            machine.sreg.i = true;
        }

        Instruction::Cpse { d, r } => {
            if reg(machine, d) == reg(machine, r) {
                machine.skip = true;
            }
        }
        Instruction::Sbrc { r, b } => {
            if reg(machine, r) & (1 << b) == 0 {
                machine.skip = true;
            }
        }
        Instruction::Sbrs { r, b } => {
            if reg(machine, r) & (1 << b) != 0 {
                machine.skip = true;
            }
        }
        Instruction::Sbic { a, b } => {
            if machine.data_get(io_data_addr(a), peripheral) & (1 << b) == 0 {
                machine.skip = true;
            }
        }
        Instruction::Sbis { a, b } => {
            if machine.data_get(io_data_addr(a), peripheral) & (1 << b) != 0 {
                machine.skip = true;
            }
        }

        Instruction::Sbi { a, b } => {
            let addr = io_data_addr(a);
            let value = machine.data_get(addr, peripheral);
            machine.data_set(addr, value | 1 << b, peripheral);
        }
        Instruction::Cbi { a, b } => {
            let addr = io_data_addr(a);
            let value = machine.data_get(addr, peripheral);
            machine.data_set(addr, value & !(1 << b), peripheral);
        }

        Instruction::LdX { d } => {
            let value = machine.data_get(machine.x(), peripheral);
            set_reg(machine, d, value);
        }
        Instruction::LdXInc { d } => {
            let addr = machine.x();
            let value = machine.data_get(addr, peripheral);
            set_reg(machine, d, value);
            machine.set_x(addr.wrapping_add(1));
        }
        Instruction::LdXDec { d } => {
            let addr = machine.x().wrapping_sub(1);
            machine.set_x(addr);
            let value = machine.data_get(addr, peripheral);
            set_reg(machine, d, value);
        }
        Instruction::LdYInc { d } => {
            let addr = machine.y();
            let value = machine.data_get(addr, peripheral);
            set_reg(machine, d, value);
            machine.set_y(addr.wrapping_add(1));
        }
        Instruction::LdYDec { d } => {
            let addr = machine.y().wrapping_sub(1);
            machine.set_y(addr);
            let value = machine.data_get(addr, peripheral);
            set_reg(machine, d, value);
        }
        Instruction::LddY { d, q } => {
            let value = machine.data_get(machine.y().wrapping_add(u16::from(q)), peripheral);
            set_reg(machine, d, value);
        }
        Instruction::LdZInc { d } => {
            let addr = machine.z();
            let value = machine.data_get(addr, peripheral);
            set_reg(machine, d, value);
            machine.set_z(addr.wrapping_add(1));
        }
        Instruction::LdZDec { d } => {
            let addr = machine.z().wrapping_sub(1);
            machine.set_z(addr);
            let value = machine.data_get(addr, peripheral);
            set_reg(machine, d, value);
        }
        Instruction::LddZ { d, q } => {
            let value = machine.data_get(machine.z().wrapping_add(u16::from(q)), peripheral);
            set_reg(machine, d, value);
        }

        Instruction::StX { r } => {
            let value = reg(machine, r);
            machine.data_set(machine.x(), value, peripheral);
        }
        Instruction::StXInc { r } => {
            let addr = machine.x();
            let value = reg(machine, r);
            machine.data_set(addr, value, peripheral);
            machine.set_x(addr.wrapping_add(1));
        }
        Instruction::StXDec { r } => {
            let addr = machine.x().wrapping_sub(1);
            machine.set_x(addr);
            let value = reg(machine, r);
            machine.data_set(addr, value, peripheral);
        }
        Instruction::StYInc { r } => {
            let addr = machine.y();
            let value = reg(machine, r);
            machine.data_set(addr, value, peripheral);
            machine.set_y(addr.wrapping_add(1));
        }
        Instruction::StYDec { r } => {
            let addr = machine.y().wrapping_sub(1);
            machine.set_y(addr);
            let value = reg(machine, r);
            machine.data_set(addr, value, peripheral);
        }
        Instruction::StdY { r, q } => {
            let value = reg(machine, r);
            machine.data_set(machine.y().wrapping_add(u16::from(q)), value, peripheral);
        }
        Instruction::StZInc { r } => {
            let addr = machine.z();
            let value = reg(machine, r);
            machine.data_set(addr, value, peripheral);
            machine.set_z(addr.wrapping_add(1));
        }
        Instruction::StZDec { r } => {
            let addr = machine.z().wrapping_sub(1);
            machine.set_z(addr);
            let value = reg(machine, r);
            machine.data_set(addr, value, peripheral);
        }
        Instruction::StdZ { r, q } => {
            let value = reg(machine, r);
            machine.data_set(machine.z().wrapping_add(u16::from(q)), value, peripheral);
        }

        Instruction::Lds { d } => {
            let addr = machine.prog_word(machine.pc());
            machine.set_pc(machine.pc().wrapping_add(1));
            let value = machine.data_get(addr, peripheral);
            set_reg(machine, d, value);
        }
        Instruction::Sts { r } => {
            let addr = machine.prog_word(machine.pc());
            machine.set_pc(machine.pc().wrapping_add(1));
            let value = reg(machine, r);
            machine.data_set(addr, value, peripheral);
        }

        Instruction::Push { r } => {
            let value = reg(machine, r);
            machine.push8(value, peripheral);
        }
        Instruction::Pop { d } => {
            let value = machine.pop8(peripheral);
            set_reg(machine, d, value);
        }

        Instruction::In { d, a } => {
            let value = machine.data_get(io_data_addr(a), peripheral);
            set_reg(machine, d, value);
        }
        Instruction::Out { a, r } => {
            let value = reg(machine, r);
            machine.data_set(io_data_addr(a), value, peripheral);
        }

        Instruction::Lpm => {
            let value = machine.prog_byte(machine.z());
            set_reg(machine, 0, value);
        }
        Instruction::LpmZ { d } => {
            let value = machine.prog_byte(machine.z());
            set_reg(machine, d, value);
        }
        Instruction::LpmZInc { d } => {
            let addr = machine.z();
            let value = machine.prog_byte(addr);
            set_reg(machine, d, value);
            machine.set_z(addr.wrapping_add(1));
        }

        Instruction::Break => peripheral.debug_break(machine),
    }
}
