//! Property tests: flag semantics against a reference model, and the
//! data-space and stack round-trip invariants.

use proptest::prelude::*;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

use std::sync::OnceLock;

use simulator_core::{
    execute, Instruction, Machine, NullPeripheral, Simulator, StatusRegister, DATA_MEM_SIZE,
    SRAM_BASE, SREG_ADDR,
};

/// The dispatch table is immutable once built; share one engine across
/// all generated cases.
fn simulator() -> &'static Simulator {
    static SIMULATOR: OnceLock<Simulator> = OnceLock::new();
    SIMULATOR.get_or_init(|| Simulator::new().expect("catalog compiles"))
}

/// Reference flags computed in 16-bit arithmetic, independent of the
/// executor's majority-form implementation.
struct RefFlags {
    c: bool,
    z: bool,
    n: bool,
    v: bool,
    s: bool,
    h: bool,
}

fn ref_add(a: u8, b: u8, carry_in: bool) -> (u8, RefFlags) {
    let wide = u16::from(a) + u16::from(b) + u16::from(carry_in);
    let result = (wide & 0xFF) as u8;
    let c = wide > 0xFF;
    let h = (a & 0x0F) + (b & 0x0F) + u8::from(carry_in) > 0x0F;
    let v = (a ^ result) & (b ^ result) & 0x80 != 0;
    let n = result & 0x80 != 0;
    let z = result == 0;
    (
        result,
        RefFlags {
            c,
            z,
            n,
            v,
            s: n != v,
            h,
        },
    )
}

fn ref_sub(a: u8, b: u8, carry_in: bool) -> (u8, RefFlags) {
    let wide = i16::from(a) - i16::from(b) - i16::from(carry_in);
    let result = (wide & 0xFF) as u8;
    let c = wide < 0;
    let h = i16::from(a & 0x0F) - i16::from(b & 0x0F) - i16::from(carry_in) < 0;
    let v = (a ^ b) & (a ^ result) & 0x80 != 0;
    let n = result & 0x80 != 0;
    let z = result == 0;
    (
        result,
        RefFlags {
            c,
            z,
            n,
            v,
            s: n != v,
            h,
        },
    )
}

fn assert_flags_match(sreg: StatusRegister, expected: &RefFlags) {
    assert_eq!(sreg.c, expected.c, "carry");
    assert_eq!(sreg.z, expected.z, "zero");
    assert_eq!(sreg.n, expected.n, "negative");
    assert_eq!(sreg.v, expected.v, "overflow");
    assert_eq!(sreg.s, expected.s, "sign");
    assert_eq!(sreg.h, expected.h, "half carry");
}

proptest! {
    #[test]
    fn add_and_adc_match_the_reference_model(a in any::<u8>(), b in any::<u8>(), carry in any::<bool>()) {
        let mut machine = Machine::new();
        machine.r[0] = a;
        machine.r[1] = b;
        machine.sreg.c = carry;
        execute(&mut machine, &mut NullPeripheral, Instruction::Adc { d: 0, r: 1 });
        let (result, expected) = ref_add(a, b, carry);
        prop_assert_eq!(machine.r[0], result);
        assert_flags_match(machine.sreg, &expected);

        let mut machine = Machine::new();
        machine.r[0] = a;
        machine.r[1] = b;
        machine.sreg.c = carry;
        execute(&mut machine, &mut NullPeripheral, Instruction::Add { d: 0, r: 1 });
        let (result, expected) = ref_add(a, b, false);
        prop_assert_eq!(machine.r[0], result);
        assert_flags_match(machine.sreg, &expected);
    }

    #[test]
    fn sub_cp_and_subi_match_the_reference_model(a in any::<u8>(), b in any::<u8>()) {
        let (result, expected) = ref_sub(a, b, false);

        let mut machine = Machine::new();
        machine.r[0] = a;
        machine.r[1] = b;
        execute(&mut machine, &mut NullPeripheral, Instruction::Sub { d: 0, r: 1 });
        prop_assert_eq!(machine.r[0], result);
        assert_flags_match(machine.sreg, &expected);

        // CP computes the same flags without writing back.
        let mut machine = Machine::new();
        machine.r[0] = a;
        machine.r[1] = b;
        execute(&mut machine, &mut NullPeripheral, Instruction::Cp { d: 0, r: 1 });
        prop_assert_eq!(machine.r[0], a);
        assert_flags_match(machine.sreg, &expected);

        let mut machine = Machine::new();
        machine.r[16] = a;
        execute(&mut machine, &mut NullPeripheral, Instruction::Subi { d: 16, k: b });
        prop_assert_eq!(machine.r[16], result);
        assert_flags_match(machine.sreg, &expected);
    }

    #[test]
    fn sbc_and_cpc_match_the_reference_model_with_zero_chaining(
        a in any::<u8>(),
        b in any::<u8>(),
        carry in any::<bool>(),
        zero in any::<bool>(),
    ) {
        let (result, expected) = ref_sub(a, b, carry);
        let chained_zero = expected.z && zero;

        let mut machine = Machine::new();
        machine.r[0] = a;
        machine.r[1] = b;
        machine.sreg.c = carry;
        machine.sreg.z = zero;
        execute(&mut machine, &mut NullPeripheral, Instruction::Sbc { d: 0, r: 1 });
        prop_assert_eq!(machine.r[0], result);
        prop_assert_eq!(machine.sreg.c, expected.c);
        prop_assert_eq!(machine.sreg.z, chained_zero);
        prop_assert_eq!(machine.sreg.v, expected.v);
        prop_assert_eq!(machine.sreg.n, expected.n);
        prop_assert_eq!(machine.sreg.h, expected.h);

        let mut machine = Machine::new();
        machine.r[0] = a;
        machine.r[1] = b;
        machine.sreg.c = carry;
        machine.sreg.z = zero;
        execute(&mut machine, &mut NullPeripheral, Instruction::Cpc { d: 0, r: 1 });
        prop_assert_eq!(machine.r[0], a);
        prop_assert_eq!(machine.sreg.z, chained_zero);
    }

    #[test]
    fn sreg_image_round_trips_through_the_overlay(value in any::<u8>()) {
        let mut machine = Machine::new();
        let mut null = NullPeripheral;
        machine.data_set(SREG_ADDR, value, &mut null);
        prop_assert_eq!(machine.data_get(SREG_ADDR, &mut null), value);
        prop_assert_eq!(machine.sreg.pack(), value);
    }

    #[test]
    fn data_overlay_write_read_round_trips(addr in any::<u16>(), value in any::<u8>()) {
        let mut machine = Machine::new();
        let mut null = NullPeripheral;
        machine.data_set(addr, value, &mut null);
        prop_assert_eq!(machine.data_get(addr, &mut null), value);
    }

    #[test]
    fn stack_round_trips_restore_sp(
        sp in (SRAM_BASE + 2)..(DATA_MEM_SIZE as u16),
        byte in any::<u8>(),
        word in any::<u16>(),
    ) {
        let mut machine = Machine::new();
        let mut null = NullPeripheral;
        machine.set_sp(sp);

        machine.push8(byte, &mut null);
        prop_assert_eq!(machine.pop8(&mut null), byte);
        prop_assert_eq!(machine.sp(), sp);

        machine.push16(word, &mut null);
        prop_assert_eq!(machine.pop16(&mut null), word);
        prop_assert_eq!(machine.sp(), sp);
    }

    #[test]
    fn decoding_arbitrary_words_never_panics(word in any::<u16>()) {
        if let Some(instruction) = simulator().decode(word) {
            prop_assert!((1..=2).contains(&instruction.word_count()));
        }
    }

    #[test]
    fn executing_arbitrary_words_keeps_pc_in_flash(words in prop::collection::vec(any::<u16>(), 1..32)) {
        let simulator = simulator();
        let mut machine = Machine::new();
        let mut null = NullPeripheral;
        for (index, word) in words.iter().enumerate() {
            machine.set_prog_word(index as u16, *word);
        }
        machine.set_sp(0x025F);
        for _ in 0..64 {
            simulator.cycle(&mut machine, &mut null);
            prop_assert!(usize::from(machine.pc()) < simulator_core::PROG_MEM_WORDS);
        }
    }
}
