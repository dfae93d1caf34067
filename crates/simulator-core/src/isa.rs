//! Declarative instruction catalog for the AVRe core class.
//!
//! Each entry pairs a mnemonic with its 16-bit encoding pattern. Pattern
//! characters `0` and `1` are fixed bits; letters name operand fields, with
//! repeated occurrences concatenated MSB-first. Underscores are nibble
//! separators and carry no meaning.
//!
//! Any opcode word not matched by an entry is undefined on this core and
//! executes as a no-op.

/// Supported instruction forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Mnemonic {
    Adc,
    Add,
    Adiw,
    And,
    Andi,
    Asr,
    Bclr,
    Bld,
    Brbc,
    Brbs,
    Break,
    Bset,
    Bst,
    Cbi,
    Com,
    Cp,
    Cpc,
    Cpi,
    Cpse,
    Dec,
    Eor,
    Icall,
    Ijmp,
    In,
    Inc,
    LdX,
    LdXDec,
    LdXInc,
    LdYDec,
    LdYInc,
    LdZDec,
    LdZInc,
    LddY,
    LddZ,
    Ldi,
    Lds,
    Lpm,
    LpmZ,
    LpmZInc,
    Lsr,
    Mov,
    Movw,
    Neg,
    Nop,
    Or,
    Ori,
    Out,
    Pop,
    Push,
    Rcall,
    Ret,
    Reti,
    Rjmp,
    Ror,
    Sbc,
    Sbci,
    Sbi,
    Sbic,
    Sbis,
    Sbiw,
    Sbrc,
    Sbrs,
    Sleep,
    StX,
    StXDec,
    StXInc,
    StYDec,
    StYInc,
    StZDec,
    StZInc,
    StdY,
    StdZ,
    Sts,
    Sub,
    Subi,
    Swap,
    Wdr,
}

impl Mnemonic {
    /// Returns `true` for forms whose operand occupies the next FLASH word.
    #[must_use]
    pub const fn is_two_word(self) -> bool {
        matches!(self, Self::Lds | Self::Sts)
    }
}

/// One catalog entry: a mnemonic and its encoding pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpSpec {
    /// Instruction form.
    pub mnemonic: Mnemonic,
    /// 16-bit encoding pattern over `{0, 1, letter}` with `_` separators.
    pub pattern: &'static str,
}

const fn spec(mnemonic: Mnemonic, pattern: &'static str) -> OpSpec {
    OpSpec { mnemonic, pattern }
}

/// Single source-of-truth encoding table.
///
/// Field letters: `d` destination register, `r` source register, `K`
/// immediate constant, `k` signed program-counter offset or data address,
/// `s` status-flag index, `b` bit index, `A` I/O address, `q` displacement.
pub const OPCODE_PATTERN_TABLE: &[OpSpec] = &[
    spec(Mnemonic::Nop, "0000_0000_0000_0000"),
    spec(Mnemonic::Movw, "0000_0001_dddd_rrrr"),
    spec(Mnemonic::Cpc, "0000_01rd_dddd_rrrr"),
    spec(Mnemonic::Sbc, "0000_10rd_dddd_rrrr"),
    spec(Mnemonic::Add, "0000_11rd_dddd_rrrr"),
    spec(Mnemonic::Cpse, "0001_00rd_dddd_rrrr"),
    spec(Mnemonic::Cp, "0001_01rd_dddd_rrrr"),
    spec(Mnemonic::Sub, "0001_10rd_dddd_rrrr"),
    spec(Mnemonic::Adc, "0001_11rd_dddd_rrrr"),
    spec(Mnemonic::And, "0010_00rd_dddd_rrrr"),
    spec(Mnemonic::Eor, "0010_01rd_dddd_rrrr"),
    spec(Mnemonic::Or, "0010_10rd_dddd_rrrr"),
    spec(Mnemonic::Mov, "0010_11rd_dddd_rrrr"),
    spec(Mnemonic::Cpi, "0011_KKKK_dddd_KKKK"),
    spec(Mnemonic::Sbci, "0100_KKKK_dddd_KKKK"),
    spec(Mnemonic::Subi, "0101_KKKK_dddd_KKKK"),
    spec(Mnemonic::Ori, "0110_KKKK_dddd_KKKK"),
    spec(Mnemonic::Andi, "0111_KKKK_dddd_KKKK"),
    spec(Mnemonic::LddZ, "10q0_qq0d_dddd_0qqq"),
    spec(Mnemonic::LddY, "10q0_qq0d_dddd_1qqq"),
    spec(Mnemonic::StdZ, "10q0_qq1r_rrrr_0qqq"),
    spec(Mnemonic::StdY, "10q0_qq1r_rrrr_1qqq"),
    spec(Mnemonic::Lds, "1001_000d_dddd_0000"),
    spec(Mnemonic::LdZInc, "1001_000d_dddd_0001"),
    spec(Mnemonic::LdZDec, "1001_000d_dddd_0010"),
    spec(Mnemonic::LpmZ, "1001_000d_dddd_0100"),
    spec(Mnemonic::LpmZInc, "1001_000d_dddd_0101"),
    spec(Mnemonic::LdYInc, "1001_000d_dddd_1001"),
    spec(Mnemonic::LdYDec, "1001_000d_dddd_1010"),
    spec(Mnemonic::LdX, "1001_000d_dddd_1100"),
    spec(Mnemonic::LdXInc, "1001_000d_dddd_1101"),
    spec(Mnemonic::LdXDec, "1001_000d_dddd_1110"),
    spec(Mnemonic::Pop, "1001_000d_dddd_1111"),
    spec(Mnemonic::Sts, "1001_001r_rrrr_0000"),
    spec(Mnemonic::StZInc, "1001_001r_rrrr_0001"),
    spec(Mnemonic::StZDec, "1001_001r_rrrr_0010"),
    spec(Mnemonic::StYInc, "1001_001r_rrrr_1001"),
    spec(Mnemonic::StYDec, "1001_001r_rrrr_1010"),
    spec(Mnemonic::StX, "1001_001r_rrrr_1100"),
    spec(Mnemonic::StXInc, "1001_001r_rrrr_1101"),
    spec(Mnemonic::StXDec, "1001_001r_rrrr_1110"),
    spec(Mnemonic::Push, "1001_001r_rrrr_1111"),
    spec(Mnemonic::Com, "1001_010d_dddd_0000"),
    spec(Mnemonic::Neg, "1001_010d_dddd_0001"),
    spec(Mnemonic::Swap, "1001_010d_dddd_0010"),
    spec(Mnemonic::Inc, "1001_010d_dddd_0011"),
    spec(Mnemonic::Asr, "1001_010d_dddd_0101"),
    spec(Mnemonic::Lsr, "1001_010d_dddd_0110"),
    spec(Mnemonic::Ror, "1001_010d_dddd_0111"),
    spec(Mnemonic::Bset, "1001_0100_0sss_1000"),
    spec(Mnemonic::Bclr, "1001_0100_1sss_1000"),
    spec(Mnemonic::Ijmp, "1001_0100_0000_1001"),
    spec(Mnemonic::Dec, "1001_010d_dddd_1010"),
    spec(Mnemonic::Ret, "1001_0101_0000_1000"),
    spec(Mnemonic::Icall, "1001_0101_0000_1001"),
    spec(Mnemonic::Reti, "1001_0101_0001_1000"),
    spec(Mnemonic::Sleep, "1001_0101_1000_1000"),
    spec(Mnemonic::Break, "1001_0101_1001_1000"),
    spec(Mnemonic::Wdr, "1001_0101_1010_1000"),
    spec(Mnemonic::Lpm, "1001_0101_1100_1000"),
    spec(Mnemonic::Adiw, "1001_0110_KKdd_KKKK"),
    spec(Mnemonic::Sbiw, "1001_0111_KKdd_KKKK"),
    spec(Mnemonic::Cbi, "1001_1000_AAAA_Abbb"),
    spec(Mnemonic::Sbic, "1001_1001_AAAA_Abbb"),
    spec(Mnemonic::Sbi, "1001_1010_AAAA_Abbb"),
    spec(Mnemonic::Sbis, "1001_1011_AAAA_Abbb"),
    spec(Mnemonic::In, "1011_0AAd_dddd_AAAA"),
    spec(Mnemonic::Out, "1011_1AAr_rrrr_AAAA"),
    spec(Mnemonic::Rjmp, "1100_kkkk_kkkk_kkkk"),
    spec(Mnemonic::Rcall, "1101_kkkk_kkkk_kkkk"),
    spec(Mnemonic::Ldi, "1110_KKKK_dddd_KKKK"),
    spec(Mnemonic::Brbs, "1111_00kk_kkkk_ksss"),
    spec(Mnemonic::Brbc, "1111_01kk_kkkk_ksss"),
    spec(Mnemonic::Bld, "1111_100d_dddd_0bbb"),
    spec(Mnemonic::Bst, "1111_101d_dddd_0bbb"),
    spec(Mnemonic::Sbrc, "1111_110r_rrrr_0bbb"),
    spec(Mnemonic::Sbrs, "1111_111r_rrrr_0bbb"),
];
