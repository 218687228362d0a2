use serde::{Deserialize, Serialize};

use crate::encoder::truncate;
use crate::parser::AsmError;

/// Width of the opcode field at the top of every instruction word.
pub const OPCODE_BITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Nop,
    Add,
    Sub,
    And,
    Orri,
    Lsl,
    Asr,
    B,
    BEq,
    BLt,
    Ldr,
    Str,
}

/// Kind of a single operand slot: how it is spelled and how many bits it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `R<n>`, 5 bits, n in 0..=31
    Reg,
    /// `#<n>`, signed 16-bit immediate
    SImm16,
    /// `#<n>`, unsigned 16-bit shift count
    UImm16,
    /// bare signed instruction-count offset, 26 bits
    Offset26,
}

impl Field {
    pub const fn width(self) -> usize {
        match self {
            Field::Reg => 5,
            Field::SImm16 | Field::UImm16 => 16,
            Field::Offset26 => 26,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, Field::SImm16 | Field::Offset26)
    }

    /// Read back raw field bits as the value they stand for.
    pub fn extend(self, raw: u32) -> i64 {
        let w = self.width() as u32;
        let raw = truncate(raw as i64, self.width());
        if self.is_signed() {
            let s = 32 - w;
            (((raw << s) as i32) >> s) as i64
        } else {
            raw as i64
        }
    }

    /// The value an operand actually holds once squeezed into this field.
    pub fn reduce(self, value: i64) -> i64 {
        self.extend(truncate(value, self.width()))
    }
}

/// Operand grammar. Four shapes plus "none" cover the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// no operands
    None,
    /// `Rd,Ra,Rb`
    RegTriple,
    /// `Rd,Ra,#imm`
    RegRegImm,
    /// `offset`
    Offset,
    /// `Rd,[Ra,Rb]` or `Rd,[Ra+Rb]`
    RegMem,
}

#[derive(Debug, Clone, Copy)]
pub struct OpcodeDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub bits: u8,
    pub shape: Shape,
    pub fields: &'static [Field],
}

impl OpcodeDesc {
    pub fn field_widths(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields.iter().map(|f| f.width())
    }
}

const REG3: &[Field] = &[Field::Reg, Field::Reg, Field::Reg];

pub const TABLE: &[OpcodeDesc] = &[
    OpcodeDesc { op: Op::Nop, mnemonic: "NOP", bits: 0b000000, shape: Shape::None, fields: &[] },
    OpcodeDesc { op: Op::Add, mnemonic: "ADD", bits: 0b010000, shape: Shape::RegTriple, fields: REG3 },
    OpcodeDesc { op: Op::Sub, mnemonic: "SUB", bits: 0b010001, shape: Shape::RegTriple, fields: REG3 },
    OpcodeDesc { op: Op::And, mnemonic: "AND", bits: 0b010010, shape: Shape::RegTriple, fields: REG3 },
    OpcodeDesc {
        op: Op::Orri,
        mnemonic: "ORRI",
        bits: 0b110011,
        shape: Shape::RegRegImm,
        fields: &[Field::Reg, Field::Reg, Field::SImm16],
    },
    OpcodeDesc {
        op: Op::Lsl,
        mnemonic: "LSL",
        bits: 0b101101,
        shape: Shape::RegRegImm,
        fields: &[Field::Reg, Field::Reg, Field::UImm16],
    },
    OpcodeDesc {
        op: Op::Asr,
        mnemonic: "ASR",
        bits: 0b101111,
        shape: Shape::RegRegImm,
        fields: &[Field::Reg, Field::Reg, Field::UImm16],
    },
    OpcodeDesc { op: Op::B, mnemonic: "B", bits: 0b100000, shape: Shape::Offset, fields: &[Field::Offset26] },
    OpcodeDesc { op: Op::BEq, mnemonic: "B.EQ", bits: 0b100001, shape: Shape::Offset, fields: &[Field::Offset26] },
    OpcodeDesc { op: Op::BLt, mnemonic: "B.LT", bits: 0b100011, shape: Shape::Offset, fields: &[Field::Offset26] },
    OpcodeDesc { op: Op::Ldr, mnemonic: "LDR", bits: 0b011100, shape: Shape::RegMem, fields: REG3 },
    OpcodeDesc { op: Op::Str, mnemonic: "STR", bits: 0b011101, shape: Shape::RegMem, fields: REG3 },
];

/// Resolve a mnemonic, ignoring case.
pub fn lookup(mnemonic: &str) -> Result<&'static OpcodeDesc, AsmError> {
    TABLE
        .iter()
        .find(|d| d.mnemonic.eq_ignore_ascii_case(mnemonic))
        .ok_or_else(|| AsmError::UnknownMnemonic { mnemonic: mnemonic.to_string() })
}

pub fn by_bits(bits: u8) -> Option<&'static OpcodeDesc> {
    TABLE.iter().find(|d| d.bits == bits)
}

impl Op {
    /// TABLE rows are kept in declaration order of `Op`.
    pub fn desc(self) -> &'static OpcodeDesc {
        &TABLE[self as usize]
    }
}
