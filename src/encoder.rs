use std::fmt;
use std::ops::Range;

use bitvec::prelude::*;

use crate::opcodes::OPCODE_BITS;
use crate::parser::Instruction;

pub const WORD_BITS: usize = 32;

/// Low `width` bits of `value`'s two's-complement form.
pub fn truncate(value: i64, width: usize) -> u32 {
    let mask = if width >= 32 { u32::MAX } else { (1u32 << width) - 1 };
    (value as u32) & mask
}

/// A 32-bit instruction word together with the bit groups it was built from
/// (opcode, one group per operand field, then padding if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    bits: BitArray<[u32; 1], Msb0>,
    groups: Vec<Range<usize>>,
}

impl Encoded {
    fn new() -> Self {
        Self {
            bits: BitArray::new([0]),
            groups: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.groups.last().map_or(0, |g| g.end)
    }

    fn push(&mut self, value: u32, width: usize) {
        let start = self.len();
        for i in 0..width {
            let bit = (value >> (width - 1 - i)) & 1 == 1;
            self.bits.set(start + i, bit);
        }
        self.groups.push(start..start + width);
    }

    pub fn word(&self) -> u32 {
        self.bits.data[0]
    }

    pub fn bit_len(&self) -> usize {
        self.len()
    }

    pub fn groups(&self) -> impl Iterator<Item = &BitSlice<u32, Msb0>> + '_ {
        self.groups.iter().map(|r| &self.bits[r.clone()])
    }
}

impl fmt::Display for Encoded {
    /// `"010000" & "00001" & ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, g) in self.groups().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            f.write_str("\"")?;
            for b in g.iter().by_vals() {
                f.write_str(if b { "1" } else { "0" })?;
            }
            f.write_str("\"")?;
        }
        Ok(())
    }
}

pub fn encode(instr: &Instruction) -> Encoded {
    let desc = instr.desc();
    let mut out = Encoded::new();
    out.push(desc.bits as u32, OPCODE_BITS);
    for (value, field) in instr.operands.iter().zip(desc.fields) {
        out.push(truncate(*value, field.width()), field.width());
    }
    if out.len() < WORD_BITS {
        let pad = WORD_BITS - out.len();
        out.push(0, pad);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_low_bits() {
        assert_eq!(truncate(-1, 5), 0b11111);
        assert_eq!(truncate(-2, 16), 0xFFFE);
        assert_eq!(truncate(0x12345, 16), 0x2345);
        assert_eq!(truncate(-1, 32), u32::MAX);
    }
}
