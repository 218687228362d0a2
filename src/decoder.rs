use crate::encoder::WORD_BITS;
use crate::opcodes::{self, OPCODE_BITS};
use crate::parser::Instruction;

/// Decode one instruction word. Padding bits are ignored; unknown opcodes yield `None`.
pub fn decode(word: u32) -> Option<Instruction> {
    let bits = (word >> (WORD_BITS - OPCODE_BITS)) as u8;
    let desc = opcodes::by_bits(bits)?;
    let mut shift = WORD_BITS - OPCODE_BITS;
    let operands = desc
        .fields
        .iter()
        .map(|f| {
            shift -= f.width();
            f.extend(word >> shift)
        })
        .collect();
    let mut instr = Instruction {
        op: desc.op,
        operands,
        raw_text: String::new(),
    };
    instr.raw_text = instr.to_string();
    Some(instr)
}

