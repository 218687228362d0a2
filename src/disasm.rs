use crate::opcodes::Shape;
use crate::parser::Instruction;

/// Canonical assembly text, using the values the instruction's fields actually hold.
pub fn fmt_instruction(i: &Instruction) -> String {
    let mn = i.desc().mnemonic;
    match i.desc().shape {
        Shape::None => mn.to_string(),
        Shape::RegTriple => format!("{} R{},R{},R{}", mn, i.reg(0), i.reg(1), i.reg(2)),
        Shape::RegRegImm => format!("{} R{},R{},#{}", mn, i.reg(0), i.reg(1), i.imm(2)),
        Shape::Offset => format!("{} {}", mn, i.imm(0)),
        Shape::RegMem => format!("{} R{},[R{},R{}]", mn, i.reg(0), i.reg(1), i.reg(2)),
    }
}
