use crate::cpu::Cpu;
use crate::encoder::encode;
use crate::memory::SparseMemory;
use crate::parser::Instruction;

/// Encode-mode listing: per instruction, the source as a `--` comment followed by
/// `<index> => "<bits>" & ...,`.
pub fn encode_listing(program: &[Instruction]) -> Vec<String> {
    program
        .iter()
        .enumerate()
        .flat_map(|(i, instr)| {
            [
                format!("\t-- {}", instr.raw_text),
                format!("\t{} => {},", i, encode(instr)),
            ]
        })
        .collect()
}

/// `R<index> = 0x<hex>` for every non-zero register.
pub fn register_dump(cpu: &Cpu) -> Vec<String> {
    cpu.nonzero_registers()
        .map(|(i, v)| format!("R{} = {:#x}", i, v as u32))
        .collect()
}

/// `0x<addr> = 0x<byte>` for every written byte, lowest address first.
pub fn memory_dump(mem: &SparseMemory) -> Vec<String> {
    mem.iter()
        .map(|(addr, b)| format!("{:#x} = {:#x}", addr, b))
        .collect()
}
