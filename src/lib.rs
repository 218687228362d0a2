pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod exec;
pub mod listing;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod parser;

pub use cpu::{Cpu, Flags};
pub use encoder::{encode, Encoded};
pub use machine::{Machine, MachineConfig, Snapshot, Trap};
pub use memory::{Bus, SparseMemory};
pub use parser::{parse_line, parse_program, AsmError, Instruction, LineError};
