use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cpu::{Cpu, Flags};
use crate::exec::Executor;
use crate::memory::{Bus, SparseMemory};
use crate::parser::{parse_program, Instruction, LineError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Stop with [`Trap::StepLimit`] after this many instructions. `None` runs until halt.
    pub max_steps: Option<u64>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Trap {
    #[error("step limit of {steps} reached at pc {pc}")]
    StepLimit { steps: u64, pc: i64 },
}

/// One program run: CPU state, data memory and the instruction list it executes.
#[derive(Debug, Clone)]
pub struct Machine {
    pub cpu: Cpu,
    pub mem: SparseMemory,
    program: Vec<Instruction>,
    cfg: MachineConfig,
    steps: u64,
}

impl Machine {
    pub fn new(program: Vec<Instruction>, cfg: MachineConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            mem: SparseMemory::new(),
            program,
            cfg,
            steps: 0,
        }
    }

    pub fn from_source(source: &str, cfg: MachineConfig) -> Result<Self, LineError> {
        Ok(Self::new(parse_program(source)?, cfg))
    }

    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn read_register(&self, i: usize) -> i32 {
        self.cpu.read_register(i)
    }

    pub fn write_register(&mut self, i: usize, value: i64) {
        self.cpu.write_register(i, value);
    }

    pub fn load_word(&self, addr: u32) -> i32 {
        self.mem.read_u32(addr) as i32
    }

    pub fn store_word(&mut self, addr: u32, value: i32) {
        self.mem.write_u32(addr, value as u32);
    }

    pub fn update_flags(&mut self, result: i32, which: Flags, overflow: bool) {
        self.cpu.update_flags(result, which, overflow);
    }

    pub fn is_halted(&self) -> bool {
        usize::try_from(self.cpu.pc).map_or(true, |pc| pc >= self.program.len())
    }

    /// Execute the instruction at pc. Returns `false` if the machine was already halted.
    pub fn step<X: Executor>(&mut self, exec: &X) -> bool {
        let Ok(idx) = usize::try_from(self.cpu.pc) else {
            return false;
        };
        let Some(instr) = self.program.get(idx) else {
            return false;
        };
        trace!(pc = self.cpu.pc, op = ?instr.op, "{}", instr.raw_text);
        self.cpu.pc += 1;
        exec.exec(&mut self.cpu, &mut self.mem, instr);
        self.steps += 1;
        true
    }

    /// Run until pc leaves the program, or the configured step limit is hit.
    pub fn run<X: Executor>(&mut self, exec: &X) -> Result<u64, Trap> {
        while !self.is_halted() {
            if let Some(max) = self.cfg.max_steps {
                if self.steps >= max {
                    return Err(Trap::StepLimit { steps: self.steps, pc: self.cpu.pc });
                }
            }
            self.step(exec);
        }
        debug!(steps = self.steps, pc = self.cpu.pc, "halted");
        Ok(self.steps)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.cpu.pc,
            flags: self.cpu.flags,
            registers: self
                .cpu
                .nonzero_registers()
                .map(|(index, value)| RegisterValue { index, value })
                .collect(),
            memory: self
                .mem
                .iter()
                .map(|(addr, value)| MemoryByte { addr, value })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterValue {
    pub index: usize,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryByte {
    pub addr: u32,
    pub value: u8,
}

/// Final machine state: non-zero registers and every written byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pc: i64,
    pub flags: Flags,
    pub registers: Vec<RegisterValue>,
    pub memory: Vec<MemoryByte>,
}
