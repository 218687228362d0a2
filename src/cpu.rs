use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub const NUM_REGS: usize = 32;

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags: u8 {
const V = 1 << 0; // Overflow (approximate, see `overflow_hint`)
const C = 1 << 1; // Carry, never computed
const Z = 1 << 2; // Zero
const N = 1 << 3; // Negative
}
}

/// Register file, condition flags and program counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    /// Index into the loaded program. Signed so that branching before the
    /// first instruction is representable (and halts).
    pub pc: i64,
    pub flags: Flags,
    pub regs: [i32; NUM_REGS],
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            pc: 0,
            flags: Flags::empty(),
            regs: [0; NUM_REGS],
        }
    }

    pub fn read_register(&self, i: usize) -> i32 {
        self.regs[i]
    }

    /// Stores `value` reduced mod 2^32 and reinterpreted as signed.
    pub fn write_register(&mut self, i: usize, value: i64) {
        self.regs[i] = value as i32;
    }

    /// Sets N and Z from `result` if named in `which`; V takes `overflow` if named.
    /// C is never computed and is left clear.
    pub fn update_flags(&mut self, result: i32, which: Flags, overflow: bool) {
        if which.contains(Flags::N) {
            self.flags.set(Flags::N, result < 0);
        }
        if which.contains(Flags::Z) {
            self.flags.set(Flags::Z, result == 0);
        }
        if which.contains(Flags::V) {
            self.flags.set(Flags::V, overflow);
        }
        if which.contains(Flags::C) {
            self.flags.remove(Flags::C);
        }
    }

    /// `(index, value)` of every register that is not zero.
    pub fn nonzero_registers(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.regs.iter().copied().enumerate().filter(|(_, v)| *v != 0)
    }

    /// Signed less-than as seen by B.LT.
    pub fn less_than(&self) -> bool {
        self.flags.contains(Flags::N) != self.flags.contains(Flags::V)
    }
}

/// Overflow heuristic: with both operands non-negative, a result below the
/// left operand means the sum wrapped. Negative operands never report overflow.
pub fn overflow_hint(left: i32, right: i32, result: i32) -> bool {
    left >= 0 && right >= 0 && result < left
}
