use tracing::debug;

use crate::cpu::{overflow_hint, Cpu, Flags};
use crate::memory::Bus;
use crate::opcodes::Op;
use crate::parser::Instruction;

pub trait Executor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, instr: &Instruction);
}

/// Reference integer semantics for every opcode in the table.
pub struct IntExecutor;

impl Executor for IntExecutor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, i: &Instruction) {
        match i.op {
            Op::Nop => {}
            Op::Add => {
                let a = cpu.read_register(i.reg(1));
                let b = cpu.read_register(i.reg(2));
                let res = a.wrapping_add(b);
                cpu.write_register(i.reg(0), res as i64);
                cpu.update_flags(res, Flags::N | Flags::Z | Flags::V, overflow_hint(a, b, res));
            }
            Op::Sub => {
                let a = cpu.read_register(i.reg(1));
                let b = cpu.read_register(i.reg(2));
                let res = a.wrapping_sub(b);
                cpu.write_register(i.reg(0), res as i64);
                // a - b checked as a + (-b)
                cpu.update_flags(
                    res,
                    Flags::N | Flags::Z | Flags::V,
                    overflow_hint(a, b.wrapping_neg(), res),
                );
            }
            Op::And => {
                let res = cpu.read_register(i.reg(1)) & cpu.read_register(i.reg(2));
                cpu.write_register(i.reg(0), res as i64);
                cpu.update_flags(res, Flags::N | Flags::Z, false);
            }
            Op::Orri => {
                let res = cpu.read_register(i.reg(1)) | i.imm(2);
                cpu.write_register(i.reg(0), res as i64);
                cpu.update_flags(res, Flags::N | Flags::Z, false);
            }
            Op::Lsl => {
                let a = cpu.read_register(i.reg(1)) as u32;
                let res = a.checked_shl(i.imm(2) as u32).unwrap_or(0) as i32;
                cpu.write_register(i.reg(0), res as i64);
                cpu.update_flags(res, Flags::N | Flags::Z | Flags::C, false);
            }
            Op::Asr => {
                let a = cpu.read_register(i.reg(1));
                let n = i.imm(2);
                let res = a
                    .checked_shr(n as u32)
                    .unwrap_or(if a < 0 { -1 } else { 0 });
                cpu.write_register(i.reg(0), res as i64);
                cpu.update_flags(res, Flags::N | Flags::Z | Flags::V, overflow_hint(a, n, res));
            }
            Op::B => branch(cpu, i, true),
            Op::BEq => {
                let z = cpu.flags.contains(Flags::Z);
                branch(cpu, i, z)
            }
            Op::BLt => {
                let lt = cpu.less_than();
                branch(cpu, i, lt)
            }
            Op::Ldr => {
                let addr = effective_addr(cpu, i);
                let val = bus.read_u32(addr);
                cpu.write_register(i.reg(0), val as i32 as i64);
            }
            Op::Str => {
                let addr = effective_addr(cpu, i);
                let val = cpu.read_register(i.reg(0)) as u32;
                bus.write_u32(addr, val);
            }
        }
    }
}

/// pc has already moved past the branch; a taken branch adds its offset on top.
fn branch(cpu: &mut Cpu, i: &Instruction, taken: bool) {
    if taken {
        let off = i.imm(0) as i64;
        debug!(from = cpu.pc - 1, off, "branch taken");
        cpu.pc += off;
    }
}

fn effective_addr(cpu: &Cpu, i: &Instruction) -> u32 {
    let base = cpu.read_register(i.reg(1)) as u32;
    base.wrapping_add(cpu.read_register(i.reg(2)) as u32)
}
