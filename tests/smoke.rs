use sisa_rs::exec::IntExecutor;
use sisa_rs::{Bus, Flags, Machine, MachineConfig};

fn run(src: &str) -> Machine {
    let mut m = Machine::from_source(src, MachineConfig::default()).unwrap();
    m.run(&IntExecutor).unwrap();
    m
}

#[test]
fn add_orri_sub() {
    let m = run("ADD R1,R0,R0\nORRI R1,R1,#5\nSUB R2,R1,R0\n");
    assert_eq!(m.read_register(1), 5);
    assert_eq!(m.read_register(2), 5);
    assert!(!m.cpu.flags.contains(Flags::Z));
    assert!(!m.cpu.flags.contains(Flags::N));
}

#[test]
fn blt_taken_on_negative_result() {
    let m = run("ORRI R1,R0,#-1\nB.LT 1\nNOP\n");
    assert_eq!(m.read_register(1) as u32, 0xFFFF_FFFF);
    assert!(m.cpu.flags.contains(Flags::N));
    assert!(!m.cpu.flags.contains(Flags::V));
    // the NOP was skipped
    assert_eq!(m.steps(), 2);
    assert_eq!(m.cpu.pc, 3);
}

#[test]
fn store_then_load_word() {
    let mut m = Machine::from_source("STR R0,[R1,R2]\nLDR R3,[R1,R2]", MachineConfig::default()).unwrap();
    m.write_register(0, 0x1122_3344);
    m.run(&IntExecutor).unwrap();
    assert_eq!(m.read_register(3), 0x1122_3344);
    let bytes: Vec<u8> = (0..4).map(|a| m.mem.read_u8(a)).collect();
    assert_eq!(bytes, vec![0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn fresh_machine_is_zeroed() {
    let m = Machine::from_source("NOP", MachineConfig::default()).unwrap();
    assert!((0..32).all(|i| m.read_register(i) == 0));
    assert_eq!(m.cpu.flags, Flags::empty());
    assert_eq!(m.cpu.pc, 0);
    assert!(m.mem.is_empty());
}
