use pretty_assertions::assert_eq;

use sisa_rs::exec::IntExecutor;
use sisa_rs::listing::{encode_listing, memory_dump, register_dump};
use sisa_rs::{parse_program, Machine, MachineConfig};

#[test]
fn encode_listing_pairs_source_with_bits() {
    let prog = parse_program("add r1, r0, r0\nB.LT -1\nnop\n").unwrap();
    let expected = vec![
        "\t-- ADD R1,R0,R0".to_string(),
        "\t0 => \"010000\" & \"00001\" & \"00000\" & \"00000\" & \"00000000000\",".to_string(),
        "\t-- B.LT -1".to_string(),
        "\t1 => \"100011\" & \"11111111111111111111111111\",".to_string(),
        "\t-- NOP".to_string(),
        "\t2 => \"000000\" & \"00000000000000000000000000\",".to_string(),
    ];
    assert_eq!(encode_listing(&prog), expected);
}

#[test]
fn dumps_list_non_zero_registers_and_written_bytes() {
    let mut m = Machine::from_source(
        "ORRI R1,R0,#5\nORRI R31,R0,#-1\nORRI R2,R0,#16\nSTR R3,[R2,R0]",
        MachineConfig::default(),
    )
    .unwrap();
    m.write_register(3, 0x1122_3344);
    m.run(&IntExecutor).unwrap();

    assert_eq!(
        register_dump(&m.cpu),
        vec!["R1 = 0x5", "R2 = 0x10", "R3 = 0x11223344", "R31 = 0xffffffff"]
    );
    assert_eq!(
        memory_dump(&m.mem),
        vec!["0x10 = 0x11", "0x11 = 0x22", "0x12 = 0x33", "0x13 = 0x44"]
    );
}

#[test]
fn snapshot_serializes_state() {
    let mut m = Machine::from_source("ORRI R7,R0,#9\nSTR R7,[R0,R0]", MachineConfig::default()).unwrap();
    m.run(&IntExecutor).unwrap();
    let snap = m.snapshot();
    assert_eq!(snap.pc, 2);
    assert_eq!(snap.registers.len(), 1);
    assert_eq!(snap.memory.len(), 4);

    let v = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["registers"][0]["index"], 7);
    assert_eq!(v["registers"][0]["value"], 9);
    assert_eq!(v["memory"][3]["value"], 9);
}
