use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Byte-addressed data memory. Word accesses are big-endian and need no alignment.
pub trait Bus {
    fn read_u8(&self, addr: u32) -> u8;
    fn write_u8(&mut self, addr: u32, val: u8);

    fn read_u32(&self, addr: u32) -> u32 {
        u32::from_be_bytes([
            self.read_u8(addr),
            self.read_u8(addr.wrapping_add(1)),
            self.read_u8(addr.wrapping_add(2)),
            self.read_u8(addr.wrapping_add(3)),
        ])
    }

    fn write_u32(&mut self, addr: u32, val: u32) {
        for (i, b) in val.to_be_bytes().into_iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), b);
        }
    }
}

/// Sparse memory: only written bytes are stored, everything else reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseMemory {
    bytes: BTreeMap<u32, u8>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Written bytes in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.bytes.iter().map(|(a, b)| (*a, *b))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Bus for SparseMemory {
    fn read_u8(&self, addr: u32) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0)
    }

    fn write_u8(&mut self, addr: u32, val: u8) {
        self.bytes.insert(addr, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_wraps_around_address_space() {
        let mut mem = SparseMemory::new();
        mem.write_u32(0xFFFF_FFFE, 0xAABB_CCDD);
        assert_eq!(mem.read_u8(0xFFFF_FFFE), 0xAA);
        assert_eq!(mem.read_u8(0xFFFF_FFFF), 0xBB);
        assert_eq!(mem.read_u8(0), 0xCC);
        assert_eq!(mem.read_u8(1), 0xDD);
        assert_eq!(mem.read_u32(0xFFFF_FFFE), 0xAABB_CCDD);
    }
}
