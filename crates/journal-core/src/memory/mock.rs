//! Mock memory backend for tests.
//!
//! A sparse byte map with an explicit module base. Reads that touch a byte
//! nobody wrote fail like an unmapped page would, which lets chain tests
//! assert the null short-circuit without a live process.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

/// Builder for [`MockMemoryReader`].
pub struct MockMemoryBuilder {
    base: u64,
    bytes: BTreeMap<u64, u8>,
}

impl MockMemoryBuilder {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            bytes: BTreeMap::new(),
        }
    }

    pub fn write_bytes(&mut self, address: u64, data: &[u8]) -> &mut Self {
        for (i, b) in data.iter().enumerate() {
            self.bytes.insert(address + i as u64, *b);
        }
        self
    }

    pub fn write_u64(&mut self, address: u64, value: u64) -> &mut Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f32(&mut self, address: u64, value: f32) -> &mut Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Write a string with its NUL terminator.
    pub fn write_cstr(&mut self, address: u64, value: &str) -> &mut Self {
        self.write_bytes(address, value.as_bytes());
        self.write_bytes(address + value.len() as u64, &[0])
    }

    pub fn build(&mut self) -> MockMemoryReader {
        MockMemoryReader {
            base: self.base,
            bytes: std::mem::take(&mut self.bytes),
        }
    }
}

/// In-memory [`ReadMemory`] implementation.
pub struct MockMemoryReader {
    base: u64,
    bytes: BTreeMap<u64, u8>,
}

impl ReadMemory for MockMemoryReader {
    fn base_address(&self) -> u64 {
        self.base
    }

    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(size);
        for i in 0..size as u64 {
            match self.bytes.get(&(address + i)) {
                Some(b) => out.push(*b),
                None => {
                    return Err(Error::MemoryReadFailed {
                        address: address + i,
                        message: "mock: address not mapped".to_string(),
                    });
                }
            }
        }
        Ok(out)
    }
}
