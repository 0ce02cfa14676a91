//! The byte-address abstraction over live game memory.
//!
//! Everything above this layer (relocation chains, variables) works against
//! the [`ReadMemory`] trait, so the same code runs in-process inside the
//! host game, out-of-process through a debug handle, or against a mock in
//! tests.

use crate::error::{Error, Result};

fn to_array<const N: usize>(address: u64, bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .get(..N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| Error::MemoryReadFailed {
            address,
            message: format!("short read: {} of {} bytes", bytes.len(), N),
        })
}

/// Read access to a process address space.
///
/// `read_bytes` is the only required method; the typed readers are thin
/// little-endian views over it. Implementations report failures through
/// [`crate::Error::MemoryReadFailed`]; callers that tolerate missing game
/// state (relocation chains, variable formatting) degrade those to a
/// "not available" result rather than propagating them.
pub trait ReadMemory {
    /// Base address of the game module, used as the origin of every
    /// relocation chain.
    fn base_address(&self) -> u64;

    /// Read `size` bytes starting at `address`.
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    fn read_u64(&self, address: u64) -> Result<u64> {
        let bytes = self.read_bytes(address, 8)?;
        Ok(u64::from_le_bytes(to_array(address, &bytes)?))
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        let bytes = self.read_bytes(address, 4)?;
        Ok(i32::from_le_bytes(to_array(address, &bytes)?))
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        let bytes = self.read_bytes(address, 4)?;
        Ok(f32::from_le_bytes(to_array(address, &bytes)?))
    }

    /// Read three consecutive floats (an xyz position).
    fn read_vec3(&self, address: u64) -> Result<[f32; 3]> {
        let bytes = self.read_bytes(address, 12)?;
        let bytes: [u8; 12] = to_array(address, &bytes)?;
        let f = |i: usize| {
            f32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().expect("4-byte slice"))
        };
        Ok([f(0), f(1), f(2)])
    }

    /// Read a NUL-terminated string of at most `max_len` bytes.
    ///
    /// Game name strings are single-byte Windows-1252; anything past the
    /// terminator is ignored. An unterminated buffer is decoded whole.
    ///
    /// Tries one bulk read first. A string sitting near the end of a
    /// readable region can make that fail even though the string itself is
    /// fine, so on failure the bytes are walked one at a time until the
    /// terminator or the first unreadable byte.
    fn read_cstring(&self, address: u64, max_len: usize) -> Result<String> {
        let bytes = match self.read_bytes(address, max_len) {
            Ok(bytes) => bytes,
            Err(e) => {
                let mut bytes = Vec::new();
                while bytes.len() < max_len {
                    match self.read_bytes(address + bytes.len() as u64, 1) {
                        Ok(one) if one.first() == Some(&0) => {
                            bytes.push(0);
                            break;
                        }
                        Ok(one) if !one.is_empty() => bytes.push(one[0]),
                        _ => break,
                    }
                }
                if bytes.is_empty() {
                    return Err(e);
                }
                bytes
            }
        };
        let len = memchr::memchr(0, &bytes).unwrap_or(bytes.len());
        let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes[..len]);
        Ok(decoded.into_owned())
    }
}
