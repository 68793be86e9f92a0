use bytes::{Buf, BufMut};

use crate::error::ShpError;

/// Byte order of a multi-byte value in the file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endian {
    /// Most significant byte first. Used for the file code, lengths and record headers.
    Big,
    /// Least significant byte first. Used for everything else.
    Little,
}

impl Endian {
    /// Splits the value into bytes in this byte order.
    pub fn split_i32(self, value: i32) -> [u8; 4] {
        match self {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        }
    }

    /// Splits the value into bytes in this byte order.
    pub fn split_f64(self, value: f64) -> [u8; 8] {
        match self {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        }
    }

    /// Assembles a value from bytes in this byte order.
    pub fn join_i32(self, bytes: [u8; 4]) -> i32 {
        match self {
            Endian::Big => i32::from_be_bytes(bytes),
            Endian::Little => i32::from_le_bytes(bytes),
        }
    }

    /// Assembles a value from bytes in this byte order.
    pub fn join_f64(self, bytes: [u8; 8]) -> f64 {
        match self {
            Endian::Big => f64::from_be_bytes(bytes),
            Endian::Little => f64::from_le_bytes(bytes),
        }
    }

    pub(crate) fn put_i32(self, buf: &mut impl BufMut, value: i32) {
        buf.put_slice(&self.split_i32(value));
    }

    pub(crate) fn put_f64(self, buf: &mut impl BufMut, value: f64) {
        buf.put_slice(&self.split_f64(value));
    }

    pub(crate) fn get_i32(self, buf: &mut impl Buf) -> Result<i32, ShpError> {
        let mut bytes = [0; 4];
        copy_exact(buf, &mut bytes)?;
        Ok(self.join_i32(bytes))
    }

    pub(crate) fn get_f64(self, buf: &mut impl Buf) -> Result<f64, ShpError> {
        let mut bytes = [0; 8];
        copy_exact(buf, &mut bytes)?;
        Ok(self.join_f64(bytes))
    }
}

fn copy_exact(buf: &mut impl Buf, dst: &mut [u8]) -> Result<(), ShpError> {
    if buf.remaining() < dst.len() {
        return Err(ShpError::UnexpectedEof {
            needed: dst.len(),
            available: buf.remaining(),
        });
    }

    buf.copy_to_slice(dst);
    Ok(())
}
