use bytes::{Buf, BufMut};
use commonware_codec::{Error, ReadExt, Write};

/// Helper to write a u64 slice as a length-prefixed list.
pub fn write_u64_list(values: &[u64], writer: &mut impl BufMut) {
    (values.len() as u32).write(writer);
    for value in values {
        value.write(writer);
    }
}

/// Helper to read a length-prefixed u64 list.
pub fn read_u64_list(reader: &mut impl Buf, max_len: usize) -> Result<Vec<u64>, Error> {
    let len = u32::read(reader)? as usize;
    if len > max_len {
        return Err(Error::Invalid("u64 list", "too long"));
    }
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(u64::read(reader)?);
    }
    Ok(values)
}

/// Helper to get encode size of a u64 list.
pub fn u64_list_encode_size(values: &[u64]) -> usize {
    4 + values.len() * 8
}

/// Helper to write a u16 slice as a length-prefixed list.
pub fn write_u16_list(values: &[u16], writer: &mut impl BufMut) {
    (values.len() as u32).write(writer);
    for value in values {
        value.write(writer);
    }
}

/// Helper to read a length-prefixed u16 list.
pub fn read_u16_list(reader: &mut impl Buf, max_len: usize) -> Result<Vec<u16>, Error> {
    let len = u32::read(reader)? as usize;
    if len > max_len {
        return Err(Error::Invalid("u16 list", "too long"));
    }
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(u16::read(reader)?);
    }
    Ok(values)
}

/// Helper to get encode size of a u16 list.
pub fn u16_list_encode_size(values: &[u16]) -> usize {
    4 + values.len() * 2
}
