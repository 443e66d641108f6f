use std::io::{self, Cursor, Read};

pub fn read_u8(cursor: &mut Cursor<&[u8]>) -> io::Result<u8> {
    if cursor.position() >= cursor.get_ref().len() as u64 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "End of buffer reached",
        ));
    }

    let mut buf = [0u8; 1];
    cursor.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Bytes left between the cursor position and the end of the buffer.
pub fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    (cursor.get_ref().len() as u64).saturating_sub(cursor.position()) as usize
}

/// Reads a little-endian u16 at `offset`, or None past the end.
pub fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

pub fn push_u16_le(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u8_advances() {
        let data: &[u8] = &[0xAB, 0xCD];
        let mut cursor = Cursor::new(data);
        assert_eq!(read_u8(&mut cursor).unwrap(), 0xAB);
        assert_eq!(read_u8(&mut cursor).unwrap(), 0xCD);
        assert!(read_u8(&mut cursor).is_err());
    }

    #[test]
    fn test_read_u16_le() {
        let data = [0x34, 0x12, 0xFF];
        assert_eq!(read_u16_le(&data, 0), Some(0x1234));
        assert_eq!(read_u16_le(&data, 2), None);
    }

    #[test]
    fn test_push_u16_le() {
        let mut out = Vec::new();
        push_u16_le(&mut out, 0x1234);
        assert_eq!(out, vec![0x34, 0x12]);
    }
}
