use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::error::ParseError;

fn ensure_remaining(cursor: &Cursor<&[u8]>, needed: u64) -> Result<(), ParseError> {
    if cursor.position() + needed > cursor.get_ref().len() as u64 {
        return Err(ParseError::UnexpectedEof {
            offset: cursor.position(),
            needed,
        });
    }

    Ok(())
}

pub fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8, ParseError> {
    ensure_remaining(cursor, 1)?;

    let mut buf = [0u8; 1];
    cursor.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub fn read_i8(cursor: &mut Cursor<&[u8]>) -> Result<i8, ParseError> {
    ensure_remaining(cursor, 1)?;

    let mut buf = [0u8; 1];
    cursor.read_exact(&mut buf)?;
    Ok(i8::from_be_bytes(buf))
}

pub fn read_u16_be(cursor: &mut Cursor<&[u8]>) -> Result<u16, ParseError> {
    ensure_remaining(cursor, 2)?;

    let mut buf = [0u8; 2];
    cursor.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

pub fn read_i16_be(cursor: &mut Cursor<&[u8]>) -> Result<i16, ParseError> {
    ensure_remaining(cursor, 2)?;

    let mut buf = [0u8; 2];
    cursor.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

/// Seek to an absolute position. Seeking exactly to the end is allowed; any
/// read from there fails with `UnexpectedEof`.
pub fn seek_to(cursor: &mut Cursor<&[u8]>, position: u64) -> Result<(), ParseError> {
    if position > cursor.get_ref().len() as u64 {
        return Err(ParseError::UnexpectedEof {
            offset: position,
            needed: 0,
        });
    }

    cursor.seek(SeekFrom::Start(position))?;
    Ok(())
}

pub fn write_u8(data: &mut Vec<u8>, value: u8) {
    data.push(value);
}

pub fn write_u16_be(data: &mut Vec<u8>, value: u16) {
    data.extend_from_slice(&value.to_be_bytes());
}

/// Overwrite a big-endian `u16` already present in `data`. Used to back-patch
/// offset tables once the frame bodies have been laid out.
pub fn write_u16_be_at(data: &mut [u8], value: u16, pos: usize) {
    if pos + 2 <= data.len() {
        data[pos] = (value >> 8) as u8;
        data[pos + 1] = (value & 0xFF) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_values() {
        let bytes: &[u8] = &[0x12, 0x34, 0xFF, 0xFE, 0x80];
        let mut cursor = Cursor::new(bytes);

        assert_eq!(read_u16_be(&mut cursor).unwrap(), 0x1234);
        assert_eq!(read_i16_be(&mut cursor).unwrap(), -2);
        assert_eq!(read_i8(&mut cursor).unwrap(), -128);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn short_read_reports_offset() {
        let bytes: &[u8] = &[0x12, 0x34, 0x56];
        let mut cursor = Cursor::new(bytes);
        read_u16_be(&mut cursor).unwrap();

        match read_u16_be(&mut cursor) {
            Err(ParseError::UnexpectedEof { offset, needed }) => {
                assert_eq!(offset, 2);
                assert_eq!(needed, 2);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn seek_past_end_is_rejected() {
        let bytes: &[u8] = &[0, 0];
        let mut cursor = Cursor::new(bytes);

        assert!(seek_to(&mut cursor, 2).is_ok());
        assert!(seek_to(&mut cursor, 3).is_err());
    }

    #[test]
    fn back_patches_words() {
        let mut data = vec![0u8; 4];
        write_u16_be_at(&mut data, 0xABCD, 2);
        assert_eq!(data, vec![0, 0, 0xAB, 0xCD]);

        // Out-of-range writes are ignored.
        write_u16_be_at(&mut data, 0xFFFF, 3);
        assert_eq!(data, vec![0, 0, 0xAB, 0xCD]);
    }
}
