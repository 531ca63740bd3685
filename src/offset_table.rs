//! Frame offset tables
//!
//! Both mapping and DPLC binaries start with a table of big-endian words, one
//! per frame, each holding the absolute offset of that frame's body. Nothing
//! records how long the table is, so the frame count has to be inferred from
//! the offsets themselves.

use std::io::Cursor;

use tracing::{debug, trace};

use crate::{
    binary_utils::{read_u16_be, seek_to, write_u16_be, write_u16_be_at},
    error::{ensure_in_range, EncodeResult, ParseError, ParseResult},
    format::Format,
};

/// Infer how many frames an offset table describes.
///
/// The first offset is taken as the end of the table. Each further word read
/// before that point is another frame, and a smaller non-zero offset pulls the
/// end of the table in. An offset of zero is a zero-piece frame that reuses
/// the start of the file and never moves the end. In layouts where offsets are
/// always even, an odd word means the scan has run into frame data.
pub fn count_frames(data: &[u8], format: Format) -> ParseResult<usize> {
    if data.is_empty() {
        return Ok(0);
    }

    let mut cursor = Cursor::new(data);
    let mut earliest_offset = read_u16_be(&mut cursor)? as u64;
    let mut total_frames = 1;

    while cursor.position() < earliest_offset {
        let frame_offset = read_u16_be(&mut cursor)?;

        if format.requires_even_offsets() && frame_offset % 2 != 0 {
            trace!(
                "Odd offset {:#x} at {:#x}, offset table ends here",
                frame_offset,
                cursor.position() - 2
            );
            break;
        }

        total_frames += 1;

        if frame_offset != 0 && (frame_offset as u64) < earliest_offset {
            earliest_offset = frame_offset as u64;
        }
    }

    debug!("Offset table holds {} frames", total_frames);
    Ok(total_frames)
}

/// Read the body offset of every frame, checking each lies inside `data`.
pub fn frame_offsets(data: &[u8], format: Format) -> ParseResult<Vec<u64>> {
    let total_frames = count_frames(data, format)?;
    let mut cursor = Cursor::new(data);
    let mut offsets = Vec::with_capacity(total_frames);

    for frame in 0..total_frames {
        seek_to(&mut cursor, (frame * 2) as u64)?;
        let offset = read_u16_be(&mut cursor)? as u64;

        if offset >= data.len() as u64 {
            return Err(ParseError::OffsetOutOfRange {
                frame,
                offset,
                len: data.len() as u64,
            });
        }

        offsets.push(offset);
    }

    Ok(offsets)
}

/// Lay out an offset table followed by every frame body, in order.
pub fn write_frames<T, F>(frames: &[T], mut encode_frame: F) -> EncodeResult<Vec<u8>>
where
    F: FnMut(&T, &mut Vec<u8>) -> EncodeResult<()>,
{
    let mut data = Vec::new();

    for _ in frames {
        write_u16_be(&mut data, 0);
    }

    for (index, frame) in frames.iter().enumerate() {
        let offset = data.len();
        ensure_in_range("Frame offset", offset as i64, 0, u16::MAX as i64)?;
        write_u16_be_at(&mut data, offset as u16, index * 2);

        encode_frame(frame, &mut data)?;
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_has_no_frames() {
        assert_eq!(count_frames(&[], Format::Sonic2).unwrap(), 0);
    }

    #[test]
    fn single_byte_stream_is_truncated() {
        assert!(matches!(
            count_frames(&[0x00], Format::Sonic2),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn smaller_offset_shrinks_table() {
        // The second word (2) lowers the table end to byte 2, which the
        // cursor has already passed, so the scan stops after two offsets.
        let data = [0x00, 0x06, 0x00, 0x02, 0x00, 0x00];
        assert_eq!(count_frames(&data, Format::Sonic2).unwrap(), 2);
    }

    #[test]
    fn zero_offset_does_not_shrink_table() {
        // Frame 1 is empty and points at offset 0.
        let data = [
            0x00, 0x06, 0x00, 0x00, 0x00, 0x06, // table
            0x00, 0x00, // empty frame body
        ];
        assert_eq!(count_frames(&data, Format::Sonic2).unwrap(), 3);
    }

    #[test]
    fn odd_offset_ends_table_only_when_offsets_are_even() {
        let data = [0x00, 0x06, 0x00, 0x03, 0x00, 0x06, 0x00, 0x00];

        assert_eq!(count_frames(&data, Format::Sonic2).unwrap(), 1);
        assert_eq!(count_frames(&data, Format::Sonic3AndKnuckles).unwrap(), 1);
        // Sonic 1 offsets may be odd, so 3 is a real offset that ends the
        // table at byte 3; the cursor is already at 4.
        assert_eq!(count_frames(&data, Format::Sonic1).unwrap(), 2);
    }

    #[test]
    fn offsets_past_the_end_are_rejected() {
        let data = [0x00, 0x04, 0x00, 0x40];
        match frame_offsets(&data, Format::Sonic2) {
            Err(ParseError::OffsetOutOfRange { frame, offset, len }) => {
                assert_eq!(frame, 0);
                assert_eq!(offset, 4);
                assert_eq!(len, 4);
            }
            other => panic!("expected OffsetOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn written_table_points_at_each_body() {
        let frames = vec![vec![0xAAu8], vec![0xBB, 0xCC], vec![]];
        let data = write_frames(&frames, |frame, out| {
            out.extend_from_slice(frame);
            Ok(())
        })
        .unwrap();

        assert_eq!(
            data,
            vec![0x00, 0x06, 0x00, 0x07, 0x00, 0x09, 0xAA, 0xBB, 0xCC]
        );
    }
}
