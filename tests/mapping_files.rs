//! End-to-end tests over hand-built mapping and DPLC binaries

use md_sprite_maps::{
    offset_table::count_frames, to_assembly, DplcCopy, DplcError, DplcFrame,
    DynamicPatternLoadCues, FixedLabel, Format, SpriteFrame, SpriteMappings, SpritePiece,
};
use pretty_assertions::assert_eq;

/// Two frames of Sonic 2 mappings: a 2-piece frame and an empty one that
/// shares offset 0 with the table.
fn sonic2_mappings_bytes() -> Vec<u8> {
    vec![
        0x00, 0x04, 0x00, 0x00, // table: frame 0 at 4, frame 1 empty via offset 0
        0x00, 0x02, // 2 pieces
        0xF0, 0x0D, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xF0, // 4x2 at (-16, -16), tile 0
        0x00, 0x05, 0x20, 0x08, 0x20, 0x04, 0xFF, 0xF8, // 2x2 at (-8, 0), line 1, tile 8
    ]
}

#[test]
fn zero_offset_frames_are_counted() {
    let data = sonic2_mappings_bytes();
    assert_eq!(count_frames(&data, Format::Sonic2).unwrap(), 2);

    let mappings = SpriteMappings::from_bytes(&data, Format::Sonic2).unwrap();
    assert_eq!(mappings.frames.len(), 2);
    assert_eq!(mappings.frames[0].pieces.len(), 2);
    assert!(mappings.frames[1].pieces.is_empty());
}

#[test]
fn smaller_offset_ends_scan_early() {
    // 0x0006 then 0x0002: the second offset moves the table end to byte 2,
    // which the cursor has already passed after reading it.
    let data = [0x00, 0x06, 0x00, 0x02, 0x00, 0x00];
    assert_eq!(count_frames(&data, Format::Sonic3AndKnuckles).unwrap(), 2);
}

#[test]
fn split_piece_is_rejected() {
    let mut mappings = SpriteMappings {
        format: Format::Sonic2,
        frames: vec![SpriteFrame::new(vec![SpritePiece {
            width: 2,
            height: 1,
            tile_index: 0,
            ..SpritePiece::default()
        }])],
    };
    let dplcs = DynamicPatternLoadCues {
        format: Format::Sonic2,
        frames: vec![DplcFrame::new(vec![
            DplcCopy { start: 10, length: 1 },
            DplcCopy { start: 20, length: 1 },
        ])],
    };
    let before = mappings.clone();

    let result = mappings.apply_dplcs(&dplcs);
    assert!(matches!(result, Err(DplcError::NonContiguous { .. })));
    assert_eq!(mappings, before);
}

#[test]
fn remove_dplcs_on_parsed_file() {
    let data = sonic2_mappings_bytes();
    let mut mappings = SpriteMappings::from_bytes(&data, Format::Sonic2).unwrap();
    let original = mappings.clone();

    let dplcs = mappings.remove_dplcs();

    // Tiles 0-7 and 8-11 form one run.
    assert_eq!(
        dplcs.frames[0].copies,
        vec![DplcCopy { start: 0, length: 12 }]
    );
    assert!(dplcs.frames[1].copies.is_empty());
    assert_eq!(mappings.frames[0].pieces[1].tile_index, 8);

    mappings.apply_dplcs(&dplcs).unwrap();
    assert_eq!(mappings, original);
}

#[test]
fn renders_mappings_and_dplcs_with_one_label_source() {
    let mut mappings = SpriteMappings::from_bytes(&sonic2_mappings_bytes(), Format::Sonic2).unwrap();
    let dplcs = mappings.remove_dplcs();

    let mut labels = FixedLabel(0x1234);
    let map_text = to_assembly(&mappings, &mut labels).unwrap();
    let dplc_text = to_assembly(&dplcs, &mut labels).unwrap();

    assert!(map_text.contains("MDS_00001234_0:\n\tdc.w\t$0002\n"));
    assert!(map_text.contains("\tdc.w\t$F00D, $0000, $0000, $FFF0\n"));
    assert!(map_text.ends_with("\teven\n"));

    // 12 tiles load as a 16-tile-limited entry: one word, length-1 in the top nibble.
    assert!(dplc_text.contains("MDS_00001234_0:\n\tdc.w\t$0001\n\tdc.w\t$B000\n"));
    assert!(dplc_text.contains("MDS_00001234_1:\n\tdc.w\t$0000\n"));
}
