//! Assembly text output
//!
//! Writes mappings and DPLCs as 68000 assembler source: a banner comment, an
//! offset table of label differences, then one labelled body per frame. The
//! data directives assemble to the same bytes the binary writers produce.

pub mod labels;

use std::fmt::Write;

pub use labels::{FixedLabel, HashedLabels, LabelSource};

use crate::{
    dplc::{
        model::DynamicPatternLoadCues,
        writer::{encode_count, encode_entry, frame_entries},
    },
    error::{ensure_in_range, EncodeResult},
    format::Format,
    mappings::{model::SpriteMappings, writer::write_piece},
};

/// Prefix for every generated label
pub const LABEL_PREFIX: &str = "MDS_";

const BANNER_RULE: &str =
    "; --------------------------------------------------------------------------------";

/// Anything laid out as an offset table of frames
pub trait AssemblyTable {
    /// Banner description, e.g. "Sprite mappings"
    fn title(&self) -> &'static str;
    fn format(&self) -> Format;
    fn frame_count(&self) -> usize;
    /// Directives for one frame's body, without its label
    fn write_frame_body(&self, index: usize, out: &mut String) -> EncodeResult<()>;
}

/// Render a whole table as assembly text
pub fn to_assembly<T, L>(table: &T, labels: &mut L) -> EncodeResult<String>
where
    T: AssemblyTable + ?Sized,
    L: LabelSource + ?Sized,
{
    let mut bodies = Vec::with_capacity(table.frame_count());
    for index in 0..table.frame_count() {
        let mut body = String::new();
        table.write_frame_body(index, &mut body)?;
        bodies.push(body);
    }

    let tag = labels.next_tag(&bodies.concat());
    let label = format!("{}{:08X}", LABEL_PREFIX, tag);

    let mut out = String::new();
    writeln!(out, "{}", BANNER_RULE)?;
    writeln!(
        out,
        "; {} - output from md_sprite_maps - {} format",
        table.title(),
        table.format()
    )?;
    writeln!(out, "{}", BANNER_RULE)?;
    writeln!(out)?;

    writeln!(out, "{}:", label)?;
    for index in 0..bodies.len() {
        writeln!(out, "\tdc.w\t{}_{:X}-{}", label, index, label)?;
    }
    writeln!(out)?;

    for (index, body) in bodies.iter().enumerate() {
        writeln!(out, "{}_{:X}:", label, index)?;
        out.push_str(body);
    }

    writeln!(out, "\teven")?;

    Ok(out)
}

fn byte_list(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("${:02X}", byte))
        .collect::<Vec<_>>()
        .join(", ")
}

fn word_list(bytes: &[u8]) -> String {
    bytes
        .chunks(2)
        .map(|word| format!("${:02X}{:02X}", word[0], word.get(1).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl AssemblyTable for SpriteMappings {
    fn title(&self) -> &'static str {
        "Sprite mappings"
    }

    fn format(&self) -> Format {
        self.format
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn write_frame_body(&self, index: usize, out: &mut String) -> EncodeResult<()> {
        let frame = &self.frames[index];

        match self.format {
            Format::Sonic1 => {
                ensure_in_range(
                    "Piece count",
                    frame.pieces.len() as i64,
                    0,
                    u8::MAX as i64,
                )?;
                writeln!(out, "\tdc.b\t${:02X}", frame.pieces.len())?
            }
            Format::Sonic2 | Format::Sonic3AndKnuckles => {
                ensure_in_range(
                    "Piece count",
                    frame.pieces.len() as i64,
                    0,
                    u16::MAX as i64,
                )?;
                writeln!(out, "\tdc.w\t${:04X}", frame.pieces.len())?
            }
        }

        for piece in &frame.pieces {
            let mut bytes = Vec::with_capacity(self.format.piece_size());
            write_piece(piece, self.format, &mut bytes)?;

            match self.format {
                Format::Sonic1 => writeln!(out, "\tdc.b\t{}", byte_list(&bytes))?,
                Format::Sonic2 | Format::Sonic3AndKnuckles => {
                    writeln!(out, "\tdc.w\t{}", word_list(&bytes))?
                }
            }
        }

        Ok(())
    }
}

impl AssemblyTable for DynamicPatternLoadCues {
    fn title(&self) -> &'static str {
        "Dynamic Pattern Loading Cues"
    }

    fn format(&self) -> Format {
        self.format
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn write_frame_body(&self, index: usize, out: &mut String) -> EncodeResult<()> {
        let entries = frame_entries(&self.frames[index])?;
        let count = encode_count(entries.len(), self.format)?;

        match self.format {
            Format::Sonic1 => writeln!(out, "\tdc.b\t${:02X}", count)?,
            Format::Sonic2 | Format::Sonic3AndKnuckles => writeln!(out, "\tdc.w\t${:04X}", count)?,
        }

        for entry in &entries {
            writeln!(out, "\tdc.w\t${:04X}", encode_entry(entry, self.format))?;
        }

        Ok(())
    }
}
