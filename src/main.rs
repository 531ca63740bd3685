//! md_sprite_maps - inspect and convert Mega Drive sprite mappings and DPLCs

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use md_sprite_maps::{
    to_assembly, AssemblyTable, DynamicPatternLoadCues, EncodeError, FixedLabel, Format,
    HashedLabels, LabelSource, SpriteDocument, SpriteMappings,
};

#[derive(Parser)]
#[command(name = "md_sprite_maps")]
#[command(about = "Sprite mappings and DPLC converter for Mega Drive Sonic games")]
#[command(version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise the frames of a mappings file
    Info {
        mappings: PathBuf,

        #[arg(short, long, value_enum)]
        format: FormatArg,

        /// DPLC file belonging to the mappings
        #[arg(long)]
        dplc: Option<PathBuf>,
    },

    /// Write mappings (and DPLCs) as assembly
    Asm {
        mappings: PathBuf,

        #[arg(short, long, value_enum)]
        format: FormatArg,

        #[arg(long)]
        dplc: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fixed hexadecimal label tag instead of a hashed one
        #[arg(long, value_parser = parse_hex)]
        label: Option<u32>,
    },

    /// Convert absolute mappings into DPLC-relative mappings plus DPLCs
    RemoveDplcs {
        mappings: PathBuf,

        #[arg(short, long, value_enum)]
        format: FormatArg,

        #[arg(long)]
        out_mappings: PathBuf,

        #[arg(long)]
        out_dplc: PathBuf,

        /// Write assembly instead of binaries
        #[arg(long)]
        asm: bool,
    },

    /// Resolve DPLC-relative mappings back to absolute tile indices
    ApplyDplcs {
        mappings: PathBuf,

        dplc: PathBuf,

        #[arg(short, long, value_enum)]
        format: FormatArg,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        asm: bool,
    },

    /// Export mappings (and DPLCs) to JSON
    ExportJson {
        mappings: PathBuf,

        #[arg(short, long, value_enum)]
        format: FormatArg,

        #[arg(long)]
        dplc: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build binaries or assembly from a JSON export
    ImportJson {
        input: PathBuf,

        /// Layout to write; defaults to the one recorded in the JSON
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        #[arg(long)]
        out_mappings: PathBuf,

        /// Where to write the DPLCs, if the JSON has any
        #[arg(long)]
        out_dplc: Option<PathBuf>,

        #[arg(long)]
        asm: bool,
    },
}

/// Layout names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Sonic 1 and Sonic CD
    Sonic1,
    Sonic2,
    /// Sonic 3 & Knuckles
    Sonic3k,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Sonic1 => Format::Sonic1,
            FormatArg::Sonic2 => Format::Sonic2,
            FormatArg::Sonic3k => Format::Sonic3AndKnuckles,
        }
    }
}

fn parse_hex(value: &str) -> Result<u32, String> {
    let digits = value
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .trim_start_matches('$');
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex label '{}': {}", value, e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info {
            mappings,
            format,
            dplc,
        } => print_info(&SpriteDocument::open(&mappings, dplc.as_deref(), format.into())?),

        Commands::Asm {
            mappings,
            format,
            dplc,
            output,
            label,
        } => {
            let document = SpriteDocument::open(&mappings, dplc.as_deref(), format.into())?;
            let mut labels: Box<dyn LabelSource> = match label {
                Some(tag) => Box::new(FixedLabel(tag)),
                None => Box::new(HashedLabels::new()),
            };

            let mut text = to_assembly(&document.mappings, labels.as_mut())?;
            if let Some(dplcs) = &document.dplcs {
                text.push('\n');
                text.push_str(&to_assembly(dplcs, labels.as_mut())?);
            }

            write_text(output.as_deref(), &text)
        }

        Commands::RemoveDplcs {
            mappings,
            format,
            out_mappings,
            out_dplc,
            asm,
        } => {
            let mut document = SpriteDocument::open(&mappings, None, format.into())?;
            let dplcs = document.mappings.remove_dplcs();
            info!(
                "Built {} DPLC copies across {} frames",
                dplcs.total_copies(),
                dplcs.frames.len()
            );

            let mut labels = HashedLabels::new();
            document.mappings.write_to(&out_mappings, asm, &mut labels)?;
            dplcs.write_to(&out_dplc, asm, &mut labels)
        }

        Commands::ApplyDplcs {
            mappings,
            dplc,
            format,
            output,
            asm,
        } => {
            let mut document = SpriteDocument::open(&mappings, Some(dplc.as_path()), format.into())?;
            if let Some(dplcs) = document.dplcs.take() {
                if let Err(e) = document.mappings.apply_dplcs(&dplcs) {
                    warn!("DPLCs do not match the mappings, nothing written");
                    return Err(e).context("Failed to apply DPLCs");
                }
            }

            document
                .mappings
                .write_to(&output, asm, &mut HashedLabels::new())
        }

        Commands::ExportJson {
            mappings,
            format,
            dplc,
            output,
        } => {
            let document = SpriteDocument::open(&mappings, dplc.as_deref(), format.into())?;
            match output {
                Some(path) => document.write_json(path),
                None => write_text(None, &document.to_json()?),
            }
        }

        Commands::ImportJson {
            input,
            format,
            out_mappings,
            out_dplc,
            asm,
        } => {
            let mut document = SpriteDocument::from_json_file(&input)?;
            if let Some(format) = format.map(Format::from) {
                document.mappings.format = format;
                if let Some(dplcs) = &mut document.dplcs {
                    dplcs.format = format;
                }
            }

            let mut labels = HashedLabels::new();
            document.mappings.write_to(&out_mappings, asm, &mut labels)?;

            match (&document.dplcs, out_dplc) {
                (Some(dplcs), Some(path)) => dplcs.write_to(&path, asm, &mut labels),
                (Some(_), None) => {
                    warn!("{} contains DPLCs but no --out-dplc was given", input.display());
                    Ok(())
                }
                (None, _) => Ok(()),
            }
        }
    }
}

fn print_info(document: &SpriteDocument) -> Result<()> {
    let mappings = &document.mappings;
    println!(
        "{} format, {} frames, {} pieces",
        mappings.format,
        mappings.frames.len(),
        mappings.total_pieces()
    );

    for (index, frame) in mappings.frames.iter().enumerate() {
        let bounds = match frame.rect() {
            Some(rect) => format!(
                "{}x{} at ({}, {})",
                rect.width(),
                rect.height(),
                rect.left,
                rect.top
            ),
            None => "empty".to_string(),
        };

        let tiles: usize = frame.pieces.iter().map(|piece| piece.tile_count()).sum();
        print!(
            "  Frame {:3}: {:2} pieces, {:3} tiles, {}",
            index,
            frame.pieces.len(),
            tiles,
            bounds
        );

        if let Some(dplc_frame) = document.dplcs.as_ref().and_then(|d| d.frames.get(index)) {
            print!(
                ", {} DPLC copies loading {} tiles",
                dplc_frame.copies.len(),
                dplc_frame.total_tiles()
            );
        }
        println!();
    }

    Ok(())
}

/// Something the CLI can write either as a binary or as assembly
trait WriteOutput: AssemblyTable {
    fn binary(&self) -> Result<Vec<u8>, EncodeError>;

    fn write_to(&self, path: &Path, asm: bool, labels: &mut dyn LabelSource) -> Result<()> {
        if asm {
            return write_text(Some(path), &to_assembly(self, labels)?);
        }

        fs::write(path, self.binary()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());

        Ok(())
    }
}

impl WriteOutput for SpriteMappings {
    fn binary(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_bytes()
    }
}

impl WriteOutput for DynamicPatternLoadCues {
    fn binary(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_bytes()
    }
}

fn write_text(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
