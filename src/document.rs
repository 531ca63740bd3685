//! Loading and saving mappings/DPLC pairs
//!
//! A [`SpriteDocument`] is what the command line works on: a mappings file and
//! optionally the DPLC file that goes with it, either read from the game's
//! binaries or from a JSON export.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{dplc::DynamicPatternLoadCues, format::Format, mappings::SpriteMappings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDocument {
    pub mappings: SpriteMappings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dplcs: Option<DynamicPatternLoadCues>,
}

impl SpriteDocument {
    /// Read binary mappings, and DPLCs if a path is given
    pub fn open<P: AsRef<Path>>(
        mappings_path: P,
        dplc_path: Option<&Path>,
        format: Format,
    ) -> Result<Self> {
        let mappings_path = mappings_path.as_ref();
        let data = fs::read(mappings_path)
            .with_context(|| format!("Failed to read {}", mappings_path.display()))?;
        let mappings = SpriteMappings::from_bytes(&data, format)
            .with_context(|| format!("Failed to parse mappings {}", mappings_path.display()))?;

        let dplcs = match dplc_path {
            Some(path) => {
                let data =
                    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
                let dplcs = DynamicPatternLoadCues::from_bytes(&data, format)
                    .with_context(|| format!("Failed to parse DPLCs {}", path.display()))?;

                if dplcs.frames.len() != mappings.frames.len() {
                    bail!(
                        "{} has {} frames but {} has {}",
                        mappings_path.display(),
                        mappings.frames.len(),
                        path.display(),
                        dplcs.frames.len()
                    );
                }

                Some(dplcs)
            }
            None => None,
        };

        info!(
            "Loaded {} frames from {}",
            mappings.frames.len(),
            mappings_path.display()
        );

        Ok(Self { mappings, dplcs })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

        let document: SpriteDocument = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;

        if let Some(dplcs) = &document.dplcs {
            if dplcs.frames.len() != document.mappings.frames.len() {
                bail!(
                    "{} has {} mapping frames but {} DPLC frames",
                    path.display(),
                    document.mappings.frames.len(),
                    dplcs.frames.len()
                );
            }
        }

        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialise document")
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write JSON to {}", path.display()))
    }
}
