//! Schema export utilities
//!
//! Places the generated XSD next to its input, or in a configured output
//! directory, as `<input stem>.xsd`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::assembler::CompiledSchema;
use crate::error::{Error, Result};
use crate::writer::write_schema;

/// Extension of written schema files
pub const SCHEMA_EXTENSION: &str = "xsd";

/// Configuration for schema export
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Output directory (None writes next to the input)
    pub target_dir: Option<PathBuf>,
    /// Whether an existing output file may be replaced
    pub overwrite: bool,
}

impl ExportConfig {
    /// Create a new export configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = Some(dir.into());
        self
    }

    /// Set whether existing files are overwritten
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output path for an input file
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let dir = match &self.target_dir {
            Some(dir) => dir.as_path(),
            None => input.parent().unwrap_or_else(|| Path::new("")),
        };
        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(SCHEMA_EXTENSION);
        dir.join(file_name)
    }

    /// Write a schema for an input file and return the written path
    pub fn export(&self, schema: &CompiledSchema, input: &Path) -> Result<PathBuf> {
        let path = self.output_path(input);
        if path.exists() && !self.overwrite {
            return Err(Error::OutputExists(path));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        write_schema(schema, BufWriter::new(file))?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}
