//! Split settings: output format, chunk size mode, destination

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Rows per chunk in the default mode
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Format of the written chunk files, independent of the source format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }

    /// Upper-case label for console output
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "XLSX",
            OutputFormat::Csv => "CSV",
        }
    }

    /// Map a menu answer (`1` or `2`) to a format
    pub fn from_menu_choice(choice: &str) -> Result<Self> {
        match choice.trim() {
            "1" => Ok(OutputFormat::Xlsx),
            "2" => Ok(OutputFormat::Csv),
            other => Err(Error::InvalidFormatChoice(other.to_string())),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(Error::InvalidFormatChoice(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Chunk sizing mode; also selects the output naming scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitMode {
    /// Fixed 10000-row chunks named `{base}_chunk_{NN}`
    #[default]
    Default,
    /// Caller-supplied chunk size, chunks named `{base}_part_{NN}`
    Custom(NonZeroUsize),
}

impl SplitMode {
    /// Pick the mode for a chunk size; 10000 maps to the default mode
    pub fn from_chunk_size(chunk_size: NonZeroUsize) -> Self {
        if chunk_size.get() == DEFAULT_CHUNK_SIZE {
            SplitMode::Default
        } else {
            SplitMode::Custom(chunk_size)
        }
    }

    /// Effective rows per chunk
    pub fn chunk_size(self) -> NonZeroUsize {
        match self {
            SplitMode::Default => default_chunk_size(),
            SplitMode::Custom(size) => size,
        }
    }

    /// Infix placed between the base name and the chunk number
    pub fn name_infix(self) -> &'static str {
        match self {
            SplitMode::Default => "chunk",
            SplitMode::Custom(_) => "part",
        }
    }
}

const DEFAULT_CHUNK_SIZE_NZ: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CHUNK_SIZE) {
    Some(size) => size,
    None => panic!("default chunk size must be positive"),
};

/// The default chunk size as a `NonZeroUsize`
pub fn default_chunk_size() -> NonZeroUsize {
    DEFAULT_CHUNK_SIZE_NZ
}

/// Parse a chunk size answer; only positive integers are accepted
pub fn parse_chunk_size(input: &str) -> Result<NonZeroUsize> {
    input
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| Error::InvalidChunkSize(input.trim().to_string()))
}

/// Everything needed to split the files of one folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Chunk sizing and naming mode
    pub mode: SplitMode,
    /// Output file format
    pub format: OutputFormat,
    /// Destination for chunk files; defaults to the source file's folder
    pub output_dir: Option<PathBuf>,
}

impl SplitOptions {
    /// Create options writing next to the source files
    pub fn new(mode: SplitMode, format: OutputFormat) -> Self {
        Self {
            mode,
            format,
            output_dir: None,
        }
    }

    /// Write chunk files into `dir` instead
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Folder chunk files for `source` are written to
    pub fn output_dir_for<'a>(&'a self, source: &'a Path) -> &'a Path {
        match &self.output_dir {
            Some(dir) => dir,
            None => source.parent().unwrap_or_else(|| Path::new(".")),
        }
    }
}
