//! Directory scanner for discovering spreadsheet and CSV files

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// How a source file is parsed, inferred from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// `.xlsx` / `.xls` workbook
    Spreadsheet,
    /// `.csv` comma-separated text
    DelimitedText,
}

impl SourceFormat {
    /// Infer the format from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xls" => Some(SourceFormat::Spreadsheet),
            "csv" => Some(SourceFormat::DelimitedText),
            _ => None,
        }
    }
}

/// A discovered input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Parsing format
    pub format: SourceFormat,
    /// File name without extension, prefix of every chunk name
    pub base_name: String,
}

impl SourceFile {
    /// Build a SourceFile from a path with a supported extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            format,
            base_name,
        })
    }

    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// List the supported files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. An empty result is not an error.
pub fn discover_files<P: AsRef<Path>>(dir: P) -> Result<Vec<SourceFile>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if SourceFormat::from_path(path).is_some() {
            files.push(SourceFile::from_path(path)?);
        }
    }

    debug!(dir = %dir.display(), count = files.len(), "discovered source files");
    Ok(files)
}
