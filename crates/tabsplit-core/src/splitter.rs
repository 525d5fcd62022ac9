//! Per-file and per-folder split orchestration
//!
//! Files are processed one at a time. A file that fails to load is
//! reported and skipped; a chunk that fails to write is reported and the
//! remaining chunks are still written.

use crate::config::{OutputFormat, SplitMode, SplitOptions};
use crate::error::Result;
use crate::parser::load_table;
use crate::planner::{plan_chunks, ChunkRange};
use crate::scanner::{discover_files, SourceFile};
use crate::writer::{chunk_file_name, write_chunk};
use serde::Serialize;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Progress notifications emitted while splitting
#[derive(Debug, Clone, PartialEq)]
pub enum SplitEvent<'a> {
    /// Discovery finished
    FilesFound { count: usize },
    /// A file is about to be loaded
    FileStarted { file_name: &'a str },
    /// A file was loaded
    RowsCounted { file_name: &'a str, total_rows: usize },
    /// A file fits in one chunk and is left alone
    SplitSkipped { file_name: &'a str, total_rows: usize, chunk_size: usize },
    /// Chunk plan computed
    ChunksPlanned { file_name: &'a str, count: usize },
    /// A chunk file was written
    ChunkWritten { output_name: &'a str, rows: usize },
    /// A chunk file could not be written
    ChunkFailed { output_name: &'a str, error: &'a str },
    /// Every chunk of a file was written
    FileSucceeded { file_name: &'a str },
    /// A file could not be loaded, or some of its chunks failed
    FileFailed { file_name: &'a str, error: &'a str },
}

/// A chunk file that was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenChunk {
    pub path: PathBuf,
    pub rows: usize,
}

/// A chunk file that could not be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedChunk {
    pub path: PathBuf,
    pub error: String,
}

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Row count within the chunk size; nothing written
    Skipped,
    /// Chunks were written (some may have failed)
    Split {
        written: Vec<WrittenChunk>,
        failed: Vec<FailedChunk>,
    },
    /// The file could not be loaded; nothing written
    Failed { error: String },
}

/// Report for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file_name: String,
    /// Data rows in the source, when it could be loaded
    pub total_rows: Option<usize>,
    pub outcome: FileOutcome,
}

impl FileReport {
    /// True when the file was split without any chunk failures
    pub fn is_success(&self) -> bool {
        matches!(&self.outcome, FileOutcome::Split { failed, .. } if failed.is_empty())
    }

    /// True when loading failed or any chunk failed
    pub fn is_failure(&self) -> bool {
        match &self.outcome {
            FileOutcome::Failed { .. } => true,
            FileOutcome::Split { failed, .. } => !failed.is_empty(),
            FileOutcome::Skipped => false,
        }
    }
}

/// Reports for every file of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    /// Files split without chunk failures
    pub fn files_split(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    /// Files left alone because they fit in one chunk
    pub fn files_skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Skipped)
            .count()
    }

    /// Files with a load failure or at least one chunk failure
    pub fn files_failed(&self) -> usize {
        self.files.iter().filter(|f| f.is_failure()).count()
    }

    /// Total chunk files written
    pub fn chunks_written(&self) -> usize {
        self.files
            .iter()
            .map(|f| match &f.outcome {
                FileOutcome::Split { written, .. } => written.len(),
                _ => 0,
            })
            .sum()
    }
}

/// Split every supported file in `dir` into fixed 10000-row chunks
pub fn split_folder_default<P, F>(dir: P, format: OutputFormat, on_event: F) -> Result<RunSummary>
where
    P: AsRef<Path>,
    F: FnMut(&SplitEvent<'_>),
{
    split_folder(dir, &SplitOptions::new(SplitMode::Default, format), on_event)
}

/// Split every supported file in `dir` into chunks of `chunk_size` rows
pub fn split_folder_with_chunk_size<P, F>(
    dir: P,
    chunk_size: NonZeroUsize,
    format: OutputFormat,
    on_event: F,
) -> Result<RunSummary>
where
    P: AsRef<Path>,
    F: FnMut(&SplitEvent<'_>),
{
    split_folder(dir, &SplitOptions::new(SplitMode::Custom(chunk_size), format), on_event)
}

/// Split every supported file in `dir` according to `options`.
///
/// Only discovery errors are returned; per-file problems end up in the
/// summary.
pub fn split_folder<P, F>(dir: P, options: &SplitOptions, mut on_event: F) -> Result<RunSummary>
where
    P: AsRef<Path>,
    F: FnMut(&SplitEvent<'_>),
{
    let files = discover_files(dir)?;
    on_event(&SplitEvent::FilesFound { count: files.len() });

    if files.is_empty() {
        return Ok(RunSummary::default());
    }

    if let Some(output_dir) = &options.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let files = files
        .iter()
        .map(|source| split_file(source, options, &mut on_event))
        .collect();

    Ok(RunSummary { files })
}

/// Load one file and write its chunks.
///
/// Never fails: load errors become [`FileOutcome::Failed`] and chunk write
/// errors are collected in [`FileOutcome::Split`].
pub fn split_file<F>(source: &SourceFile, options: &SplitOptions, mut on_event: F) -> FileReport
where
    F: FnMut(&SplitEvent<'_>),
{
    let file_name = source.file_name();
    on_event(&SplitEvent::FileStarted { file_name: &file_name });

    let table = match load_table(source) {
        Ok(table) => table,
        Err(e) => {
            let error = e.to_string();
            debug!(file = %file_name, error = %error, "failed to load file");
            on_event(&SplitEvent::FileFailed {
                file_name: &file_name,
                error: &error,
            });
            return FileReport {
                file_name,
                total_rows: None,
                outcome: FileOutcome::Failed { error },
            };
        }
    };

    let total_rows = table.row_count();
    on_event(&SplitEvent::RowsCounted {
        file_name: &file_name,
        total_rows,
    });

    let chunk_size = options.mode.chunk_size();
    let plan = plan_chunks(total_rows, chunk_size);
    if plan.is_empty() {
        on_event(&SplitEvent::SplitSkipped {
            file_name: &file_name,
            total_rows,
            chunk_size: chunk_size.get(),
        });
        return FileReport {
            file_name,
            total_rows: Some(total_rows),
            outcome: FileOutcome::Skipped,
        };
    }

    debug!(file = %file_name, chunks = plan.len(), chunk_size = chunk_size.get(), "planned chunks");
    on_event(&SplitEvent::ChunksPlanned {
        file_name: &file_name,
        count: plan.len(),
    });

    let output_dir = options.output_dir_for(&source.path);
    let mut written = Vec::new();
    let mut failed = Vec::new();

    for range in &plan {
        let output_name =
            chunk_file_name(&source.base_name, options.mode, range.index, options.format);
        let path = output_dir.join(&output_name);

        match write_chunk(&table, range, &path, options.format) {
            Ok(rows) => {
                on_event(&SplitEvent::ChunkWritten {
                    output_name: &output_name,
                    rows,
                });
                written.push(WrittenChunk { path, rows });
            }
            Err(e) => {
                let error = e.to_string();
                debug!(chunk = %output_name, error = %error, "failed to write chunk");
                on_event(&SplitEvent::ChunkFailed {
                    output_name: &output_name,
                    error: &error,
                });
                failed.push(FailedChunk { path, error });
            }
        }
    }

    if failed.is_empty() {
        on_event(&SplitEvent::FileSucceeded { file_name: &file_name });
    } else {
        let error = failed_chunks_message(&failed, &plan);
        on_event(&SplitEvent::FileFailed {
            file_name: &file_name,
            error: &error,
        });
    }

    FileReport {
        file_name,
        total_rows: Some(total_rows),
        outcome: FileOutcome::Split { written, failed },
    }
}

fn failed_chunks_message(failed: &[FailedChunk], plan: &[ChunkRange]) -> String {
    let first = failed.first().map(|f| f.error.as_str()).unwrap_or_default();
    format!(
        "{} of {} chunk(s) failed to write (first error: {})",
        failed.len(),
        plan.len(),
        first
    )
}
