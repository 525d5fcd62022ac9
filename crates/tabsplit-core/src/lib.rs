//! tabsplit-core: Core library for splitting tabular files into row-capped chunks
//!
//! This library provides functionality to:
//! - Discover `.xlsx`, `.xls` and `.csv` files in a folder
//! - Load CSV files and the first sheet of workbooks into in-memory tables
//! - Plan contiguous row ranges of a fixed size
//! - Write each range, with its header, as a new CSV or XLSX file
//! - Run the whole pipeline per folder with per-file fault isolation

pub mod config;
pub mod error;
pub mod parser;
pub mod planner;
pub mod scanner;
pub mod splitter;
pub mod table;
pub mod writer;

pub use config::{
    default_chunk_size, parse_chunk_size, OutputFormat, SplitMode, SplitOptions, DEFAULT_CHUNK_SIZE,
};
pub use error::{Error, Result};
pub use parser::{load_table, parse_csv, parse_csv_str, parse_spreadsheet};
pub use planner::{chunk_count, plan_chunks, ChunkRange};
pub use scanner::{discover_files, SourceFile, SourceFormat};
pub use splitter::{
    split_file, split_folder, split_folder_default, split_folder_with_chunk_size, FailedChunk,
    FileOutcome, FileReport, RunSummary, SplitEvent, WrittenChunk,
};
pub use table::{CellValue, Column, Row, Table};
pub use writer::{chunk_file_name, write_chunk};
