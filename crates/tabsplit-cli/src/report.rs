//! Console text for split progress events

use tabsplit_core::{SplitEvent, SplitMode, SplitOptions};

/// Console line(s) printed for an event
pub fn render_event(event: &SplitEvent<'_>, options: &SplitOptions) -> String {
    match event {
        SplitEvent::FilesFound { count: 0 } => {
            "No Excel or CSV files found in the folder!".to_string()
        }
        SplitEvent::FilesFound { count } => {
            let mut lines = vec![format!("Found {} file(s) to process", count)];
            if let SplitMode::Custom(size) = options.mode {
                lines.push(format!("Using chunk size: {} rows", size));
            }
            lines.push(format!("Output format: {}", options.format.label()));
            lines.join("\n")
        }
        SplitEvent::FileStarted { file_name } => format!("\nProcessing: {}", file_name),
        SplitEvent::RowsCounted { total_rows, .. } => format!("Total rows: {}", total_rows),
        SplitEvent::SplitSkipped {
            total_rows,
            chunk_size,
            ..
        } => match options.mode {
            SplitMode::Default => "File has 10,000 or fewer rows. No splitting needed.".to_string(),
            SplitMode::Custom(_) => format!(
                "File has {} rows, which is <= chunk size ({}). No splitting needed.",
                total_rows, chunk_size
            ),
        },
        SplitEvent::ChunksPlanned { count, .. } => format!("Creating {} chunks...", count),
        SplitEvent::ChunkWritten { output_name, rows } => {
            format!(" Created: {} ({} rows)", output_name, rows)
        }
        SplitEvent::ChunkFailed { output_name, error } => {
            format!(" Failed: {} ({})", output_name, error)
        }
        SplitEvent::FileSucceeded { file_name } => format!("✓ Successfully split {}", file_name),
        SplitEvent::FileFailed { file_name, error } => {
            format!("✗ Error processing {}: {}", file_name, error)
        }
    }
}
