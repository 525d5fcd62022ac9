//! Chunk planning: contiguous row ranges of a fixed size

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// A contiguous range of data rows destined for one output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRange {
    /// 1-based sequence number used in the output file name
    pub index: usize,
    /// First row (inclusive, 0-based)
    pub start: usize,
    /// Last row (exclusive)
    pub end: usize,
}

impl ChunkRange {
    /// Number of rows in this chunk
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the chunk holds no rows
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Number of chunks needed to hold `total_rows` at `chunk_size` rows each
pub fn chunk_count(total_rows: usize, chunk_size: NonZeroUsize) -> usize {
    total_rows.div_ceil(chunk_size.get())
}

/// Plan the chunk ranges for a table.
///
/// Returns no ranges when the table already fits in a single chunk
/// (`total_rows <= chunk_size`); splitting is skipped in that case.
pub fn plan_chunks(total_rows: usize, chunk_size: NonZeroUsize) -> Vec<ChunkRange> {
    let size = chunk_size.get();
    if total_rows <= size {
        return Vec::new();
    }

    (0..chunk_count(total_rows, chunk_size))
        .map(|i| {
            let start = i * size;
            ChunkRange {
                index: i + 1,
                start,
                end: (start + size).min(total_rows),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn lens(plan: &[ChunkRange]) -> Vec<usize> {
        plan.iter().map(ChunkRange::len).collect()
    }

    #[test]
    fn test_plan_with_remainder() {
        let plan = plan_chunks(25_000, size(10_000));
        assert_eq!(lens(&plan), vec![10_000, 10_000, 5_000]);
        assert_eq!(plan[2].index, 3);
        assert_eq!(plan[2].end, 25_000);
    }

    #[test]
    fn test_plan_boundary_is_noop() {
        assert!(plan_chunks(10_000, size(10_000)).is_empty());
        assert!(plan_chunks(0, size(10_000)).is_empty());
        assert!(plan_chunks(1, size(1)).is_empty());
    }

    #[test]
    fn test_plan_off_by_one() {
        let plan = plan_chunks(10_001, size(10_000));
        assert_eq!(lens(&plan), vec![10_000, 1]);
    }

    #[test]
    fn test_plan_exact_multiple() {
        let plan = plan_chunks(30, size(10));
        assert_eq!(lens(&plan), vec![10, 10, 10]);
    }

    #[test]
    fn test_plan_is_contiguous() {
        let plan = plan_chunks(1_234, size(100));
        assert_eq!(plan.len(), chunk_count(1_234, size(100)));
        assert_eq!(plan.first().map(|c| c.start), Some(0));
        assert_eq!(plan.last().map(|c| c.end), Some(1_234));
        for pair in plan.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_eq!(pair[0].index + 1, pair[1].index);
        }
    }
}
