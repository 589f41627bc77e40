//! Dense 2-D float table for per-frame animation data.

use serde::Serialize;

/// A row-major table of floats; each row is one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrameTable {
    /// Number of rows (frames)
    pub rows: usize,

    /// Number of columns per row
    pub columns: usize,

    /// Cell values, `rows * columns` long
    pub values: Vec<f32>,
}

impl FrameTable {
    /// Create a table from row-major values.
    ///
    /// Only whole rows are kept: trailing values that do not fill a row are
    /// dropped. A zero column count yields an empty table.
    pub fn from_row_major(columns: usize, mut values: Vec<f32>) -> Self {
        if columns == 0 {
            return Self::default();
        }

        let rows = values.len() / columns;
        values.truncate(rows * columns);

        Self {
            rows,
            columns,
            values,
        }
    }

    /// Get a single frame.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.columns;
        Some(&self.values[start..start + self.columns])
    }

    /// Get a single cell.
    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        if column >= self.columns {
            return None;
        }
        self.row(row).map(|r| r[column])
    }

    /// Iterate over frames.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on 0, so guard the empty table
        self.values.chunks_exact(self.columns.max(1)).take(self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_major_shape() {
        let table = FrameTable::from_row_major(2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!(table.rows, 3);
        assert_eq!(table.columns, 2);
        assert_eq!(table.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(table.get(2, 1), Some(6.0));
    }

    #[test]
    fn test_partial_row_dropped() {
        let table = FrameTable::from_row_major(3, vec![1.0, 2.0, 3.0, 4.0]);

        assert_eq!(table.rows, 1);
        assert_eq!(table.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(table.row(1), None);
    }

    #[test]
    fn test_zero_columns_is_empty() {
        let table = FrameTable::from_row_major(0, vec![1.0, 2.0]);

        assert!(table.is_empty());
        assert_eq!(table.iter_rows().count(), 0);
    }

    #[test]
    fn test_out_of_range_column() {
        let table = FrameTable::from_row_major(2, vec![1.0, 2.0]);
        assert_eq!(table.get(0, 2), None);
    }

    #[test]
    fn test_iter_rows() {
        let table = FrameTable::from_row_major(2, vec![1.0, 2.0, 3.0, 4.0]);
        let rows: Vec<&[f32]> = table.iter_rows().collect();

        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
    }
}
