// Row-major helpers for Mat4
//
// EGG documents write matrices row by row, while glam stores columns.
// Note: glam::Mat4 already provides row() and transpose()

use glam::Mat4;

/// Extension trait for Mat4 to convert from and to row-major layouts
pub trait Mat4Ext {
    /// Build a matrix from 16 values laid out row by row.
    fn from_row_major(values: &[f32; 16]) -> Self;

    /// Copy the matrix out as four rows.
    fn to_rows(&self) -> [[f32; 4]; 4];
}

impl Mat4Ext for Mat4 {
    fn from_row_major(values: &[f32; 16]) -> Self {
        // Reading row-major data as columns yields the transpose
        Mat4::from_cols_array(values).transpose()
    }

    fn to_rows(&self) -> [[f32; 4]; 4] {
        self.transpose().to_cols_array_2d()
    }
}
