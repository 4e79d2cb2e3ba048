//! Read-only elevation grid the terrain patch samples from.

use glam::Vec3;

use crate::error::TerrainError;

/// Row-major grid of `(x, y, z)` samples, `y` being the elevation.
///
/// The average spacing along each axis is derived once from the first and
/// last sample of that axis. It is an average, so it does not have to match
/// any individual cell exactly (near the edges in particular).
#[derive(Debug, Clone)]
pub struct HeightField {
    columns: usize,
    rows: usize,
    samples: Vec<f32>,
    spacing_x: f32,
    spacing_z: f32,
}

impl HeightField {
    /// Wrap a flat `columns * rows * 3` buffer.
    pub fn new(columns: usize, rows: usize, samples: Vec<f32>) -> Result<Self, TerrainError> {
        if columns == 0 || rows == 0 {
            return Err(TerrainError::EmptyField { columns, rows });
        }
        let expected = columns
            .checked_mul(rows)
            .and_then(|n| n.checked_mul(3))
            .ok_or(TerrainError::FieldTooLarge { columns, rows })?;
        if samples.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        // Span between the first and last sample along each axis.
        let map_size_x = (samples[(columns - 1) * 3] - samples[0]).abs();
        let map_size_z = (samples[(rows - 1) * columns * 3 + 2] - samples[2]).abs();

        Ok(Self {
            columns,
            rows,
            spacing_x: map_size_x / columns as f32,
            spacing_z: map_size_z / rows as f32,
            samples,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Average distance between neighbouring samples along X.
    pub fn spacing_x(&self) -> f32 {
        self.spacing_x
    }

    /// Average distance between neighbouring samples along Z.
    pub fn spacing_z(&self) -> f32 {
        self.spacing_z
    }

    /// Flat `(x, y, z)` buffer.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Index of the sample at `(row, column)`. Both must be in range.
    #[inline]
    pub fn sample_index(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows && column < self.columns);
        row * self.columns + column
    }

    /// One path per row, in sample order; the layout ribbon builders take.
    pub fn paths(&self) -> Vec<Vec<Vec3>> {
        self.samples
            .chunks_exact(self.columns * 3)
            .map(|row| row.chunks_exact(3).map(Vec3::from_slice).collect())
            .collect()
    }

    /// Elevation of sample number `index`.
    #[inline]
    pub fn elevation(&self, index: usize) -> f32 {
        self.samples[index * 3 + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat grid with `x = col * dx`, `z = row * dz`, `y = row * columns + col`.
    fn grid(columns: usize, rows: usize, dx: f32, dz: f32) -> Vec<f32> {
        let mut samples = Vec::with_capacity(columns * rows * 3);
        for row in 0..rows {
            for col in 0..columns {
                samples.extend([col as f32 * dx, (row * columns + col) as f32, row as f32 * dz]);
            }
        }
        samples
    }

    #[test]
    fn spacing_is_span_over_count() {
        let field = HeightField::new(4, 2, grid(4, 2, 2.0, 3.0)).unwrap();
        // x spans 0..6 over 4 columns, z spans 0..3 over 2 rows
        assert_eq!(field.spacing_x(), 1.5);
        assert_eq!(field.spacing_z(), 1.5);
    }

    #[test]
    fn spacing_ignores_sign_of_span() {
        let mut samples = grid(3, 3, -2.0, -4.0);
        samples[1] = 9.0;
        let field = HeightField::new(3, 3, samples).unwrap();
        assert_eq!(field.spacing_x(), 4.0 / 3.0);
        assert_eq!(field.spacing_z(), 8.0 / 3.0);
    }

    #[test]
    fn single_sample_has_zero_spacing() {
        let field = HeightField::new(1, 1, vec![3.0, 1.0, 7.0]).unwrap();
        assert_eq!(field.spacing_x(), 0.0);
        assert_eq!(field.spacing_z(), 0.0);
        assert_eq!(field.elevation(0), 1.0);
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            HeightField::new(0, 4, Vec::new()).unwrap_err(),
            TerrainError::EmptyField { columns: 0, rows: 4 }
        );
        assert!(matches!(
            HeightField::new(4, 0, Vec::new()),
            Err(TerrainError::EmptyField { .. })
        ));
    }

    #[test]
    fn rejects_short_buffer() {
        let err = HeightField::new(2, 2, vec![0.0; 11]).unwrap_err();
        assert_eq!(err, TerrainError::SampleCountMismatch { expected: 12, actual: 11 });
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let err = HeightField::new(usize::MAX, 2, Vec::new()).unwrap_err();
        assert_eq!(err, TerrainError::FieldTooLarge { columns: usize::MAX, rows: 2 });
    }

    #[test]
    fn paths_follow_rows() {
        let field = HeightField::new(3, 2, grid(3, 2, 2.0, 5.0)).unwrap();
        let paths = field.paths();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.len() == 3));
        assert_eq!(paths[1][2], Vec3::new(4.0, 5.0, 5.0));
    }

    #[test]
    fn elevation_is_row_major() {
        let field = HeightField::new(4, 4, grid(4, 4, 1.0, 1.0)).unwrap();
        let idx = field.sample_index(2, 3);
        assert_eq!(idx, 11);
        assert_eq!(field.elevation(idx), 11.0);
    }
}
