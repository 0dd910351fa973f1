//! Milne-coordinate lattice: extents, spacings, and coordinate maps.

use crate::error::GridError;

/// A uniform `(x, y, η)` lattice centered on the origin.
///
/// Coordinates of cell `(ix, iy, ieta)`:
///
/// - `x = −x_size/2 + ix·dx`
/// - `y = −y_size/2 + iy·dy`
/// - `η = ieta·deta − eta_size/2`
///
/// The sizes are normally `spacing · (n − 1)`, but some input formats
/// declare them independently, so they are stored rather than derived.
///
/// # Examples
///
/// ```
/// use fireball_grid::Lattice;
///
/// let lat = Lattice::new(5, 5, 3, 0.5, 0.5, 0.2).unwrap();
/// assert_eq!(lat.cell_count(), 75);
/// assert_eq!(lat.x(0), -1.0);
/// assert_eq!(lat.x(4), 1.0);
/// assert!((lat.eta(1)).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    /// Cells along x.
    pub nx: usize,
    /// Cells along y.
    pub ny: usize,
    /// Cells along η.
    pub neta: usize,
    /// Spacing along x (fm).
    pub dx: f64,
    /// Spacing along y (fm).
    pub dy: f64,
    /// Spacing along η.
    pub deta: f64,
    /// Full width along x (fm).
    pub x_size: f64,
    /// Full width along y (fm).
    pub y_size: f64,
    /// Full width along η.
    pub eta_size: f64,
}

impl Lattice {
    /// Create a lattice with sizes derived from extents and spacings.
    pub fn new(
        nx: usize,
        ny: usize,
        neta: usize,
        dx: f64,
        dy: f64,
        deta: f64,
    ) -> Result<Self, GridError> {
        let lattice = Self {
            nx,
            ny,
            neta,
            dx,
            dy,
            deta,
            x_size: 0.0,
            y_size: 0.0,
            eta_size: 0.0,
        }
        .with_derived_sizes();
        lattice.validate()?;
        Ok(lattice)
    }

    /// Recompute `x_size`, `y_size`, and `eta_size` from extents and spacings.
    pub fn with_derived_sizes(mut self) -> Self {
        self.x_size = self.dx * self.nx.saturating_sub(1) as f64;
        self.y_size = self.dy * self.ny.saturating_sub(1) as f64;
        self.eta_size = self.deta * self.neta.saturating_sub(1) as f64;
        self
    }

    /// Check extents and spacings.
    pub fn validate(&self) -> Result<(), GridError> {
        for (axis, n) in [("x", self.nx), ("y", self.ny), ("eta", self.neta)] {
            if n == 0 {
                return Err(GridError::EmptyAxis { axis });
            }
        }
        for (axis, d) in [("x", self.dx), ("y", self.dy), ("eta", self.deta)] {
            if !d.is_finite() || d <= 0.0 {
                return Err(GridError::InvalidSpacing { axis, value: d });
            }
        }
        self.nx
            .checked_mul(self.ny)
            .and_then(|n| n.checked_mul(self.neta))
            .ok_or(GridError::TooManyCells)?;
        Ok(())
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.neta
    }

    /// Number of cells in one η slice.
    pub fn slice_len(&self) -> usize {
        self.nx * self.ny
    }

    /// Flat storage index: x fastest, then y, then η.
    #[inline]
    pub fn flat_index(&self, ix: usize, iy: usize, ieta: usize) -> usize {
        ix + self.nx * (iy + self.ny * ieta)
    }

    /// Checked variant of [`flat_index`](Self::flat_index).
    pub fn checked_index(&self, ix: usize, iy: usize, ieta: usize) -> Result<usize, GridError> {
        if ix >= self.nx || iy >= self.ny || ieta >= self.neta {
            return Err(GridError::IndexOutOfBounds {
                index: (ix, iy, ieta),
                extents: (self.nx, self.ny, self.neta),
            });
        }
        Ok(self.flat_index(ix, iy, ieta))
    }

    /// Transverse coordinate x of column `ix` (fm).
    #[inline]
    pub fn x(&self, ix: usize) -> f64 {
        -self.x_size / 2.0 + ix as f64 * self.dx
    }

    /// Transverse coordinate y of row `iy` (fm).
    #[inline]
    pub fn y(&self, iy: usize) -> f64 {
        -self.y_size / 2.0 + iy as f64 * self.dy
    }

    /// Spacetime rapidity of slice `ieta`.
    #[inline]
    pub fn eta(&self, ieta: usize) -> f64 {
        self.deta * ieta as f64 - self.eta_size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_axis() {
        assert_eq!(
            Lattice::new(0, 3, 3, 0.1, 0.1, 0.1),
            Err(GridError::EmptyAxis { axis: "x" })
        );
        assert_eq!(
            Lattice::new(3, 3, 0, 0.1, 0.1, 0.1),
            Err(GridError::EmptyAxis { axis: "eta" })
        );
    }

    #[test]
    fn rejects_bad_spacing() {
        assert!(matches!(
            Lattice::new(3, 3, 3, 0.1, -0.1, 0.1),
            Err(GridError::InvalidSpacing { axis: "y", .. })
        ));
        assert!(matches!(
            Lattice::new(3, 3, 3, 0.1, 0.1, f64::NAN),
            Err(GridError::InvalidSpacing { axis: "eta", .. })
        ));
    }

    #[test]
    fn single_slice_is_centered_at_zero() {
        let lat = Lattice::new(4, 4, 1, 0.1, 0.1, 0.1).unwrap();
        assert_eq!(lat.eta(0), 0.0);
    }

    #[test]
    fn checked_index_reports_extents() {
        let lat = Lattice::new(2, 3, 4, 1.0, 1.0, 1.0).unwrap();
        assert_eq!(lat.checked_index(1, 2, 3), Ok(23));
        assert_eq!(
            lat.checked_index(2, 0, 0),
            Err(GridError::IndexOutOfBounds {
                index: (2, 0, 0),
                extents: (2, 3, 4)
            })
        );
    }

    proptest! {
        #[test]
        fn grid_is_symmetric_about_origin(n in 1usize..64, d in 0.01f64..1.0) {
            let lat = Lattice::new(n, n, n, d, d, d).unwrap();
            prop_assert!((lat.x(0) + lat.x(n - 1)).abs() < 1e-9);
            prop_assert!((lat.y(0) + lat.y(n - 1)).abs() < 1e-9);
            prop_assert!((lat.eta(0) + lat.eta(n - 1)).abs() < 1e-9);
        }

        #[test]
        fn flat_index_is_a_bijection(nx in 1usize..8, ny in 1usize..8, neta in 1usize..8) {
            let lat = Lattice::new(nx, ny, neta, 1.0, 1.0, 1.0).unwrap();
            let mut seen = vec![false; lat.cell_count()];
            for ieta in 0..neta {
                for iy in 0..ny {
                    for ix in 0..nx {
                        let i = lat.flat_index(ix, iy, ieta);
                        prop_assert!(!seen[i]);
                        seen[i] = true;
                    }
                }
            }
            prop_assert!(seen.into_iter().all(|s| s));
        }
    }
}
