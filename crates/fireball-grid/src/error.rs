//! Error types for lattice construction and grid access.

use std::fmt;

/// Errors arising from lattice construction or cell indexing.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// An extent along some axis is zero.
    EmptyAxis {
        /// Axis name (`"x"`, `"y"`, or `"eta"`).
        axis: &'static str,
    },
    /// A lattice spacing is not finite and positive.
    InvalidSpacing {
        /// Axis name.
        axis: &'static str,
        /// The rejected spacing.
        value: f64,
    },
    /// The total cell count overflows `usize`.
    TooManyCells,
    /// A cell index lies outside the lattice.
    IndexOutOfBounds {
        /// The offending `(ix, iy, ieta)`.
        index: (usize, usize, usize),
        /// The lattice extents `(nx, ny, neta)`.
        extents: (usize, usize, usize),
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis { axis } => write!(f, "lattice axis {axis} has zero cells"),
            Self::InvalidSpacing { axis, value } => {
                write!(f, "lattice spacing along {axis} must be finite and positive, got {value}")
            }
            Self::TooManyCells => write!(f, "lattice cell count overflows usize"),
            Self::IndexOutOfBounds { index, extents } => {
                write!(f, "cell index {index:?} out of bounds for extents {extents:?}")
            }
        }
    }
}

impl std::error::Error for GridError {}
