//! Built-in initial-condition protocols.
//!
//! | id | protocol |
//! |----|----------|
//! | 0 | [`GubserProfile`] |
//! | 1 | [`LongitudinalTestProfile`] |
//! | 8 | [`GlasmaFlowProfile`] |
//! | 9, 91, 92 | [`GlasmaTensorProfile`] |
//! | 11 | [`ThicknessProfile`] |
//! | 13 | [`SourceVacuumProfile`] |
//! | 30 | [`SourceIntegratedProfile`] |
//! | 42 | [`PreEquilibriumProfile`] |
//! | 101 | [`HybridProfile`] |

pub mod glasma;
pub mod gubser;
pub mod hybrid;
pub mod one_plus_one;
pub mod pre_equilibrium;
pub mod source_driven;
pub mod thickness;

pub use glasma::{GlasmaFlowProfile, GlasmaTensorProfile, TensorVariant};
pub use gubser::GubserProfile;
pub use hybrid::HybridProfile;
pub use one_plus_one::LongitudinalTestProfile;
pub use pre_equilibrium::PreEquilibriumProfile;
pub use source_driven::{SourceIntegratedProfile, SourceVacuumProfile};
pub use thickness::ThicknessProfile;

use std::path::Path;

use fireball_core::InitError;

use crate::reader;

/// A transverse `nx × ny` table read ix-major (`iy` fastest).
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TransverseTable {
    ny: usize,
    values: Vec<f64>,
}

impl TransverseTable {
    pub(crate) fn read(path: &Path, nx: usize, ny: usize) -> Result<Self, InitError> {
        Ok(Self {
            ny,
            values: reader::read_values(path, nx * ny)?,
        })
    }

    pub(crate) fn at(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy + ix * self.ny]
    }
}
