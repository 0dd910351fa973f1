//! The [`InitProtocol`] trait and the resources handed to it.
//!
//! A protocol runs in three phases, all driven by
//! [`GridInitializer`](crate::GridInitializer):
//!
//! 1. [`resolve`](InitProtocol::resolve): overwrite lattice dimensions or
//!    τ₀ from the data source. Runs before any snapshot is allocated.
//! 2. [`load`](InitProtocol::load): read whole-grid input into memory,
//!    single-threaded.
//! 3. [`fill_slice`](InitProtocol::fill_slice): fill one η slice of the
//!    previous and current snapshots. Called concurrently for distinct
//!    slices, so it takes `&self`.

use fireball_core::{EquationOfState, HydroSource, InitError};
use fireball_grid::Lattice;

use crate::context::SliceContext;
use crate::handoff::HandOffContext;

/// Lattice and initial time as resolved for the current run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSetup {
    /// Lattice the snapshots will be allocated with.
    pub lattice: Lattice,
    /// Initial proper time τ₀ (fm).
    pub tau0: f64,
}

/// External collaborators available to a protocol.
pub struct InitResources<'a> {
    /// Equation of state.
    pub eos: &'a dyn EquationOfState,
    /// Source collaborator for source-driven protocols.
    pub source: Option<&'a dyn HydroSource>,
    /// Pre-equilibrium hand-off.
    pub hand_off: &'a mut HandOffContext,
}

impl<'a> InitResources<'a> {
    /// The source collaborator, or [`InitError::MissingSource`] naming
    /// `protocol`.
    pub fn require_source(&self, protocol: &str) -> Result<&'a dyn HydroSource, InitError> {
        self.source.ok_or_else(|| InitError::MissingSource {
            protocol: protocol.to_string(),
        })
    }
}

/// One initial-condition protocol.
///
/// # Object safety
///
/// The registry stores protocols as `Box<dyn InitProtocol>`.
///
/// # Examples
///
/// A protocol that fills every cell with a constant energy density:
///
/// ```
/// use fireball_core::{Cell, InitError};
/// use fireball_init::{InitProtocol, SliceContext};
///
/// struct Constant(f64);
///
/// impl InitProtocol for Constant {
///     fn name(&self) -> &str { "constant" }
///
///     fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
///         for ix in 0..ctx.nx() {
///             for iy in 0..ctx.ny() {
///                 ctx.write(ix, iy, Cell::at_rest(self.0, 0.0));
///             }
///         }
///         Ok(())
///     }
/// }
///
/// assert_eq!(Constant(1.0).name(), "constant");
/// ```
pub trait InitProtocol: Send + Sync {
    /// Human-readable name for logs and errors.
    fn name(&self) -> &str;

    /// Overwrite grid dimensions or τ₀ before allocation.
    ///
    /// Default: keep the configured setup.
    fn resolve(
        &mut self,
        _setup: &mut GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        Ok(())
    }

    /// Read whole-grid input. Runs once, single-threaded, after
    /// allocation and before any [`fill_slice`](Self::fill_slice).
    ///
    /// Default: nothing to load.
    fn load(
        &mut self,
        _setup: &GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        Ok(())
    }

    /// Fill every cell of one η slice.
    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError>;
}
