//! Per-slice fill context passed to [`InitProtocol::fill_slice`].
//!
//! [`SliceContext`] owns disjoint mutable views of one η slice of the
//! previous and current snapshots, plus shared read access to the
//! resolved setup and the collaborators. Every write goes through
//! [`write`](SliceContext::write) or
//! [`write_pair`](SliceContext::write_pair), which apply the
//! energy-density floor and zero ρ_B when baryon transport is off.
//!
//! [`InitProtocol::fill_slice`]: crate::InitProtocol::fill_slice

use fireball_core::{floor_epsilon, Cell, EquationOfState, HydroSource, EPSILON_FLOOR};
use fireball_grid::{EtaSliceMut, Lattice};

use crate::protocol::GridSetup;

/// Execution context for filling one η slice.
pub struct SliceContext<'a> {
    setup: &'a GridSetup,
    eos: &'a dyn EquationOfState,
    source: Option<&'a dyn HydroSource>,
    rhob_enabled: bool,
    previous: EtaSliceMut<'a>,
    current: EtaSliceMut<'a>,
    floored: usize,
}

impl<'a> SliceContext<'a> {
    /// Construct a context over matching previous/current slice views.
    ///
    /// Typically called by the initializer, not by protocols directly.
    pub fn new(
        setup: &'a GridSetup,
        eos: &'a dyn EquationOfState,
        source: Option<&'a dyn HydroSource>,
        rhob_enabled: bool,
        previous: EtaSliceMut<'a>,
        current: EtaSliceMut<'a>,
    ) -> Self {
        debug_assert_eq!(previous.ieta(), current.ieta());
        Self {
            setup,
            eos,
            source,
            rhob_enabled,
            previous,
            current,
            floored: 0,
        }
    }

    /// Resolved lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.setup.lattice
    }

    /// Resolved τ₀.
    pub fn tau0(&self) -> f64 {
        self.setup.tau0
    }

    /// η index of this slice.
    pub fn ieta(&self) -> usize {
        self.current.ieta()
    }

    /// η coordinate of this slice.
    pub fn eta(&self) -> f64 {
        self.setup.lattice.eta(self.current.ieta())
    }

    /// Cells along x.
    pub fn nx(&self) -> usize {
        self.current.nx()
    }

    /// Cells along y.
    pub fn ny(&self) -> usize {
        self.current.ny()
    }

    /// x coordinate of column `ix`.
    pub fn x(&self, ix: usize) -> f64 {
        self.setup.lattice.x(ix)
    }

    /// y coordinate of row `iy`.
    pub fn y(&self, iy: usize) -> f64 {
        self.setup.lattice.y(iy)
    }

    /// Equation of state.
    pub fn eos(&self) -> &'a dyn EquationOfState {
        self.eos
    }

    /// Source collaborator, if one was supplied.
    pub fn source(&self) -> Option<&'a dyn HydroSource> {
        self.source
    }

    /// Whether net-baryon transport is on.
    pub fn rhob_enabled(&self) -> bool {
        self.rhob_enabled
    }

    /// Current-time cell at `(ix, iy)` as written so far.
    pub fn current(&self, ix: usize, iy: usize) -> &Cell {
        self.current.at(ix, iy)
    }

    /// Previous-time cell at `(ix, iy)` as written so far.
    pub fn previous(&self, ix: usize, iy: usize) -> &Cell {
        self.previous.at(ix, iy)
    }

    /// Write the same cell to both snapshots.
    pub fn write(&mut self, ix: usize, iy: usize, cell: Cell) {
        let cell = self.finish(cell);
        *self.current.at_mut(ix, iy) = cell;
        *self.previous.at_mut(ix, iy) = cell;
    }

    /// Write distinct current and previous cells.
    pub fn write_pair(&mut self, ix: usize, iy: usize, current: Cell, previous: Cell) {
        let current = self.finish(current);
        let previous = self.finish(previous);
        *self.current.at_mut(ix, iy) = current;
        *self.previous.at_mut(ix, iy) = previous;
    }

    /// Number of writes whose energy density was raised to the floor.
    pub fn floored_cells(&self) -> usize {
        self.floored
    }

    fn finish(&mut self, mut cell: Cell) -> Cell {
        if cell.epsilon.is_nan() || cell.epsilon < EPSILON_FLOOR {
            self.floored += 1;
        }
        cell.epsilon = floor_epsilon(cell.epsilon);
        if !self.rhob_enabled {
            cell.rhob = 0.0;
        }
        cell
    }
}
