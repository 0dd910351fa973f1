//! Dense cell storage for one time level of the grid.

use std::ops::{Index, IndexMut};

use fireball_core::Cell;

use crate::error::GridError;
use crate::lattice::Lattice;

/// A dense 3D array of [`Cell`]s over a [`Lattice`].
///
/// Freshly allocated snapshots hold `Cell::default()` (all zeros)
/// everywhere. Indexing with `(ix, iy, ieta)` is bounds-checked in
/// debug builds; use [`get`](Self::get) for a checked lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSnapshot {
    lattice: Lattice,
    cells: Vec<Cell>,
}

impl GridSnapshot {
    /// Allocate a zero-initialized snapshot.
    pub fn new(lattice: Lattice) -> Self {
        Self {
            cells: vec![Cell::default(); lattice.cell_count()],
            lattice,
        }
    }

    /// The lattice this snapshot was allocated for.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Extents `(nx, ny, neta)`.
    pub fn extents(&self) -> (usize, usize, usize) {
        (self.lattice.nx, self.lattice.ny, self.lattice.neta)
    }

    /// Checked cell lookup.
    pub fn get(&self, ix: usize, iy: usize, ieta: usize) -> Result<&Cell, GridError> {
        let i = self.lattice.checked_index(ix, iy, ieta)?;
        Ok(&self.cells[i])
    }

    /// Checked mutable cell lookup.
    pub fn get_mut(&mut self, ix: usize, iy: usize, ieta: usize) -> Result<&mut Cell, GridError> {
        let i = self.lattice.checked_index(ix, iy, ieta)?;
        Ok(&mut self.cells[i])
    }

    /// All cells in storage order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells of one η slice, x fastest.
    pub fn slice(&self, ieta: usize) -> &[Cell] {
        let len = self.lattice.slice_len();
        &self.cells[ieta * len..(ieta + 1) * len]
    }

    /// Disjoint mutable views of every η slice, in η order.
    pub fn slices_mut(&mut self) -> Vec<EtaSliceMut<'_>> {
        let (nx, ny) = (self.lattice.nx, self.lattice.ny);
        self.cells
            .chunks_exact_mut(nx * ny)
            .enumerate()
            .map(|(ieta, cells)| EtaSliceMut {
                ieta,
                nx,
                ny,
                cells,
            })
            .collect()
    }

    /// Copy every cell from `other`, which must share this lattice.
    pub fn copy_from(&mut self, other: &GridSnapshot) {
        debug_assert_eq!(self.extents(), other.extents());
        self.cells.copy_from_slice(&other.cells);
    }
}

impl Index<(usize, usize, usize)> for GridSnapshot {
    type Output = Cell;

    fn index(&self, (ix, iy, ieta): (usize, usize, usize)) -> &Cell {
        debug_assert!(
            ix < self.lattice.nx && iy < self.lattice.ny && ieta < self.lattice.neta,
            "cell ({ix}, {iy}, {ieta}) out of bounds"
        );
        &self.cells[self.lattice.flat_index(ix, iy, ieta)]
    }
}

impl IndexMut<(usize, usize, usize)> for GridSnapshot {
    fn index_mut(&mut self, (ix, iy, ieta): (usize, usize, usize)) -> &mut Cell {
        debug_assert!(
            ix < self.lattice.nx && iy < self.lattice.ny && ieta < self.lattice.neta,
            "cell ({ix}, {iy}, {ieta}) out of bounds"
        );
        let i = self.lattice.flat_index(ix, iy, ieta);
        &mut self.cells[i]
    }
}

/// Mutable view of a single η slice of a [`GridSnapshot`].
///
/// Views of different slices never alias, so they can be sent to
/// separate threads.
#[derive(Debug)]
pub struct EtaSliceMut<'a> {
    ieta: usize,
    nx: usize,
    ny: usize,
    cells: &'a mut [Cell],
}

impl EtaSliceMut<'_> {
    /// η index of this slice.
    pub fn ieta(&self) -> usize {
        self.ieta
    }

    /// Cells along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Cells along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cell at `(ix, iy)`.
    pub fn at(&self, ix: usize, iy: usize) -> &Cell {
        debug_assert!(ix < self.nx && iy < self.ny);
        &self.cells[ix + self.nx * iy]
    }

    /// Mutable cell at `(ix, iy)`.
    pub fn at_mut(&mut self, ix: usize, iy: usize) -> &mut Cell {
        debug_assert!(ix < self.nx && iy < self.ny);
        &mut self.cells[ix + self.nx * iy]
    }

    /// All cells of the slice, x fastest.
    pub fn cells(&self) -> &[Cell] {
        &*self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice() -> Lattice {
        Lattice::new(3, 2, 4, 0.1, 0.1, 0.1).unwrap()
    }

    #[test]
    fn new_snapshot_is_zeroed() {
        let snap = GridSnapshot::new(lattice());
        assert_eq!(snap.cells().len(), 24);
        assert!(snap.cells().iter().all(|c| *c == Cell::default()));
    }

    #[test]
    fn slices_are_disjoint_and_ordered() {
        let mut snap = GridSnapshot::new(lattice());
        for mut slice in snap.slices_mut() {
            let tag = slice.ieta() as f64;
            for iy in 0..slice.ny() {
                for ix in 0..slice.nx() {
                    slice.at_mut(ix, iy).epsilon = tag;
                }
            }
        }
        for ieta in 0..4 {
            assert!(snap.slice(ieta).iter().all(|c| c.epsilon == ieta as f64));
            assert_eq!(snap[(2, 1, ieta)].epsilon, ieta as f64);
        }
    }

    #[test]
    fn slice_view_matches_global_index() {
        let mut snap = GridSnapshot::new(lattice());
        {
            let mut slices = snap.slices_mut();
            slices[3].at_mut(1, 1).rhob = 7.0;
        }
        assert_eq!(snap.get(1, 1, 3).unwrap().rhob, 7.0);
    }

    #[test]
    fn checked_get_rejects_out_of_range() {
        let snap = GridSnapshot::new(lattice());
        assert!(snap.get(3, 0, 0).is_err());
        assert!(snap.get(0, 0, 4).is_err());
    }
}
