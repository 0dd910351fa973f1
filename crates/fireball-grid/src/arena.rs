//! The three time-buffered snapshots shared with the evolution step.
//!
//! [`GridArena`] holds the snapshots at `τ − Δτ` (previous), `τ`
//! (current), and `τ + Δτ` (future). Initialization writes previous and
//! current; the evolution step owns mutation and calls
//! [`rotate`](GridArena::rotate) after each step:
//!
//! ```text
//! previous ← current ← future ← (old previous, reused as scratch)
//! ```

use crate::lattice::Lattice;
use crate::snapshot::GridSnapshot;

/// Previous, current, and future grid snapshots over one lattice.
#[derive(Clone, Debug)]
pub struct GridArena {
    /// Snapshot at `τ − Δτ`.
    pub previous: GridSnapshot,
    /// Snapshot at `τ`.
    pub current: GridSnapshot,
    /// Snapshot at `τ + Δτ`.
    pub future: GridSnapshot,
}

impl GridArena {
    /// Allocate three zero-initialized snapshots with identical extents.
    pub fn new(lattice: Lattice) -> Self {
        Self {
            previous: GridSnapshot::new(lattice),
            current: GridSnapshot::new(lattice),
            future: GridSnapshot::new(lattice),
        }
    }

    /// The shared lattice.
    pub fn lattice(&self) -> &Lattice {
        self.current.lattice()
    }

    /// Whether all three snapshots still share the same extents.
    pub fn extents_match(&self) -> bool {
        let e = self.current.extents();
        self.previous.extents() == e && self.future.extents() == e
    }

    /// Advance one time level: the future becomes current, the current
    /// becomes previous, and the old previous buffer is recycled as the
    /// new future.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
        std::mem::swap(&mut self.current, &mut self.future);
    }

    /// Mutable access to previous and current at once.
    pub fn previous_and_current_mut(&mut self) -> (&mut GridSnapshot, &mut GridSnapshot) {
        (&mut self.previous, &mut self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_shares_extents() {
        let arena = GridArena::new(Lattice::new(4, 5, 6, 0.1, 0.1, 0.1).unwrap());
        assert!(arena.extents_match());
        assert_eq!(arena.current.extents(), (4, 5, 6));
    }

    #[test]
    fn rotate_cycles_buffers() {
        let mut arena = GridArena::new(Lattice::new(1, 1, 1, 1.0, 1.0, 1.0).unwrap());
        arena.previous[(0, 0, 0)].epsilon = 1.0;
        arena.current[(0, 0, 0)].epsilon = 2.0;
        arena.future[(0, 0, 0)].epsilon = 3.0;

        arena.rotate();

        assert_eq!(arena.previous[(0, 0, 0)].epsilon, 2.0);
        assert_eq!(arena.current[(0, 0, 0)].epsilon, 3.0);
        assert_eq!(arena.future[(0, 0, 0)].epsilon, 1.0);
        assert!(arena.extents_match());
    }
}
