//! Lattice geometry and grid storage for Fireball.
//!
//! This crate defines the [`Lattice`] (extents, spacings, and the map
//! from cell indices to Milne coordinates `(x, y, η)`) along with the
//! dense [`GridSnapshot`] cell store and the three-snapshot
//! [`GridArena`] (previous, current, future) shared with the evolution
//! step.
//!
//! # Layout
//!
//! Cells are stored x-fastest, then y, then η. Each η slice is one
//! contiguous chunk of `nx · ny` cells, so slices can be handed out as
//! disjoint mutable views ([`EtaSliceMut`]) and filled independently.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;
pub mod lattice;
pub mod snapshot;

pub use arena::GridArena;
pub use error::GridError;
pub use lattice::Lattice;
pub use snapshot::{EtaSliceMut, GridSnapshot};
