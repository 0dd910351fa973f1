//! Fireball: initial conditions for relativistic viscous hydrodynamics.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the Fireball sub-crates. Most users only need `fireball` as a single
//! dependency.
//!
//! # Quick start
//!
//! ```rust
//! use fireball::prelude::*;
//! use fireball::source::Hadron;
//!
//! // One proton formed at t = 1.2 fm feeds an otherwise empty fluid.
//! let mut source = HadronSource::builder().build().unwrap();
//! let proton = Hadron::from_lab(1.2, 0.0, 0.0, 0.0, 0.938, 1.0, 0.0, 0.0, 0.0, 2212).unwrap();
//! source.add_event(vec![proton]);
//!
//! let mut config = InitConfig::default();
//! config.protocol = ProtocolId(13);
//! config.lattice = Lattice::new(8, 8, 4, 0.5, 0.5, 0.25).unwrap();
//!
//! let eos = IdealGas::default();
//! let grid = GridInitializer::new(config, &eos)
//!     .unwrap()
//!     .with_source(&source)
//!     .initialize(&mut HandOffContext::new())
//!     .unwrap();
//!
//! assert!(grid.tau0 < 1.2);
//! assert!(grid.arena.current.cells().iter().all(|c| c.epsilon >= EPSILON_FLOOR));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fireball-core` | Cells, constants, errors, collaborator traits |
//! | [`grid`] | `fireball-grid` | Milne lattice and time-buffered snapshots |
//! | [`eos`] | `fireball-eos` | Reference equation of state |
//! | [`init`] | `fireball-init` | Protocols, registry and the grid initializer |
//! | [`source`] | `fireball-source` | OSCAR particle lists and hadronic sources |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cell types, constants, errors and collaborator traits (`fireball-core`).
///
/// Contains [`types::Cell`], [`types::ShearTensor`] and the two seams the
/// initializer talks through: [`types::EquationOfState`] and
/// [`types::HydroSource`].
pub use fireball_core as types;

/// Lattice geometry and grid storage (`fireball-grid`).
///
/// [`grid::Lattice`] describes the mesh; [`grid::GridArena`] holds the
/// previous, current and future [`grid::GridSnapshot`]s.
pub use fireball_grid as grid;

/// Reference equation of state (`fireball-eos`).
pub use fireball_eos as eos;

/// Initial-condition protocols and the initializer (`fireball-init`).
///
/// [`init::GridInitializer`] runs one protocol from
/// [`init::ProtocolRegistry`] over a fresh [`grid::GridArena`].
pub use fireball_init as init;

/// Hadronic source terms (`fireball-source`).
///
/// Read particle lists with [`source::read_events`] and couple them to
/// the fluid through [`source::HadronSource`].
pub use fireball_source as source;

/// Common imports for typical Fireball usage.
///
/// ```rust
/// use fireball::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use fireball_core::{
        Cell, EquationOfState, FlowVec, HydroSource, ProtocolId, ShearTensor, EPSILON_FLOOR,
        HBARC,
    };

    // Errors
    pub use fireball_core::{HandOffError, InitError, SourceError};

    // Grid
    pub use fireball_grid::{GridArena, GridSnapshot, Lattice};

    // EOS
    pub use fireball_eos::IdealGas;

    // Initializer
    pub use fireball_init::{
        DepositionMode, GridInitializer, HandOffBuffers, HandOffContext, InitConfig,
        InitProtocol, InitializedGrid, ProtocolRegistry,
    };

    // Sources
    pub use fireball_source::{HadronSource, OscarLayout};
}
