//! Initial-condition protocols and the grid initializer for Fireball.
//!
//! A run selects one protocol by numeric id. The [`GridInitializer`]
//! builds it from the [`ProtocolRegistry`], lets it adjust the lattice,
//! allocates the three grid snapshots, loads input, and fills every η
//! slice of the previous and current snapshots in parallel.
//!
//! # Protocol lifecycle
//!
//! 1. [`InitProtocol::resolve`]: overwrite lattice dimensions or τ₀.
//! 2. [`InitProtocol::load`]: read whole-grid input, single-threaded.
//! 3. [`InitProtocol::fill_slice`]: fill one η slice through a
//!    [`SliceContext`]; slices run concurrently.
//!
//! Every cell written through the context has `ε ≥ EPSILON_FLOOR`, and
//! `ρ_B = 0` when baryon transport is off.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod context;
pub mod dump;
pub mod handoff;
pub mod initializer;
pub mod longitudinal;
pub mod protocol;
pub mod protocols;
pub mod reader;
pub mod registry;
pub mod tensor;

pub use config::{ConfigError, DepositionMode, InitConfig, LongitudinalConfig, ProfilePaths};
pub use context::SliceContext;
pub use dump::write_density_profile;
pub use handoff::{HandOffBuffers, HandOffContext};
pub use initializer::{GridInitializer, InitializedGrid};
pub use longitudinal::{BaryonShape, EnvelopeShape, LongitudinalProfile};
pub use protocol::{GridSetup, InitProtocol, InitResources};
pub use protocols::TensorVariant;
pub use registry::{ProtocolFactory, ProtocolRegistry};
pub use tensor::{reconstruct, SpatialShear};
