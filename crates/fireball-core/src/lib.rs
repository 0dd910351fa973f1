//! Core types and traits for the Fireball initial-state framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Fireball workspace:
//! the fluid [`Cell`], flow and shear-stress storage, physical constants,
//! error types, and the collaborator traits ([`EquationOfState`],
//! [`HydroSource`]) through which initialization reaches the outside world.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod constants;
pub mod error;
pub mod id;
pub mod traits;

pub use cell::{flow_from_spatial, Cell, FlowVec, ShearTensor, REST_FLOW};
pub use constants::{floor_epsilon, EPSILON_FLOOR, HBARC};
pub use error::{HandOffError, InitError, MalformedInputError, SourceError};
pub use id::ProtocolId;
pub use traits::{EquationOfState, HydroSource};
