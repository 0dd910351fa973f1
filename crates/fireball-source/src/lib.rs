//! Hadronic source terms for Fireball.
//!
//! Hadrons emitted by a transport model are read from OSCAR-2013
//! particle lists ([`oscar`]), kept as [`Hadron`] records, and deposited
//! onto the fluid as smooth densities by the [`HadronSource`], which
//! implements [`HydroSource`](fireball_core::HydroSource).
//!
//! Each hadron contributes in the single τ frame it crosses, smeared by
//! a Gaussian [`SmearingKernel`] normalized so that the Milne-volume
//! integral of its deposit, times Δτ, returns its four-momentum (or
//! charge).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coupler;
pub mod hadron;
pub mod kernel;
pub mod oscar;

pub use coupler::{ConservedTotals, HadronSource, HadronSourceBuilder, Quantity};
pub use hadron::{baryon_number_from_pdg, Hadron};
pub use kernel::SmearingKernel;
pub use oscar::{read_events, OscarLayout};
