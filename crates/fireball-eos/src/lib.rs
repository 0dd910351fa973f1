//! Equations of state for Fireball.
//!
//! The initializer only ever talks to an equation of state through
//! [`fireball_core::EquationOfState`]. Tabulated equations of state live
//! outside this workspace; this crate provides the analytic
//! [`IdealGas`] reference implementation used by tests, benchmarks, and
//! quick runs.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod ideal_gas;

pub use ideal_gas::IdealGas;
