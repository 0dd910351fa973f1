//! Strongly-typed identifiers.

use std::fmt;

/// Identifies an initial-condition protocol.
///
/// The numeric values follow the legacy parameter-file convention
/// (`0` Gubser test, `8`/`9`/`91`/`92` tensor snapshots, `11`
/// thickness functions, `42` pre-equilibrium hand-off, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolId(pub u32);

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProtocolId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
