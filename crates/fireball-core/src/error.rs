//! Error types for the Fireball framework.
//!
//! Organized by subsystem: input parsing, grid initialization, the
//! pre-equilibrium hand-off, and the particle source.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// A readable input file whose content does not match its declared layout.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedInputError {
    /// File being parsed.
    pub path: PathBuf,
    /// 1-based line number, if the problem is tied to a line.
    pub line: Option<usize>,
    /// What was wrong.
    pub reason: String,
}

impl MalformedInputError {
    /// Create an error tied to a specific line.
    pub fn at_line(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
            reason: reason.into(),
        }
    }

    /// Create an error about the file as a whole.
    pub fn in_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed input {}", self.path.display())?;
        if let Some(line) = self.line {
            write!(f, " line {line}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl Error for MalformedInputError {}

/// Lifecycle violations of the pre-equilibrium hand-off buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandOffError {
    /// Consumption was attempted before the upstream model populated
    /// the buffers.
    NotPopulated,
    /// The buffers were already consumed by an earlier fill.
    AlreadyConsumed,
    /// One quantity's vector length differs from the energy-density vector.
    LengthMismatch {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// Length of the energy-density vector.
        expected: usize,
        /// Length found.
        found: usize,
    },
    /// The vector is too short to cover even one transverse cell per η
    /// slice, so no transverse extent `n` with `n² · neta ≤ len` exists.
    NonSquareGrid {
        /// Length of the energy-density vector.
        len: usize,
        /// Declared number of η slices.
        neta: usize,
    },
}

impl fmt::Display for HandOffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPopulated => write!(f, "hand-off buffers consumed before being populated"),
            Self::AlreadyConsumed => write!(f, "hand-off buffers already consumed"),
            Self::LengthMismatch {
                quantity,
                expected,
                found,
            } => write!(
                f,
                "hand-off vector '{quantity}' has {found} entries, expected {expected}"
            ),
            Self::NonSquareGrid { len, neta } => write!(
                f,
                "hand-off length {len} holds no n*n*{neta} grid with n >= 1"
            ),
        }
    }
}

impl Error for HandOffError {}

/// Errors from grid initialization.
///
/// Every variant is fatal: the initializer returns no partial grid.
#[derive(Clone, Debug, PartialEq)]
pub enum InitError {
    /// A required input file could not be opened or read.
    FileOpen {
        /// The path that failed.
        path: PathBuf,
        /// OS-level description.
        reason: String,
    },
    /// A required input file was readable but malformed.
    Malformed(MalformedInputError),
    /// The configured protocol id has no registered handler.
    UnknownProtocol {
        /// The unrecognized id.
        id: u32,
    },
    /// A longitudinal-profile selector is outside the supported set.
    UnsupportedProfile {
        /// Which profile family (`"energy"` or `"baryon"`).
        kind: &'static str,
        /// The rejected selector value.
        selector: i32,
    },
    /// The pre-equilibrium hand-off was misused.
    HandOff(HandOffError),
    /// A source-driven protocol was selected without a source collaborator.
    MissingSource {
        /// Name of the protocol that needed the source.
        protocol: String,
    },
    /// The configured Δτ differs from the frame width of the source.
    FrameMismatch {
        /// Name of the protocol that integrates the source.
        protocol: String,
        /// Δτ from the configuration.
        configured: f64,
        /// Frame width the source bins its deposits into.
        source_width: f64,
    },
    /// Shear reconstruction hit a vanishing `(u^τ)² − (u^η)²` denominator.
    DegenerateFlow {
        /// Flat index of the offending cell within its η slice.
        cell: usize,
        /// The denominator value.
        denominator: f64,
    },
    /// Lattice construction failed after dimensions were resolved.
    Grid {
        /// Description from the grid layer.
        reason: String,
    },
    /// The diagnostic density dump could not be written.
    Output {
        /// Target path.
        path: PathBuf,
        /// OS-level description.
        reason: String,
    },
}

impl InitError {
    /// Build a [`InitError::FileOpen`] from an I/O error.
    pub fn file_open(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileOpen { path, reason } => {
                write!(f, "cannot open initial file {}: {reason}", path.display())
            }
            Self::Malformed(e) => write!(f, "{e}"),
            Self::UnknownProtocol { id } => {
                write!(f, "initial-condition protocol {id} is not recognized")
            }
            Self::UnsupportedProfile { kind, selector } => {
                write!(f, "{kind} longitudinal profile selector {selector} out of range")
            }
            Self::HandOff(e) => write!(f, "hand-off: {e}"),
            Self::MissingSource { protocol } => {
                write!(f, "protocol '{protocol}' requires a hydro source")
            }
            Self::FrameMismatch {
                protocol,
                configured,
                source_width,
            } => write!(
                f,
                "protocol '{protocol}' integrates with delta_tau = {configured} fm \
                 but the source bins frames of {source_width} fm"
            ),
            Self::DegenerateFlow { cell, denominator } => write!(
                f,
                "shear reconstruction at cell {cell}: (u^tau)^2 - (u^eta)^2 = {denominator:e}"
            ),
            Self::Grid { reason } => write!(f, "grid: {reason}"),
            Self::Output { path, reason } => {
                write!(f, "cannot write {}: {reason}", path.display())
            }
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(e) => Some(e),
            Self::HandOff(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MalformedInputError> for InitError {
    fn from(e: MalformedInputError) -> Self {
        Self::Malformed(e)
    }
}

impl From<HandOffError> for InitError {
    fn from(e: HandOffError) -> Self {
        Self::HandOff(e)
    }
}

/// Errors from loading particle lists or configuring the source coupler.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceError {
    /// The particle list could not be opened or read.
    FileOpen {
        /// The path that failed.
        path: PathBuf,
        /// OS-level description.
        reason: String,
    },
    /// The particle list was readable but malformed.
    Malformed(MalformedInputError),
    /// The requested event does not exist in the file.
    EventNotFound {
        /// 0-based event index.
        index: usize,
    },
    /// The smearing kernel or source configuration is invalid.
    InvalidKernel {
        /// Which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileOpen { path, reason } => {
                write!(f, "cannot open particle list {}: {reason}", path.display())
            }
            Self::Malformed(e) => write!(f, "{e}"),
            Self::EventNotFound { index } => write!(f, "event {index} not found"),
            Self::InvalidKernel { reason } => write!(f, "invalid source configuration: {reason}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MalformedInputError> for SourceError {
    fn from(e: MalformedInputError) -> Self {
        Self::Malformed(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_includes_line() {
        let e = MalformedInputError::at_line("a.dat", 7, "expected 5 columns, found 3");
        assert_eq!(
            e.to_string(),
            "malformed input a.dat line 7: expected 5 columns, found 3"
        );
    }

    #[test]
    fn init_error_chains_source() {
        let e: InitError = HandOffError::NotPopulated.into();
        assert!(e.source().is_some());
        let e = InitError::UnknownProtocol { id: 77 };
        assert!(e.source().is_none());
        assert!(e.to_string().contains("77"));
    }

    #[test]
    fn frame_mismatch_names_both_widths() {
        let e = InitError::FrameMismatch {
            protocol: "source_integrated".to_string(),
            configured: 0.05,
            source_width: 0.1,
        };
        assert_eq!(
            e.to_string(),
            "protocol 'source_integrated' integrates with delta_tau = 0.05 fm \
             but the source bins frames of 0.1 fm"
        );
    }
}
