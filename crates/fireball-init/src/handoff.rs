//! Pre-equilibrium hand-off: flat vectors supplied by an upstream model.
//!
//! The upstream collaborator fills a [`HandOffBuffers`] and passes it in
//! through a [`HandOffContext`]. The context moves through an explicit
//! lifecycle:
//!
//! ```text
//! Empty ──populate──▶ Populated ──take──▶ Consumed
//! ```
//!
//! Taking from `Empty` or `Consumed` is an error, never a silent no-op.
//! Every vector is indexed `ix + (iy + ieta·nx)·nx`.

use fireball_core::HandOffError;

/// Flat per-cell vectors from a pre-equilibrium model, in its units
/// (GeV/fm³ for densities, η components unscaled).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandOffBuffers {
    /// Energy density.
    pub energy_density: Vec<f64>,
    /// `u^τ`.
    pub u_tau: Vec<f64>,
    /// `u^x`.
    pub u_x: Vec<f64>,
    /// `u^y`.
    pub u_y: Vec<f64>,
    /// `u^η` (1/fm).
    pub u_eta: Vec<f64>,
    /// Shear components in [`ShearTensor`](fireball_core::ShearTensor)
    /// slot order.
    pub pi: [Vec<f64>; 10],
    /// Bulk viscous pressure.
    pub bulk_pi: Vec<f64>,
}

const PI_NAMES: [&str; 10] = [
    "pi_tautau",
    "pi_taux",
    "pi_tauy",
    "pi_taueta",
    "pi_xx",
    "pi_xy",
    "pi_xeta",
    "pi_yy",
    "pi_yeta",
    "pi_etaeta",
];

impl HandOffBuffers {
    /// Number of cells, taken from the energy-density vector.
    pub fn len(&self) -> usize {
        self.energy_density.len()
    }

    /// Whether no cells were supplied.
    pub fn is_empty(&self) -> bool {
        self.energy_density.is_empty()
    }

    /// Check that every vector has the energy-density length.
    pub fn check_lengths(&self) -> Result<(), HandOffError> {
        let expected = self.len();
        let named = [
            ("u_tau", &self.u_tau),
            ("u_x", &self.u_x),
            ("u_y", &self.u_y),
            ("u_eta", &self.u_eta),
            ("bulk_pi", &self.bulk_pi),
        ]
        .into_iter()
        .chain(PI_NAMES.into_iter().zip(self.pi.iter()));
        for (quantity, v) in named {
            if v.len() != expected {
                return Err(HandOffError::LengthMismatch {
                    quantity,
                    expected,
                    found: v.len(),
                });
            }
        }
        Ok(())
    }

    /// Transverse extent `n = ⌊√(len / neta)⌋` of the square grid.
    ///
    /// A length that is not exactly `n²·neta` is accepted with a warning;
    /// trailing entries are never read.
    pub fn transverse_extent(&self, neta: usize) -> Result<usize, HandOffError> {
        let len = self.len();
        let per_slice = if neta == 0 { 0 } else { len / neta };
        let mut n = (per_slice as f64).sqrt() as usize;
        // Guard against float rounding in either direction.
        while n * n > per_slice {
            n -= 1;
        }
        while (n + 1) * (n + 1) <= per_slice {
            n += 1;
        }
        if n == 0 {
            return Err(HandOffError::NonSquareGrid { len, neta });
        }
        if n * n * neta != len {
            log::warn!("hand-off length {len} is not {n}*{n}*{neta}; trailing entries ignored");
        }
        Ok(n)
    }
}

/// Ownership-transferring holder of the hand-off buffers.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HandOffContext {
    /// Nothing supplied yet.
    #[default]
    Empty,
    /// Buffers supplied and not yet consumed.
    Populated(HandOffBuffers),
    /// Buffers were consumed by a grid fill and released.
    Consumed,
}

impl HandOffContext {
    /// A context in the `Empty` state.
    pub fn new() -> Self {
        Self::Empty
    }

    /// A context already holding `buffers`.
    pub fn populated(buffers: HandOffBuffers) -> Self {
        Self::Populated(buffers)
    }

    /// Supply buffers, replacing anything supplied before.
    pub fn populate(&mut self, buffers: HandOffBuffers) {
        *self = Self::Populated(buffers);
    }

    /// Whether buffers are waiting to be consumed.
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }

    /// Whether the buffers were already consumed.
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }

    /// Borrow the buffers without consuming them.
    pub fn buffers(&self) -> Result<&HandOffBuffers, HandOffError> {
        match self {
            Self::Populated(b) => Ok(b),
            Self::Empty => Err(HandOffError::NotPopulated),
            Self::Consumed => Err(HandOffError::AlreadyConsumed),
        }
    }

    /// Move the buffers out, leaving the context `Consumed`.
    pub fn take(&mut self) -> Result<HandOffBuffers, HandOffError> {
        match std::mem::replace(self, Self::Consumed) {
            Self::Populated(b) => Ok(b),
            Self::Empty => {
                *self = Self::Empty;
                Err(HandOffError::NotPopulated)
            }
            Self::Consumed => Err(HandOffError::AlreadyConsumed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireball_core::ShearTensor;

    fn buffers(len: usize) -> HandOffBuffers {
        HandOffBuffers {
            energy_density: vec![1.0; len],
            u_tau: vec![1.0; len],
            u_x: vec![0.0; len],
            u_y: vec![0.0; len],
            u_eta: vec![0.0; len],
            pi: std::array::from_fn(|_| vec![0.0; len]),
            bulk_pi: vec![0.0; len],
        }
    }

    #[test]
    fn lifecycle_empty_populated_consumed() {
        let mut ctx = HandOffContext::new();
        assert_eq!(ctx.take(), Err(HandOffError::NotPopulated));
        assert_eq!(ctx, HandOffContext::Empty);

        ctx.populate(buffers(4));
        assert!(ctx.is_populated());
        assert_eq!(ctx.buffers().unwrap().len(), 4);

        let taken = ctx.take().unwrap();
        assert_eq!(taken.len(), 4);
        assert!(ctx.is_consumed());
        assert_eq!(ctx.take(), Err(HandOffError::AlreadyConsumed));
        assert_eq!(ctx.buffers().unwrap_err(), HandOffError::AlreadyConsumed);
    }

    #[test]
    fn length_mismatch_names_quantity() {
        let mut b = buffers(8);
        b.pi[ShearTensor::XE].pop();
        assert_eq!(
            b.check_lengths(),
            Err(HandOffError::LengthMismatch {
                quantity: "pi_xeta",
                expected: 8,
                found: 7
            })
        );
    }

    #[test]
    fn transverse_extent_floors() {
        assert_eq!(buffers(3 * 3 * 2).transverse_extent(2), Ok(3));
        assert_eq!(buffers(3 * 3 * 2 + 5).transverse_extent(2), Ok(3));
        assert_eq!(
            buffers(1).transverse_extent(2),
            Err(HandOffError::NonSquareGrid { len: 1, neta: 2 })
        );
    }
}
