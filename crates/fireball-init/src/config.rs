//! Initializer configuration and validation.
//!
//! [`InitConfig`] is the complete input of
//! [`GridInitializer`](crate::GridInitializer). It is a plain struct with
//! defaults; [`InitConfig::validate`] checks structural invariants before
//! any file is touched.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use fireball_core::{EquationOfState, ProtocolId, HBARC};
use fireball_grid::{GridError, Lattice};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`InitConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The configured lattice is unusable.
    Lattice(GridError),
    /// `tau0` is not finite and positive.
    InvalidTau0 {
        /// The rejected value.
        value: f64,
    },
    /// `delta_tau` is not finite and positive.
    InvalidDeltaTau {
        /// The rejected value.
        value: f64,
    },
    /// `s_factor` is not finite and non-negative.
    InvalidScaleFactor {
        /// The rejected value.
        value: f64,
    },
    /// A longitudinal-profile parameter is out of range.
    InvalidLongitudinal {
        /// Description of the violation.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice(e) => write!(f, "lattice: {e}"),
            Self::InvalidTau0 { value } => {
                write!(f, "tau0 must be finite and > 0, got {value}")
            }
            Self::InvalidDeltaTau { value } => {
                write!(f, "delta_tau must be finite and > 0, got {value}")
            }
            Self::InvalidScaleFactor { value } => {
                write!(f, "s_factor must be finite and >= 0, got {value}")
            }
            Self::InvalidLongitudinal { reason } => write!(f, "longitudinal profile: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Lattice(e)
    }
}

// ── DepositionMode ─────────────────────────────────────────────────

/// How tabulated profile values are turned into energy density.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepositionMode {
    /// Values are energy densities in GeV/fm³.
    Energy,
    /// Values are entropy densities in fm⁻³, converted through the EOS.
    #[default]
    Entropy,
}

impl DepositionMode {
    /// Energy density (fm⁻⁴) for an envelope-weighted profile value.
    ///
    /// Energy mode: `value · s_factor / ħc`. Entropy mode:
    /// `eos.entropy_to_energy(value · s_factor, rhob)`.
    pub fn energy_density(
        self,
        value: f64,
        s_factor: f64,
        rhob: f64,
        eos: &dyn EquationOfState,
    ) -> f64 {
        match self {
            Self::Energy => value * s_factor / HBARC,
            Self::Entropy => eos.entropy_to_energy(value * s_factor, rhob),
        }
    }
}

// ── LongitudinalConfig ─────────────────────────────────────────────

/// Parameters of the rapidity envelopes.
///
/// `envelope` and `baryon_shape` are integer selectors: `1` or `2`.
/// Anything else is rejected when the profile is built.
#[derive(Clone, Debug, PartialEq)]
pub struct LongitudinalConfig {
    /// Energy envelope selector: 1 = plateau + Gaussian, 2 = Woods–Saxon.
    pub envelope: i32,
    /// Full width of the plateau.
    pub eta_flat: f64,
    /// Gaussian fall-off width (or Woods–Saxon diffuseness).
    pub eta_fall_off: f64,
    /// Beam rapidity bounding the left/right weights.
    pub beam_rapidity: f64,
    /// Baryon envelope selector: 1 = double Gaussian, 2 = plateau with tails.
    pub baryon_shape: i32,
    /// Peak position of the baryon envelope.
    pub eta_rhob_0: f64,
    /// Common width of the double-Gaussian baryon envelope.
    pub eta_rhob_width: f64,
    /// Outer width δ₁.
    pub eta_rhob_width_1: f64,
    /// Inner width δ₂.
    pub eta_rhob_width_2: f64,
    /// Plateau height A of the plateau-with-tails envelope.
    pub eta_rhob_plateau_height: f64,
}

impl Default for LongitudinalConfig {
    fn default() -> Self {
        Self {
            envelope: 1,
            eta_flat: 4.0,
            eta_fall_off: 0.4,
            beam_rapidity: 5.36,
            baryon_shape: 1,
            eta_rhob_0: 2.0,
            eta_rhob_width: 1.0,
            eta_rhob_width_1: 0.2,
            eta_rhob_width_2: 1.0,
            eta_rhob_plateau_height: 0.5,
        }
    }
}

impl LongitudinalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("eta_fall_off", self.eta_fall_off),
            ("beam_rapidity", self.beam_rapidity),
            ("eta_rhob_width", self.eta_rhob_width),
            ("eta_rhob_width_1", self.eta_rhob_width_1),
            ("eta_rhob_width_2", self.eta_rhob_width_2),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidLongitudinal {
                    reason: format!("{name} must be finite and > 0, got {value}"),
                });
            }
        }
        if !self.eta_flat.is_finite() || self.eta_flat < 0.0 {
            return Err(ConfigError::InvalidLongitudinal {
                reason: format!("eta_flat must be finite and >= 0, got {}", self.eta_flat),
            });
        }
        Ok(())
    }
}

// ── ProfilePaths ───────────────────────────────────────────────────

/// Locations of the input files read by the file-based protocols.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfilePaths {
    /// Tensor snapshot (protocols 8, 9, 91, 92) or fluctuation file (101).
    pub profile: PathBuf,
    /// Projectile thickness function T_A.
    pub thickness_a: PathBuf,
    /// Target thickness function T_B.
    pub thickness_b: PathBuf,
    /// Projectile baryon thickness.
    pub baryon_thickness_a: PathBuf,
    /// Target baryon thickness.
    pub baryon_thickness_b: PathBuf,
    /// Directory holding the Gubser-flow benchmark slices.
    pub gubser_dir: PathBuf,
    /// Directory holding the 1+1D benchmark tables.
    pub longitudinal_test_dir: PathBuf,
}

impl Default for ProfilePaths {
    fn default() -> Self {
        Self {
            profile: PathBuf::from("initial/initial_profile.dat"),
            thickness_a: PathBuf::from("initial/initial_TA.dat"),
            thickness_b: PathBuf::from("initial/initial_TB.dat"),
            baryon_thickness_a: PathBuf::from("initial/initial_rhob_TA.dat"),
            baryon_thickness_b: PathBuf::from("initial/initial_rhob_TB.dat"),
            gubser_dir: PathBuf::from("tests/Gubser_flow"),
            longitudinal_test_dir: PathBuf::from("tests/test_1+1D_with_Akihiko"),
        }
    }
}

// ── InitConfig ─────────────────────────────────────────────────────

/// Complete configuration of one grid initialization.
#[derive(Clone, Debug, PartialEq)]
pub struct InitConfig {
    /// Which initial-condition protocol to run.
    pub protocol: ProtocolId,
    /// Lattice hint. Several protocols overwrite parts of it.
    pub lattice: Lattice,
    /// Initial proper time τ₀ (fm). Source-driven protocols overwrite it.
    pub tau0: f64,
    /// Evolution time step Δτ (fm).
    pub delta_tau: f64,
    /// Energy or entropy deposition.
    pub deposition: DepositionMode,
    /// Overall normalization of profile values.
    pub s_factor: f64,
    /// Whether net-baryon transport is on.
    pub rhob_enabled: bool,
    /// Whether shear transport is on.
    pub shear_enabled: bool,
    /// Rapidity envelope parameters.
    pub longitudinal: LongitudinalConfig,
    /// Input file locations.
    pub paths: ProfilePaths,
    /// Write the initial densities here after filling, if set.
    pub density_dump: Option<PathBuf>,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolId(11),
            lattice: Lattice {
                nx: 200,
                ny: 200,
                neta: 1,
                dx: 0.1,
                dy: 0.1,
                deta: 0.1,
                x_size: 0.0,
                y_size: 0.0,
                eta_size: 0.0,
            }
            .with_derived_sizes(),
            tau0: 0.4,
            delta_tau: 0.02,
            deposition: DepositionMode::default(),
            s_factor: 1.0,
            rhob_enabled: false,
            shear_enabled: true,
            longitudinal: LongitudinalConfig::default(),
            paths: ProfilePaths::default(),
            density_dump: None,
        }
    }
}

impl InitConfig {
    /// Check structural invariants. Called by
    /// [`GridInitializer::new`](crate::GridInitializer::new).
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Lattice hint must be well-formed even if a protocol overwrites it.
        self.lattice.validate()?;
        // 2. Time parameters.
        if !self.tau0.is_finite() || self.tau0 <= 0.0 {
            return Err(ConfigError::InvalidTau0 { value: self.tau0 });
        }
        if !self.delta_tau.is_finite() || self.delta_tau <= 0.0 {
            return Err(ConfigError::InvalidDeltaTau {
                value: self.delta_tau,
            });
        }
        // 3. Normalization.
        if !self.s_factor.is_finite() || self.s_factor < 0.0 {
            return Err(ConfigError::InvalidScaleFactor {
                value: self.s_factor,
            });
        }
        // 4. Envelope parameters.
        self.longitudinal.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubling;

    impl EquationOfState for Doubling {
        fn entropy_to_energy(&self, s: f64, _rhob: f64) -> f64 {
            2.0 * s
        }
        fn pressure(&self, epsilon: f64, _rhob: f64) -> f64 {
            epsilon / 3.0
        }
        fn temperature(&self, _epsilon: f64, _rhob: f64) -> f64 {
            0.0
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(InitConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_time_parameters() {
        let mut cfg = InitConfig::default();
        cfg.tau0 = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidTau0 { .. })));

        let mut cfg = InitConfig::default();
        cfg.delta_tau = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDeltaTau { .. })
        ));
    }

    #[test]
    fn rejects_negative_scale_factor() {
        let mut cfg = InitConfig::default();
        cfg.s_factor = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidScaleFactor { .. })
        ));
    }

    #[test]
    fn rejects_zero_fall_off() {
        let mut cfg = InitConfig::default();
        cfg.longitudinal.eta_fall_off = 0.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("eta_fall_off"));
    }

    #[test]
    fn rejects_empty_lattice() {
        let mut cfg = InitConfig::default();
        cfg.lattice.neta = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Lattice(_))));
    }

    #[test]
    fn deposition_modes() {
        let eos = Doubling;
        let e = DepositionMode::Energy.energy_density(2.0, 0.5, 0.0, &eos);
        assert!((e - 1.0 / HBARC).abs() < 1e-12);
        let s = DepositionMode::Entropy.energy_density(2.0, 0.5, 0.0, &eos);
        assert_eq!(s, 2.0);
    }
}
