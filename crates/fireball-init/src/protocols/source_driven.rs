//! Profiles driven by a [`HydroSource`] collaborator (protocols 13, 30).
//!
//! Both move τ₀ to the start of the source. The vacuum profile leaves
//! the fluid empty so the source feeds it during evolution; the
//! integrated profile front-loads everything the source deposits up to
//! and including the frame at τ₀.
//!
//! Both step in the configured Δτ, which must match the frame width of
//! a source that bins its deposits.
//!
//! [`HydroSource`]: fireball_core::HydroSource

use fireball_core::{Cell, HydroSource, InitError, EPSILON_FLOOR, REST_FLOW};

use crate::config::InitConfig;
use crate::context::SliceContext;
use crate::protocol::{GridSetup, InitProtocol, InitResources};

/// Earliest τ₀ the vacuum profile will start at (fm).
pub const MIN_VACUUM_TAU0: f64 = 0.1;

/// Relative difference below which two Δτ values are the same step.
const WIDTH_TOLERANCE: f64 = 1e-9;

fn check_frame_width(
    protocol: &str,
    source: &dyn HydroSource,
    delta_tau: f64,
) -> Result<(), InitError> {
    let Some(width) = source.frame_width() else {
        return Ok(());
    };
    if (width - delta_tau).abs() > WIDTH_TOLERANCE * width.max(delta_tau) {
        return Err(InitError::FrameMismatch {
            protocol: protocol.to_string(),
            configured: delta_tau,
            source_width: width,
        });
    }
    Ok(())
}

/// Empty fluid one step before the source switches on (protocol 13).
#[derive(Debug)]
pub struct SourceVacuumProfile {
    delta_tau: f64,
}

impl SourceVacuumProfile {
    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        Ok(Box::new(Self {
            delta_tau: cfg.delta_tau,
        }))
    }
}

impl InitProtocol for SourceVacuumProfile {
    fn name(&self) -> &str {
        "source_vacuum"
    }

    fn resolve(
        &mut self,
        setup: &mut GridSetup,
        resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let source = resources.require_source(self.name())?;
        check_frame_width(self.name(), source, self.delta_tau)?;
        setup.tau0 = (source.tau_min() - self.delta_tau).max(MIN_VACUUM_TAU0);
        log::info!("{}: tau0 set to {} fm", self.name(), setup.tau0);
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let cell = Cell::with_flow(EPSILON_FLOOR, 0.0, REST_FLOW);
        for ix in 0..ctx.nx() {
            for iy in 0..ctx.ny() {
                ctx.write(ix, iy, cell);
            }
        }
        Ok(())
    }
}

/// Fluid holding the source integrated through the frame at τ₀
/// (protocol 30).
#[derive(Debug)]
pub struct SourceIntegratedProfile {
    delta_tau: f64,
}

impl SourceIntegratedProfile {
    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        Ok(Box::new(Self {
            delta_tau: cfg.delta_tau,
        }))
    }
}

impl InitProtocol for SourceIntegratedProfile {
    fn name(&self) -> &str {
        "source_integrated"
    }

    fn resolve(
        &mut self,
        setup: &mut GridSetup,
        resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let source = resources.require_source(self.name())?;
        check_frame_width(self.name(), source, self.delta_tau)?;
        setup.tau0 = source.tau_min();
        log::info!("{}: tau0 set to {} fm", self.name(), setup.tau0);
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let source = ctx.source().ok_or_else(|| InitError::MissingSource {
            protocol: self.name().to_string(),
        })?;
        let (tau0, eta) = (ctx.tau0(), ctx.eta());
        for ix in 0..ctx.nx() {
            let x = ctx.x(ix);
            for iy in 0..ctx.ny() {
                let y = ctx.y(iy);
                let j = source.energy_source_before_tau(tau0, x, y, eta, self.delta_tau);
                let rhob = if ctx.rhob_enabled() {
                    source.baryon_source_before_tau(tau0, x, y, eta, self.delta_tau)
                } else {
                    0.0
                };
                ctx.write(ix, iy, Cell::at_rest(j[0], rhob));
            }
        }
        Ok(())
    }
}
