//! The [`GridInitializer`]: protocol dispatch, allocation, parallel fill.
//!
//! # Phases
//!
//! 1. Build the protocol for `config.protocol` from the registry.
//! 2. `resolve`: the protocol may overwrite the lattice or τ₀.
//! 3. Validate the resolved lattice and allocate the three snapshots.
//! 4. `load`: whole-grid input is read, single-threaded.
//! 5. Fill every η slice of previous and current in parallel.
//! 6. Optionally dump the current densities.
//!
//! Any failure aborts the run; no partially filled grid is returned.

use rayon::prelude::*;

use fireball_core::{EquationOfState, HydroSource, InitError};
use fireball_grid::{GridArena, Lattice};

use crate::config::{ConfigError, InitConfig};
use crate::context::SliceContext;
use crate::dump;
use crate::handoff::HandOffContext;
use crate::protocol::{GridSetup, InitProtocol, InitResources};
use crate::registry::ProtocolRegistry;

/// Result of a successful initialization.
#[derive(Debug)]
pub struct InitializedGrid {
    /// Previous, current, and (zeroed) future snapshots.
    pub arena: GridArena,
    /// Lattice after protocol overwrites.
    pub lattice: Lattice,
    /// τ₀ after protocol overwrites (fm).
    pub tau0: f64,
}

/// Builds the initial grid for one run.
pub struct GridInitializer<'a> {
    config: InitConfig,
    registry: ProtocolRegistry,
    eos: &'a dyn EquationOfState,
    source: Option<&'a dyn HydroSource>,
}

impl<'a> GridInitializer<'a> {
    /// Validate `config` and create an initializer with the standard
    /// protocol registry.
    pub fn new(config: InitConfig, eos: &'a dyn EquationOfState) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: ProtocolRegistry::standard(),
            eos,
            source: None,
        })
    }

    /// Attach the source collaborator used by source-driven protocols.
    pub fn with_source(mut self, source: &'a dyn HydroSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the protocol registry.
    pub fn with_registry(mut self, registry: ProtocolRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The validated configuration.
    pub fn config(&self) -> &InitConfig {
        &self.config
    }

    /// Run every phase and return the filled grid.
    ///
    /// `hand_off` is only touched by the pre-equilibrium protocol, which
    /// leaves it `Consumed`.
    pub fn initialize(&self, hand_off: &mut HandOffContext) -> Result<InitializedGrid, InitError> {
        self.run(hand_off).inspect_err(|e| {
            log::error!("initialization with protocol {} failed: {e}", self.config.protocol);
        })
    }

    fn run(&self, hand_off: &mut HandOffContext) -> Result<InitializedGrid, InitError> {
        let cfg = &self.config;
        let mut protocol = self.registry.build(cfg)?;
        log::info!("using initial profile {} ({})", cfg.protocol, protocol.name());

        let mut resources = InitResources {
            eos: self.eos,
            source: self.source,
            hand_off,
        };
        let mut setup = GridSetup {
            lattice: cfg.lattice,
            tau0: cfg.tau0,
        };
        protocol.resolve(&mut setup, &mut resources)?;
        setup
            .lattice
            .validate()
            .map_err(|e| InitError::Grid {
                reason: e.to_string(),
            })?;

        let mut arena = GridArena::new(setup.lattice);
        log::info!(
            "grid allocated: {} x {} x {} cells",
            setup.lattice.nx,
            setup.lattice.ny,
            setup.lattice.neta
        );

        protocol.load(&setup, &mut resources)?;
        let floored = self.fill(protocol.as_ref(), &setup, &mut arena)?;
        if floored > 0 {
            log::debug!("{floored} cell writes raised to the energy-density floor");
        }
        log::info!("initial distribution done");

        if let Some(path) = &cfg.density_dump {
            dump::write_density_profile(path, &arena.current, cfg.rhob_enabled)?;
        }

        Ok(InitializedGrid {
            lattice: setup.lattice,
            tau0: setup.tau0,
            arena,
        })
    }

    fn fill(
        &self,
        protocol: &dyn InitProtocol,
        setup: &GridSetup,
        arena: &mut GridArena,
    ) -> Result<usize, InitError> {
        let (previous, current) = arena.previous_and_current_mut();
        let floored = previous
            .slices_mut()
            .into_par_iter()
            .zip(current.slices_mut())
            .map(|(prev, cur)| {
                let mut ctx = SliceContext::new(
                    setup,
                    self.eos,
                    self.source,
                    self.config.rhob_enabled,
                    prev,
                    cur,
                );
                protocol.fill_slice(&mut ctx)?;
                Ok(ctx.floored_cells())
            })
            .collect::<Result<Vec<usize>, InitError>>()?;
        Ok(floored.into_iter().sum())
    }
}
