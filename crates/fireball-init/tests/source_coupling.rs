//! Source-driven protocols fed by a hadronic source read from an OSCAR
//! particle list.
//!
//! The integrated profile must put on the grid what the hadrons carry:
//! `Σ ε·τ₀·Δx·Δy·Δη` returns the total energy (in fm⁻¹) and the same sum
//! over ρ_B returns the net baryon number.

use fireball_core::{Cell, HydroSource, InitError, ProtocolId, EPSILON_FLOOR, HBARC};
use fireball_grid::Lattice;
use fireball_init::{DepositionMode, GridInitializer, HandOffContext, InitConfig, InitializedGrid};
use fireball_source::{HadronSource, OscarLayout};
use fireball_test_utils::{ConformalEos, ProfileDir};

const DELTA_TAU: f64 = 0.1;

/// `t x y z mass p0 px py pz pdg ID charge`.
fn proton(t: f64, x: f64, px: f64) -> [f64; 12] {
    let mass: f64 = 0.938;
    let e = (mass * mass + px * px).sqrt();
    [t, x, 0.0, 0.0, mass, e, px, 0.0, 0.0, 2212.0, 1.0, 1.0]
}

fn source_from(dir: &ProfileDir, rows: &[[f64; 12]]) -> HadronSource {
    let path = dir.write_oscar("particle_lists.oscar", &[rows.to_vec()]);
    let mut source = HadronSource::builder()
        .sigma(0.5)
        .delta_tau(DELTA_TAU)
        .build()
        .unwrap();
    source.read_events(&path, 0, 1, OscarLayout::Standard).unwrap();
    source
}

fn config(id: u32, lattice: Lattice) -> InitConfig {
    InitConfig {
        protocol: ProtocolId(id),
        lattice,
        deposition: DepositionMode::Energy,
        delta_tau: DELTA_TAU,
        rhob_enabled: true,
        ..Default::default()
    }
}

fn run(cfg: InitConfig, source: &HadronSource) -> Result<InitializedGrid, InitError> {
    GridInitializer::new(cfg, &ConformalEos)
        .unwrap()
        .with_source(source)
        .initialize(&mut HandOffContext::new())
}

/// `Σ f(cell) · τ₀ · Δx Δy Δη` over the current snapshot.
fn milne_sum(grid: &InitializedGrid, f: impl Fn(&Cell) -> f64) -> f64 {
    let lat = &grid.lattice;
    let volume = grid.tau0 * lat.dx * lat.dy * lat.deta;
    grid.arena.current.cells().iter().map(f).sum::<f64>() * volume
}

#[test]
fn integrated_profile_conserves_hadron_energy_and_baryon_number() {
    let dir = ProfileDir::new();
    let rows = [proton(1.0, 0.0, 0.0), proton(1.02, 0.5, 0.3)];
    let source = source_from(&dir, &rows);
    let energy: f64 = rows.iter().map(|r| r[5]).sum();

    // ±2.5 fm in x, y and τη: every kernel cutoff box fits inside.
    let lattice = Lattice::new(41, 41, 41, 0.125, 0.125, 0.125).unwrap();
    let grid = run(config(30, lattice), &source).unwrap();
    assert_eq!(grid.tau0, 1.0);

    let deposited = milne_sum(&grid, |c| c.epsilon) * HBARC;
    assert!(
        (deposited - energy).abs() < 1e-3 * energy,
        "deposited {deposited} GeV, hadrons carry {energy} GeV"
    );
    let baryon = milne_sum(&grid, |c| c.rhob);
    assert!((baryon - 2.0).abs() < 2e-3, "baryon number {baryon}");

    let peak = grid.arena.current[(20, 20, 20)];
    assert!(peak.epsilon > 1.0);
    assert!(grid.arena.current[(0, 0, 0)].epsilon == EPSILON_FLOOR);
}

#[test]
fn integrated_profile_skips_hadrons_past_the_first_frame() {
    let dir = ProfileDir::new();
    // The second proton crosses τ = 1.2, outside the frame at τ₀ = 1.0.
    let source = source_from(&dir, &[proton(1.0, 0.0, 0.0), proton(1.2, 0.0, 0.0)]);
    let lattice = Lattice::new(41, 41, 41, 0.125, 0.125, 0.125).unwrap();
    let grid = run(config(30, lattice), &source).unwrap();
    let baryon = milne_sum(&grid, |c| c.rhob);
    assert!((baryon - 1.0).abs() < 2e-3, "baryon number {baryon}");
}

#[test]
fn vacuum_profile_starts_one_frame_before_the_first_hadron() {
    let dir = ProfileDir::new();
    let source = source_from(&dir, &[proton(1.0, 0.0, 0.0)]);
    let grid = run(config(13, Lattice::new(3, 3, 2, 0.5, 0.5, 0.5).unwrap()), &source).unwrap();
    assert!((grid.tau0 - (source.tau_min() - DELTA_TAU)).abs() < 1e-12);
    for cell in grid.arena.current.cells() {
        assert_eq!(cell.epsilon, EPSILON_FLOOR);
        assert_eq!(cell.rhob, 0.0);
    }
}

#[test]
fn vacuum_profile_never_starts_before_the_minimum_tau0() {
    let dir = ProfileDir::new();
    let source = source_from(&dir, &[proton(0.15, 0.0, 0.0)]);
    let grid = run(config(13, Lattice::new(2, 2, 1, 0.5, 0.5, 0.5).unwrap()), &source).unwrap();
    assert_eq!(grid.tau0, 0.1);
}

#[test]
fn step_must_match_the_source_frame_width() {
    let dir = ProfileDir::new();
    let source = source_from(&dir, &[proton(1.0, 0.0, 0.0)]);
    for id in [13, 30] {
        let mut cfg = config(id, Lattice::new(2, 2, 1, 0.5, 0.5, 0.5).unwrap());
        cfg.delta_tau = 2.0 * DELTA_TAU;
        match run(cfg, &source) {
            Err(InitError::FrameMismatch {
                configured,
                source_width,
                ..
            }) => {
                assert_eq!(configured, 2.0 * DELTA_TAU);
                assert_eq!(source_width, DELTA_TAU);
            }
            other => panic!("protocol {id}: expected a frame mismatch, got {other:?}"),
        }
    }
}
