//! Benchmark profiles for the Fireball initial-condition pipeline.
//!
//! Provides reproducible inputs for benchmarks and profiling:
//!
//! - [`reference_lattice`]: 100×100×16 cells (160K)
//! - [`hand_off_buffers`]: a smooth pre-equilibrium hand-off for any lattice
//! - [`write_thickness_tables`]: Gaussian thickness files for protocol 11
//! - [`reference_event`]: a seeded hadron event for source benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use fireball_grid::Lattice;
use fireball_init::{HandOffBuffers, ProfilePaths};
use fireball_source::Hadron;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reference lattice: 100×100 transverse cells at 0.2 fm, 16 rapidity
/// slices at 0.25.
pub fn reference_lattice() -> Lattice {
    Lattice {
        nx: 100,
        ny: 100,
        neta: 16,
        dx: 0.2,
        dy: 0.2,
        deta: 0.25,
        x_size: 0.0,
        y_size: 0.0,
        eta_size: 0.0,
    }
    .with_derived_sizes()
}

fn gaussian_blob(lattice: &Lattice, ix: usize, iy: usize, radius: f64) -> f64 {
    let (x, y) = (lattice.x(ix), lattice.y(iy));
    (-(x * x + y * y) / (2.0 * radius * radius)).exp()
}

/// A hand-off with a Gaussian energy bump, mild radial flow, and a small
/// `π^{xx} = π^{yy}` shear, one entry per cell with `ix` running fastest.
pub fn hand_off_buffers(lattice: &Lattice) -> HandOffBuffers {
    let n = lattice.cell_count();
    let mut b = HandOffBuffers {
        energy_density: Vec::with_capacity(n),
        u_tau: Vec::with_capacity(n),
        u_x: Vec::with_capacity(n),
        u_y: Vec::with_capacity(n),
        u_eta: vec![0.0; n],
        pi: Default::default(),
        bulk_pi: vec![0.0; n],
    };
    for slot in &mut b.pi {
        *slot = vec![0.0; n];
    }
    for _ in 0..lattice.neta {
        for iy in 0..lattice.ny {
            for ix in 0..lattice.nx {
                let e = 20.0 * gaussian_blob(lattice, ix, iy, 3.0);
                let (ux, uy) = (0.05 * lattice.x(ix), 0.05 * lattice.y(iy));
                b.energy_density.push(e);
                b.u_x.push(ux);
                b.u_y.push(uy);
                b.u_tau.push((1.0 + ux * ux + uy * uy).sqrt());
            }
        }
    }
    for (idx, e) in b.energy_density.iter().enumerate() {
        b.pi[4][idx] = 0.01 * e;
        b.pi[7][idx] = 0.01 * e;
    }
    b
}

/// Write Gaussian projectile and target thickness tables into `dir`.
///
/// Baryon thickness files reuse the same tables.
pub fn write_thickness_tables(dir: &Path, lattice: &Lattice) -> io::Result<ProfilePaths> {
    let mut body = String::new();
    for ix in 0..lattice.nx {
        for iy in 0..lattice.ny {
            let _ = write!(body, "{} ", gaussian_blob(lattice, ix, iy, 4.0));
        }
        body.push('\n');
    }
    let table = dir.join("thickness.dat");
    fs::write(&table, body)?;
    Ok(ProfilePaths {
        thickness_a: table.clone(),
        thickness_b: table.clone(),
        baryon_thickness_a: table.clone(),
        baryon_thickness_b: table,
        ..ProfilePaths::default()
    })
}

/// A seeded event of `n` pions and protons formed on `τ ∈ [0.5, 1.5)`
/// inside `|x|, |y| < 5`, `|η_s| < 2`.
pub fn reference_event(n: usize, seed: u64) -> Vec<Hadron> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut event = Vec::with_capacity(n);
    while event.len() < n {
        let tau: f64 = rng.gen_range(0.5..1.5);
        let eta: f64 = rng.gen_range(-2.0..2.0);
        let (pdg, mass): (i32, f64) = if rng.gen_bool(0.8) { (211, 0.138) } else { (2212, 0.938) };
        let (px, py, pz): (f64, f64, f64) = (
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-1.0..1.0),
        );
        let e = (mass * mass + px * px + py * py + pz * pz).sqrt();
        let hadron = Hadron::from_lab(
            tau * eta.cosh(),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            tau * eta.sinh(),
            mass,
            e,
            px,
            py,
            pz,
            pdg,
        );
        event.extend(hadron);
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_off_matches_lattice() {
        let lattice = Lattice::new(6, 6, 2, 0.5, 0.5, 0.5).unwrap();
        let b = hand_off_buffers(&lattice);
        assert_eq!(b.len(), lattice.cell_count());
        assert_eq!(b.check_lengths(), Ok(()));
    }

    #[test]
    fn reference_event_is_reproducible() {
        let a = reference_event(50, 7);
        let b = reference_event(50, 7);
        assert_eq!(a.len(), 50);
        assert!(a.iter().zip(&b).all(|(x, y)| x.tau == y.tau && x.pdg == y.pdg));
        assert!(a.iter().all(|h| (0.5..1.5).contains(&h.tau)));
    }

    #[test]
    fn thickness_tables_hold_one_value_per_cell() {
        let dir = std::env::temp_dir().join(format!("fireball-bench-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let lattice = Lattice::new(4, 3, 1, 0.5, 0.5, 0.5).unwrap();
        let paths = write_thickness_tables(&dir, &lattice).unwrap();
        let text = fs::read_to_string(&paths.thickness_a).unwrap();
        assert_eq!(text.split_whitespace().count(), 12);
        fs::remove_dir_all(&dir).unwrap();
    }
}
