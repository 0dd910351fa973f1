//! Plain-text dump of the initial densities for inspection.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fireball_core::{InitError, HBARC};
use fireball_grid::GridSnapshot;

/// Write `x y η ε [ρ_B]` rows, η outermost, then x, then y. ε is
/// written in GeV/fm³.
pub fn write_density_profile(
    path: &Path,
    snapshot: &GridSnapshot,
    with_rhob: bool,
) -> Result<(), InitError> {
    log::info!("writing initial density profiles to {}", path.display());
    let output_error = |e: std::io::Error| InitError::Output {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let file = File::create(path).map_err(output_error)?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, snapshot, with_rhob).map_err(output_error)?;
    out.flush().map_err(output_error)
}

fn write_rows<W: Write>(out: &mut W, snapshot: &GridSnapshot, with_rhob: bool) -> std::io::Result<()> {
    write!(out, "# x(fm)  y(fm)  eta  ed(GeV/fm^3)")?;
    if with_rhob {
        write!(out, "  rhob(1/fm^3)")?;
    }
    writeln!(out)?;

    let lattice = snapshot.lattice();
    for ieta in 0..lattice.neta {
        let eta = lattice.eta(ieta);
        for ix in 0..lattice.nx {
            let x = lattice.x(ix);
            for iy in 0..lattice.ny {
                let cell = &snapshot[(ix, iy, ieta)];
                write!(
                    out,
                    "{x:18.8e}   {:18.8e}   {eta:18.8e}   {:18.8e}",
                    lattice.y(iy),
                    cell.epsilon * HBARC
                )?;
                if with_rhob {
                    write!(out, "   {:18.8e}", cell.rhob)?;
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
