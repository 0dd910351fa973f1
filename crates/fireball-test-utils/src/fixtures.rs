//! On-disk input fixtures.
//!
//! [`ProfileDir`] owns a temporary directory and writes files in the
//! layouts the initializer and the particle reader expect:
//!
//! - [`write_transverse`](ProfileDir::write_transverse): thickness tables,
//!   one line per `ix`.
//! - [`write_snapshot`](ProfileDir::write_snapshot): labeled header plus
//!   `η x y ...` rows, ix-major.
//! - [`write_rows`](ProfileDir::write_rows): plain column tables (Gubser
//!   slices, 1+1D tables, fluctuation files).
//! - [`write_oscar`](ProfileDir::write_oscar): OSCAR-2013 particle lists.
//!
//! Writers panic on I/O failure; they are for tests only.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Header values of a tensor-snapshot file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotLayout {
    pub tau0: f64,
    pub neta: usize,
    pub nx: usize,
    pub ny: usize,
    pub deta: f64,
    pub dx: f64,
    pub dy: f64,
}

impl SnapshotLayout {
    /// A square `n × n` slice with spacing `d`.
    pub fn square(n: usize, d: f64) -> Self {
        Self {
            tau0: 0.4,
            neta: 1,
            nx: n,
            ny: n,
            deta: 0.1,
            dx: d,
            dy: d,
        }
    }

    /// Centered x coordinate of column `ix`.
    pub fn x(&self, ix: usize) -> f64 {
        (ix as f64 - (self.nx as f64 - 1.0) / 2.0) * self.dx
    }

    /// Centered y coordinate of row `iy`.
    pub fn y(&self, iy: usize) -> f64 {
        (iy as f64 - (self.ny as f64 - 1.0) / 2.0) * self.dy
    }

    fn header(&self) -> String {
        format!(
            "# tau_in_fm {} neta {} nx {} ny {} deta {} dx {} dy {}",
            self.tau0, self.neta, self.nx, self.ny, self.deta, self.dx, self.dy
        )
    }
}

/// A temporary directory of input files, removed on drop.
pub struct ProfileDir {
    dir: TempDir,
}

impl ProfileDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fixture directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the directory, without creating it.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `body` verbatim to `name`.
    pub fn write(&self, name: &str, body: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, body).expect("write fixture file");
        path
    }

    /// `nx` lines of `ny` values each, `value(ix, iy)`.
    pub fn write_transverse(
        &self,
        name: &str,
        nx: usize,
        ny: usize,
        value: impl Fn(usize, usize) -> f64,
    ) -> PathBuf {
        let mut body = String::new();
        for ix in 0..nx {
            let line: Vec<String> = (0..ny).map(|iy| value(ix, iy).to_string()).collect();
            let _ = writeln!(body, "{}", line.join(" "));
        }
        self.write(name, &body)
    }

    /// A transverse table from flat ix-major values.
    pub fn write_transverse_values(&self, name: &str, nx: usize, ny: usize, values: &[f64]) -> PathBuf {
        self.write_transverse(name, nx, ny, |ix, iy| values[iy + ix * ny])
    }

    /// Header line, then one row per transverse cell, ix-major:
    /// `0 x y` followed by `columns(ix, iy)`.
    pub fn write_snapshot(
        &self,
        name: &str,
        layout: &SnapshotLayout,
        columns: impl Fn(usize, usize) -> Vec<f64>,
    ) -> PathBuf {
        let mut body = layout.header();
        body.push('\n');
        for ix in 0..layout.nx {
            for iy in 0..layout.ny {
                let mut row = vec![0.0, layout.x(ix), layout.y(iy)];
                row.extend(columns(ix, iy));
                push_row(&mut body, &row);
            }
        }
        self.write(name, &body)
    }

    /// One whitespace-separated line per row.
    pub fn write_rows<R: AsRef<[f64]>>(&self, name: &str, rows: impl IntoIterator<Item = R>) -> PathBuf {
        let mut body = String::new();
        for row in rows {
            push_row(&mut body, row.as_ref());
        }
        self.write(name, &body)
    }

    /// OSCAR-2013 particle list. Each event is a list of rows of 12
    /// (`t x y z mass p0 px py pz pdg ID charge`) or 22 values.
    pub fn write_oscar<R: AsRef<[f64]>>(&self, name: &str, events: &[Vec<R>]) -> PathBuf {
        let extended = events
            .iter()
            .flatten()
            .next()
            .is_some_and(|r| r.as_ref().len() > 12);
        let mut body = String::from("#!OSCAR2013");
        body.push_str(if extended {
            "Extended particle_lists t x y z mass p0 px py pz pdg ID charge ncoll form_time \
             xsecfac proc_id_origin proc_type_origin time_last_coll pdg_mother1 pdg_mother2 \
             baryon_number strangeness\n"
        } else {
            " particle_lists t x y z mass p0 px py pz pdg ID charge\n"
        });
        body.push_str("# Units: fm fm fm fm GeV GeV GeV GeV GeV none none e\n");
        for (i, event) in events.iter().enumerate() {
            let _ = writeln!(body, "# event {i} out {}", event.len());
            for row in event {
                push_row(&mut body, row.as_ref());
            }
            let _ = writeln!(body, "# event {i} end 0 impact   0.000 scattering_projectile_target yes");
        }
        self.write(name, &body)
    }
}

impl Default for ProfileDir {
    fn default() -> Self {
        Self::new()
    }
}

fn push_row(body: &mut String, row: &[f64]) {
    let line: Vec<String> = row.iter().map(f64::to_string).collect();
    body.push_str(&line.join(" "));
    body.push('\n');
}
