//! OSCAR-2013 particle-list reader.
//!
//! Data lines carry 12 columns (`t x y z mass p0 px py pz pdg ID charge`)
//! or, in the extended layout, 10 more
//! (`ncoll form_time xsecfac proc_id_origin proc_type_origin
//! time_last_coll pdg_mother1 pdg_mother2 baryon_number strangeness`).
//! Lines starting with `#` are comments; a comment naming both `event`
//! and `end` closes the current event.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use smallvec::SmallVec;

use fireball_core::{MalformedInputError, SourceError};

use crate::hadron::Hadron;

/// Column layout of a particle list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OscarLayout {
    /// 12 columns.
    #[default]
    Standard,
    /// 22 columns.
    Extended,
}

impl OscarLayout {
    /// Number of columns per data line.
    pub fn columns(self) -> usize {
        match self {
            Self::Standard => 12,
            Self::Extended => 22,
        }
    }
}

fn is_event_end(line: &str) -> bool {
    line.starts_with('#') && line.contains("event") && line.contains(" end")
}

/// Parse one data line.
pub fn parse_hadron(
    line: &str,
    layout: OscarLayout,
    path: &Path,
    line_no: usize,
) -> Result<Hadron, MalformedInputError> {
    let tokens: SmallVec<[&str; 22]> = line.split_whitespace().collect();
    if tokens.len() < layout.columns() {
        return Err(MalformedInputError::at_line(
            path,
            line_no,
            format!("expected {} columns, found {}", layout.columns(), tokens.len()),
        ));
    }
    let real = |i: usize| -> Result<f64, MalformedInputError> {
        tokens[i].parse().map_err(|_| {
            MalformedInputError::at_line(path, line_no, format!("column {i} is not a number: {:?}", tokens[i]))
        })
    };
    let int = |i: usize| -> Result<i32, MalformedInputError> {
        tokens[i].parse().map_err(|_| {
            MalformedInputError::at_line(path, line_no, format!("column {i} is not an integer: {:?}", tokens[i]))
        })
    };

    let (t, z) = (real(0)?, real(3)?);
    let (e, pz) = (real(5)?, real(8)?);
    let mut h = Hadron::from_lab(t, real(1)?, real(2)?, z, real(4)?, e, real(6)?, real(7)?, pz, int(9)?)
        .ok_or_else(|| {
            MalformedInputError::at_line(
                path,
                line_no,
                format!("hadron outside the forward light cone (t={t}, z={z}, E={e}, pz={pz})"),
            )
        })?;
    h.id = int(10)?;
    h.electric_charge = int(11)?;

    if layout == OscarLayout::Extended {
        h.ncoll = real(12)?;
        h.formation_time = real(13)?;
        h.cross_section_factor = real(14)?;
        h.process_id_origin = int(15)?;
        h.process_type_origin = int(16)?;
        h.time_last_collision = real(17)?;
        h.parent_pdg = [int(18)?, int(19)?];
        h.baryon_number = int(20)?;
        h.strangeness = int(21)?;
    }
    Ok(h)
}

/// Read events `first_event .. first_event + n_events` (0-based).
///
/// # Errors
///
/// [`SourceError::EventNotFound`] for the first requested event the file
/// does not close; malformed data lines inside the requested range.
pub fn read_events(
    path: &Path,
    first_event: usize,
    n_events: usize,
    layout: OscarLayout,
) -> Result<Vec<Vec<Hadron>>, SourceError> {
    let file = File::open(path).map_err(|e| SourceError::FileOpen {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::debug!("reading particle list {}", path.display());

    let last = first_event + n_events;
    let mut events = Vec::with_capacity(n_events);
    let mut current = Vec::new();
    let mut index = 0;
    for (offset, line) in BufReader::new(file).lines().enumerate() {
        if index >= last {
            break;
        }
        let line = line.map_err(|e| SourceError::FileOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let trimmed = line.trim();
        if is_event_end(trimmed) {
            if index >= first_event {
                events.push(std::mem::take(&mut current));
            }
            index += 1;
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') || index < first_event {
            continue;
        }
        current.push(parse_hadron(trimmed, layout, path, offset + 1)?);
    }

    if events.len() < n_events {
        return Err(SourceError::EventNotFound {
            index: first_event + events.len(),
        });
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_line_derives_bookkeeping() {
        let h = parse_hadron(
            "2.0 0.1 -0.2 0.0 0.938 1.2 0.1 0.2 0.3 2212 17 1",
            OscarLayout::Standard,
            Path::new("p"),
            3,
        )
        .unwrap();
        assert_eq!((h.pdg, h.id, h.electric_charge), (2212, 17, 1));
        assert_eq!(h.baryon_number, 1);
        assert_eq!(h.ncoll, 1.0);
        assert_eq!(h.tau, 2.0);
    }

    #[test]
    fn extended_line_reads_every_column() {
        let h = parse_hadron(
            "2.0 0 0 0 0.14 0.3 0.1 0 0 211 4 1 0 0.5 0.8 12 5 1.7 2212 2112 0 0",
            OscarLayout::Extended,
            Path::new("p"),
            1,
        )
        .unwrap();
        assert!(h.is_spectator());
        assert_eq!(h.formation_time, 0.5);
        assert_eq!(h.cross_section_factor, 0.8);
        assert_eq!((h.process_id_origin, h.process_type_origin), (12, 5));
        assert_eq!(h.time_last_collision, 1.7);
        assert_eq!(h.parent_pdg, [2212, 2112]);
    }

    #[test]
    fn short_or_bad_lines_are_malformed() {
        let err = parse_hadron("1 2 3", OscarLayout::Standard, Path::new("p"), 9).unwrap_err();
        assert_eq!(err.line, Some(9));
        let err = parse_hadron(
            "2.0 0 0 0 0.14 0.3 0.1 0 0 pion 4 1",
            OscarLayout::Standard,
            Path::new("p"),
            2,
        )
        .unwrap_err();
        assert!(err.reason.contains("column 9"));
    }

    #[test]
    fn event_end_marker() {
        assert!(is_event_end("# event 0 end 0 impact   2.000"));
        assert!(!is_event_end("# event 0 out 12"));
        assert!(!is_event_end("1 2 3"));
    }
}
