//! Whitespace-delimited ASCII profile readers.
//!
//! Every reader returns [`InitError::FileOpen`] when the file cannot be
//! opened or read and [`InitError::Malformed`] when its content does not
//! parse. Blank lines and lines starting with `#` are skipped in data
//! sections.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use smallvec::SmallVec;

use fireball_core::{InitError, MalformedInputError};

/// One parsed data row. Snapshot files have at most 18 columns.
pub type Row = SmallVec<[f64; 18]>;

/// Rows of a fixed number of columns, stored flat.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    path: PathBuf,
    columns: usize,
    values: Vec<f64>,
}

impl Table {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len() / self.columns
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row `i`, exactly `columns` wide.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.columns..(i + 1) * self.columns]
    }

    /// Fail unless at least `rows` rows were read.
    pub fn require_rows(&self, rows: usize) -> Result<(), InitError> {
        if self.len() < rows {
            return Err(MalformedInputError::in_file(
                &self.path,
                format!("expected {rows} rows, found {}", self.len()),
            )
            .into());
        }
        Ok(())
    }

    /// Keep only the first `rows` rows.
    pub fn truncate(&mut self, rows: usize) {
        self.values.truncate(rows * self.columns);
    }
}

/// Lattice declaration from the first line of a tensor snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotHeader {
    /// Declared η extent.
    pub neta: usize,
    /// Declared x extent.
    pub nx: usize,
    /// Declared y extent.
    pub ny: usize,
    /// Declared η spacing.
    pub deta: f64,
    /// Declared x spacing (fm).
    pub dx: f64,
    /// Declared y spacing (fm).
    pub dy: f64,
}

pub(crate) fn open(path: &Path) -> Result<BufReader<File>, InitError> {
    log::debug!("reading {}", path.display());
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| InitError::file_open(path, &e))
}

fn is_data(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Parse every whitespace-separated token of `line` as `f64`.
pub fn parse_row(line: &str, path: &Path, line_no: usize) -> Result<Row, MalformedInputError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| {
                MalformedInputError::at_line(path, line_no, format!("non-numeric token {tok:?}"))
            })
        })
        .collect()
}

fn read_rows<R: BufRead>(
    reader: R,
    path: &Path,
    columns: usize,
    first_line_no: usize,
) -> Result<Table, InitError> {
    let mut values = Vec::new();
    for (offset, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| InitError::file_open(path, &e))?;
        if !is_data(&line) {
            continue;
        }
        let line_no = first_line_no + offset;
        let row = parse_row(&line, path, line_no)?;
        if row.len() < columns {
            return Err(MalformedInputError::at_line(
                path,
                line_no,
                format!("expected {columns} columns, found {}", row.len()),
            )
            .into());
        }
        values.extend_from_slice(&row[..columns]);
    }
    Ok(Table {
        path: path.to_path_buf(),
        columns,
        values,
    })
}

/// Read all data rows, keeping the first `columns` values of each.
pub fn read_table(path: &Path, columns: usize) -> Result<Table, InitError> {
    read_rows(open(path)?, path, columns, 1)
}

/// Read exactly `count` whitespace-separated values, ignoring line
/// structure. Extra values after the first `count` are ignored.
pub fn read_values(path: &Path, count: usize) -> Result<Vec<f64>, InitError> {
    let mut values = Vec::with_capacity(count);
    for (idx, line) in open(path)?.lines().enumerate() {
        let line = line.map_err(|e| InitError::file_open(path, &e))?;
        if !is_data(&line) {
            continue;
        }
        for v in parse_row(&line, path, idx + 1)? {
            if values.len() == count {
                return Ok(values);
            }
            values.push(v);
        }
    }
    if values.len() < count {
        return Err(MalformedInputError::in_file(
            path,
            format!("expected {count} values, found {}", values.len()),
        )
        .into());
    }
    Ok(values)
}

/// Parse the labeled header: the value of each of `neta nx ny deta dx dy`
/// is the token following the label.
pub fn parse_header(line: &str, path: &Path) -> Result<SnapshotHeader, MalformedInputError> {
    let tokens: SmallVec<[&str; 16]> = line.split_whitespace().collect();
    let value = |label: &str| -> Result<&str, MalformedInputError> {
        tokens
            .iter()
            .position(|t| *t == label)
            .and_then(|i| tokens.get(i + 1).copied())
            .ok_or_else(|| MalformedInputError::at_line(path, 1, format!("header lacks {label}")))
    };
    let int = |label: &str| -> Result<usize, MalformedInputError> {
        let tok = value(label)?;
        tok.parse().map_err(|_| {
            MalformedInputError::at_line(path, 1, format!("{label} is not a count: {tok:?}"))
        })
    };
    let real = |label: &str| -> Result<f64, MalformedInputError> {
        let tok = value(label)?;
        tok.parse().map_err(|_| {
            MalformedInputError::at_line(path, 1, format!("{label} is not a number: {tok:?}"))
        })
    };
    Ok(SnapshotHeader {
        neta: int("neta")?,
        nx: int("nx")?,
        ny: int("ny")?,
        deta: real("deta")?,
        dx: real("dx")?,
        dy: real("dy")?,
    })
}

/// Read a header line followed by rows of `columns` values.
pub fn read_snapshot(path: &Path, columns: usize) -> Result<(SnapshotHeader, Table), InitError> {
    let mut reader = open(path)?;
    let mut first = String::new();
    reader
        .read_line(&mut first)
        .map_err(|e| InitError::file_open(path, &e))?;
    let header = parse_header(&first, path)?;
    let table = read_rows(reader, path, columns, 2)?;
    Ok((header, table))
}
