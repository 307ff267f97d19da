use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

/// How raw table bytes are turned into selection rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableMode {
    /// Each row becomes a cumulative probability distribution.
    Probabilistic,
    /// Each row becomes one-hot at its largest raw byte.
    Deterministic,
}

impl TableMode {
    pub fn from_probabilistic(probabilistic: bool) -> Self {
        if probabilistic {
            TableMode::Probabilistic
        } else {
            TableMode::Deterministic
        }
    }
}

/// Row-major selection table: one row per input combination, one column per
/// output combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateTable {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl GateTable {
    /// Build a table from `rows * cols` raw genome bytes, normalized for `mode`.
    pub fn from_raw(raw: &[u8], rows: usize, cols: usize, mode: TableMode) -> Self {
        debug_assert_eq!(raw.len(), rows * cols);
        let mut cells = Vec::with_capacity(rows * cols);
        for (r, row) in raw.chunks_exact(cols).enumerate() {
            match mode {
                TableMode::Probabilistic => push_cumulative(&mut cells, row, r),
                TableMode::Deterministic => push_one_hot(&mut cells, row),
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }
}

fn push_cumulative(cells: &mut Vec<f64>, row: &[u8], r: usize) {
    let sum: f64 = row.iter().map(|&b| b as f64).sum();
    if sum == 0.0 {
        // all-zero row: uniform instead of 0/0
        tracing::debug!(row = r, "all-zero probability row, using uniform distribution");
        let n = row.len() as f64;
        cells.extend((1..=row.len()).map(|k| k as f64 / n));
        return;
    }
    let mut acc = 0.0;
    for &b in row {
        acc += b as f64 / sum;
        cells.push(acc);
    }
}

fn push_one_hot(cells: &mut Vec<f64>, row: &[u8]) {
    let mut best = 0;
    for (c, &b) in row.iter().enumerate() {
        if b > row[best] {
            best = c;
        }
    }
    cells.extend((0..row.len()).map(|c| if c == best { 1.0 } else { 0.0 }));
}

/// A decoded gate. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub input_addresses: Vec<usize>,
    pub output_addresses: Vec<usize>,
    pub table: GateTable,
}

impl Gate {
    /// Pack the states at `input_addresses` into a row index, first address
    /// most significant.
    pub fn row_index(&self, states: &BitSlice<u8, Lsb0>) -> usize {
        self.input_addresses
            .iter()
            .fold(0, |acc, &addr| (acc << 1) | states[addr] as usize)
    }

    /// First column whose stored value is at least `roll`. Falls back to the
    /// last column when rounding leaves the final cumulative entry below it.
    pub fn select_column(&self, row: usize, roll: f64) -> usize {
        let values = self.table.row(row);
        values
            .iter()
            .position(|&v| v >= roll)
            .unwrap_or(values.len() - 1)
    }

    /// Run the gate once against `states` with the uniform draw `roll`.
    ///
    /// The selected column is written right-aligned across
    /// `output_addresses`; only `1` bits are written, so a gate never clears
    /// a cell. Returns the selected column.
    pub fn fire(&self, states: &mut BitSlice<u8, Lsb0>, roll: f64) -> usize {
        let row = self.row_index(states);
        let column = self.select_column(row, roll);
        let width = self.output_addresses.len();
        for (i, &addr) in self.output_addresses.iter().enumerate() {
            if (column >> (width - 1 - i)) & 1 == 1 {
                states.set(addr, true);
            }
        }
        column
    }
}
