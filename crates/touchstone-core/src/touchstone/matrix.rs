//! Per-frequency network parameter matrix
//!
//! Every cell slot of an N×N matrix exists, but a cell is only present when
//! the file provided it or the layout defines it as the mirror of a
//! provided cell. Consumers never have to guess at symmetry.

use ndarray::Array2;
use num_complex::Complex64;

use super::types::{DataFormat, MatrixFormat};

/// Where a cell value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOrigin {
    /// Written in the file, or set explicitly
    Provided,
    /// Copied from the symmetric counterpart of a triangular layout
    Mirrored,
}

/// The pair of numbers a value was read from, with its encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawPair {
    pub format: DataFormat,
    pub values: [f64; 2],
}

/// One matrix cell
///
/// Equality compares value and origin; the source pair is not part of it.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub value: Complex64,
    pub origin: CellOrigin,
    raw: Option<RawPair>,
}

impl Cell {
    pub fn provided(value: Complex64) -> Self {
        Self {
            value,
            origin: CellOrigin::Provided,
            raw: None,
        }
    }

    pub(crate) fn from_raw(value: Complex64, format: DataFormat, values: [f64; 2]) -> Self {
        Self {
            value,
            origin: CellOrigin::Provided,
            raw: Some(RawPair { format, values }),
        }
    }

    /// The pair as written in the source, when it was written in `format`
    pub fn raw(&self, format: DataFormat) -> Option<[f64; 2]> {
        self.raw
            .filter(|raw| raw.format == format)
            .map(|raw| raw.values)
    }

    fn mirrored(&self) -> Self {
        Self {
            origin: CellOrigin::Mirrored,
            ..*self
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.origin == other.origin
    }
}

/// N×N matrix of optional cells
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkMatrix {
    cells: Array2<Option<Cell>>,
}

impl NetworkMatrix {
    /// A matrix with no cells present
    pub fn new(nports: usize) -> Self {
        Self {
            cells: Array2::from_elem((nports, nports), None),
        }
    }

    /// A full matrix with every cell provided
    pub fn from_array(values: &Array2<Complex64>) -> Self {
        Self {
            cells: values.mapv(|v| Some(Cell::provided(v))),
        }
    }

    pub fn nports(&self) -> usize {
        self.cells.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        self.cell(row, col).map(|c| c.value)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get((row, col)).and_then(|c| c.as_ref())
    }

    /// Set a cell as provided, replacing any previous value
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.cells[[row, col]] = Some(Cell::provided(value));
    }

    pub(crate) fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[[row, col]] = Some(cell);
    }

    /// Remove a cell
    pub fn clear(&mut self, row: usize, col: usize) {
        if let Some(slot) = self.cells.get_mut((row, col)) {
            *slot = None;
        }
    }

    /// Number of cells present with the given origin
    pub fn count(&self, origin: CellOrigin) -> usize {
        self.cells
            .iter()
            .filter(|c| c.map(|c| c.origin) == Some(origin))
            .count()
    }

    /// All N² cells present
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Dense values, if every cell is present
    pub fn to_array(&self) -> Option<Array2<Complex64>> {
        if !self.is_complete() {
            return None;
        }
        Some(self.cells.mapv(|c| c.map(|c| c.value).unwrap_or_default()))
    }

    /// Fill the half not stored by `format` from the stored half
    pub fn mirror(&mut self, format: MatrixFormat) {
        let n = self.nports();
        for row in 0..n {
            for col in 0..n {
                if format.stores(row, col) || self.cells[[row, col]].is_some() {
                    continue;
                }
                if let Some(source) = self.cells[[col, row]] {
                    self.cells[[row, col]] = Some(source.mirrored());
                }
            }
        }
    }

    /// Apply `f(row, col, value)` to every present cell
    ///
    /// Transformed cells lose their raw source pair.
    pub fn map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, usize, Complex64) -> Complex64,
    {
        let mut out = self.clone();
        for ((row, col), slot) in out.cells.indexed_iter_mut() {
            if let Some(cell) = slot {
                *cell = Cell {
                    value: f(row, col, cell.value),
                    origin: cell.origin,
                    raw: None,
                };
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_array_is_complete() {
        let values = array![
            [Complex64::new(0.1, 0.0), Complex64::new(0.9, 0.0)],
            [Complex64::new(0.9, 0.0), Complex64::new(0.1, 0.0)]
        ];
        let m = NetworkMatrix::from_array(&values);
        assert_eq!(m.nports(), 2);
        assert!(m.is_complete());
        assert_eq!(m.count(CellOrigin::Provided), 4);
        assert_eq!(m.to_array().unwrap(), values);
    }

    #[test]
    fn test_mirror_lower() {
        let mut m = NetworkMatrix::new(3);
        for row in 0..3 {
            for col in 0..=row {
                m.set(row, col, Complex64::new((10 * row + col) as f64, 0.0));
            }
        }
        assert!(!m.is_complete());
        assert_eq!(m.get(0, 2), None);

        m.mirror(MatrixFormat::Lower);
        assert!(m.is_complete());
        assert_eq!(m.get(0, 2), Some(Complex64::new(20.0, 0.0)));
        assert_eq!(m.cell(0, 2).unwrap().origin, CellOrigin::Mirrored);
        assert_eq!(m.cell(2, 0).unwrap().origin, CellOrigin::Provided);
        assert_eq!(m.count(CellOrigin::Mirrored), 3);
    }

    #[test]
    fn test_raw_pair_is_tied_to_its_format() {
        let cell = Cell::from_raw(
            Complex64::new(1.0, 0.0),
            DataFormat::MagnitudeAngle,
            [1.0, 0.0],
        );
        assert_eq!(cell.raw(DataFormat::MagnitudeAngle), Some([1.0, 0.0]));
        assert_eq!(cell.raw(DataFormat::RealImaginary), None);
    }

    #[test]
    fn test_map_values_drops_raw() {
        let mut m = NetworkMatrix::new(1);
        m.set_cell(
            0,
            0,
            Cell::from_raw(Complex64::new(2.0, 0.0), DataFormat::RealImaginary, [2.0, 0.0]),
        );
        let scaled = m.map_values(|_, _, v| v * 50.0);
        assert_eq!(scaled.get(0, 0), Some(Complex64::new(100.0, 0.0)));
        assert_eq!(scaled.cell(0, 0).unwrap().raw(DataFormat::RealImaginary), None);
    }
}
