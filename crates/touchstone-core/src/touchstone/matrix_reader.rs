//! Matrix and noise data readers
//!
//! Both readers consume data lines one at a time and hand back a record as
//! soon as it is complete. A record always starts on a new line and may
//! continue over as many lines as needed.

use super::convert::decode_pair;
use super::document::{FrequencyPoint, NoiseRecord};
use super::error::TouchstoneError;
use super::matrix::{Cell, NetworkMatrix};
use super::tokenizer::Token;
use super::types::{DataFormat, MatrixFormat, TwoPortOrder};
use crate::constants::NOISE_VALUES_PER_RECORD;
use crate::frequency::FrequencyUnit;

/// Order in which cells appear on the data lines of one point
///
/// A full 2-port matrix follows `two_port`; every other layout is
/// row-major, restricted to the stored half for triangular formats.
pub fn cell_order(
    nports: usize,
    format: MatrixFormat,
    two_port: TwoPortOrder,
) -> Vec<(usize, usize)> {
    if nports == 2 && format == MatrixFormat::Full && two_port == TwoPortOrder::Order21_12 {
        return vec![(0, 0), (1, 0), (0, 1), (1, 1)];
    }
    (0..nports)
        .flat_map(|row| (0..nports).map(move |col| (row, col)))
        .filter(|&(row, col)| format.stores(row, col))
        .collect()
}

/// Everything the reader needs to know about the data lines
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub nports: usize,
    pub matrix_format: MatrixFormat,
    pub data_format: DataFormat,
    pub frequency_unit: FrequencyUnit,
    pub two_port_order: TwoPortOrder,
    /// Every matrix row after the first must begin on a new line
    pub row_aligned: bool,
    /// Fill the unstored half of triangular matrices
    pub mirror: bool,
}

#[derive(Debug)]
struct Partial {
    frequency: f64,
    matrix: NetworkMatrix,
    next: usize,
    first: Option<f64>,
    line: usize,
}

/// Accumulates network data lines into frequency points
#[derive(Debug)]
pub struct MatrixReader {
    layout: Layout,
    order: Vec<(usize, usize)>,
    /// `row_starts[k]`: cell k opens a matrix row other than the first
    row_starts: Vec<bool>,
    partial: Option<Partial>,
    last: (usize, usize),
}

impl MatrixReader {
    pub fn new(layout: Layout) -> Self {
        let order = cell_order(layout.nports, layout.matrix_format, layout.two_port_order);
        let row_starts = order
            .iter()
            .enumerate()
            .map(|(k, &(row, _))| k > 0 && order[k - 1].0 != row)
            .collect();
        Self {
            layout,
            order,
            row_starts,
            partial: None,
            last: (0, 0),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// No point is in progress
    pub fn is_idle(&self) -> bool {
        self.partial.is_none()
    }

    /// Values making up one point, frequency included
    pub fn values_per_point(&self) -> usize {
        1 + 2 * self.order.len()
    }

    /// Consume one data line
    pub fn feed(
        &mut self,
        line: usize,
        tokens: &[Token<'_>],
    ) -> Result<Option<FrequencyPoint>, TouchstoneError> {
        let format = self.layout.data_format;

        for (idx, token) in tokens.iter().enumerate() {
            let value = token.number(line)?;
            self.last = (line, token.column + token.text.chars().count());

            let partial = match self.partial.as_mut() {
                Some(partial) => partial,
                None => {
                    self.partial = Some(Partial {
                        frequency: value,
                        matrix: NetworkMatrix::new(self.layout.nports),
                        next: 0,
                        first: None,
                        line,
                    });
                    continue;
                }
            };

            let Some(first) = partial.first.take() else {
                if self.layout.row_aligned && idx > 0 && self.row_starts[partial.next] {
                    let row = self.order[partial.next].0;
                    return Err(TouchstoneError::syntax(
                        line,
                        token.column,
                        format!("matrix row {} must start on a new line", row + 1),
                    ));
                }
                partial.first = Some(value);
                continue;
            };

            let (row, col) = self.order[partial.next];
            let cell = Cell::from_raw(decode_pair(format, first, value), format, [first, value]);
            partial.matrix.set_cell(row, col, cell);
            partial.next += 1;

            if partial.next == self.order.len() {
                if let Some(extra) = tokens.get(idx + 1) {
                    return Err(trailing_value(line, extra));
                }
                return Ok(self.complete());
            }
        }
        Ok(None)
    }

    fn complete(&mut self) -> Option<FrequencyPoint> {
        let Partial {
            frequency,
            mut matrix,
            ..
        } = self.partial.take()?;
        if self.layout.mirror && self.layout.matrix_format.is_triangular() {
            matrix.mirror(self.layout.matrix_format);
        }
        Some(FrequencyPoint::from_raw(
            frequency,
            self.layout.frequency_unit,
            matrix,
        ))
    }

    /// Fail if a point is still in progress
    pub fn ensure_idle(&self) -> Result<(), TouchstoneError> {
        match &self.partial {
            None => Ok(()),
            Some(partial) => {
                let read = 1 + 2 * partial.next + usize::from(partial.first.is_some());
                Err(incomplete(
                    self.last,
                    format!(
                        "frequency point starting at line {} has {} of {} values",
                        partial.line,
                        read,
                        self.values_per_point()
                    ),
                ))
            }
        }
    }
}

/// Accumulates noise data lines into noise records
#[derive(Debug)]
pub struct NoiseReader {
    unit: FrequencyUnit,
    values: Vec<f64>,
    start: usize,
    last: (usize, usize),
}

impl NoiseReader {
    pub fn new(unit: FrequencyUnit) -> Self {
        Self {
            unit,
            values: Vec::with_capacity(NOISE_VALUES_PER_RECORD),
            start: 0,
            last: (0, 0),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.values.is_empty()
    }

    pub fn feed(
        &mut self,
        line: usize,
        tokens: &[Token<'_>],
    ) -> Result<Option<NoiseRecord>, TouchstoneError> {
        for (idx, token) in tokens.iter().enumerate() {
            if self.values.is_empty() {
                self.start = line;
            }
            self.values.push(token.number(line)?);
            self.last = (line, token.column + token.text.chars().count());

            if self.values.len() == NOISE_VALUES_PER_RECORD {
                if let Some(extra) = tokens.get(idx + 1) {
                    return Err(trailing_value(line, extra));
                }
                let values = [
                    self.values[0],
                    self.values[1],
                    self.values[2],
                    self.values[3],
                    self.values[4],
                ];
                self.values.clear();
                return Ok(Some(NoiseRecord::from_values(values, self.unit)));
            }
        }
        Ok(None)
    }

    pub fn ensure_idle(&self) -> Result<(), TouchstoneError> {
        if self.is_idle() {
            return Ok(());
        }
        Err(incomplete(
            self.last,
            format!(
                "noise record starting at line {} has {} of {} values",
                self.start,
                self.values.len(),
                NOISE_VALUES_PER_RECORD
            ),
        ))
    }
}

fn trailing_value(line: usize, token: &Token<'_>) -> TouchstoneError {
    TouchstoneError::syntax(
        line,
        token.column,
        format!(
            "unexpected value '{}' after a complete record; records must start on a new line",
            token.text
        ),
    )
}

fn incomplete((line, column): (usize, usize), message: String) -> TouchstoneError {
    TouchstoneError::syntax(line, column, message)
}
