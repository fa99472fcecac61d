//! In-memory Touchstone document
//!
//! A [`Document`] is produced by the parser or by [`DocumentBuilder`] and is
//! always structurally valid: port counts, reference arity and matrix
//! layouts agree with each other.

use ndarray::{Array1, Array2, Array3};
use num_complex::Complex64;

use super::convert::to_hz;
use super::error::ErrorList;
use super::matrix::NetworkMatrix;
use super::types::{DataFormat, MatrixFormat, ParameterType, ReferenceResistance, Version};
use super::validate;
use crate::frequency::{Frequency, FrequencyUnit};

/// Network parameters at one frequency
#[derive(Debug, Clone)]
pub struct FrequencyPoint {
    pub frequency_hz: f64,
    pub matrix: NetworkMatrix,
    /// Frequency as written in the source and its unit
    raw_frequency: Option<(f64, FrequencyUnit)>,
}

impl FrequencyPoint {
    pub fn new(frequency_hz: f64, matrix: NetworkMatrix) -> Self {
        Self {
            frequency_hz,
            matrix,
            raw_frequency: None,
        }
    }

    pub(crate) fn from_raw(value: f64, unit: FrequencyUnit, matrix: NetworkMatrix) -> Self {
        Self {
            frequency_hz: to_hz(value, unit),
            matrix,
            raw_frequency: Some((value, unit)),
        }
    }

    /// Frequency as written in the source, if it was written in `unit`
    pub(crate) fn raw_frequency(&self, unit: FrequencyUnit) -> Option<f64> {
        raw_in(self.raw_frequency, self.frequency_hz, unit)
    }
}

impl PartialEq for FrequencyPoint {
    fn eq(&self, other: &Self) -> bool {
        self.frequency_hz == other.frequency_hz && self.matrix == other.matrix
    }
}

/// Two-port noise parameters at one frequency
#[derive(Debug, Clone)]
pub struct NoiseRecord {
    pub frequency_hz: f64,
    pub min_noise_figure_db: f64,
    pub gamma_opt_magnitude: f64,
    pub gamma_opt_angle_deg: f64,
    /// Effective noise resistance, as written in the file
    pub effective_noise_resistance: f64,
    raw_frequency: Option<(f64, FrequencyUnit)>,
}

impl NoiseRecord {
    pub fn new(
        frequency_hz: f64,
        min_noise_figure_db: f64,
        gamma_opt_magnitude: f64,
        gamma_opt_angle_deg: f64,
        effective_noise_resistance: f64,
    ) -> Self {
        Self {
            frequency_hz,
            min_noise_figure_db,
            gamma_opt_magnitude,
            gamma_opt_angle_deg,
            effective_noise_resistance,
            raw_frequency: None,
        }
    }

    /// Build from the five values of a record, frequency in `unit`
    pub(crate) fn from_values(values: [f64; 5], unit: FrequencyUnit) -> Self {
        let [freq, nf, mag, angle, rn] = values;
        Self {
            raw_frequency: Some((freq, unit)),
            ..Self::new(to_hz(freq, unit), nf, mag, angle, rn)
        }
    }

    /// Optimum source reflection coefficient
    pub fn gamma_opt(&self) -> Complex64 {
        Complex64::from_polar(
            self.gamma_opt_magnitude,
            self.gamma_opt_angle_deg.to_radians(),
        )
    }

    pub(crate) fn raw_frequency(&self, unit: FrequencyUnit) -> Option<f64> {
        raw_in(self.raw_frequency, self.frequency_hz, unit)
    }
}

impl PartialEq for NoiseRecord {
    fn eq(&self, other: &Self) -> bool {
        self.frequency_hz == other.frequency_hz
            && self.min_noise_figure_db == other.min_noise_figure_db
            && self.gamma_opt_magnitude == other.gamma_opt_magnitude
            && self.gamma_opt_angle_deg == other.gamma_opt_angle_deg
            && self.effective_noise_resistance == other.effective_noise_resistance
    }
}

fn raw_in(raw: Option<(f64, FrequencyUnit)>, hz: f64, unit: FrequencyUnit) -> Option<f64> {
    match raw {
        Some((value, raw_unit)) if raw_unit == unit && to_hz(value, unit) == hz => Some(value),
        _ => None,
    }
}

/// A complete Touchstone data set
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) version: Version,
    pub(crate) number_of_ports: usize,
    pub(crate) parameter_type: ParameterType,
    pub(crate) frequency_unit: FrequencyUnit,
    pub(crate) data_format: DataFormat,
    pub(crate) reference: ReferenceResistance,
    pub(crate) matrix_format: MatrixFormat,
    pub(crate) points: Vec<FrequencyPoint>,
    pub(crate) noise: Option<Vec<NoiseRecord>>,
    pub(crate) comments: Vec<String>,
    pub(crate) mixed_mode_order: Option<Vec<String>>,
    pub(crate) information: Option<Vec<String>>,
}

impl Document {
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn number_of_ports(&self) -> usize {
        self.number_of_ports
    }

    pub fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }

    /// Unit the frequencies were declared in
    pub fn frequency_unit(&self) -> FrequencyUnit {
        self.frequency_unit
    }

    pub fn data_format(&self) -> DataFormat {
        self.data_format
    }

    pub fn reference(&self) -> &ReferenceResistance {
        &self.reference
    }

    pub fn matrix_format(&self) -> MatrixFormat {
        self.matrix_format
    }

    pub fn points(&self) -> &[FrequencyPoint] {
        &self.points
    }

    pub fn noise(&self) -> Option<&[NoiseRecord]> {
        self.noise.as_deref()
    }

    /// Comment texts in file order, without the `!` marker
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn mixed_mode_order(&self) -> Option<&[String]> {
        self.mixed_mode_order.as_deref()
    }

    /// Lines of the `[Begin Information]` block
    pub fn information(&self) -> Option<&[String]> {
        self.information.as_deref()
    }

    /// Number of frequency points
    pub fn nfreq(&self) -> usize {
        self.points.len()
    }

    /// Frequency axis in the declared unit
    pub fn frequency(&self) -> Frequency {
        Frequency::from_hz(
            self.points.iter().map(|p| p.frequency_hz).collect(),
            self.frequency_unit,
        )
    }

    /// Stack all matrices into `[nfreq, nports, nports]`
    ///
    /// Returns `None` if any point has absent cells.
    pub fn to_array3(&self) -> Option<Array3<Complex64>> {
        let n = self.number_of_ports;
        let mut out = Array3::zeros((self.points.len(), n, n));
        for (k, point) in self.points.iter().enumerate() {
            let matrix = point.matrix.to_array()?;
            out.slice_mut(ndarray::s![k, .., ..]).assign(&matrix);
        }
        Some(out)
    }

    /// Values of cell (row, col) over frequency, `None` if any is absent
    pub fn parameter(&self, row: usize, col: usize) -> Option<Array1<Complex64>> {
        self.points
            .iter()
            .map(|p| p.matrix.get(row, col))
            .collect::<Option<Vec<_>>>()
            .map(Array1::from)
    }

    /// Start a builder holding a copy of this document
    pub fn to_builder(&self) -> DocumentBuilder {
        DocumentBuilder { doc: self.clone() }
    }
}

/// Assembles a [`Document`] field by field, validating on [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    /// Empty version 2.1 S-parameter document with `nports` ports
    pub fn new(nports: usize) -> Self {
        Self {
            doc: Document {
                version: Version::V2_1,
                number_of_ports: nports,
                parameter_type: ParameterType::default(),
                frequency_unit: FrequencyUnit::default(),
                data_format: DataFormat::default(),
                reference: ReferenceResistance::default(),
                matrix_format: MatrixFormat::default(),
                points: Vec::new(),
                noise: None,
                comments: Vec::new(),
                mixed_mode_order: None,
                information: None,
            },
        }
    }

    pub fn version(mut self, version: Version) -> Self {
        self.doc.version = version;
        self
    }

    pub fn parameter_type(mut self, parameter_type: ParameterType) -> Self {
        self.doc.parameter_type = parameter_type;
        self
    }

    pub fn frequency_unit(mut self, unit: FrequencyUnit) -> Self {
        self.doc.frequency_unit = unit;
        self
    }

    pub fn data_format(mut self, format: DataFormat) -> Self {
        self.doc.data_format = format;
        self
    }

    pub fn reference(mut self, reference: ReferenceResistance) -> Self {
        self.doc.reference = reference;
        self
    }

    pub fn matrix_format(mut self, format: MatrixFormat) -> Self {
        self.doc.matrix_format = format;
        self
    }

    pub fn point(mut self, frequency_hz: f64, matrix: NetworkMatrix) -> Self {
        self.doc.points.push(FrequencyPoint::new(frequency_hz, matrix));
        self
    }

    /// Add a point whose every cell is provided
    pub fn point_from_array(self, frequency_hz: f64, values: &Array2<Complex64>) -> Self {
        self.point(frequency_hz, NetworkMatrix::from_array(values))
    }

    /// Replace all points
    pub fn points(mut self, points: Vec<FrequencyPoint>) -> Self {
        self.doc.points = points;
        self
    }

    pub fn noise_record(mut self, record: NoiseRecord) -> Self {
        self.doc.noise.get_or_insert_with(Vec::new).push(record);
        self
    }

    /// Replace the noise block; `None` removes it
    pub fn noise(mut self, records: Option<Vec<NoiseRecord>>) -> Self {
        self.doc.noise = records;
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.doc.comments.push(text.into());
        self
    }

    pub fn mixed_mode_order(mut self, descriptors: Option<Vec<String>>) -> Self {
        self.doc.mixed_mode_order = descriptors;
        self
    }

    pub fn information(mut self, lines: Option<Vec<String>>) -> Self {
        self.doc.information = lines;
        self
    }

    /// Check every structural invariant and return the document
    ///
    /// An empty noise list in a version 1.0 document becomes `None`, since
    /// 1.0 has no keyword to write an empty block with.
    pub fn build(mut self) -> Result<Document, ErrorList> {
        let empty_noise = self.doc.noise.as_ref().is_some_and(Vec::is_empty);
        if self.doc.version == Version::V1_0 && empty_noise {
            self.doc.noise = None;
        }
        validate::check_document(&self.doc)?;
        Ok(self.doc)
    }
}
