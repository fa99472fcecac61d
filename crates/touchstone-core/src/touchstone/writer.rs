//! Touchstone writer
//!
//! Writes a [`Document`] as text of any supported version. Values that
//! have not been modified since they were read are written from the pair
//! found in the source whenever the data format is unchanged.

use std::borrow::Cow;
use std::fmt::{self, Write};

use ndarray::Array2;
use tracing::debug;

use super::convert::{encode_pair, format_number, from_hz, normalization_factor};
use super::document::Document;
use super::error::{ErrorList, TouchstoneError};
use super::keywords::KeywordKind;
use super::matrix::NetworkMatrix;
use super::matrix_reader::cell_order;
use super::options::OptionLine;
use super::types::{DataFormat, MatrixFormat, ParameterType, ReferenceResistance, TwoPortOrder, Version};
use crate::constants::{DEFAULT_NUMBER_OF_PORTS, MAX_PAIRS_PER_LINE};
use crate::frequency::FrequencyUnit;

/// Target version and encoding of the written text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    pub version: Version,
    pub data_format: DataFormat,
    pub frequency_unit: FrequencyUnit,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            version: Version::V2_1,
            data_format: DataFormat::MagnitudeAngle,
            frequency_unit: FrequencyUnit::GHz,
        }
    }
}

impl SerializeOptions {
    /// Options that write `doc` back in its own version, format and unit
    pub fn preserving(doc: &Document) -> Self {
        Self {
            version: doc.version(),
            data_format: doc.data_format(),
            frequency_unit: doc.frequency_unit(),
        }
    }
}

/// Serialize a document to Touchstone text
pub fn serialize(doc: &Document, options: &SerializeOptions) -> Result<String, ErrorList> {
    let mut out = String::new();
    doc.write_to(&mut out, options)?;
    debug!(
        version = %options.version,
        format = %options.data_format,
        points = doc.nfreq(),
        bytes = out.len(),
        "serialized touchstone document"
    );
    Ok(out)
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        if self
            .write_to(&mut buf, &SerializeOptions::preserving(self))
            .is_err()
        {
            return Err(fmt::Error);
        }
        f.write_str(&buf)
    }
}

/// Decisions taken before anything is written
struct Plan<'d> {
    target: Version,
    declare_version: bool,
    option_line: OptionLine,
    number_of_ports: Option<usize>,
    reference_keyword: Option<&'d [f64]>,
    matrix_format: MatrixFormat,
    /// Per-cell factor applied when moving Y/Z/G/H values between the
    /// normalized and unnormalized conventions
    factors: Option<Array2<f64>>,
}

impl<'d> Plan<'d> {
    fn new(doc: &'d Document, options: &SerializeOptions) -> Result<Self, TouchstoneError> {
        let target = options.version;
        let n = doc.number_of_ports();

        let (r_list, reference_keyword): (Vec<f64>, Option<&[f64]>) =
            match (doc.reference(), target) {
                (ReferenceResistance::Scalar(r), _) => (vec![*r], None),
                (ReferenceResistance::PerPort(values), Version::V1_0) => {
                    match doc.reference().collapse() {
                        Some(r) => (vec![r], None),
                        None => {
                            return Err(TouchstoneError::conversion(format!(
                                "version 1.0 has a single reference resistance, the document has {:?}",
                                values
                            )))
                        }
                    }
                }
                (ReferenceResistance::PerPort(values), Version::V1_1) if values.len() > 1 => {
                    (values.clone(), None)
                }
                (ReferenceResistance::PerPort(values), _) => {
                    (values.iter().take(1).copied().collect(), Some(values.as_slice()))
                }
            };
        let inline_per_port = r_list.len() > 1;

        let implied_ports = if inline_per_port {
            r_list.len()
        } else {
            DEFAULT_NUMBER_OF_PORTS
        };
        let number_of_ports = (target.is_v2() || n != implied_ports).then_some(n);

        let matrix_format = written_matrix_format(doc, target)?;

        if doc.mixed_mode_order().is_some() && !target.allows(KeywordKind::MixedModeOrder) {
            return Err(TouchstoneError::conversion(format!(
                "[Mixed-Mode Order] cannot be written in version {}",
                target
            )));
        }
        if doc.information().is_some() && !target.allows(KeywordKind::BeginInformation) {
            return Err(TouchstoneError::conversion(format!(
                "the information block cannot be written in version {}",
                target
            )));
        }
        check_implicit_noise(doc, target)?;

        Ok(Self {
            target,
            declare_version: target.is_v2()
                || (target == Version::V1_1 && !inline_per_port),
            option_line: OptionLine {
                frequency_unit: options.frequency_unit,
                parameter_type: doc.parameter_type(),
                data_format: options.data_format,
                reference: r_list,
                line: 0,
            },
            number_of_ports,
            reference_keyword,
            matrix_format,
            factors: renormalization(doc, target)?,
        })
    }
}

/// Layout to write: the document's own, or Full when the target cannot
/// store triangular data and every cell is present
fn written_matrix_format(doc: &Document, target: Version) -> Result<MatrixFormat, TouchstoneError> {
    let format = doc.matrix_format();
    if !format.is_triangular() {
        return Ok(MatrixFormat::Full);
    }
    if target.allows(KeywordKind::MatrixFormat) && (target.is_v2() || doc.number_of_ports() > 2) {
        return Ok(format);
    }
    if doc.points().iter().all(|p| p.matrix.is_complete()) {
        return Ok(MatrixFormat::Full);
    }
    Err(TouchstoneError::conversion(format!(
        "{} matrices with absent cells cannot be written in version {} for {} ports",
        format,
        target,
        doc.number_of_ports()
    )))
}

/// Version 1.0 noise data has no keyword and is recognized only by its
/// first frequency not exceeding the last network frequency
fn check_implicit_noise(doc: &Document, target: Version) -> Result<(), TouchstoneError> {
    if target.allows(KeywordKind::NoiseData) {
        return Ok(());
    }
    let Some(first) = doc.noise().and_then(<[_]>::first) else {
        return Ok(());
    };
    match doc.points().last() {
        Some(last) if first.frequency_hz <= last.frequency_hz => Ok(()),
        Some(last) => Err(TouchstoneError::conversion(format!(
            "version {} noise data must start at or below the last network frequency ({} Hz > {} Hz)",
            target, first.frequency_hz, last.frequency_hz
        ))),
        None => Err(TouchstoneError::conversion(format!(
            "version {} noise data needs network data before it",
            target
        ))),
    }
}

fn renormalization(doc: &Document, target: Version) -> Result<Option<Array2<f64>>, TouchstoneError> {
    let param = doc.parameter_type();
    if param == ParameterType::S
        || doc.version().normalizes_parameters() == target.normalizes_parameters()
    {
        return Ok(None);
    }

    let n = doc.number_of_ports();
    let refs = doc.reference().per_port(n);
    if refs.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
        return Err(TouchstoneError::conversion(format!(
            "{} parameters cannot be converted between version {} and {} with reference resistances {:?}",
            param,
            doc.version(),
            target,
            refs
        )));
    }

    let to_normalized = target.normalizes_parameters();
    Ok(Some(Array2::from_shape_fn((n, n), |(i, j)| {
        let k = normalization_factor(param, i, j, &refs);
        if to_normalized {
            k
        } else {
            1.0 / k
        }
    })))
}

impl Document {
    /// Write the document as Touchstone text
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        options: &SerializeOptions,
    ) -> Result<(), TouchstoneError> {
        let plan = Plan::new(self, options)?;
        let v2 = plan.target.is_v2();
        let n = self.number_of_ports();

        for comment in self.comments() {
            writeln!(writer, "!{}", comment)?;
        }
        if plan.declare_version {
            writeln!(writer, "[Version] {}", plan.target)?;
        }
        writeln!(writer, "{}", plan.option_line)?;

        if let Some(ports) = plan.number_of_ports {
            writeln!(writer, "[Number of Ports] {}", ports)?;
        }
        if v2 {
            if n == 2 {
                writeln!(writer, "[Two-Port Data Order] {}", TwoPortOrder::Order21_12.as_str())?;
            }
            writeln!(writer, "[Number of Frequencies] {}", self.nfreq())?;
            if let Some(noise) = self.noise() {
                writeln!(writer, "[Number of Noise Frequencies] {}", noise.len())?;
            }
        }
        if let Some(values) = plan.reference_keyword {
            write!(writer, "[Reference]")?;
            for r in values {
                write!(writer, " {}", format_number(*r))?;
            }
            writeln!(writer)?;
        }
        if plan.matrix_format.is_triangular() {
            writeln!(writer, "[Matrix Format] {}", plan.matrix_format)?;
        }
        if let Some(descriptors) = self.mixed_mode_order() {
            writeln!(writer, "[Mixed-Mode Order] {}", descriptors.join(" "))?;
        }
        if let Some(lines) = self.information() {
            writeln!(writer, "[Begin Information]")?;
            for line in lines {
                writeln!(writer, "{}", line)?;
            }
            writeln!(writer, "[End Information]")?;
        }

        if v2 {
            writeln!(writer, "[Network Data]")?;
        }
        let order = cell_order(n, plan.matrix_format, TwoPortOrder::Order21_12);
        let break_rows = !(n == 2 && plan.matrix_format == MatrixFormat::Full);
        for (index, point) in self.points().iter().enumerate() {
            let matrix = match &plan.factors {
                Some(k) => Cow::Owned(point.matrix.map_values(|i, j, v| v * k[[i, j]])),
                None => Cow::Borrowed(&point.matrix),
            };
            let unit = plan.option_line.frequency_unit;
            let frequency = point
                .raw_frequency(unit)
                .unwrap_or_else(|| from_hz(point.frequency_hz, unit));
            write!(writer, "{}", finite(frequency, "frequency")?)?;

            let mut on_line = 0;
            let mut row = None;
            for &(i, j) in &order {
                let new_row = break_rows && row.is_some_and(|r| r != i);
                if new_row || on_line == MAX_PAIRS_PER_LINE {
                    writeln!(writer)?;
                    write!(writer, " ")?;
                    on_line = 0;
                }
                row = Some(i);
                let [a, b] = encode_cell(&matrix, i, j, index, options.data_format)?;
                write!(writer, " {} {}", a, b)?;
                on_line += 1;
            }
            writeln!(writer)?;
        }

        if let Some(noise) = self.noise() {
            if plan.target.allows(KeywordKind::NoiseData) {
                writeln!(writer, "[Noise Data]")?;
            }
            let unit = plan.option_line.frequency_unit;
            for record in noise {
                let frequency = record
                    .raw_frequency(unit)
                    .unwrap_or_else(|| from_hz(record.frequency_hz, unit));
                writeln!(
                    writer,
                    "{} {} {} {} {}",
                    finite(frequency, "noise frequency")?,
                    finite(record.min_noise_figure_db, "minimum noise figure")?,
                    finite(record.gamma_opt_magnitude, "optimum reflection magnitude")?,
                    finite(record.gamma_opt_angle_deg, "optimum reflection angle")?,
                    finite(record.effective_noise_resistance, "effective noise resistance")?,
                )?;
            }
        }

        if v2 {
            writeln!(writer, "[End]")?;
        }
        Ok(())
    }
}

fn encode_cell(
    matrix: &NetworkMatrix,
    row: usize,
    col: usize,
    index: usize,
    format: DataFormat,
) -> Result<[String; 2], TouchstoneError> {
    let cell = matrix.cell(row, col).ok_or_else(|| {
        TouchstoneError::conversion(format!(
            "cell ({}, {}) of frequency point {} is absent",
            row + 1,
            col + 1,
            index + 1
        ))
    })?;
    let pair = cell
        .raw(format)
        .unwrap_or_else(|| encode_pair(format, cell.value));
    if pair.iter().any(|v| !v.is_finite()) {
        return Err(TouchstoneError::conversion(format!(
            "cell ({}, {}) of frequency point {} ({}) has no finite {} encoding",
            row + 1,
            col + 1,
            index + 1,
            cell.value,
            format
        )));
    }
    Ok([format_number(pair[0]), format_number(pair[1])])
}

fn finite(value: f64, what: &str) -> Result<String, TouchstoneError> {
    if value.is_finite() {
        Ok(format_number(value))
    } else {
        Err(TouchstoneError::conversion(format!("{} is {}", what, value)))
    }
}
