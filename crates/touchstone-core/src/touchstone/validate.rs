//! Cross-field checks
//!
//! [`check_document`] enforces the structural invariants every document
//! satisfies, whether parsed or built. [`check_keywords`] looks at the
//! keyword blocks of a parsed file as a whole, once the version and port
//! count are final.

use super::document::{Document, FrequencyPoint};
use super::error::{push_warning, TouchstoneError, Warning, WarningKind};
use super::keywords::{KeywordBlock, KeywordKind, KeywordRecord};
use super::matrix::CellOrigin;
use super::options::OptionLine;
use super::types::{MatrixFormat, ReferenceResistance, Version};
use crate::constants::MAX_NUMBER_OF_PORTS;

/// What the keyword checks need to know about a parsed file
#[derive(Debug)]
pub(crate) struct KeywordContext<'a> {
    pub version: Version,
    pub nports: usize,
    pub option: &'a OptionLine,
    pub records: &'a [KeywordRecord],
    pub points: usize,
    pub noise_records: usize,
}

pub(crate) fn check_keywords(
    ctx: &KeywordContext<'_>,
    warnings: &mut Vec<Warning>,
) -> Result<(), TouchstoneError> {
    let version = ctx.version;
    let n = ctx.nports;

    for record in ctx.records {
        let kind = record.block.kind();
        let line = Some(record.line);
        if !version.allows(kind) {
            return Err(TouchstoneError::keyword_version(line, kind.name(), version));
        }

        match &record.block {
            KeywordBlock::NumberOfPorts(declared) => {
                if *declared == 0 {
                    return Err(TouchstoneError::dimension(
                        line,
                        "[Number of Ports] must be at least 1",
                    ));
                }
            }
            KeywordBlock::TwoPortDataOrder(_) => {
                if n != 2 {
                    return Err(TouchstoneError::dimension(
                        line,
                        format!("[Two-Port Data Order] given for a {}-port network", n),
                    ));
                }
            }
            KeywordBlock::NumberOfFrequencies(declared) => {
                if *declared != ctx.points {
                    push_warning(
                        warnings,
                        line,
                        WarningKind::FrequencyCountMismatch {
                            declared: *declared,
                            actual: ctx.points,
                        },
                    );
                }
            }
            KeywordBlock::NumberOfNoiseFrequencies(declared) => {
                if *declared != ctx.noise_records {
                    push_warning(
                        warnings,
                        line,
                        WarningKind::NoiseFrequencyCountMismatch {
                            declared: *declared,
                            actual: ctx.noise_records,
                        },
                    );
                }
            }
            KeywordBlock::Reference(values) => {
                if ctx.option.has_per_port_reference() {
                    return Err(TouchstoneError::duplicate(
                        record.line,
                        "reference resistance (option line R list and [Reference])",
                    ));
                }
                check_arity("[Reference]", line, values.len(), n)?;
            }
            KeywordBlock::MatrixFormat(format) => {
                check_triangular(*format, version, n, line)?;
            }
            KeywordBlock::MixedModeOrder(descriptors) => {
                check_arity("[Mixed-Mode Order]", line, descriptors.len(), n)?;
            }
            KeywordBlock::Version(_)
            | KeywordBlock::BeginInformation
            | KeywordBlock::EndInformation
            | KeywordBlock::NetworkData
            | KeywordBlock::NoiseData
            | KeywordBlock::End => {}
        }
    }

    if ctx.option.has_per_port_reference() {
        let line = Some(ctx.option.line);
        if version.is_v2() {
            return Err(TouchstoneError::version(
                line,
                format!(
                    "a per-port R list on the option line is version 1.1 syntax; use [Reference] in version {}",
                    version
                ),
            ));
        }
        check_arity("option line R", line, ctx.option.reference.len(), n)?;
    }
    Ok(())
}

/// Reject port counts whose matrices cannot reasonably be allocated
pub(crate) fn check_port_limit(
    line: Option<usize>,
    ports: usize,
    source: &str,
) -> Result<(), TouchstoneError> {
    if ports <= MAX_NUMBER_OF_PORTS {
        return Ok(());
    }
    Err(TouchstoneError::dimension(
        line,
        format!(
            "{} gives {} ports, more than the supported {}",
            source, ports, MAX_NUMBER_OF_PORTS
        ),
    ))
}

pub(crate) fn check_document(doc: &Document) -> Result<(), TouchstoneError> {
    let n = doc.number_of_ports;
    let version = doc.version;

    if n == 0 {
        return Err(TouchstoneError::dimension(
            None,
            "a network needs at least one port",
        ));
    }
    check_port_limit(None, n, "the document")?;

    if let ReferenceResistance::PerPort(values) = &doc.reference {
        if !version.allows(KeywordKind::Reference) {
            return Err(TouchstoneError::version(
                None,
                format!("per-port reference resistances are not allowed in version {}", version),
            ));
        }
        check_arity("reference resistance", None, values.len(), n)?;
    }

    if doc.parameter_type.is_hybrid() && n != 2 {
        return Err(TouchstoneError::dimension(
            None,
            format!(
                "{}-parameters are only defined for 2-port networks, found {} ports",
                doc.parameter_type, n
            ),
        ));
    }

    if doc.matrix_format.is_triangular() {
        if !version.allows(KeywordKind::MatrixFormat) {
            return Err(TouchstoneError::keyword_version(
                None,
                KeywordKind::MatrixFormat.name(),
                version,
            ));
        }
        check_triangular(doc.matrix_format, version, n, None)?;
    }

    for (index, point) in doc.points.iter().enumerate() {
        check_point(index, point, n, doc.matrix_format)?;
    }

    if let Some(descriptors) = &doc.mixed_mode_order {
        if !version.allows(KeywordKind::MixedModeOrder) {
            return Err(TouchstoneError::keyword_version(
                None,
                KeywordKind::MixedModeOrder.name(),
                version,
            ));
        }
        check_arity("[Mixed-Mode Order]", None, descriptors.len(), n)?;
    }

    if doc.information.is_some() && !version.allows(KeywordKind::BeginInformation) {
        return Err(TouchstoneError::keyword_version(
            None,
            KeywordKind::BeginInformation.name(),
            version,
        ));
    }

    if doc.noise.is_some() && n != 2 {
        return Err(TouchstoneError::dimension(
            None,
            format!("noise data requires a 2-port network, found {} ports", n),
        ));
    }

    Ok(())
}

fn check_arity(
    what: &str,
    line: Option<usize>,
    found: usize,
    nports: usize,
) -> Result<(), TouchstoneError> {
    if found == nports {
        return Ok(());
    }
    Err(TouchstoneError::dimension(
        line,
        format!("{} has {} values for {} ports", what, found, nports),
    ))
}

fn check_triangular(
    format: MatrixFormat,
    version: Version,
    nports: usize,
    line: Option<usize>,
) -> Result<(), TouchstoneError> {
    if format.is_triangular() && !version.is_v2() && nports <= 2 {
        return Err(TouchstoneError::dimension(
            line,
            format!(
                "{} matrix format needs more than 2 ports in version {}",
                format, version
            ),
        ));
    }
    Ok(())
}

/// Provided cells must fill exactly the half the layout stores
fn check_point(
    index: usize,
    point: &FrequencyPoint,
    nports: usize,
    format: MatrixFormat,
) -> Result<(), TouchstoneError> {
    let matrix = &point.matrix;
    if matrix.nports() != nports {
        return Err(TouchstoneError::dimension(
            None,
            format!(
                "frequency point {} has a {}x{} matrix for a {}-port network",
                index + 1,
                matrix.nports(),
                matrix.nports(),
                nports
            ),
        ));
    }

    for row in 0..nports {
        for col in 0..nports {
            let origin = matrix.cell(row, col).map(|c| c.origin);
            let misplaced = if format.stores(row, col) {
                origin != Some(CellOrigin::Provided)
            } else {
                origin == Some(CellOrigin::Provided)
            };
            if misplaced {
                return Err(TouchstoneError::dimension(
                    None,
                    format!(
                        "frequency point {} provides {} cells where the {} layout of {} ports needs {}",
                        index + 1,
                        matrix.count(CellOrigin::Provided),
                        format,
                        nports,
                        format.cell_count(nports)
                    ),
                ));
            }
        }
    }
    Ok(())
}
