//! Option line (`# <unit> <param> <format> R <n>...`)

use std::fmt;

use super::convert::format_number;
use super::error::TouchstoneError;
use super::tokenizer::Token;
use super::types::{DataFormat, ParameterType, ReferenceResistance, Version};
use crate::constants::DEFAULT_REFERENCE_RESISTANCE;
use crate::frequency::FrequencyUnit;

/// Parsed option line
#[derive(Debug, Clone, PartialEq)]
pub struct OptionLine {
    pub frequency_unit: FrequencyUnit,
    pub parameter_type: ParameterType,
    pub data_format: DataFormat,
    /// Values following `R`; empty when `R` was not given
    pub reference: Vec<f64>,
    /// Line the option line was read from (0 when built for writing)
    pub line: usize,
}

impl Default for OptionLine {
    fn default() -> Self {
        Self {
            frequency_unit: FrequencyUnit::GHz,
            parameter_type: ParameterType::S,
            data_format: DataFormat::MagnitudeAngle,
            reference: Vec::new(),
            line: 0,
        }
    }
}

impl OptionLine {
    /// More than one `R` value: the version 1.1 per-port form
    pub fn has_per_port_reference(&self) -> bool {
        self.reference.len() > 1
    }

    pub fn reference(&self) -> ReferenceResistance {
        match self.reference.as_slice() {
            [] => ReferenceResistance::Scalar(DEFAULT_REFERENCE_RESISTANCE),
            [r] => ReferenceResistance::Scalar(*r),
            values => ReferenceResistance::PerPort(values.to_vec()),
        }
    }

    /// Version a file without `[Version]` is read as
    pub fn implied_version(&self) -> Version {
        if self.has_per_port_reference() {
            Version::V1_1
        } else {
            Version::V1_0
        }
    }
}

impl fmt::Display for OptionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# {} {} {}",
            self.frequency_unit, self.parameter_type, self.data_format
        )?;
        if !self.reference.is_empty() {
            f.write_str(" R")?;
            for r in &self.reference {
                write!(f, " {}", format_number(*r))?;
            }
        }
        Ok(())
    }
}

/// Parse the tokens following `#`
///
/// Tokens are case-insensitive and may come in any order. Each category
/// may be given once.
pub fn parse_option_line(line: usize, tokens: &[Token<'_>]) -> Result<OptionLine, TouchstoneError> {
    let mut unit = None;
    let mut param = None;
    let mut format = None;
    let mut reference: Option<Vec<f64>> = None;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;

        if token.text.eq_ignore_ascii_case("R") {
            if reference.is_some() {
                return Err(repeated(line, token, "reference resistance"));
            }
            let mut values = Vec::new();
            while let Some(next) = tokens.get(i) {
                match next.text.parse::<f64>() {
                    Ok(_) => {
                        values.push(next.number(line)?);
                        i += 1;
                    }
                    Err(_) => break,
                }
            }
            if values.is_empty() {
                return Err(TouchstoneError::syntax(
                    line,
                    token.column,
                    "'R' must be followed by at least one resistance",
                ));
            }
            reference = Some(values);
        } else if let Some(u) = FrequencyUnit::from_token(token.text) {
            if unit.replace(u).is_some() {
                return Err(repeated(line, token, "frequency unit"));
            }
        } else if let Some(p) = ParameterType::from_token(token.text) {
            if param.replace(p).is_some() {
                return Err(repeated(line, token, "parameter type"));
            }
        } else if let Some(fmt) = DataFormat::from_token(token.text) {
            if format.replace(fmt).is_some() {
                return Err(repeated(line, token, "data format"));
            }
        } else {
            return Err(TouchstoneError::syntax(
                line,
                token.column,
                format!("unrecognized option '{}'", token.text),
            ));
        }
    }

    let defaults = OptionLine::default();
    Ok(OptionLine {
        frequency_unit: unit.unwrap_or(defaults.frequency_unit),
        parameter_type: param.unwrap_or(defaults.parameter_type),
        data_format: format.unwrap_or(defaults.data_format),
        reference: reference.unwrap_or_default(),
        line,
    })
}

fn repeated(line: usize, token: &Token<'_>, category: &str) -> TouchstoneError {
    TouchstoneError::syntax(
        line,
        token.column,
        format!("{} given twice ('{}')", category, token.text),
    )
}
