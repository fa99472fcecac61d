//! Touchstone errors and warnings

use std::fmt;
use thiserror::Error;

use super::types::Version;

/// Touchstone parsing and writing errors
#[derive(Error, Debug)]
pub enum TouchstoneError {
    /// Malformed token or line.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Keyword or syntax used outside the versions that define it.
    #[error("Version mismatch{}: {message}", at_line(.line))]
    VersionMismatch {
        line: Option<usize>,
        message: String,
    },

    /// Matrix cell count, port count or reference arity is inconsistent.
    #[error("Dimension mismatch{}: {message}", at_line(.line))]
    DimensionMismatch {
        line: Option<usize>,
        message: String,
    },

    #[error("Unknown keyword [{name}] at line {line}")]
    UnknownKeyword { line: usize, name: String },

    /// A conversion requested at write time would lose data.
    #[error("Unsupported conversion: {message}")]
    UnsupportedConversion { message: String },

    /// A section that may appear once appeared again.
    #[error("Duplicate {section} at line {line}")]
    DuplicateSection { line: usize, section: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file extension: expected .sNp or .ts")]
    InvalidExtension,

    #[error("Formatting error: {0}")]
    Fmt(#[from] fmt::Error),
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

impl TouchstoneError {
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub(crate) fn version(line: Option<usize>, message: impl Into<String>) -> Self {
        Self::VersionMismatch {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn keyword_version(line: Option<usize>, keyword: &str, version: Version) -> Self {
        Self::version(
            line,
            format!("[{}] is not allowed in version {}", keyword, version),
        )
    }

    pub(crate) fn dimension(line: Option<usize>, message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn conversion(message: impl Into<String>) -> Self {
        Self::UnsupportedConversion {
            message: message.into(),
        }
    }

    pub(crate) fn duplicate(line: usize, section: impl Into<String>) -> Self {
        Self::DuplicateSection {
            line,
            section: section.into(),
        }
    }

    /// Line the error refers to, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. }
            | Self::UnknownKeyword { line, .. }
            | Self::DuplicateSection { line, .. } => Some(*line),
            Self::VersionMismatch { line, .. } | Self::DimensionMismatch { line, .. } => *line,
            Self::UnsupportedConversion { .. }
            | Self::Io(_)
            | Self::InvalidExtension
            | Self::Fmt(_) => None,
        }
    }
}

/// Non-fatal findings collected while parsing
#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    /// `[Number of Frequencies]` disagrees with the parsed point count.
    FrequencyCountMismatch { declared: usize, actual: usize },
    /// `[Number of Noise Frequencies]` disagrees with the parsed record count.
    NoiseFrequencyCountMismatch { declared: usize, actual: usize },
    /// Port count from the caller (e.g. the file extension) was overridden.
    PortHintMismatch { hint: usize, declared: usize },
    /// Unknown keyword skipped because the caller allowed it.
    UnknownKeywordSkipped { name: String },
    /// Version 2 file without `[End]`.
    MissingEnd,
    /// Non-comment content after `[End]`.
    ContentAfterEnd,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::FrequencyCountMismatch { declared, actual } => write!(
                f,
                "[Number of Frequencies] declares {} points but {} were read",
                declared, actual
            ),
            WarningKind::NoiseFrequencyCountMismatch { declared, actual } => write!(
                f,
                "[Number of Noise Frequencies] declares {} records but {} were read",
                declared, actual
            ),
            WarningKind::PortHintMismatch { hint, declared } => write!(
                f,
                "port count hint {} overridden by [Number of Ports] {}",
                hint, declared
            ),
            WarningKind::UnknownKeywordSkipped { name } => {
                write!(f, "unknown keyword [{}] skipped", name)
            }
            WarningKind::MissingEnd => f.write_str("missing [End] keyword"),
            WarningKind::ContentAfterEnd => f.write_str("content after [End] ignored"),
        }
    }
}

/// A warning with the line it was raised at
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub line: Option<usize>,
    pub kind: WarningKind,
}

impl Warning {
    pub fn new(line: Option<usize>, kind: WarningKind) -> Self {
        Self { line, kind }
    }
}

/// Record a warning and mirror it to the log
pub(crate) fn push_warning(warnings: &mut Vec<Warning>, line: Option<usize>, kind: WarningKind) {
    let warning = Warning::new(line, kind);
    tracing::warn!("{}", warning);
    warnings.push(warning);
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Failure result of parsing, building or writing a document
///
/// Holds the fatal error that stopped the operation together with every
/// warning raised before it. It is never empty.
#[derive(Debug)]
pub struct ErrorList {
    errors: Vec<TouchstoneError>,
    warnings: Vec<Warning>,
}

impl ErrorList {
    pub fn new(error: TouchstoneError, warnings: Vec<Warning>) -> Self {
        Self {
            errors: vec![error],
            warnings,
        }
    }

    /// The fatal error that aborted the operation
    pub fn first(&self) -> &TouchstoneError {
        &self.errors[0]
    }

    pub fn errors(&self) -> &[TouchstoneError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_first(self) -> TouchstoneError {
        let mut errors = self.errors;
        errors.swap_remove(0)
    }
}

impl From<TouchstoneError> for ErrorList {
    fn from(error: TouchstoneError) -> Self {
        Self::new(error, Vec::new())
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        match self.warnings.len() {
            0 => Ok(()),
            1 => write!(f, " (1 warning)"),
            n => write!(f, " ({} warnings)", n),
        }
    }
}

impl std::error::Error for ErrorList {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.first())
    }
}
