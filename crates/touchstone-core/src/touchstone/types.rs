//! Enumerations shared by the parser, the document model and the writer

use std::fmt;

use crate::constants::DEFAULT_REFERENCE_RESISTANCE;

/// Touchstone file format version
///
/// Ordered so that `a < b` means `a` predates `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Version {
    #[default]
    V1_0,
    V1_1,
    V2_0,
    V2_1,
}

impl Version {
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "1.0" => Some(Version::V1_0),
            "1.1" => Some(Version::V1_1),
            "2.0" => Some(Version::V2_0),
            "2.1" => Some(Version::V2_1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1_0 => "1.0",
            Version::V1_1 => "1.1",
            Version::V2_0 => "2.0",
            Version::V2_1 => "2.1",
        }
    }

    /// Version 2.0 or later
    pub fn is_v2(&self) -> bool {
        *self >= Version::V2_0
    }

    /// Version 1.x files store Y, Z, G and H values normalized to the
    /// reference resistance; version 2.x files store them in ohms/siemens.
    pub fn normalizes_parameters(&self) -> bool {
        !self.is_v2()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterType {
    #[default]
    S,
    Y,
    Z,
    G,
    H,
}

impl ParameterType {
    pub fn from_token(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "S" => Some(ParameterType::S),
            "Y" => Some(ParameterType::Y),
            "Z" => Some(ParameterType::Z),
            "G" => Some(ParameterType::G),
            "H" => Some(ParameterType::H),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::S => "S",
            ParameterType::Y => "Y",
            ParameterType::Z => "Z",
            ParameterType::G => "G",
            ParameterType::H => "H",
        }
    }

    /// Hybrid parameters are only defined for 2-port networks
    pub fn is_hybrid(&self) -> bool {
        matches!(self, ParameterType::G | ParameterType::H)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of one complex value as a pair of numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// Magnitude and angle in degrees (MA)
    #[default]
    MagnitudeAngle,
    /// Magnitude in dB (20·log10) and angle in degrees (DB)
    DecibelAngle,
    /// Real and imaginary parts (RI)
    RealImaginary,
}

impl DataFormat {
    pub fn from_token(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MA" => Some(DataFormat::MagnitudeAngle),
            "DB" => Some(DataFormat::DecibelAngle),
            "RI" => Some(DataFormat::RealImaginary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::MagnitudeAngle => "MA",
            DataFormat::DecibelAngle => "DB",
            DataFormat::RealImaginary => "RI",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage layout of each frequency point's matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixFormat {
    #[default]
    Full,
    Upper,
    Lower,
}

impl MatrixFormat {
    pub fn from_token(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" => Some(MatrixFormat::Full),
            "upper" => Some(MatrixFormat::Upper),
            "lower" => Some(MatrixFormat::Lower),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixFormat::Full => "Full",
            MatrixFormat::Upper => "Upper",
            MatrixFormat::Lower => "Lower",
        }
    }

    pub fn is_triangular(&self) -> bool {
        !matches!(self, MatrixFormat::Full)
    }

    /// Number of cells stored per frequency point
    pub fn cell_count(&self, nports: usize) -> usize {
        match self {
            MatrixFormat::Full => nports * nports,
            MatrixFormat::Upper | MatrixFormat::Lower => nports * (nports + 1) / 2,
        }
    }

    /// Whether cell (row, col) is stored by this layout
    pub fn stores(&self, row: usize, col: usize) -> bool {
        match self {
            MatrixFormat::Full => true,
            MatrixFormat::Upper => col >= row,
            MatrixFormat::Lower => col <= row,
        }
    }
}

impl fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order of the four 2-port values on a data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TwoPortOrder {
    /// N11 N12 N21 N22
    Order12_21,
    /// N11 N21 N12 N22, the version 1 layout
    #[default]
    Order21_12,
}

impl TwoPortOrder {
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "12_21" => Some(TwoPortOrder::Order12_21),
            "21_12" => Some(TwoPortOrder::Order21_12),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TwoPortOrder::Order12_21 => "12_21",
            TwoPortOrder::Order21_12 => "21_12",
        }
    }
}

/// Reference resistance: one value for every port, or one per port
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceResistance {
    Scalar(f64),
    PerPort(Vec<f64>),
}

impl Default for ReferenceResistance {
    fn default() -> Self {
        ReferenceResistance::Scalar(DEFAULT_REFERENCE_RESISTANCE)
    }
}

impl ReferenceResistance {
    pub fn is_per_port(&self) -> bool {
        matches!(self, ReferenceResistance::PerPort(_))
    }

    /// Reference resistance of `port` (0-based)
    pub fn for_port(&self, port: usize) -> Option<f64> {
        match self {
            ReferenceResistance::Scalar(r) => Some(*r),
            ReferenceResistance::PerPort(values) => values.get(port).copied(),
        }
    }

    /// Expand to one value per port
    pub fn per_port(&self, nports: usize) -> Vec<f64> {
        match self {
            ReferenceResistance::Scalar(r) => vec![*r; nports],
            ReferenceResistance::PerPort(values) => values.clone(),
        }
    }

    /// The single value this reference reduces to, if all ports agree
    pub fn collapse(&self) -> Option<f64> {
        match self {
            ReferenceResistance::Scalar(r) => Some(*r),
            ReferenceResistance::PerPort(values) => {
                let first = *values.first()?;
                values.iter().all(|&r| r == first).then_some(first)
            }
        }
    }
}

impl fmt::Display for ReferenceResistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceResistance::Scalar(r) => write!(f, "{} ohm", r),
            ReferenceResistance::PerPort(values) => {
                let values: Vec<String> = values.iter().map(|r| r.to_string()).collect();
                write!(f, "{} ohm (per port)", values.join(" "))
            }
        }
    }
}
