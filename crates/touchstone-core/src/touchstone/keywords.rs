//! Bracketed keywords and the version capability table

use super::types::{MatrixFormat, TwoPortOrder, Version};

/// Every keyword the reader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    Version,
    NumberOfPorts,
    TwoPortDataOrder,
    NumberOfFrequencies,
    NumberOfNoiseFrequencies,
    Reference,
    MatrixFormat,
    MixedModeOrder,
    BeginInformation,
    EndInformation,
    NetworkData,
    NoiseData,
    End,
}

/// How a keyword takes its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No arguments
    Flag,
    /// Exactly one argument on the keyword line
    Inline,
    /// One argument, on the keyword line or the next line
    InlineOrNextLine,
    /// One argument per port, on the keyword line and/or following lines
    PortList,
}

/// Row of the capability table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// First version that defines the keyword
    pub since: Version,
    pub arity: Arity,
}

impl KeywordKind {
    pub const ALL: [KeywordKind; 13] = [
        KeywordKind::Version,
        KeywordKind::NumberOfPorts,
        KeywordKind::TwoPortDataOrder,
        KeywordKind::NumberOfFrequencies,
        KeywordKind::NumberOfNoiseFrequencies,
        KeywordKind::Reference,
        KeywordKind::MatrixFormat,
        KeywordKind::MixedModeOrder,
        KeywordKind::BeginInformation,
        KeywordKind::EndInformation,
        KeywordKind::NetworkData,
        KeywordKind::NoiseData,
        KeywordKind::End,
    ];

    /// Look up a keyword by its (whitespace-collapsed) name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeywordKind::Version => "Version",
            KeywordKind::NumberOfPorts => "Number of Ports",
            KeywordKind::TwoPortDataOrder => "Two-Port Data Order",
            KeywordKind::NumberOfFrequencies => "Number of Frequencies",
            KeywordKind::NumberOfNoiseFrequencies => "Number of Noise Frequencies",
            KeywordKind::Reference => "Reference",
            KeywordKind::MatrixFormat => "Matrix Format",
            KeywordKind::MixedModeOrder => "Mixed-Mode Order",
            KeywordKind::BeginInformation => "Begin Information",
            KeywordKind::EndInformation => "End Information",
            KeywordKind::NetworkData => "Network Data",
            KeywordKind::NoiseData => "Noise Data",
            KeywordKind::End => "End",
        }
    }

    pub fn capability(&self) -> Capability {
        use Arity::*;
        let (since, arity) = match self {
            KeywordKind::Version => (Version::V1_1, Inline),
            KeywordKind::NumberOfPorts => (Version::V1_0, Inline),
            KeywordKind::TwoPortDataOrder => (Version::V2_0, Inline),
            KeywordKind::NumberOfFrequencies => (Version::V1_0, Inline),
            KeywordKind::NumberOfNoiseFrequencies => (Version::V2_0, Inline),
            KeywordKind::Reference => (Version::V1_1, PortList),
            KeywordKind::MatrixFormat => (Version::V1_1, InlineOrNextLine),
            KeywordKind::MixedModeOrder => (Version::V2_0, PortList),
            KeywordKind::BeginInformation => (Version::V2_1, Flag),
            KeywordKind::EndInformation => (Version::V2_1, Flag),
            KeywordKind::NetworkData => (Version::V1_0, Flag),
            KeywordKind::NoiseData => (Version::V1_1, Flag),
            KeywordKind::End => (Version::V1_0, Flag),
        };
        Capability { since, arity }
    }

    /// Keywords that change how data lines are laid out
    pub fn shapes_data(&self) -> bool {
        matches!(
            self,
            KeywordKind::NumberOfPorts
                | KeywordKind::TwoPortDataOrder
                | KeywordKind::Reference
                | KeywordKind::MatrixFormat
                | KeywordKind::MixedModeOrder
        )
    }
}

impl Version {
    /// Whether `kind` may appear in a file of this version
    pub fn allows(&self, kind: KeywordKind) -> bool {
        *self >= kind.capability().since
    }
}

/// A keyword together with its parsed arguments
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordBlock {
    Version(Version),
    NumberOfPorts(usize),
    TwoPortDataOrder(TwoPortOrder),
    NumberOfFrequencies(usize),
    NumberOfNoiseFrequencies(usize),
    Reference(Vec<f64>),
    MatrixFormat(MatrixFormat),
    MixedModeOrder(Vec<String>),
    BeginInformation,
    EndInformation,
    NetworkData,
    NoiseData,
    End,
}

impl KeywordBlock {
    pub fn kind(&self) -> KeywordKind {
        match self {
            KeywordBlock::Version(_) => KeywordKind::Version,
            KeywordBlock::NumberOfPorts(_) => KeywordKind::NumberOfPorts,
            KeywordBlock::TwoPortDataOrder(_) => KeywordKind::TwoPortDataOrder,
            KeywordBlock::NumberOfFrequencies(_) => KeywordKind::NumberOfFrequencies,
            KeywordBlock::NumberOfNoiseFrequencies(_) => KeywordKind::NumberOfNoiseFrequencies,
            KeywordBlock::Reference(_) => KeywordKind::Reference,
            KeywordBlock::MatrixFormat(_) => KeywordKind::MatrixFormat,
            KeywordBlock::MixedModeOrder(_) => KeywordKind::MixedModeOrder,
            KeywordBlock::BeginInformation => KeywordKind::BeginInformation,
            KeywordBlock::EndInformation => KeywordKind::EndInformation,
            KeywordBlock::NetworkData => KeywordKind::NetworkData,
            KeywordBlock::NoiseData => KeywordKind::NoiseData,
            KeywordBlock::End => KeywordKind::End,
        }
    }
}

/// A keyword block and the line its keyword appeared on
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRecord {
    pub line: usize,
    pub block: KeywordBlock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(
            KeywordKind::from_name("number of ports"),
            Some(KeywordKind::NumberOfPorts)
        );
        assert_eq!(
            KeywordKind::from_name("TWO-PORT DATA ORDER"),
            Some(KeywordKind::TwoPortDataOrder)
        );
        assert_eq!(KeywordKind::from_name("Reference Type"), None);
    }

    #[test]
    fn test_every_kind_round_trips_through_its_name() {
        for kind in KeywordKind::ALL {
            assert_eq!(KeywordKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_version_capabilities() {
        assert!(Version::V1_0.allows(KeywordKind::NumberOfPorts));
        assert!(Version::V1_0.allows(KeywordKind::End));
        assert!(!Version::V1_0.allows(KeywordKind::Reference));
        assert!(Version::V1_1.allows(KeywordKind::MatrixFormat));
        assert!(!Version::V1_1.allows(KeywordKind::TwoPortDataOrder));
        assert!(Version::V2_0.allows(KeywordKind::MixedModeOrder));
        assert!(!Version::V2_0.allows(KeywordKind::BeginInformation));
        assert!(Version::V2_1.allows(KeywordKind::EndInformation));
    }
}
