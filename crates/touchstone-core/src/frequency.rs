//! Frequency module - frequency units and frequency vectors
//!
//! Touchstone files declare one frequency unit on the option line; values are
//! stored internally in Hz.

use std::fmt;

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
        }
    }

    /// Parse an option-line token (case-insensitive)
    pub fn from_token(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Some(FrequencyUnit::Hz),
            "khz" => Some(FrequencyUnit::KHz),
            "mhz" => Some(FrequencyUnit::MHz),
            "ghz" => Some(FrequencyUnit::GHz),
            _ => None,
        }
    }

    /// Canonical spelling used when writing files
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A list of frequency points with a display unit
///
/// Unlike a generated sweep, the points keep file order and are not
/// required to be monotonic.
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Frequency vector in Hz
    f: Vec<f64>,
    /// Display unit
    unit: FrequencyUnit,
}

impl Frequency {
    /// Create from a frequency vector already expressed in Hz
    pub fn from_hz(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        Self { f, unit }
    }

    /// Create from a frequency vector expressed in `unit`
    pub fn from_f(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        Self {
            f: f.iter().map(|&x| x * mult).collect(),
            unit,
        }
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Get frequency vector in the current unit
    pub fn f_scaled(&self) -> Vec<f64> {
        let mult = self.unit.multiplier();
        self.f.iter().map(|&x| x / mult).collect()
    }

    /// Get the number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    /// Lowest frequency in Hz
    pub fn min(&self) -> Option<f64> {
        self.f.iter().copied().reduce(f64::min)
    }

    /// Highest frequency in Hz
    pub fn max(&self) -> Option<f64> {
        self.f.iter().copied().reduce(f64::max)
    }

    /// Get the current unit
    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// True when every point is strictly greater than the previous one
    pub fn is_strictly_increasing(&self) -> bool {
        self.f.windows(2).all(|w| w[1] > w[0])
    }
}
