//! Format constants
//!
//! Defaults and limits taken from the Touchstone file format specifications.

/// Reference resistance assumed when the option line has no `R` argument.
pub const DEFAULT_REFERENCE_RESISTANCE: f64 = 50.0;

/// Port count assumed for version 1.0 data when nothing else declares it.
pub const DEFAULT_NUMBER_OF_PORTS: usize = 2;

/// Largest port count accepted from a file, a hint or a builder.
/// Each frequency point holds a dense N×N matrix.
pub const MAX_NUMBER_OF_PORTS: usize = 1024;

/// Maximum number of value pairs written on one data line.
/// Longer matrix rows continue on the following lines.
pub const MAX_PAIRS_PER_LINE: usize = 4;

/// Values per noise parameter record: frequency, NFmin, |Γopt|, ∠Γopt, Rn.
pub const NOISE_VALUES_PER_RECORD: usize = 5;

/// Non-zero magnitudes below this are written in exponent notation.
pub const SMALL_MAGNITUDE: f64 = 1e-4;

/// Magnitudes at or above this are written in exponent notation.
pub const LARGE_MAGNITUDE: f64 = 1e15;
