//! Format and unit conversions
//!
//! Pure mappings between number pairs as written in a file and canonical
//! complex values, between frequency units and Hz, and between the
//! normalized (version 1) and physical (version 2) Y/Z/G/H conventions.

use num_complex::Complex64;

use super::types::{DataFormat, ParameterType};
use crate::constants::{LARGE_MAGNITUDE, SMALL_MAGNITUDE};
use crate::frequency::FrequencyUnit;

/// Convert dB (20*log10) to magnitude
pub fn db_2_mag(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert magnitude to dB (20*log10)
pub fn mag_2_db(mag: f64) -> f64 {
    20.0 * mag.log10()
}

/// Decode a value pair into a complex number
///
/// Angles are taken as written, without wrapping into any range.
pub fn decode_pair(format: DataFormat, a: f64, b: f64) -> Complex64 {
    match format {
        DataFormat::RealImaginary => Complex64::new(a, b),
        DataFormat::MagnitudeAngle => Complex64::from_polar(a, b.to_radians()),
        DataFormat::DecibelAngle => Complex64::from_polar(db_2_mag(a), b.to_radians()),
    }
}

/// Encode a complex number as a value pair
///
/// Angles come out in (-180, 180]. A zero value has no finite dB
/// magnitude; callers must check the result with `is_finite`.
pub fn encode_pair(format: DataFormat, value: Complex64) -> [f64; 2] {
    match format {
        DataFormat::RealImaginary => [value.re, value.im],
        DataFormat::MagnitudeAngle => [value.norm(), value.arg().to_degrees()],
        DataFormat::DecibelAngle => [mag_2_db(value.norm()), value.arg().to_degrees()],
    }
}

/// Convert a frequency written in `unit` to Hz
pub fn to_hz(value: f64, unit: FrequencyUnit) -> f64 {
    value * unit.multiplier()
}

/// Express a frequency in Hz in `unit`
pub fn from_hz(hz: f64, unit: FrequencyUnit) -> f64 {
    hz / unit.multiplier()
}

/// Factor `k` such that `normalized = physical * k` for cell (i, j)
///
/// With normalized port quantities `v = V/√R` and `i = I·√R`:
/// `z_ij = Z_ij / √(Ri·Rj)` and `y_ij = Y_ij · √(Ri·Rj)`; the hybrid
/// parameters mix both. S-parameters are dimensionless.
pub fn normalization_factor(param: ParameterType, i: usize, j: usize, refs: &[f64]) -> f64 {
    let (ri, rj) = (refs[i], refs[j]);
    match param {
        ParameterType::S => 1.0,
        ParameterType::Z => 1.0 / (ri * rj).sqrt(),
        ParameterType::Y => (ri * rj).sqrt(),
        ParameterType::H => match (i, j) {
            (0, 0) => 1.0 / ri,
            (1, 1) => rj,
            _ => (refs[1] / refs[0]).sqrt(),
        },
        ParameterType::G => match (i, j) {
            (0, 0) => ri,
            (1, 1) => 1.0 / rj,
            _ => (refs[0] / refs[1]).sqrt(),
        },
    }
}

/// Format a number so that parsing it back yields the same `f64`
pub fn format_number(x: f64) -> String {
    let mag = x.abs();
    if x == 0.0 || (SMALL_MAGNITUDE..LARGE_MAGNITUDE).contains(&mag) {
        format!("{}", x)
    } else {
        format!("{:e}", x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decode_magnitude_angle() {
        let c = decode_pair(DataFormat::MagnitudeAngle, 1.0, 0.0);
        assert_relative_eq!(c.re, 1.0, epsilon = 1e-15);
        assert_relative_eq!(c.im, 0.0, epsilon = 1e-15);

        let c = decode_pair(DataFormat::MagnitudeAngle, 1.0, 90.0);
        assert_relative_eq!(c.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_decode_decibel_angle() {
        let c = decode_pair(DataFormat::DecibelAngle, -20.0, 180.0);
        assert_relative_eq!(c.norm(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(c.re, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_angles_are_not_wrapped_on_decode() {
        let a = decode_pair(DataFormat::MagnitudeAngle, 0.5, 370.0);
        let b = decode_pair(DataFormat::MagnitudeAngle, 0.5, 10.0);
        assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
        assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
    }

    #[test]
    fn test_encode_pair_inverts_decode() {
        let value = decode_pair(DataFormat::MagnitudeAngle, 0.9, -10.0);

        let [mag, deg] = encode_pair(DataFormat::MagnitudeAngle, value);
        assert_relative_eq!(mag, 0.9, epsilon = 1e-12);
        assert_relative_eq!(deg, -10.0, epsilon = 1e-10);

        let [db, deg] = encode_pair(DataFormat::DecibelAngle, value);
        assert_relative_eq!(db, mag_2_db(0.9), epsilon = 1e-12);
        assert_relative_eq!(deg, -10.0, epsilon = 1e-10);

        let [re, im] = encode_pair(DataFormat::RealImaginary, value);
        assert_relative_eq!(re, value.re, epsilon = 1e-15);
        assert_relative_eq!(im, value.im, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_has_no_db_encoding() {
        let [db, _] = encode_pair(DataFormat::DecibelAngle, Complex64::new(0.0, 0.0));
        assert!(!db.is_finite());
    }

    #[test]
    fn test_frequency_units() {
        assert_eq!(to_hz(2.5, FrequencyUnit::GHz), 2.5e9);
        assert_eq!(to_hz(100.0, FrequencyUnit::KHz), 1e5);
        assert_relative_eq!(from_hz(2.5e9, FrequencyUnit::MHz), 2500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalization_factors() {
        let refs = [50.0, 50.0];
        assert_relative_eq!(
            normalization_factor(ParameterType::Z, 0, 1, &refs),
            0.02,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            normalization_factor(ParameterType::Y, 1, 1, &refs),
            50.0,
            epsilon = 1e-12
        );
        assert_eq!(normalization_factor(ParameterType::S, 0, 1, &refs), 1.0);
        assert_relative_eq!(
            normalization_factor(ParameterType::H, 0, 1, &refs),
            1.0,
            epsilon = 1e-15
        );

        let refs = [50.0, 200.0];
        assert_relative_eq!(
            normalization_factor(ParameterType::H, 1, 0, &refs),
            2.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            normalization_factor(ParameterType::G, 1, 1, &refs),
            1.0 / 200.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_format_number_round_trips() {
        for x in [0.0, 1.0, -10.0, 0.1, 1.0 / 3.0, 1e-9, 2.5e18, -7.25e-12, 161.24] {
            let text = format_number(x);
            assert_eq!(text.parse::<f64>().unwrap(), x, "{} -> {}", x, text);
        }
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(1e-9), "1e-9");
    }
}
