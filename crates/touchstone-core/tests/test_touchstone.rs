//! Touchstone reading tests against the sample files in tests/data

use approx::assert_relative_eq;
use num_complex::Complex64;
use touchstone_core::touchstone::{
    read_file, CellOrigin, DataFormat, MatrixFormat, ParameterType, ReferenceResistance, Version,
    WarningKind,
};
use touchstone_core::FrequencyUnit;

const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

fn data(name: &str) -> String {
    format!("{}/{}", TEST_DATA_DIR, name)
}

fn assert_complex(actual: Complex64, expected: Complex64) {
    assert_relative_eq!(actual.re, expected.re, epsilon = 1e-9);
    assert_relative_eq!(actual.im, expected.im, epsilon = 1e-9);
}

fn polar(mag: f64, deg: f64) -> Complex64 {
    Complex64::from_polar(mag, deg.to_radians())
}

/// Values are listed 11, 21, 12, 22 in version 1 two-port files
#[allow(clippy::needless_range_loop)]
#[test]
fn test_read_data() {
    let parsed = read_file(data("simple_touchstone.s2p")).expect("Failed to load file");
    assert!(parsed.warnings.is_empty());
    let doc = parsed.document;

    let f_true = [1.0e9, 1.1e9];
    let s_true = [
        [
            [Complex64::new(1.0, 2.0), Complex64::new(5.0, 6.0)],
            [Complex64::new(3.0, 4.0), Complex64::new(7.0, 8.0)],
        ],
        [
            [Complex64::new(9.0, 10.0), Complex64::new(13.0, 14.0)],
            [Complex64::new(11.0, 12.0), Complex64::new(15.0, 16.0)],
        ],
    ];

    assert_eq!(doc.version(), Version::V1_0);
    assert_eq!(doc.nfreq(), 2);
    let f = doc.frequency();
    for k in 0..2 {
        assert_relative_eq!(f.f()[k], f_true[k], epsilon = 1e-3);
    }

    let s = doc.to_array3().unwrap();
    for k in 0..2 {
        for i in 0..2 {
            for j in 0..2 {
                assert_complex(s[[k, i, j]], s_true[k][i][j]);
            }
        }
    }
}

#[test]
fn test_one_port_magnitude_angle() {
    let doc = read_file(data("ts/ex_1.s1p")).unwrap().document;

    assert_eq!(doc.number_of_ports(), 1);
    assert_eq!(doc.frequency_unit(), FrequencyUnit::MHz);
    assert_eq!(doc.data_format(), DataFormat::MagnitudeAngle);
    assert_eq!(doc.frequency().f(), &[2.0e6, 4.0e6, 6.0e6]);

    let s11 = doc.parameter(0, 0).unwrap();
    assert_complex(s11[0], polar(0.894, -12.136));
    assert_complex(s11[2], polar(0.812, -37.342));
    assert_eq!(doc.comments()[1], "freq magS11 angS11");
}

#[test]
fn test_two_port_decibel_with_noise() {
    let doc = read_file(data("ts/ex_2.s2p")).unwrap().document;

    assert_eq!(doc.nfreq(), 3);
    let s21 = doc.parameter(1, 0).unwrap();
    assert_complex(s21[0], polar(10f64.powf(18.3 / 20.0), 150.2));

    let noise = doc.noise().unwrap();
    assert_eq!(noise.len(), 3);
    assert_relative_eq!(noise[1].frequency_hz, 2.0e9);
    assert_relative_eq!(noise[1].min_noise_figure_db, 1.10);
    assert_complex(noise[1].gamma_opt(), polar(0.55, 75.0));
    assert_relative_eq!(noise[2].effective_noise_resistance, 0.35);
}

#[test]
fn test_version_two_impedance_in_12_21_order() {
    let parsed = read_file(data("ts/ex_3.ts")).unwrap();
    assert!(parsed.warnings.is_empty());
    let doc = parsed.document;

    assert_eq!(doc.version(), Version::V2_0);
    assert_eq!(doc.parameter_type(), ParameterType::Z);
    let z = doc.points()[0].matrix.to_array().unwrap();
    assert_complex(z[[0, 0]], Complex64::new(74.25, -4.093));
    assert_complex(z[[0, 1]], Complex64::new(16.39, -0.31));
    assert_complex(z[[1, 1]], Complex64::new(64.08, -9.12));
    assert_eq!(doc.noise().map(<[_]>::len), Some(2));
}

#[test]
fn test_reference_on_separate_line_with_upper_matrix() {
    let doc = read_file(data("ts/ex_4.ts")).unwrap().document;

    assert_eq!(doc.version(), Version::V2_1);
    assert_eq!(doc.number_of_ports(), 4);
    assert_eq!(
        doc.reference(),
        &ReferenceResistance::PerPort(vec![50.0, 75.0, 0.01, 0.01])
    );
    assert_eq!(doc.matrix_format(), MatrixFormat::Upper);

    let matrix = &doc.points()[0].matrix;
    assert_eq!(matrix.count(CellOrigin::Provided), 10);
    assert_eq!(matrix.count(CellOrigin::Mirrored), 6);
    let s = matrix.to_array().unwrap();
    assert_complex(s[[0, 3]], polar(0.53, -79.34));
    assert_complex(s[[3, 0]], s[[0, 3]]);
    assert_eq!(matrix.cell(3, 0).unwrap().origin, CellOrigin::Mirrored);
    assert_eq!(matrix.cell(0, 3).unwrap().origin, CellOrigin::Provided);
}

#[test]
fn test_per_port_reference_on_option_line() {
    let doc = read_file(data("ts/ex_5.s4p")).unwrap().document;

    assert_eq!(doc.version(), Version::V1_1);
    assert_eq!(
        doc.reference(),
        &ReferenceResistance::PerPort(vec![0.01, 0.01, 50.0, 50.0])
    );
    let s = doc.points()[0].matrix.to_array().unwrap();
    assert_complex(s[[1, 0]], polar(0.40, -42.20));
    assert_complex(s[[3, 3]], polar(0.60, 161.20));
}

#[test]
fn test_both_files_describe_the_same_network() {
    let v21 = read_file(data("ts/ex_4.ts")).unwrap().document;
    let v11 = read_file(data("ts/ex_5.s4p")).unwrap().document;

    let a = v21.points()[0].matrix.to_array().unwrap();
    let b = v11.points()[0].matrix.to_array().unwrap();
    for i in 0..4 {
        assert_complex(a[[i, i]], b[[i, i]]);
    }
    assert_complex(a[[0, 1]], b[[0, 1]]);
}

#[test]
fn test_mixed_mode_lower_matrix_with_information() {
    let doc = read_file(data("ts/ex_6.ts")).unwrap().document;

    assert_eq!(doc.matrix_format(), MatrixFormat::Lower);
    assert_eq!(
        doc.mixed_mode_order().unwrap(),
        ["D2,1", "D3,4", "C2,1", "C3,4"]
    );
    assert_eq!(
        doc.information().unwrap(),
        ["[Manufacturer] ACME", "Part TS-400"]
    );

    let s = doc.points()[1].matrix.to_array().unwrap();
    assert_complex(s[[3, 2]], Complex64::new(0.92, 0.092));
    assert_complex(s[[2, 3]], Complex64::new(0.92, 0.092));
    assert_complex(s[[3, 3]], Complex64::new(0.13, 0.013));
}

#[test]
fn test_extension_port_count_is_a_hint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renamed.s3p");
    std::fs::write(&path, "[Number of Ports] 1\n# GHz S MA R 50\n1 0.5 0\n").unwrap();

    let parsed = read_file(&path).unwrap();
    assert_eq!(parsed.document.number_of_ports(), 1);
    assert_eq!(
        parsed.warnings[0].kind,
        WarningKind::PortHintMismatch {
            hint: 3,
            declared: 1
        }
    );
}
