//! General IO robustness tests
//!
//! Every sample file in tests/data must parse, and writing it back in its
//! own version and format must reproduce the same document.

use std::fs;
use std::path::{Path, PathBuf};

use touchstone_core::touchstone::{
    parse, read_file, serialize, write_file, DataFormat, Document, SerializeOptions, Version,
};
use touchstone_core::FrequencyUnit;

const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

fn touchstone_files(dir: &Path, found: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read directory entry").path();
        if path.is_dir() {
            touchstone_files(&path, found);
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext == "ts" || (ext.starts_with('s') && ext.ends_with('p') && ext.len() > 2) {
            found.push(path);
        }
    }
}

fn sample_documents() -> Vec<(PathBuf, Document)> {
    let mut paths = Vec::new();
    touchstone_files(Path::new(TEST_DATA_DIR), &mut paths);
    paths.sort();
    assert!(!paths.is_empty());
    paths
        .into_iter()
        .map(|path| match read_file(&path) {
            Ok(parsed) => (path, parsed.document),
            Err(e) => panic!("Failed to parse {:?}: {}", path.file_name().unwrap(), e),
        })
        .collect()
}

#[test]
fn test_read_all_files_in_data_dir() {
    for (path, doc) in sample_documents() {
        assert!(doc.number_of_ports() > 0, "{:?}", path);
        assert!(doc.nfreq() > 0, "{:?}", path);
    }
}

#[test]
fn test_round_trip_preserving_format() {
    for (path, doc) in sample_documents() {
        let text = doc.to_string();
        let reread = parse(&text).unwrap_or_else(|e| panic!("{:?}: {}\n{}", path, e, text));
        assert_eq!(reread, doc, "{:?}\n{}", path, text);
    }
}

#[test]
fn test_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    for (path, doc) in sample_documents() {
        let out = dir.path().join(path.file_name().unwrap());
        write_file(&out, &doc, &SerializeOptions::preserving(&doc)).unwrap();
        let parsed = read_file(&out).unwrap();
        assert!(parsed.warnings.is_empty(), "{:?}: {:?}", path, parsed.warnings);
        assert_eq!(parsed.document, doc, "{:?}", path);
    }
}

#[test]
fn test_upgrade_to_version_2_1() {
    let options = SerializeOptions::default();
    for (path, doc) in sample_documents() {
        let text = serialize(&doc, &options).unwrap();
        let reread = parse(&text).unwrap_or_else(|e| panic!("{:?}: {}\n{}", path, e, text));
        assert_eq!(reread.version(), Version::V2_1);
        assert_eq!(reread.number_of_ports(), doc.number_of_ports());
        assert_eq!(reread.reference(), doc.reference(), "{:?}", path);
        assert_eq!(reread.nfreq(), doc.nfreq());
        assert_eq!(reread.noise().map(<[_]>::len), doc.noise().map(<[_]>::len));
        assert!(text.ends_with("[End]\n"));
    }
}

#[test]
fn test_unit_and_format_change_keep_values() {
    let doc = read_file(format!("{}/ts/ex_2.s2p", TEST_DATA_DIR))
        .unwrap()
        .document;
    let options = SerializeOptions {
        version: Version::V1_0,
        data_format: DataFormat::RealImaginary,
        frequency_unit: FrequencyUnit::KHz,
    };
    let text = serialize(&doc, &options).unwrap();
    assert!(text.contains("# kHz S RI R 50\n"));

    let reread = parse(&text).unwrap();
    for (a, b) in reread.points().iter().zip(doc.points()) {
        approx::assert_relative_eq!(a.frequency_hz, b.frequency_hz, max_relative = 1e-12);
        let (a, b) = (a.matrix.to_array().unwrap(), b.matrix.to_array().unwrap());
        for (x, y) in a.iter().zip(b.iter()) {
            approx::assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            approx::assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }
    assert_eq!(reread.noise().unwrap().len(), 3);
}
