//! Reading and writing Touchstone files on disk

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::document::Document;
use super::error::{ErrorList, TouchstoneError};
use super::parser::{parse_with, ParseOptions, Parsed};
use super::validate;
use super::writer::{serialize, SerializeOptions};

/// Read a `.sNp` or `.ts` file
///
/// The port count in a `.sNp` extension is used as a hint; a file that
/// declares a different count is read as declared with a warning.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Parsed, ErrorList> {
    read_file_with(path, ParseOptions::default())
}

/// Read a file with explicit parse options
///
/// A port hint already present in `options` takes precedence over the
/// extension.
pub fn read_file_with<P: AsRef<Path>>(path: P, mut options: ParseOptions) -> Result<Parsed, ErrorList> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or(TouchstoneError::InvalidExtension)?;
    let hint = parse_extension(ext)?;
    if options.port_hint.is_none() {
        options.port_hint = hint;
    }

    let text = fs::read_to_string(path).map_err(TouchstoneError::from)?;
    debug!(path = %path.display(), bytes = text.len(), ?hint, "reading touchstone file");
    let parsed = parse_with(&text, &options)?;
    info!(
        path = %path.display(),
        version = %parsed.document.version(),
        ports = parsed.document.number_of_ports(),
        points = parsed.document.nfreq(),
        warnings = parsed.warnings.len(),
        "read touchstone file"
    );
    Ok(parsed)
}

/// Serialize `doc` and write it to `path`
pub fn write_file<P: AsRef<Path>>(
    path: P,
    doc: &Document,
    options: &SerializeOptions,
) -> Result<(), ErrorList> {
    let path = path.as_ref();
    let text = serialize(doc, options)?;
    fs::write(path, text).map_err(TouchstoneError::from)?;
    info!(path = %path.display(), version = %options.version, "wrote touchstone file");
    Ok(())
}

/// Port count named by an extension: `Some(n)` for `sNp`, `None` for `ts`
pub fn parse_extension(ext: &str) -> Result<Option<usize>, TouchstoneError> {
    let ext = ext.to_ascii_lowercase();
    if ext == "ts" {
        return Ok(None);
    }
    let digits = ext
        .strip_prefix('s')
        .and_then(|rest| rest.strip_suffix('p'))
        .ok_or(TouchstoneError::InvalidExtension)?;
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => {
            validate::check_port_limit(None, n, &format!("extension '.{}'", ext))?;
            Ok(Some(n))
        }
        _ => Err(TouchstoneError::InvalidExtension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extension() {
        assert_eq!(parse_extension("s1p").unwrap(), Some(1));
        assert_eq!(parse_extension("s2p").unwrap(), Some(2));
        assert_eq!(parse_extension("S4P").unwrap(), Some(4));
        assert_eq!(parse_extension("s32p").unwrap(), Some(32));
        assert_eq!(parse_extension("ts").unwrap(), None);
        assert!(matches!(
            parse_extension("s0p"),
            Err(TouchstoneError::InvalidExtension)
        ));
        assert!(parse_extension("sp").is_err());
        assert!(matches!(
            parse_extension("s3000000000p"),
            Err(TouchstoneError::DimensionMismatch { .. })
        ));
        assert!(parse_extension("txt").is_err());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thru.s2p");
        let doc = crate::touchstone::parse("# GHz S RI R 50\n1 0 0 1 0 1 0 0 0\n").unwrap();
        write_file(&path, &doc, &SerializeOptions::preserving(&doc)).unwrap();
        let parsed = read_file(&path).unwrap();
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.document, doc);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(dir.path().join("absent.s1p")).unwrap_err();
        assert!(matches!(err.first(), TouchstoneError::Io(_)));
    }
}
