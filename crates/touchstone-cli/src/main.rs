//! tsconv: inspect, validate and convert Touchstone files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use touchstone_core::touchstone::{
    read_file_with, write_file, DataFormat, Document, ParseOptions, Parsed, SerializeOptions,
    Version,
};
use touchstone_core::FrequencyUnit;

#[derive(Parser)]
#[command(name = "tsconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Skip unknown keywords with a warning instead of failing
    #[arg(long, global = true)]
    allow_unknown_keywords: bool,

    /// Leave the unstored half of triangular matrices empty
    #[arg(long, global = true)]
    no_mirror: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of a Touchstone file
    Inspect {
        /// Path to the .sNp or .ts file
        file: PathBuf,
    },

    /// Check Touchstone files and report every warning
    Validate {
        /// Paths to .sNp or .ts files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Rewrite a Touchstone file in another version, format or unit
    Convert {
        /// Input .sNp or .ts file
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Target version (defaults to the input's)
        #[arg(long = "to-version", value_enum)]
        to_version: Option<VersionArg>,

        /// Target data format (defaults to the input's)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Target frequency unit (defaults to the input's)
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum VersionArg {
    #[value(name = "1.0")]
    V1_0,
    #[value(name = "1.1")]
    V1_1,
    #[value(name = "2.0")]
    V2_0,
    #[value(name = "2.1")]
    V2_1,
}

impl From<VersionArg> for Version {
    fn from(arg: VersionArg) -> Self {
        match arg {
            VersionArg::V1_0 => Version::V1_0,
            VersionArg::V1_1 => Version::V1_1,
            VersionArg::V2_0 => Version::V2_0,
            VersionArg::V2_1 => Version::V2_1,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum FormatArg {
    Ma,
    Db,
    Ri,
}

impl From<FormatArg> for DataFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Ma => DataFormat::MagnitudeAngle,
            FormatArg::Db => DataFormat::DecibelAngle,
            FormatArg::Ri => DataFormat::RealImaginary,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum UnitArg {
    Hz,
    Khz,
    Mhz,
    Ghz,
}

impl From<UnitArg> for FrequencyUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Hz => FrequencyUnit::Hz,
            UnitArg::Khz => FrequencyUnit::KHz,
            UnitArg::Mhz => FrequencyUnit::MHz,
            UnitArg::Ghz => FrequencyUnit::GHz,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let options = ParseOptions {
        allow_unknown_keywords: cli.allow_unknown_keywords,
        mirror_triangular: !cli.no_mirror,
        ..ParseOptions::default()
    };

    match cli.command {
        Commands::Inspect { file } => {
            let parsed = read(&file, options)?;
            print!("{}", summary(&file, &parsed));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { files } => {
            let failed = validate(&files, options);
            if failed == 0 {
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::warn!("{} of {} files failed validation", failed, files.len());
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Convert {
            input,
            output,
            to_version,
            format,
            unit,
        } => {
            let parsed = read(&input, options)?;
            let doc = &parsed.document;
            let target = conversion_options(doc, to_version, format, unit);
            write_file(&output, doc, &target).with_context(|| {
                format!(
                    "Failed to write {:?} as version {} {}",
                    output, target.version, target.data_format
                )
            })?;
            tracing::info!("Converted {:?} to {:?}", input, output);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read(path: &Path, options: ParseOptions) -> Result<Parsed> {
    let parsed = read_file_with(path, options).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(parsed)
}

fn conversion_options(
    doc: &Document,
    version: Option<VersionArg>,
    format: Option<FormatArg>,
    unit: Option<UnitArg>,
) -> SerializeOptions {
    let preserved = SerializeOptions::preserving(doc);
    SerializeOptions {
        version: version.map_or(preserved.version, Version::from),
        data_format: format.map_or(preserved.data_format, DataFormat::from),
        frequency_unit: unit.map_or(preserved.frequency_unit, FrequencyUnit::from),
    }
}

/// Report each file on stdout and return the number of invalid files
fn validate(files: &[PathBuf], options: ParseOptions) -> usize {
    let mut failed = 0;
    for file in files {
        match read_file_with(file, options) {
            Ok(parsed) => {
                println!("{}: ok", file.display());
                for warning in &parsed.warnings {
                    println!("  warning: {}", warning);
                }
            }
            Err(errors) => {
                failed += 1;
                println!("{}: {}", file.display(), errors.first());
                for warning in errors.warnings() {
                    println!("  warning: {}", warning);
                }
            }
        }
    }
    failed
}

fn summary(path: &Path, parsed: &Parsed) -> String {
    let doc = &parsed.document;
    let frequency = doc.frequency();
    let mut out = String::new();
    out.push_str(&format!("File:        {}\n", path.display()));
    out.push_str(&format!("Version:     {}\n", doc.version()));
    out.push_str(&format!("Ports:       {}\n", doc.number_of_ports()));
    out.push_str(&format!(
        "Parameters:  {} ({})\n",
        doc.parameter_type(),
        doc.data_format()
    ));
    out.push_str(&format!("Reference:   {}\n", doc.reference()));
    out.push_str(&format!("Matrix:      {}\n", doc.matrix_format()));
    match (frequency.min(), frequency.max()) {
        (Some(min), Some(max)) => out.push_str(&format!(
            "Frequencies: {} points, {} to {} Hz\n",
            doc.nfreq(),
            min,
            max
        )),
        _ => out.push_str("Frequencies: none\n"),
    }
    if let Some(noise) = doc.noise() {
        out.push_str(&format!("Noise:       {} records\n", noise.len()));
    }
    if let Some(order) = doc.mixed_mode_order() {
        out.push_str(&format!("Mixed-mode:  {}\n", order.join(" ")));
    }
    for warning in &parsed.warnings {
        out.push_str(&format!("Warning:     {}\n", warning));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchstone_core::touchstone::{parse, read_file};

    const TWO_PORT: &str = "! thru\n# GHz S MA R 50\n1 0 0 1 0 1 0 0 0\n2 0 0 1 -90 1 -90 0 0\n";

    #[test]
    fn test_convert_arguments() {
        let cli = Cli::try_parse_from([
            "tsconv", "-vv", "convert", "in.s2p", "-o", "out.ts", "--to-version", "2.1", "--format",
            "ri", "--unit", "mhz",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert {
                to_version, format, unit, ..
            } => {
                assert!(matches!(to_version, Some(VersionArg::V2_1)));
                assert!(matches!(format, Some(FormatArg::Ri)));
                assert!(matches!(unit, Some(UnitArg::Mhz)));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_unset_arguments_preserve_the_input() {
        let doc = parse(TWO_PORT).unwrap();
        let options = conversion_options(&doc, None, Some(FormatArg::Db), None);
        assert_eq!(options.version, Version::V1_0);
        assert_eq!(options.data_format, DataFormat::DecibelAngle);
        assert_eq!(options.frequency_unit, FrequencyUnit::GHz);
    }

    #[test]
    fn test_convert_and_validate_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("thru.s2p");
        let output = dir.path().join("thru.ts");
        std::fs::write(&input, TWO_PORT).unwrap();

        let parsed = read(&input, ParseOptions::default()).unwrap();
        let target = conversion_options(&parsed.document, Some(VersionArg::V2_1), None, None);
        write_file(&output, &parsed.document, &target).unwrap();

        let converted = read_file(&output).unwrap().document;
        assert_eq!(converted.version(), Version::V2_1);
        assert_eq!(converted.points(), parsed.document.points());

        let bad = dir.path().join("bad.s1p");
        std::fs::write(&bad, "# GHz S MA R 50\n# GHz S MA R 50\n").unwrap();
        assert_eq!(validate(&[output.clone(), bad], ParseOptions::default()), 1);
        assert_eq!(validate(&[output], ParseOptions::default()), 0);
    }

    #[test]
    fn test_summary_lists_metadata() {
        let parsed = Parsed {
            document: parse(TWO_PORT).unwrap(),
            warnings: Vec::new(),
        };
        let text = summary(Path::new("thru.s2p"), &parsed);
        assert!(text.contains("Version:     1.0\n"));
        assert!(text.contains("Ports:       2\n"));
        assert!(text.contains("Frequencies: 2 points, 1000000000 to 2000000000 Hz\n"));
    }
}
