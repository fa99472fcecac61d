//! Touchstone file I/O
//!
//! Reads and writes Touchstone 1.0, 1.1, 2.0 and 2.1 network parameter
//! files (`.sNp` and `.ts`).

pub mod convert;
pub mod document;
pub mod error;
pub mod io;
pub mod keywords;
pub mod matrix;
pub mod matrix_reader;
pub mod options;
pub mod parser;
pub mod tokenizer;
pub mod types;
mod validate;
pub mod writer;

pub use document::{Document, DocumentBuilder, FrequencyPoint, NoiseRecord};
pub use error::{ErrorList, TouchstoneError, Warning, WarningKind};
pub use io::{read_file, read_file_with, write_file};
pub use matrix::{Cell, CellOrigin, NetworkMatrix};
pub use options::OptionLine;
pub use parser::{parse, parse_with, ParseOptions, Parsed};
pub use types::{DataFormat, MatrixFormat, ParameterType, ReferenceResistance, TwoPortOrder, Version};
pub use writer::{serialize, SerializeOptions};
