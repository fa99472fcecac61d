//! touchstone-core: Touchstone network parameter file library
//!
//! ## Modules
//!
//! - `frequency` - Frequency units and frequency axes
//! - `touchstone` - Touchstone parsing, validation and serialization
//! - `constants` - Defaults and formatting limits

pub mod constants;
pub mod frequency;
pub mod touchstone;

pub use frequency::{Frequency, FrequencyUnit};
pub use touchstone::{parse, serialize, Document, DocumentBuilder, ErrorList, TouchstoneError};
