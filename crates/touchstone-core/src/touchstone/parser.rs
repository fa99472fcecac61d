//! Touchstone parser
//!
//! Reads version 1.0, 1.1, 2.0 and 2.1 text in a single pass. Keywords are
//! checked against the version as soon as it is known; once the whole file
//! has been read the validator checks all keyword blocks again against the
//! final version and port count.

use tracing::debug;

use super::convert::to_hz;
use super::document::{Document, FrequencyPoint, NoiseRecord};
use super::error::{push_warning, ErrorList, TouchstoneError, Warning, WarningKind};
use super::keywords::{Arity, KeywordBlock, KeywordKind, KeywordRecord};
use super::matrix_reader::{Layout, MatrixReader, NoiseReader};
use super::options::{parse_option_line, OptionLine};
use super::tokenizer::{tokenize, KeywordLine, Line, LineKind, Token};
use super::types::{MatrixFormat, ReferenceResistance, TwoPortOrder, Version};
use super::validate::{self, KeywordContext};
use crate::constants::{DEFAULT_NUMBER_OF_PORTS, NOISE_VALUES_PER_RECORD};

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Port count known from outside the text, e.g. an `.s4p` extension.
    /// `[Number of Ports]` takes precedence over it.
    pub port_hint: Option<usize>,
    /// Skip unknown keywords with a warning instead of failing
    pub allow_unknown_keywords: bool,
    /// Fill the unstored half of Upper/Lower matrices with mirrored cells
    pub mirror_triangular: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            port_hint: None,
            allow_unknown_keywords: false,
            mirror_triangular: true,
        }
    }
}

/// A parsed document and the warnings raised while reading it
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub document: Document,
    pub warnings: Vec<Warning>,
}

/// Parse Touchstone text with default options
///
/// # Example
/// ```
/// use touchstone_core::touchstone::parse;
///
/// let doc = parse("# GHz S RI R 50\n1.0 0.1 0.0 0.9 0.0 0.9 0.0 0.1 0.0").unwrap();
/// assert_eq!(doc.number_of_ports(), 2);
/// assert_eq!(doc.nfreq(), 1);
/// ```
pub fn parse(text: &str) -> Result<Document, ErrorList> {
    parse_with(text, &ParseOptions::default()).map(|parsed| parsed.document)
}

/// Parse Touchstone text
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Parsed, ErrorList> {
    if let Some(hint) = options.port_hint {
        validate::check_port_limit(None, hint, "the port count hint")?;
    }
    let mut state = ParserState::new(options);
    for line in tokenize(text) {
        if let Err(error) = state.process(&line) {
            return Err(ErrorList::new(error, state.warnings));
        }
    }
    state.finalize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before any data block, or between keywords
    Header,
    NetworkData,
    NoiseData,
    Information,
    /// Argument lines of an unknown keyword
    SkippingUnknown,
    Ended,
}

/// A keyword whose arguments continue on the following lines
#[derive(Debug)]
enum Pending {
    Reference {
        line: usize,
        values: Vec<f64>,
        expected: usize,
    },
    MatrixFormat {
        line: usize,
    },
    MixedModeOrder {
        line: usize,
        descriptors: Vec<String>,
        expected: usize,
    },
}

struct ParserState<'o> {
    options: &'o ParseOptions,
    section: Section,
    pending: Option<Pending>,
    /// A non-comment line has been read
    seen_content: bool,
    last_line: usize,

    explicit_version: Option<Version>,
    option_line: Option<OptionLine>,
    records: Vec<KeywordRecord>,
    seen: Vec<KeywordKind>,
    declared_ports: Option<usize>,
    /// Something has been read whose shape depends on the port count
    ports_fixed: bool,
    two_port_order: Option<TwoPortOrder>,
    reference: Option<Vec<f64>>,
    matrix_format: MatrixFormat,
    mixed_mode_order: Option<Vec<String>>,
    information: Option<Vec<String>>,
    comments: Vec<String>,

    network: Option<MatrixReader>,
    points: Vec<FrequencyPoint>,
    noise_reader: Option<NoiseReader>,
    noise: Option<Vec<NoiseRecord>>,

    ended: bool,
    warned_after_end: bool,
    warnings: Vec<Warning>,
}

impl<'o> ParserState<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            section: Section::Header,
            pending: None,
            seen_content: false,
            last_line: 0,
            explicit_version: None,
            option_line: None,
            records: Vec::new(),
            seen: Vec::new(),
            declared_ports: None,
            ports_fixed: false,
            two_port_order: None,
            reference: None,
            matrix_format: MatrixFormat::Full,
            mixed_mode_order: None,
            information: None,
            comments: Vec::new(),
            network: None,
            points: Vec::new(),
            noise_reader: None,
            noise: None,
            ended: false,
            warned_after_end: false,
            warnings: Vec::new(),
        }
    }

    /// Version in effect, `None` until `[Version]` or the option line is read
    fn version(&self) -> Option<Version> {
        self.explicit_version
            .or_else(|| self.option_line.as_ref().map(OptionLine::implied_version))
    }

    fn nports(&self) -> usize {
        self.declared_ports
            .or(self.options.port_hint.filter(|&n| n > 0))
            .or_else(|| {
                self.option_line
                    .as_ref()
                    .filter(|o| o.has_per_port_reference())
                    .map(|o| o.reference.len())
            })
            .unwrap_or(DEFAULT_NUMBER_OF_PORTS)
    }

    /// Port count for a construct that is laid out per port
    fn fix_ports(&mut self) -> usize {
        self.ports_fixed = true;
        self.nports()
    }

    fn has_seen(&self, kind: KeywordKind) -> bool {
        self.seen.contains(&kind)
    }

    fn warn(&mut self, line: Option<usize>, kind: WarningKind) {
        push_warning(&mut self.warnings, line, kind);
    }

    fn process(&mut self, line: &Line<'_>) -> Result<(), TouchstoneError> {
        self.last_line = line.number;
        if let Some(comment) = line.comment {
            self.comments.push(comment.to_string());
        }
        match &line.kind {
            LineKind::Comment(text) => {
                self.comments.push(text.to_string());
                Ok(())
            }
            LineKind::Option(tokens) => self.option(line.number, tokens),
            LineKind::Keyword(keyword) => self.keyword(line, keyword),
            LineKind::Data(tokens) => self.data(line, tokens),
        }
    }

    fn after_end(&mut self, line: usize) -> Result<(), TouchstoneError> {
        if !self.warned_after_end {
            self.warned_after_end = true;
            self.warn(Some(line), WarningKind::ContentAfterEnd);
        }
        Ok(())
    }

    fn option(&mut self, line: usize, tokens: &[Token<'_>]) -> Result<(), TouchstoneError> {
        if self.option_line.is_some() {
            return Err(TouchstoneError::duplicate(line, "option line"));
        }
        match self.section {
            Section::Ended => return self.after_end(line),
            Section::Information => {
                return Err(TouchstoneError::syntax(
                    line,
                    1,
                    "option line inside the [Begin Information] block",
                ))
            }
            Section::SkippingUnknown => self.section = Section::Header,
            _ => {}
        }
        self.close_arguments()?;
        self.seen_content = true;

        let option = parse_option_line(line, tokens)?;
        if option.has_per_port_reference() {
            let ports = option.reference.len();
            validate::check_port_limit(Some(line), ports, "the option line R list")?;
            if let Some(version) = self.explicit_version.filter(Version::is_v2) {
                return Err(TouchstoneError::version(
                    Some(line),
                    format!(
                        "a per-port R list on the option line is version 1.1 syntax, not {}",
                        version
                    ),
                ));
            }
            if self.has_seen(KeywordKind::Reference) {
                return Err(TouchstoneError::duplicate(
                    line,
                    "reference resistance (option line R list and [Reference])",
                ));
            }
        }
        debug!(line, option = %option, "option line");
        self.option_line = Some(option);
        Ok(())
    }

    fn keyword(&mut self, line: &Line<'_>, keyword: &KeywordLine<'_>) -> Result<(), TouchstoneError> {
        let number = line.number;
        match self.section {
            Section::Ended => return self.after_end(number),
            Section::Information => {
                if KeywordKind::from_name(&keyword.name) != Some(KeywordKind::EndInformation) {
                    self.information
                        .get_or_insert_with(Vec::new)
                        .push(line.text.to_string());
                    return Ok(());
                }
            }
            Section::SkippingUnknown => self.section = Section::Header,
            _ => {}
        }

        if !keyword.closed {
            return Err(TouchstoneError::syntax(
                number,
                1,
                format!("keyword [{} is missing its closing ']'", keyword.name),
            ));
        }
        let Some(kind) = KeywordKind::from_name(&keyword.name) else {
            return self.unknown_keyword(number, &keyword.name);
        };

        self.close_arguments()?;
        self.ensure_data_idle()?;

        if kind == KeywordKind::Version && self.seen_content {
            return Err(TouchstoneError::syntax(
                number,
                1,
                "[Version] must come before any other keyword, option line or data",
            ));
        }
        self.seen_content = true;

        if self.has_seen(kind) {
            return Err(TouchstoneError::duplicate(number, format!("[{}]", kind.name())));
        }
        self.seen.push(kind);

        if let Some(version) = self.version() {
            if kind != KeywordKind::Version && !version.allows(kind) {
                return Err(TouchstoneError::keyword_version(Some(number), kind.name(), version));
            }
        }
        if kind.shapes_data() && self.network.is_some() {
            return Err(TouchstoneError::syntax(
                number,
                1,
                format!("[{}] must precede the network data", kind.name()),
            ));
        }
        if kind == KeywordKind::NumberOfPorts && self.ports_fixed {
            return Err(TouchstoneError::syntax(
                number,
                1,
                "[Number of Ports] must precede [Reference] and [Mixed-Mode Order]",
            ));
        }

        let argument = inline_argument(kind, number, &keyword.args)?;
        let required = || {
            argument.ok_or_else(|| {
                TouchstoneError::syntax(number, 1, format!("[{}] needs an argument", kind.name()))
            })
        };

        let block = match kind {
            KeywordKind::Version => {
                let token = required()?;
                let version = match Version::from_token(token.text) {
                    Some(Version::V1_0) => {
                        return Err(TouchstoneError::version(
                            Some(number),
                            "version 1.0 files do not declare [Version]",
                        ))
                    }
                    Some(version) => version,
                    None => {
                        return Err(TouchstoneError::version(
                            Some(number),
                            format!("unsupported version '{}'", token.text),
                        ))
                    }
                };
                debug!(line = number, %version, "declared version");
                self.explicit_version = Some(version);
                KeywordBlock::Version(version)
            }
            KeywordKind::NumberOfPorts => {
                let ports = required()?.count(number)?;
                if ports == 0 {
                    return Err(TouchstoneError::dimension(
                        Some(number),
                        "[Number of Ports] must be at least 1",
                    ));
                }
                validate::check_port_limit(Some(number), ports, "[Number of Ports]")?;
                if let Some(hint) = self.options.port_hint.filter(|&hint| hint != ports) {
                    self.warn(
                        Some(number),
                        WarningKind::PortHintMismatch {
                            hint,
                            declared: ports,
                        },
                    );
                }
                self.declared_ports = Some(ports);
                KeywordBlock::NumberOfPorts(ports)
            }
            KeywordKind::TwoPortDataOrder => {
                let token = required()?;
                let order = TwoPortOrder::from_token(token.text).ok_or_else(|| {
                    TouchstoneError::syntax(
                        number,
                        token.column,
                        format!("expected 12_21 or 21_12, found '{}'", token.text),
                    )
                })?;
                self.two_port_order = Some(order);
                KeywordBlock::TwoPortDataOrder(order)
            }
            KeywordKind::NumberOfFrequencies => {
                KeywordBlock::NumberOfFrequencies(required()?.count(number)?)
            }
            KeywordKind::NumberOfNoiseFrequencies => {
                KeywordBlock::NumberOfNoiseFrequencies(required()?.count(number)?)
            }
            KeywordKind::Reference => {
                if self
                    .option_line
                    .as_ref()
                    .is_some_and(OptionLine::has_per_port_reference)
                {
                    return Err(TouchstoneError::duplicate(
                        number,
                        "reference resistance (option line R list and [Reference])",
                    ));
                }
                let expected = self.fix_ports();
                let values = keyword
                    .args
                    .iter()
                    .map(|token| token.number(number))
                    .collect::<Result<Vec<_>, _>>()?;
                return self.advance(Pending::Reference {
                    line: number,
                    values,
                    expected,
                });
            }
            KeywordKind::MatrixFormat => match argument {
                Some(token) => {
                    self.matrix_format = matrix_format(number, token)?;
                    KeywordBlock::MatrixFormat(self.matrix_format)
                }
                None => {
                    self.pending = Some(Pending::MatrixFormat { line: number });
                    return Ok(());
                }
            },
            KeywordKind::MixedModeOrder => {
                let expected = self.fix_ports();
                let rest = line.text.split_once(']').map_or("", |(_, rest)| rest);
                return self.advance(Pending::MixedModeOrder {
                    line: number,
                    descriptors: rest.split_whitespace().map(str::to_string).collect(),
                    expected,
                });
            }
            KeywordKind::BeginInformation => {
                self.section = Section::Information;
                self.information = Some(Vec::new());
                KeywordBlock::BeginInformation
            }
            KeywordKind::EndInformation => {
                if self.section != Section::Information {
                    return Err(TouchstoneError::syntax(
                        number,
                        1,
                        "[End Information] without [Begin Information]",
                    ));
                }
                self.section = Section::Header;
                KeywordBlock::EndInformation
            }
            KeywordKind::NetworkData => {
                self.section = Section::NetworkData;
                KeywordBlock::NetworkData
            }
            KeywordKind::NoiseData => {
                let ports = self.fix_ports();
                if ports != 2 {
                    return Err(TouchstoneError::dimension(
                        Some(number),
                        format!("noise data requires a 2-port network, found {} ports", ports),
                    ));
                }
                self.section = Section::NoiseData;
                self.noise.get_or_insert_with(Vec::new);
                KeywordBlock::NoiseData
            }
            KeywordKind::End => {
                self.section = Section::Ended;
                self.ended = true;
                KeywordBlock::End
            }
        };

        self.records.push(KeywordRecord {
            line: number,
            block,
        });
        Ok(())
    }

    fn unknown_keyword(&mut self, line: usize, name: &str) -> Result<(), TouchstoneError> {
        if !self.options.allow_unknown_keywords {
            return Err(TouchstoneError::UnknownKeyword {
                line,
                name: name.to_string(),
            });
        }
        self.close_arguments()?;
        self.ensure_data_idle()?;
        self.warn(
            Some(line),
            WarningKind::UnknownKeywordSkipped {
                name: name.to_string(),
            },
        );
        // Version 1 data lines start the network block, so there is no way
        // to tell an unknown keyword's argument lines from data there.
        if self.section == Section::Header && self.version().map_or(true, |v| v.is_v2()) {
            self.section = Section::SkippingUnknown;
        }
        Ok(())
    }

    /// Take a keyword's arguments; record it once all have been read
    fn advance(&mut self, pending: Pending) -> Result<(), TouchstoneError> {
        match pending {
            Pending::Reference {
                line,
                values,
                expected,
            } if values.len() >= expected => {
                check_list_length("[Reference]", line, values.len(), expected)?;
                self.reference = Some(values.clone());
                self.records.push(KeywordRecord {
                    line,
                    block: KeywordBlock::Reference(values),
                });
            }
            Pending::MixedModeOrder {
                line,
                descriptors,
                expected,
            } if descriptors.len() >= expected => {
                check_list_length("[Mixed-Mode Order]", line, descriptors.len(), expected)?;
                self.mixed_mode_order = Some(descriptors.clone());
                self.records.push(KeywordRecord {
                    line,
                    block: KeywordBlock::MixedModeOrder(descriptors),
                });
            }
            pending => self.pending = Some(pending),
        }
        Ok(())
    }

    /// A line other than a data or comment line ends any argument list
    fn close_arguments(&mut self) -> Result<(), TouchstoneError> {
        match self.pending.take() {
            None => Ok(()),
            Some(Pending::Reference {
                line,
                values,
                expected,
            }) => check_list_length("[Reference]", line, values.len(), expected),
            Some(Pending::MixedModeOrder {
                line,
                descriptors,
                expected,
            }) => check_list_length("[Mixed-Mode Order]", line, descriptors.len(), expected),
            Some(Pending::MatrixFormat { line }) => Err(TouchstoneError::syntax(
                line,
                1,
                "[Matrix Format] needs an argument",
            )),
        }
    }

    fn feed_pending(
        &mut self,
        pending: Pending,
        line: &Line<'_>,
        tokens: &[Token<'_>],
    ) -> Result<(), TouchstoneError> {
        let number = line.number;
        match pending {
            Pending::Reference {
                line,
                mut values,
                expected,
            } => {
                for token in tokens {
                    values.push(token.number(number)?);
                }
                self.advance(Pending::Reference {
                    line,
                    values,
                    expected,
                })
            }
            Pending::MixedModeOrder {
                line: at,
                mut descriptors,
                expected,
            } => {
                descriptors.extend(line.text.split_whitespace().map(str::to_string));
                self.advance(Pending::MixedModeOrder {
                    line: at,
                    descriptors,
                    expected,
                })
            }
            Pending::MatrixFormat { line } => match tokens {
                [token] => {
                    self.matrix_format = matrix_format(number, token)?;
                    self.records.push(KeywordRecord {
                        line,
                        block: KeywordBlock::MatrixFormat(self.matrix_format),
                    });
                    Ok(())
                }
                [_, extra, ..] => Err(unexpected_argument(KeywordKind::MatrixFormat, number, extra)),
                [] => Err(TouchstoneError::syntax(
                    number,
                    1,
                    "expected Full, Upper or Lower",
                )),
            },
        }
    }

    fn data(&mut self, line: &Line<'_>, tokens: &[Token<'_>]) -> Result<(), TouchstoneError> {
        if let Some(pending) = self.pending.take() {
            return self.feed_pending(pending, line, tokens);
        }
        self.seen_content = true;

        match self.section {
            Section::Ended => self.after_end(line.number),
            Section::Information => {
                self.information
                    .get_or_insert_with(Vec::new)
                    .push(line.text.to_string());
                Ok(())
            }
            Section::SkippingUnknown => Ok(()),
            Section::NetworkData => self.network_data(line.number, tokens),
            Section::NoiseData => self.noise_data(line.number, tokens),
            Section::Header => {
                self.require_option(line.number, tokens)?;
                if self.version().is_some_and(|v| v.is_v2()) {
                    return Err(TouchstoneError::syntax(
                        line.number,
                        first_column(tokens),
                        "data outside [Network Data] and [Noise Data]",
                    ));
                }
                self.section = Section::NetworkData;
                self.network_data(line.number, tokens)
            }
        }
    }

    fn require_option(&self, line: usize, tokens: &[Token<'_>]) -> Result<(), TouchstoneError> {
        if self.option_line.is_some() {
            return Ok(());
        }
        Err(TouchstoneError::syntax(
            line,
            first_column(tokens),
            "network data before option line",
        ))
    }

    fn layout(&self) -> Layout {
        let version = self.version().unwrap_or_default();
        let option = self.option_line.clone().unwrap_or_default();
        let nports = self.nports();
        Layout {
            nports,
            matrix_format: self.matrix_format,
            data_format: option.data_format,
            frequency_unit: option.frequency_unit,
            two_port_order: self
                .two_port_order
                .filter(|_| version.is_v2())
                .unwrap_or_default(),
            row_aligned: !version.is_v2() && nports > 2,
            mirror: self.options.mirror_triangular,
        }
    }

    fn network_data(&mut self, line: usize, tokens: &[Token<'_>]) -> Result<(), TouchstoneError> {
        self.require_option(line, tokens)?;
        if self.network.is_none() {
            let layout = self.layout();
            debug!(line, ?layout, "network data");
            self.ports_fixed = true;
            self.network = Some(MatrixReader::new(layout));
        }

        if self.starts_implicit_noise(line, tokens)? {
            debug!(line, "noise data");
            self.section = Section::NoiseData;
            self.noise.get_or_insert_with(Vec::new);
            return self.noise_data(line, tokens);
        }

        if let Some(reader) = self.network.as_mut() {
            if let Some(point) = reader.feed(line, tokens)? {
                self.points.push(point);
            }
        }
        Ok(())
    }

    /// Version 1 two-port files start noise data with a five-value line
    /// whose frequency does not exceed the last network frequency
    fn starts_implicit_noise(&self, line: usize, tokens: &[Token<'_>]) -> Result<bool, TouchstoneError> {
        let Some(reader) = &self.network else {
            return Ok(false);
        };
        let layout = reader.layout();
        if self.version().map_or(true, |v| v.is_v2())
            || layout.nports != 2
            || !reader.is_idle()
            || tokens.len() != NOISE_VALUES_PER_RECORD
        {
            return Ok(false);
        }
        let Some(last) = self.points.last() else {
            return Ok(false);
        };
        let frequency = to_hz(tokens[0].number(line)?, layout.frequency_unit);
        Ok(frequency <= last.frequency_hz)
    }

    fn noise_data(&mut self, line: usize, tokens: &[Token<'_>]) -> Result<(), TouchstoneError> {
        self.require_option(line, tokens)?;
        let unit = self.layout().frequency_unit;
        let reader = self
            .noise_reader
            .get_or_insert_with(|| NoiseReader::new(unit));
        if let Some(record) = reader.feed(line, tokens)? {
            self.noise.get_or_insert_with(Vec::new).push(record);
        }
        Ok(())
    }

    fn ensure_data_idle(&self) -> Result<(), TouchstoneError> {
        if let Some(reader) = &self.network {
            reader.ensure_idle()?;
        }
        if let Some(reader) = &self.noise_reader {
            reader.ensure_idle()?;
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Parsed, ErrorList> {
        match self.build() {
            Ok(document) => {
                debug!(
                    version = %document.version(),
                    ports = document.number_of_ports(),
                    points = document.nfreq(),
                    warnings = self.warnings.len(),
                    "parsed touchstone document"
                );
                Ok(Parsed {
                    document,
                    warnings: self.warnings,
                })
            }
            Err(error) => Err(ErrorList::new(error, self.warnings)),
        }
    }

    fn build(&mut self) -> Result<Document, TouchstoneError> {
        self.close_arguments()?;
        self.ensure_data_idle()?;
        if self.section == Section::Information {
            return Err(TouchstoneError::syntax(
                self.last_line,
                1,
                "[Begin Information] block is not closed",
            ));
        }
        if self.option_line.is_none() {
            return Err(TouchstoneError::syntax(
                self.last_line.max(1),
                1,
                "missing option line",
            ));
        }

        let nports = self.nports();
        let version = self.version().unwrap_or_default();
        let option = self.option_line.take().unwrap_or_default();
        if version.is_v2() && !self.ended {
            self.warn(None, WarningKind::MissingEnd);
        }

        let noise_records = self.noise.as_ref().map_or(0, Vec::len);
        validate::check_keywords(
            &KeywordContext {
                version,
                nports,
                option: &option,
                records: &self.records,
                points: self.points.len(),
                noise_records,
            },
            &mut self.warnings,
        )?;

        let reference = match self.reference.take() {
            Some(values) => ReferenceResistance::PerPort(values),
            None => option.reference(),
        };
        let document = Document {
            version,
            number_of_ports: nports,
            parameter_type: option.parameter_type,
            frequency_unit: option.frequency_unit,
            data_format: option.data_format,
            reference,
            matrix_format: self.matrix_format,
            points: std::mem::take(&mut self.points),
            noise: self.noise.take(),
            comments: std::mem::take(&mut self.comments),
            mixed_mode_order: self.mixed_mode_order.take(),
            information: self.information.take(),
        };
        validate::check_document(&document)?;
        Ok(document)
    }
}

/// Check the inline argument count of `kind` against its arity
fn inline_argument<'t, 'a>(
    kind: KeywordKind,
    line: usize,
    args: &'t [Token<'a>],
) -> Result<Option<&'t Token<'a>>, TouchstoneError> {
    let allowed = match kind.capability().arity {
        Arity::PortList => return Ok(None),
        Arity::Flag => 0,
        Arity::Inline | Arity::InlineOrNextLine => 1,
    };
    match args.get(allowed) {
        Some(extra) => Err(unexpected_argument(kind, line, extra)),
        None => Ok(args.first()),
    }
}

fn unexpected_argument(kind: KeywordKind, line: usize, token: &Token<'_>) -> TouchstoneError {
    TouchstoneError::syntax(
        line,
        token.column,
        format!("unexpected argument '{}' to [{}]", token.text, kind.name()),
    )
}

fn matrix_format(line: usize, token: &Token<'_>) -> Result<MatrixFormat, TouchstoneError> {
    MatrixFormat::from_token(token.text).ok_or_else(|| {
        TouchstoneError::syntax(
            line,
            token.column,
            format!("expected Full, Upper or Lower, found '{}'", token.text),
        )
    })
}

fn check_list_length(
    keyword: &str,
    line: usize,
    found: usize,
    expected: usize,
) -> Result<(), TouchstoneError> {
    if found == expected {
        return Ok(());
    }
    Err(TouchstoneError::dimension(
        Some(line),
        format!("{} has {} values for {} ports", keyword, found, expected),
    ))
}

fn first_column(tokens: &[Token<'_>]) -> usize {
    tokens.first().map_or(1, |token| token.column)
}
