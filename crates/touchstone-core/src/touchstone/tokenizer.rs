//! Line tokenizer
//!
//! Splits Touchstone text into classified logical lines. Classification
//! never fails; numbers and keywords are interpreted downstream.

use super::error::TouchstoneError;

/// A whitespace/comma separated token and its 1-based column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub column: usize,
}

impl Token<'_> {
    /// Parse the token as a finite floating point number
    pub fn number(&self, line: usize) -> Result<f64, TouchstoneError> {
        match self.text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(TouchstoneError::syntax(
                line,
                self.column,
                format!("expected a number, found '{}'", self.text),
            )),
        }
    }

    /// Parse the token as a non-negative integer count
    pub fn count(&self, line: usize) -> Result<usize, TouchstoneError> {
        self.text.parse::<usize>().map_err(|_| {
            TouchstoneError::syntax(
                line,
                self.column,
                format!("expected a non-negative integer, found '{}'", self.text),
            )
        })
    }
}

/// A `[Name] args...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordLine<'a> {
    /// Name between the brackets with inner whitespace collapsed
    pub name: String,
    /// False when the closing `]` is missing
    pub closed: bool,
    /// Tokens following the closing bracket
    pub args: Vec<Token<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Text after the `!` marker, verbatim
    Comment(&'a str),
    /// Tokens after the `#` marker
    Option(Vec<Token<'a>>),
    Keyword(KeywordLine<'a>),
    Data(Vec<Token<'a>>),
}

/// One non-blank physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Trimmed content without any trailing comment
    pub text: &'a str,
    pub kind: LineKind<'a>,
    /// Comment following content on the same line
    pub comment: Option<&'a str>,
}

/// Lazy iterator over the classified lines of a buffer
pub struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

/// Tokenize a whole buffer
pub fn tokenize(text: &str) -> Lines<'_> {
    Lines {
        inner: text.lines().enumerate(),
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        for (idx, raw) in self.inner.by_ref() {
            if let Some(line) = classify(idx + 1, raw) {
                return Some(line);
            }
        }
        None
    }
}

fn classify(number: usize, raw: &str) -> Option<Line<'_>> {
    let start = raw.len() - raw.trim_start().len();
    let body = raw[start..].trim_end();
    if body.is_empty() {
        return None;
    }

    if let Some(rest) = body.strip_prefix('!') {
        return Some(Line {
            number,
            text: body,
            kind: LineKind::Comment(rest),
            comment: None,
        });
    }

    let (content, comment) = match body.find('!') {
        Some(idx) => (body[..idx].trim_end(), Some(&body[idx + 1..])),
        None => (body, None),
    };
    let end = start + content.len();

    let kind = if content.starts_with('#') {
        LineKind::Option(split_tokens(raw, start + 1, end))
    } else if content.starts_with('[') {
        match content.find(']') {
            Some(close) => LineKind::Keyword(KeywordLine {
                name: collapse_whitespace(&content[1..close]),
                closed: true,
                args: split_tokens(raw, start + close + 1, end),
            }),
            None => LineKind::Keyword(KeywordLine {
                name: collapse_whitespace(&content[1..]),
                closed: false,
                args: Vec::new(),
            }),
        }
    } else {
        LineKind::Data(split_tokens(raw, start, end))
    };

    Some(Line {
        number,
        text: content,
        kind,
        comment,
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `raw[from..to]` on whitespace and commas, tracking columns
fn split_tokens(raw: &str, from: usize, to: usize) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut column = raw[..from].chars().count() + 1;
    let mut current: Option<(usize, usize)> = None;

    for (offset, ch) in raw[from..to].char_indices() {
        let pos = from + offset;
        if ch.is_whitespace() || ch == ',' {
            if let Some((begin, col)) = current.take() {
                tokens.push(Token {
                    text: &raw[begin..pos],
                    column: col,
                });
            }
        } else if current.is_none() {
            current = Some((pos, column));
        }
        column += 1;
    }
    if let Some((begin, col)) = current {
        tokens.push(Token {
            text: &raw[begin..to],
            column: col,
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_classifies_each_line_kind() {
        let input = "! header\n\n  # GHz S MA R 50\n[Number of Ports] 2\n1.0 0.5 -10\n";
        let lines: Vec<Line> = tokenize(input).collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].kind, LineKind::Comment(" header"));

        assert_eq!(lines[1].number, 3);
        match &lines[1].kind {
            LineKind::Option(tokens) => assert_eq!(texts(tokens), ["GHz", "S", "MA", "R", "50"]),
            other => panic!("expected option line, got {:?}", other),
        }

        match &lines[2].kind {
            LineKind::Keyword(kw) => {
                assert_eq!(kw.name, "Number of Ports");
                assert!(kw.closed);
                assert_eq!(texts(&kw.args), ["2"]);
            }
            other => panic!("expected keyword line, got {:?}", other),
        }

        match &lines[3].kind {
            LineKind::Data(tokens) => assert_eq!(texts(tokens), ["1.0", "0.5", "-10"]),
            other => panic!("expected data line, got {:?}", other),
        }
    }

    #[test]
    fn test_columns_and_commas() {
        let lines: Vec<Line> = tokenize("  1.0,0.5 ,  -3").collect();
        match &lines[0].kind {
            LineKind::Data(tokens) => {
                assert_eq!(texts(tokens), ["1.0", "0.5", "-3"]);
                assert_eq!(tokens[0].column, 3);
                assert_eq!(tokens[1].column, 7);
                assert_eq!(tokens[2].column, 14);
            }
            other => panic!("expected data line, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comment_is_split_off() {
        let lines: Vec<Line> = tokenize("1.0 0.9 -10 ! first point\r\n").collect();
        assert_eq!(lines[0].comment, Some(" first point"));
        assert_eq!(lines[0].text, "1.0 0.9 -10");
        match &lines[0].kind {
            LineKind::Data(tokens) => assert_eq!(tokens.len(), 3),
            other => panic!("expected data line, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_name_is_normalized() {
        let lines: Vec<Line> = tokenize("[Number   of\tFrequencies]   5\n[Reference").collect();
        match &lines[0].kind {
            LineKind::Keyword(kw) => {
                assert_eq!(kw.name, "Number of Frequencies");
                assert_eq!(kw.args[0].column, 29);
            }
            other => panic!("expected keyword line, got {:?}", other),
        }
        match &lines[1].kind {
            LineKind::Keyword(kw) => {
                assert_eq!(kw.name, "Reference");
                assert!(!kw.closed);
            }
            other => panic!("expected keyword line, got {:?}", other),
        }
    }

    #[test]
    fn test_token_number() {
        let token = Token {
            text: "abc",
            column: 4,
        };
        let err = token.number(7).unwrap_err();
        assert!(matches!(
            err,
            TouchstoneError::Syntax {
                line: 7,
                column: 4,
                ..
            }
        ));

        let token = Token {
            text: "nan",
            column: 1,
        };
        assert!(token.number(1).is_err());

        let token = Token {
            text: "-1.5e3",
            column: 1,
        };
        assert_eq!(token.number(1).unwrap(), -1500.0);
    }
}
