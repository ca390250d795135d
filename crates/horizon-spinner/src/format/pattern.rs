//! Display patterns.
//!
//! A [`DisplayFormat`] compiles a Qt-style pattern such as `"MM/dd/yyyy HH:mm"`
//! into chrono strftime specifications. The same compiled pattern is used to
//! render values and to parse user input.
//!
//! # Pattern letters
//!
//! | letters | meaning |
//! |---|---|
//! | `yyyy` / `yy` | year / two-digit year (see below) |
//! | `M` / `MM` / `MMM` / `MMMM` | month: number, padded, short name, full name |
//! | `d` / `dd` | day of month |
//! | `ddd` / `dddd`, `EEE` / `EEEE` | weekday name, short or full |
//! | `H` / `HH` | hour, 0-23 |
//! | `h` / `hh` | hour, 1-12 |
//! | `m` / `mm` | minute |
//! | `s` / `ss` | second |
//! | `zzz` / `SSS`, `SSSSSS`, `SSSSSSSSS` | milli-, micro-, nanoseconds |
//! | `a` / `AP` | AM/PM marker |
//! | `'text'` | quoted literal (`''` is a single quote) |
//!
//! Any other character is copied literally.
//!
//! A pattern must be readable back into a value: date fields need a year,
//! month and day, time fields need an hour and a minute, and a 12-hour
//! field needs an AM/PM marker.
//!
//! `yy` reads two-digit years as 1970-2069, so values outside that range do
//! not survive a format and parse round trip.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SpinnerError};

/// Pattern used when none is configured: short date, 24-hour time.
pub const DEFAULT_PATTERN: &str = "MM/dd/yyyy HH:mm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Date,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field {
        spec: &'static str,
        kind: FieldKind,
        /// Character offset of the field in the pattern.
        at: usize,
    },
}

impl Token {
    fn is_date(&self) -> bool {
        matches!(
            self,
            Token::Field {
                kind: FieldKind::Date,
                ..
            }
        )
    }

    fn is_time(&self) -> bool {
        matches!(
            self,
            Token::Field {
                kind: FieldKind::Time,
                ..
            }
        )
    }
}

/// A compiled display pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    pattern: String,
    full_spec: String,
    date_spec: Option<String>,
    has_date_fields: bool,
    has_time_fields: bool,
}

impl DisplayFormat {
    /// Compile a display pattern.
    ///
    /// Fails with [`SpinnerError::InvalidPattern`] on unsupported letters or an
    /// unterminated quoted literal.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let tokens = tokenize(&pattern)?;
        if !tokens.iter().any(|t| t.is_date() || t.is_time()) {
            return Err(SpinnerError::invalid_pattern(
                pattern,
                "pattern contains no date or time fields",
                0,
            ));
        }
        if let Some((message, at)) = missing_field(&tokens) {
            return Err(SpinnerError::invalid_pattern(pattern, message, at));
        }

        Ok(Self {
            full_spec: to_spec(&tokens),
            date_spec: date_span(&tokens).map(to_spec),
            has_date_fields: tokens.iter().any(Token::is_date),
            has_time_fields: tokens.iter().any(Token::is_time),
            pattern,
        })
    }

    /// The pattern this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The strftime specification for the whole pattern.
    pub fn full_spec(&self) -> &str {
        &self.full_spec
    }

    /// The strftime specification for the date-only part of the pattern.
    ///
    /// This is the contiguous span from the first to the last date field.
    /// `None` if the pattern has no date fields, or if a time field sits
    /// between two date fields.
    pub fn date_spec(&self) -> Option<&str> {
        self.date_spec.as_deref()
    }

    pub fn has_date_fields(&self) -> bool {
        self.has_date_fields
    }

    pub fn has_time_fields(&self) -> bool {
        self.has_time_fields
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN).expect("default display pattern compiles")
    }
}

impl FromStr for DisplayFormat {
    type Err = SpinnerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                literal.push('\'');
                i += 2;
                continue;
            }
            let start = i;
            i += 1;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(SpinnerError::invalid_pattern(
                            pattern,
                            "unterminated quoted literal",
                            start,
                        ));
                    }
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        literal.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(&ch) => {
                        literal.push(ch);
                        i += 1;
                    }
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            // Qt spells the AM/PM marker `AP` (or `ap` for lower case).
            let marker = match (c, chars.get(i + 1)) {
                ('A', Some('P')) => Some("%p"),
                ('a', Some('p')) => Some("%P"),
                _ => None,
            };
            if let Some(spec) = marker {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Field {
                    spec,
                    kind: FieldKind::Time,
                    at: i,
                });
                i += 2;
                continue;
            }

            let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
            let Some((spec, kind)) = field_spec(c, run) else {
                let letters: String = std::iter::repeat_n(c, run).collect();
                return Err(SpinnerError::invalid_pattern(
                    pattern,
                    format!("unsupported field '{letters}'"),
                    i,
                ));
            };
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field { spec, kind, at: i });
            i += run;
            continue;
        }

        literal.push(c);
        i += 1;
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn field_spec(letter: char, run: usize) -> Option<(&'static str, FieldKind)> {
    use FieldKind::{Date, Time};

    let field = match (letter, run) {
        ('y', 2) => ("%y", Date),
        ('y', _) => ("%Y", Date),
        ('M', 1) => ("%-m", Date),
        ('M', 2) => ("%m", Date),
        ('M', 3) => ("%b", Date),
        ('M', _) => ("%B", Date),
        ('d', 1) => ("%-d", Date),
        ('d', 2) => ("%d", Date),
        ('d', 3) => ("%a", Date),
        ('d', _) => ("%A", Date),
        ('E', 1..=3) => ("%a", Date),
        ('E', _) => ("%A", Date),
        ('H', 1) => ("%-H", Time),
        ('H', 2) => ("%H", Time),
        ('h', 1) => ("%-I", Time),
        ('h', 2) => ("%I", Time),
        ('m', 1) => ("%-M", Time),
        ('m', 2) => ("%M", Time),
        ('s', 1) => ("%-S", Time),
        ('s', 2) => ("%S", Time),
        ('z', 1..=3) | ('S', 1..=3) => ("%3f", Time),
        ('S', 6) => ("%6f", Time),
        ('S', 9) => ("%9f", Time),
        ('a', 1) | ('A', 1) => ("%p", Time),
        _ => return None,
    };
    Some(field)
}

/// The first field a parser would need but cannot find, with the offset
/// to report it at.
fn missing_field(tokens: &[Token]) -> Option<(&'static str, usize)> {
    if let Some(at) = field_at(tokens, |_, kind| kind == FieldKind::Date) {
        let year = field_with(tokens, &["%Y", "%y"]);
        let month = field_with(tokens, &["%m", "%-m", "%b", "%B"]);
        let day = field_with(tokens, &["%d", "%-d"]);
        if year.is_none() || month.is_none() || day.is_none() {
            return Some(("date fields must include a year, a month and a day", at));
        }
    }

    if let Some(at) = field_at(tokens, |_, kind| kind == FieldKind::Time) {
        let hour = field_with(tokens, &["%H", "%-H", "%I", "%-I"]);
        let Some(hour_at) = hour else {
            return Some(("time fields must include an hour", at));
        };
        if field_with(tokens, &["%M", "%-M"]).is_none() {
            return Some(("time fields must include a minute", hour_at));
        }
        if let Some(twelve_at) = field_with(tokens, &["%I", "%-I"])
            && field_with(tokens, &["%p", "%P"]).is_none()
        {
            return Some(("12-hour field needs an AM/PM marker", twelve_at));
        }
    }

    None
}

fn field_with(tokens: &[Token], specs: &[&str]) -> Option<usize> {
    field_at(tokens, |spec, _| specs.contains(&spec))
}

fn field_at(
    tokens: &[Token],
    matches: impl Fn(&'static str, FieldKind) -> bool,
) -> Option<usize> {
    tokens.iter().find_map(|token| match token {
        Token::Field { spec, kind, at } if matches(*spec, *kind) => Some(*at),
        _ => None,
    })
}

fn date_span(tokens: &[Token]) -> Option<&[Token]> {
    let first = tokens.iter().position(Token::is_date)?;
    let last = tokens.iter().rposition(Token::is_date)?;
    let span = &tokens[first..=last];
    if span.iter().any(Token::is_time) {
        None
    } else {
        Some(span)
    }
}

fn to_spec(tokens: &[Token]) -> String {
    let mut spec = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => spec.push_str(&text.replace('%', "%%")),
            Token::Field { spec: field, .. } => spec.push_str(field),
        }
    }
    spec
}
