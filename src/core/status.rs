// Parse outcome codes and the positioned parse failure.
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

/// Outcome of one parse call. Ordinals are stable when serialized as integers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ParseStatus {
    Ok = 0,
    /// Input was empty or whitespace only.
    ExpectValue = 1,
    /// A token started but matched neither a literal nor the number grammar.
    InvalidValue = 2,
    /// A value parsed cleanly but non-whitespace content follows it.
    RootNotSingular = 3,
    /// A well-formed number whose magnitude does not fit in an `f64`.
    NumberTooBig = 4,
}

impl ParseStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ParseStatus::Ok),
            1 => Some(ParseStatus::ExpectValue),
            2 => Some(ParseStatus::InvalidValue),
            3 => Some(ParseStatus::RootNotSingular),
            4 => Some(ParseStatus::NumberTooBig),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParseStatus::Ok => "ok",
            ParseStatus::ExpectValue => "expect_value",
            ParseStatus::InvalidValue => "invalid_value",
            ParseStatus::RootNotSingular => "root_not_singular",
            ParseStatus::NumberTooBig => "number_too_big",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [
            ParseStatus::Ok,
            ParseStatus::ExpectValue,
            ParseStatus::InvalidValue,
            ParseStatus::RootNotSingular,
            ParseStatus::NumberTooBig,
        ]
        .into_iter()
        .find(|status| status.as_str() == label)
    }

    pub fn is_ok(self) -> bool {
        self == ParseStatus::Ok
    }

    pub fn description(self) -> &'static str {
        match self {
            ParseStatus::Ok => "parsed one value",
            ParseStatus::ExpectValue => "expected a value but found only whitespace",
            ParseStatus::InvalidValue => "invalid value",
            ParseStatus::RootNotSingular => "unexpected content after the value",
            ParseStatus::NumberTooBig => "number is too large for a double",
        }
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed parse: the non-`Ok` status and the byte offset where it was detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseError {
    status: ParseStatus,
    offset: usize,
}

impl ParseError {
    pub fn new(status: ParseStatus, offset: usize) -> Self {
        debug_assert!(!status.is_ok(), "ParseError cannot carry an Ok status");
        Self { status, offset }
    }

    pub fn status(&self) -> ParseStatus {
        self.status
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.status.description(), self.offset)
    }
}

impl StdError for ParseError {}
