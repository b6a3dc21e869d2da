use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::status::{ParseError, ParseStatus};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    NotFound,
    Io,
    ExpectValue,
    InvalidValue,
    RootNotSingular,
    NumberTooBig,
}

impl ErrorKind {
    /// The parse status this kind stands for, if it is a parse failure.
    pub fn parse_status(self) -> Option<ParseStatus> {
        match self {
            ErrorKind::ExpectValue => Some(ParseStatus::ExpectValue),
            ErrorKind::InvalidValue => Some(ParseStatus::InvalidValue),
            ErrorKind::RootNotSingular => Some(ParseStatus::RootNotSingular),
            ErrorKind::NumberTooBig => Some(ParseStatus::NumberTooBig),
            ErrorKind::Internal | ErrorKind::Usage | ErrorKind::NotFound | ErrorKind::Io => None,
        }
    }
}

impl From<ParseStatus> for ErrorKind {
    fn from(status: ParseStatus) -> Self {
        match status {
            ParseStatus::ExpectValue => ErrorKind::ExpectValue,
            ParseStatus::InvalidValue => ErrorKind::InvalidValue,
            ParseStatus::RootNotSingular => ErrorKind::RootNotSingular,
            ParseStatus::NumberTooBig => ErrorKind::NumberTooBig,
            // An Ok status reaching the error path is a bug in the caller.
            ParseStatus::Ok => ErrorKind::Internal,
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    line: Option<u64>,
    offset: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            line: None,
            offset: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::new(err.status().into())
            .with_message(err.status().description())
            .with_offset(err.offset() as u64)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {line})")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Io => 4,
        ErrorKind::ExpectValue => 10,
        ErrorKind::InvalidValue => 11,
        ErrorKind::RootNotSingular => 12,
        ErrorKind::NumberTooBig => 13,
    }
}
