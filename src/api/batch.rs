//! Purpose: Parse a byte stream as one scalar value per line.
//! Exports: `ErrorPolicy`, `BatchConfig`, `BatchOutcome`, `BatchFailure`, `parse_lines`.
//! Role: Line-batch engine used by `tinyjson parse --lines`; keeps stream handling out of main.
//! Invariants: Each line is parsed independently with the single-value parser.
//! Invariants: Skip mode only continues at line boundaries.
//! Invariants: Per-line buffering is capped at `max_line_bytes` plus the terminator.
use std::io::{self, BufRead, BufReader, Read};

use bstr::ByteSlice;

use crate::core::cursor::is_whitespace;
use crate::core::error::{Error, ErrorKind};
use crate::core::parse::parse;
use crate::core::value::Value;

const MAX_SNIPPET_BYTES: usize = 64;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorPolicy {
    Stop,
    Skip,
}

#[derive(Copy, Clone, Debug)]
pub struct BatchConfig {
    pub errors: ErrorPolicy,
    pub skip_blank: bool,
    pub max_line_bytes: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            errors: ErrorPolicy::Stop,
            skip_blank: true,
            max_line_bytes: 1024 * 1024,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BatchOutcome {
    pub lines_total: u64,
    pub ok: u64,
    pub failed: u64,
}

#[derive(Clone, Debug)]
pub struct BatchFailure {
    /// 1-based physical line number.
    pub line: u64,
    pub kind: ErrorKind,
    pub message: String,
    pub offset: Option<u64>,
    pub snippet: Option<String>,
}

fn io_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to read input")
        .with_source(err)
}

pub fn parse_lines<R, F, N>(
    reader: R,
    config: BatchConfig,
    mut on_value: F,
    mut on_failure: N,
) -> Result<BatchOutcome, Error>
where
    R: Read,
    F: FnMut(u64, Value) -> Result<(), Error>,
    N: FnMut(BatchFailure),
{
    let mut reader = BufReader::new(reader);
    let mut outcome = BatchOutcome::default();
    let mut buf = Vec::new();
    let mut line_no = 0u64;
    // Room for the longest accepted line plus a "\r\n" terminator.
    let limit = (config.max_line_bytes as u64).saturating_add(2);

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(limit)
            .read_until(b'\n', &mut buf)
            .map_err(io_error)?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let terminated = buf.last() == Some(&b'\n');
        if !terminated && read as u64 == limit {
            reader.skip_until(b'\n').map_err(io_error)?;
        }
        let content = strip_terminator(&buf);

        if config.skip_blank && content.iter().all(|b| is_whitespace(*b)) {
            continue;
        }

        match parse_line(content, config.max_line_bytes) {
            Ok(value) => {
                on_value(line_no, value)?;
                outcome.ok += 1;
            }
            Err(err) => match config.errors {
                ErrorPolicy::Stop => {
                    return Err(err
                        .with_line(line_no)
                        .with_hint("Use -e skip to continue past bad lines."));
                }
                ErrorPolicy::Skip => {
                    outcome.failed += 1;
                    on_failure(BatchFailure {
                        line: line_no,
                        kind: err.kind(),
                        message: err.message().unwrap_or("parse failed").to_string(),
                        offset: err.offset(),
                        snippet: snippet(content),
                    });
                }
            },
        }
    }

    outcome.lines_total = outcome.ok + outcome.failed;
    Ok(outcome)
}

fn strip_terminator(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn parse_line(content: &[u8], max_line_bytes: usize) -> Result<Value, Error> {
    if content.len() > max_line_bytes {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("line too long")
            .with_hint(format!("Lines are limited to {max_line_bytes} bytes.")));
    }
    let text = content.to_str().map_err(|err| {
        Error::new(ErrorKind::InvalidValue)
            .with_message("line is not valid UTF-8")
            .with_offset(err.valid_up_to() as u64)
    })?;
    Ok(parse(text)?)
}

fn snippet(content: &[u8]) -> Option<String> {
    if content.is_empty() {
        return None;
    }
    let end = content.len().min(MAX_SNIPPET_BYTES);
    Some(content[..end].to_str_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::{BatchConfig, BatchFailure, ErrorPolicy, parse_lines};
    use crate::core::error::ErrorKind;
    use crate::core::value::Value;

    fn config(errors: ErrorPolicy) -> BatchConfig {
        BatchConfig {
            errors,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn parses_one_value_per_line() {
        let input = b"null\n  true\r\n-1.5\nfalse";
        let mut values = Vec::new();
        let outcome = parse_lines(
            &input[..],
            config(ErrorPolicy::Stop),
            |line, value| {
                values.push((line, value));
                Ok(())
            },
            |_| {},
        )
        .expect("batch");

        assert_eq!(outcome.ok, 4);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.lines_total, 4);
        assert_eq!(
            values,
            vec![
                (1, Value::Null),
                (2, Value::True),
                (3, Value::Number(-1.5)),
                (4, Value::False),
            ]
        );
    }

    #[test]
    fn skip_continues_on_parse_error() {
        let input = b"1\nnul\n2 3\n4\n";
        let mut values = Vec::new();
        let mut failures: Vec<BatchFailure> = Vec::new();
        let outcome = parse_lines(
            &input[..],
            config(ErrorPolicy::Skip),
            |_, value| {
                values.push(value);
                Ok(())
            },
            |failure| failures.push(failure),
        )
        .expect("batch");

        assert_eq!(outcome.ok, 2);
        assert_eq!(outcome.failed, 2);
        assert_eq!(values, vec![Value::Number(1.0), Value::Number(4.0)]);
        assert_eq!(failures[0].line, 2);
        assert_eq!(failures[0].kind, ErrorKind::InvalidValue);
        assert_eq!(failures[0].snippet.as_deref(), Some("nul"));
        assert_eq!(failures[1].line, 3);
        assert_eq!(failures[1].kind, ErrorKind::RootNotSingular);
        assert_eq!(failures[1].offset, Some(2));
    }

    #[test]
    fn stop_returns_first_failure_with_line() {
        let input = b"true\n\n1e999\nnull\n";
        let mut seen = 0;
        let err = parse_lines(
            &input[..],
            config(ErrorPolicy::Stop),
            |_, _| {
                seen += 1;
                Ok(())
            },
            |_| {},
        )
        .unwrap_err();

        assert_eq!(seen, 1);
        assert_eq!(err.kind(), ErrorKind::NumberTooBig);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.offset(), Some(0));
        assert!(err.hint().is_some());
    }

    #[test]
    fn blank_lines_fail_when_not_skipped() {
        let input = b"1\n   \n";
        let mut failures = Vec::new();
        let outcome = parse_lines(
            &input[..],
            BatchConfig {
                errors: ErrorPolicy::Skip,
                skip_blank: false,
                ..BatchConfig::default()
            },
            |_, _| Ok(()),
            |failure| failures.push(failure),
        )
        .expect("batch");

        assert_eq!(outcome.failed, 1);
        assert_eq!(failures[0].kind, ErrorKind::ExpectValue);
        assert_eq!(failures[0].line, 2);
    }

    #[test]
    fn long_lines_are_rejected_and_skipped_whole() {
        let mut input = vec![b'1'; 40];
        input.extend_from_slice(b"\n7\n");
        let mut values = Vec::new();
        let mut failures = Vec::new();
        let outcome = parse_lines(
            input.as_slice(),
            BatchConfig {
                errors: ErrorPolicy::Skip,
                skip_blank: true,
                max_line_bytes: 8,
            },
            |line, value| {
                values.push((line, value));
                Ok(())
            },
            |failure| failures.push(failure),
        )
        .expect("batch");

        assert_eq!(outcome.failed, 1);
        assert_eq!(failures[0].kind, ErrorKind::Usage);
        assert_eq!(values, vec![(2, Value::Number(7.0))]);
    }

    #[test]
    fn unbounded_line_limit_reads_whole_lines() {
        let mut values = Vec::new();
        let outcome = parse_lines(
            &b"12
-3.5
"[..],
            BatchConfig {
                max_line_bytes: usize::MAX,
                ..BatchConfig::default()
            },
            |line, value| {
                values.push((line, value));
                Ok(())
            },
            |_| {},
        )
        .expect("batch");

        assert_eq!(outcome.ok, 2);
        assert_eq!(
            values,
            vec![(1, Value::Number(12.0)), (2, Value::Number(-3.5))]
        );
    }

    #[test]
    fn invalid_utf8_is_invalid_value() {
        let input = [b'1', b'\n', 0xff, 0xfe, b'\n'];
        let mut failures = Vec::new();
        parse_lines(
            &input[..],
            config(ErrorPolicy::Skip),
            |_, _| Ok(()),
            |failure| failures.push(failure),
        )
        .expect("batch");

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].kind, ErrorKind::InvalidValue);
        assert_eq!(failures[0].offset, Some(0));
    }

    #[test]
    fn callback_errors_propagate() {
        let err = parse_lines(
            &b"1\n2\n"[..],
            config(ErrorPolicy::Skip),
            |_, _| Err(crate::core::error::Error::new(ErrorKind::Io).with_message("closed")),
            |_| {},
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
