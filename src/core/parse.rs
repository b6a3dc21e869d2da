// Value dispatch and the top-level "exactly one value" driver.
use tracing::trace;

use crate::core::cursor::Cursor;
use crate::core::literal::{self, parse_literal};
use crate::core::number::parse_number;
use crate::core::status::{ParseError, ParseStatus};
use crate::core::value::Value;

/// Parse `text` as exactly one value surrounded by optional whitespace.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    parse_root(text).map_err(|(err, _)| err)
}

/// Parse `text` into `out` and report the outcome as a status code.
///
/// `out` is `Null` after any failure, except `RootNotSingular`: there the leading value
/// parsed cleanly and stays in `out`.
pub fn parse_into(out: &mut Value, text: &str) -> ParseStatus {
    match parse_root(text) {
        Ok(value) => {
            *out = value;
            ParseStatus::Ok
        }
        Err((err, leading)) => {
            *out = leading.unwrap_or_default();
            err.status()
        }
    }
}

/// Shared driver. A failure carries the leading value when one parsed before the violation.
fn parse_root(text: &str) -> Result<Value, (ParseError, Option<Value>)> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    let result = match parse_value(&mut cursor) {
        Ok(value) => match expect_end(&mut cursor) {
            Ok(()) => Ok(value),
            Err(err) => Err((err, Some(value))),
        },
        Err(err) => Err((err, None)),
    };
    match &result {
        Ok(value) => trace!(kind = value.value_type().as_str(), "parsed value"),
        Err((err, _)) => trace!(
            status = err.status().as_str(),
            offset = err.offset(),
            "parse failed"
        ),
    }
    result
}

fn expect_end(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    cursor.skip_whitespace();
    if cursor.is_at_end() {
        Ok(())
    } else {
        Err(ParseError::new(
            ParseStatus::RootNotSingular,
            cursor.position(),
        ))
    }
}

/// Route on one byte of lookahead.
///
/// Anything that is not a literal start goes to the number lexer, which rejects
/// non-number starts itself.
pub(crate) fn parse_value(cursor: &mut Cursor<'_>) -> Result<Value, ParseError> {
    match cursor.peek() {
        None => Err(ParseError::new(
            ParseStatus::ExpectValue,
            cursor.position(),
        )),
        Some(b'n') => parse_literal(cursor, literal::NULL),
        Some(b't') => parse_literal(cursor, literal::TRUE),
        Some(b'f') => parse_literal(cursor, literal::FALSE),
        Some(_) => parse_number(cursor),
    }
}
