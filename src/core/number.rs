// Number lexer and converter.
//
// Grammar: -? (0 | [1-9][0-9]*) (\.[0-9]+)? ([eE][+-]?[0-9]+)?
//
// The token is scanned with lookahead only. The cursor moves once, after the whole
// span is valid and converted.
use crate::core::cursor::Cursor;
use crate::core::status::{ParseError, ParseStatus};
use crate::core::value::Value;

pub fn parse_number(cursor: &mut Cursor<'_>) -> Result<Value, ParseError> {
    let start = cursor.position();
    let len = scan_number(cursor.rest()).map_err(|at| invalid(start + at))?;

    let span = &cursor.rest()[..len];
    // The scanned span holds only ASCII sign, digit, dot and exponent bytes.
    let text = std::str::from_utf8(span).map_err(|_| invalid(start))?;
    let number = text.parse::<f64>().map_err(|_| invalid(start))?;
    if number.is_infinite() {
        return Err(ParseError::new(ParseStatus::NumberTooBig, start));
    }

    cursor.advance(len);
    Ok(Value::Number(number))
}

fn invalid(offset: usize) -> ParseError {
    ParseError::new(ParseStatus::InvalidValue, offset)
}

/// Length of the number token at the start of `input`, or the index of the byte that
/// breaks the grammar.
fn scan_number(input: &[u8]) -> Result<usize, usize> {
    let at = |index: usize| input.get(index).copied();
    let mut p = 0;

    if at(p) == Some(b'-') {
        p += 1;
    }

    match at(p) {
        Some(b'0') => {
            p += 1;
            // No leading zeros.
            if at(p).is_some_and(|b| b.is_ascii_digit()) {
                return Err(p);
            }
        }
        Some(b'1'..=b'9') => p = skip_digits(input, p + 1),
        _ => return Err(p),
    }

    if at(p) == Some(b'.') {
        p += 1;
        if !at(p).is_some_and(|b| b.is_ascii_digit()) {
            return Err(p);
        }
        p = skip_digits(input, p);
    }

    if matches!(at(p), Some(b'e' | b'E')) {
        p += 1;
        if matches!(at(p), Some(b'+' | b'-')) {
            p += 1;
        }
        if !at(p).is_some_and(|b| b.is_ascii_digit()) {
            return Err(p);
        }
        p = skip_digits(input, p);
    }

    Ok(p)
}

fn skip_digits(input: &[u8], from: usize) -> usize {
    from + input[from..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}
