// Data-driven matcher for the fixed literal spellings.
use crate::core::cursor::Cursor;
use crate::core::status::{ParseError, ParseStatus};
use crate::core::value::Value;

/// A fixed spelling and the value it denotes.
#[derive(Clone, Copy, Debug)]
pub struct Literal {
    pub spelling: &'static str,
    pub value: Value,
}

pub const NULL: Literal = Literal {
    spelling: "null",
    value: Value::Null,
};

pub const TRUE: Literal = Literal {
    spelling: "true",
    value: Value::True,
};

pub const FALSE: Literal = Literal {
    spelling: "false",
    value: Value::False,
};

/// Match `literal` at the cursor.
///
/// The caller has already committed to this literal by looking at the current byte,
/// which must equal the literal's first byte. On a mismatch the cursor is left where it
/// was and the error offset points at the first byte that differs.
pub fn parse_literal(cursor: &mut Cursor<'_>, literal: Literal) -> Result<Value, ParseError> {
    let expected = literal.spelling.as_bytes();
    debug_assert_eq!(
        cursor.peek(),
        expected.first().copied(),
        "literal dispatched on the wrong lookahead byte"
    );

    for (index, byte) in expected.iter().enumerate().skip(1) {
        if cursor.peek_at(index) != Some(*byte) {
            return Err(ParseError::new(
                ParseStatus::InvalidValue,
                cursor.position() + index,
            ));
        }
    }

    cursor.advance(expected.len());
    Ok(literal.value)
}
