// Forward-only read position over borrowed input text.
// End of input is the end of the slice; there is no sentinel byte.

/// Bytes that separate tokens. Nothing else counts as whitespace.
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Byte `offset` positions past the current one, without consuming anything.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn advance(&mut self, count: usize) {
        debug_assert!(
            self.pos + count <= self.input.len(),
            "cursor advanced past end of input"
        );
        self.pos += count;
    }

    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .rest()
            .iter()
            .take_while(|byte| is_whitespace(**byte))
            .count();
        self.pos += skipped;
    }
}
