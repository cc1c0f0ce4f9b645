//! Character cursor over the source text.
//!
//! The source format is UTF-8-compatible ASCII (spec.md §6), so the cursor
//! only needs byte-accurate ASCII fast paths; non-ASCII bytes are still
//! handled (treated as ordinary characters) so the lexer never panics on
//! unexpected input.

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// The character at the cursor, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.peek_char(0)
    }

    pub fn peek_char(&self, chars_ahead: usize) -> char {
        self.source[self.position..].chars().nth(chars_ahead).unwrap_or('\0')
    }

    pub fn advance(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
