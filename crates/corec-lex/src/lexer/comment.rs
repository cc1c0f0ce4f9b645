//! Whitespace and line-comment skipping (spec.md §4.1).
//!
//! `//` is not itself a symbol in `SYMBOLS`: it is recognized here, before
//! generic symbol lexing ever sees the first `/`, and everything up to
//! (not including) the next newline or end of input is discarded.

use crate::lexer::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            while !self.cursor.is_at_end()
                && matches!(self.cursor.current_char(), ' ' | '\t' | '\n')
            {
                self.cursor.advance();
            }

            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }

            break;
        }
    }
}
