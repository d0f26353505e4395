/// Minimal cursor over a fully buffered header value.
///
/// `read` advances one character at a time; `unread` steps back one, which
/// gives callers one-token lookahead on top of [`peek`](Self::peek). A
/// single mark can be set and returned to with [`mark`](Self::mark) and
/// [`reset`](Self::reset).
///
/// Reading from a buffered string cannot fail; end of input is signalled
/// by `None`.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    index: usize,
    mark: usize,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            index: 0,
            mark: 0,
        }
    }

    /// Reads the next character, advancing the cursor.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += c.len_utf8();
        Some(c)
    }

    /// Reads the next character without moving the cursor.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.input[self.index..].chars().next()
    }

    /// Steps the cursor back one character.
    pub fn unread(&mut self) {
        if self.index > 0 {
            let mut i = self.index - 1;
            while !self.input.is_char_boundary(i) {
                i -= 1;
            }
            self.index = i;
        }
    }

    /// Marks the current position. A later [`reset`](Self::reset)
    /// repositions the cursor here.
    pub fn mark(&mut self) {
        self.mark = self.index;
    }

    /// Repositions the cursor at the last marked position.
    pub fn reset(&mut self) {
        self.index = self.mark;
    }

    /// True if all input has been read.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    /// The current byte offset into the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Repositions the cursor at a prior offset.
    ///
    /// `position` must be a value previously returned by
    /// [`position`](Self::position).
    pub fn set_position(&mut self, position: usize) {
        debug_assert!(self.input.is_char_boundary(position));
        self.index = position.min(self.input.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_peek() {
        let mut scanner = Scanner::new("ab");
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.read(), Some('a'));
        assert_eq!(scanner.read(), Some('b'));
        assert_eq!(scanner.read(), None);
        assert!(scanner.is_at_end());
    }

    #[test]
    fn unread_steps_back_one_char() {
        let mut scanner = Scanner::new("aé");
        scanner.read();
        scanner.read();
        scanner.unread();
        assert_eq!(scanner.read(), Some('é'));
    }

    #[test]
    fn mark_and_reset() {
        let mut scanner = Scanner::new("abc");
        scanner.read();
        scanner.mark();
        scanner.read();
        scanner.read();
        scanner.reset();
        assert_eq!(scanner.read(), Some('b'));
    }

    #[test]
    fn empty_input() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.peek(), None);
        assert_eq!(scanner.read(), None);
        scanner.unread();
        assert_eq!(scanner.read(), None);
    }
}
