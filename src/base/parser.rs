use std::slice::SliceIndex;

/// A cursor over the input being parsed.
#[derive(Clone)]
pub(crate) struct Parser<'a> {
    input: &'a [u8],
    n: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self { input, n: 0 }
    }

    /// Get the given index.
    #[inline]
    pub(crate) fn get<I>(&self, index: I) -> Option<&'a I::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.input.get(index)
    }

    /// Bump the given number of bytes of input.
    #[inline]
    pub(crate) fn bump(&mut self, n: usize) {
        self.n = self.n.wrapping_add(n).min(self.input.len());
    }

    /// Move the cursor back to a position which has already been visited.
    #[inline]
    pub(crate) fn reset(&mut self, n: usize) {
        self.n = n.min(self.input.len());
    }

    /// Get a string from the given starting position to current cursor
    /// location.
    #[inline]
    pub(crate) fn string(&self, start: usize) -> &'a [u8] {
        self.input.get(start..self.n).unwrap_or_default()
    }

    /// Test if eof.
    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.n == self.input.len()
    }

    /// Move to the next occurence of the given byte, or eof.
    pub(crate) fn find(&mut self, a: u8) {
        let input = self.input.get(self.n..).unwrap_or_default();

        if let Some(n) = memchr::memchr(a, input) {
            self.bump(n);
        } else {
            self.n = self.input.len();
        }
    }

    /// Peek the next value.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    /// Peek the next next value.
    #[inline]
    pub(crate) fn peek2(&self) -> (u8, u8) {
        (self.peek_at(0), self.peek_at(1))
    }

    /// Peek a value `n` bytes ahead, where the end of input is `0`.
    #[inline]
    pub(crate) fn peek_at(&self, n: usize) -> u8 {
        let Some(&b) = self.input.get(self.n.wrapping_add(n)) else {
            return 0;
        };

        b
    }

    /// Get the current position.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.n
    }

    /// The column of the given position, counted in bytes from the start of
    /// its line.
    pub(crate) fn column(&self, to: usize) -> usize {
        let line = self.input.get(..to).unwrap_or_default();

        match memchr::memrchr(b'\n', line) {
            Some(n) => to - n - 1,
            None => to,
        }
    }
}
