//! Copyable cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte or char-by-char. EOF
//! is detected when the current byte equals the sentinel (`0x00`) and the
//! position has reached the source length. The sentinel and the zero padding
//! after it make one-byte lookahead safe without bounds checks.
//!
//! # Interior Null Bytes
//!
//! A null at `pos < source_len` is an interior null (ordinary content to the
//! scanner); a null at `pos >= source_len` is the sentinel (EOF).
//!
//! # Backtracking
//!
//! [`Cursor`] is [`Copy`]. Saving a cursor is a snapshot and assigning it
//! back is a restore, so scanners never need explicit checkpoint logic.

/// Copyable cursor over a sentinel-terminated source buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    src: &'a str,
    /// Current read position (byte index into `src`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `src[source_len]` must be `0x00` and all following bytes must be
    /// `0x00` as well. Guaranteed by `SourceBuffer::new()`.
    pub(crate) fn new(src: &'a str, source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < src.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(
            src.as_bytes()[source_len as usize] == 0,
            "sentinel byte must be 0x00"
        );
        Self {
            src,
            pos: 0,
            source_len,
        }
    }

    /// Returns a copy of this cursor moved to `pos`.
    ///
    /// `pos` must not exceed the source length and should fall on a UTF-8
    /// character boundary.
    #[inline]
    #[must_use]
    pub fn with_pos(self, pos: u32) -> Self {
        debug_assert!(pos <= self.source_len, "cursor moved past EOF");
        Self { pos, ..self }
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// Source bytes from the current position to EOF.
    #[inline]
    fn remaining(&self) -> &'a [u8] {
        let pos = self.pos.min(self.source_len) as usize;
        &self.bytes()[pos..self.source_len as usize]
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` at EOF (the sentinel byte). Interior null bytes also
    /// return `0x00`; use [`is_eof()`](Self::is_eof) to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.bytes()[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position up to EOF: the sentinel and padding
    /// guarantee a valid read.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.bytes()[self.pos as usize + 1]
    }

    /// Returns the character at the current position, or `None` at EOF.
    pub fn current_char(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let width = Self::utf8_char_width(self.current()) as usize;
        let start = self.pos as usize;
        let end = (start + width).min(self.source_len as usize);
        self.src.get(start..end).and_then(|s| s.chars().next())
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Move the cursor to EOF.
    #[inline]
    pub fn seek_eof(&mut self) {
        self.pos = self.source_len;
    }

    /// Extract a source substring as `&str`.
    ///
    /// Returns an empty string if `start..end` is out of range or does not
    /// fall on character boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        self.src.get(start as usize..end as usize).unwrap_or_default()
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance while `pred` returns `true` for the current character.
    ///
    /// Stops at EOF. Returns the number of bytes consumed.
    pub fn eat_chars_while(&mut self, pred: impl Fn(char) -> bool) -> u32 {
        let start = self.pos;
        while let Some(c) = self.current_char() {
            if !pred(c) {
                break;
            }
            self.advance_char();
        }
        self.pos - start
    }

    /// Returns `true` if the remaining source starts with `needle`.
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.remaining().starts_with(needle)
    }

    /// Returns `true` if the remaining source starts with `needle`, ignoring
    /// ASCII case.
    pub fn starts_with_ignore_ascii_case(&self, needle: &[u8]) -> bool {
        let rest = self.remaining();
        rest.len() >= needle.len() && rest[..needle.len()].eq_ignore_ascii_case(needle)
    }

    /// Distance from the current position to the next `byte`, if any.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn find_byte(&self, byte: u8) -> Option<u32> {
        memchr::memchr(byte, self.remaining()).map(|off| off as u32)
    }

    /// Distance from the current position to the next `a` or `b`, if any.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn find_either(&self, a: u8, b: u8) -> Option<u32> {
        memchr::memchr2(a, b, self.remaining()).map(|off| off as u32)
    }

    /// Distance from the current position to the next occurrence of
    /// `needle`, if any.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn find(&self, needle: &[u8]) -> Option<u32> {
        memchr::memmem::find(self.remaining(), needle).map(|off| off as u32)
    }
}
