use ufmt_macros::uDebug;

/// Errors that might occur while accumulating a line.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum LineError {
    /// The line did not fit in the buffer. The bytes that did not fit were
    /// dropped.
    Overflow,
}

/// Collects bytes from a serial stream into lines.
///
/// This owns its own buffer, and never writes past it. Bytes are held as
/// received; every byte takes exactly one slot.
///
/// # Type Parameters
///
/// - `N`: Number of bytes in the buffer; the longest line accepted.
pub struct LineAccumulator<const N: usize> {
    buffer: heapless::Vec<u8, N>,
    overflowed: bool,
}
impl<const N: usize> LineAccumulator<N> {
    /// Creates a new, empty accumulator.
    pub fn new() -> Self {
        Self {
            buffer: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Consumes one byte of input.
    ///
    /// A `\n` completes the line: `on_line` is called with it, and then the
    /// buffer is cleared whatever the outcome. Any other byte is appended,
    /// or dropped if the buffer is full.
    ///
    /// # Parameters
    ///
    /// - `byte`: The byte received.
    /// - `on_line`: Called with the completed line (without the `\n`), or
    ///   with [LineError::Overflow] if bytes of it were dropped.
    ///
    /// # Returns
    ///
    /// - `Some(result)`: the result of `on_line`, when a line completed.
    /// - `None`: when the line is still in progress.
    pub fn consume_byte<R>(
        &mut self,
        byte: u8,
        on_line: impl FnOnce(Result<&[u8], LineError>) -> R,
    ) -> Option<R> {
        if byte == b'\n' {
            let line = if self.overflowed {
                Err(LineError::Overflow)
            } else {
                Ok(self.buffer.as_slice())
            };
            let result = on_line(line);
            self.clear();
            Some(result)
        } else {
            if self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            None
        }
    }

    /// Discards the line in progress.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Returns the line in progress.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Returns the number of bytes held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns `true` if bytes of the line in progress were dropped.
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }
}

impl<const N: usize> Default for LineAccumulator<N> {
    fn default() -> Self {
        Self::new()
    }
}
