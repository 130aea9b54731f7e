use crate::{IvError, IvResult};

/// A cursor over the bytes of one or more internal values.
///
/// All read operations fail with [IvError::MalformedEncoding] if the key ends early. The error
/// carries the absolute offset of the missing byte.
#[derive(Debug, Clone, Copy)]
pub struct KeyReader<'key> {
    bytes: &'key [u8],
    position: usize,
}

impl<'key> KeyReader<'key> {
    /// Creates a new [KeyReader] that starts at the first byte of `bytes`.
    pub fn new(bytes: &'key [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The offset of the next byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The bytes that have not been read yet.
    pub fn remaining(&self) -> &'key [u8] {
        &self.bytes[self.position..]
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    pub fn read_u8(&mut self) -> IvResult<u8> {
        let byte = self.peek_u8().ok_or_else(|| self.truncated(1))?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> IvResult<[u8; N]> {
        let end = self.position + N;
        let slice = self
            .bytes
            .get(self.position..end)
            .ok_or_else(|| self.truncated(N))?;
        let mut result = [0; N];
        result.copy_from_slice(slice);
        self.position = end;
        Ok(result)
    }

    /// Creates an error for the byte that was read last.
    pub fn error_at_previous(&self, message: impl Into<String>) -> IvError {
        IvError::malformed(self.position.saturating_sub(1), message)
    }

    fn truncated(&self, expected: usize) -> IvError {
        IvError::malformed(
            self.bytes.len(),
            format!(
                "expected {expected} more byte(s) but only {} remain",
                self.bytes.len().saturating_sub(self.position)
            ),
        )
    }
}
