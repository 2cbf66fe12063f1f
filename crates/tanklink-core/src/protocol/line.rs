//! Line encoding and permissive decoding.

/// Line terminator appended to every outbound command.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Encode a command as it goes on the wire: the text followed by one `\n`.
///
/// The text is passed through unchanged, embedded newlines included.
pub fn encode_line(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(LINE_TERMINATOR);
    bytes
}

/// Incremental UTF-8 decoder that never fails.
///
/// Malformed sequences are dropped. An incomplete sequence at the end of a
/// chunk is held back and completed by the next call, so a character split
/// across two reads survives.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk of bytes.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut out = String::with_capacity(self.pending.len());
        let mut pos = 0;

        while pos < self.pending.len() {
            match std::str::from_utf8(&self.pending[pos..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    pos = self.pending.len();
                }
                Err(e) => {
                    let end = pos + e.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&self.pending[pos..end]) {
                        out.push_str(valid);
                    }
                    match e.error_len() {
                        Some(len) => pos = end + len,
                        None => {
                            // Truncated sequence at the tail: keep it for the next chunk.
                            pos = end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..pos);
        out
    }

    /// Discard any held-back bytes.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Reassembles inbound text chunks into complete lines.
///
/// Only used for display; the wire itself carries no framing. Lines are
/// trimmed of trailing whitespace (including `\r`) and blank lines are
/// skipped.
#[derive(Debug, Default)]
pub struct LineAssembler {
    partial: String,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.partial.push_str(chunk);

        let mut lines = Vec::new();
        while let Some(idx) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=idx).collect();
            let trimmed = line.trim_end();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        lines
    }

    /// Take the unterminated tail, if it holds anything but whitespace.
    pub fn take_partial(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.partial);
        let trimmed = rest.trim_end();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
