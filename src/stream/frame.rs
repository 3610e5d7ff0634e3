use tracing::warn;

/// Frame delimiter on the wire: one blank line between records.
const DELIMITER: &[u8] = b"\n\n";

/// Reassembles complete frames out of arbitrarily chunked network reads.
///
/// The buffer works on bytes, not text: a read boundary can fall inside a
/// multi-byte UTF-8 sequence, and that sequence must stay intact until the rest
/// of it arrives. A frame is only converted to text once its closing delimiter
/// has been seen, at which point it is guaranteed whole.
///
/// Invariant: after every [`feed`](Self::feed), `pending` holds at most one
/// partial frame and never a complete one.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    pending: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every frame it completes, in arrival order.
    ///
    /// Empty frames (back-to-back delimiters) are discarded. A complete frame
    /// that is not valid UTF-8 is dropped with a warning; one bad record must
    /// not abort an otherwise useful stream.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(at) = find_delimiter(&self.pending) {
            let rest = self.pending.split_off(at + DELIMITER.len());
            self.pending.truncate(at);
            let raw = std::mem::replace(&mut self.pending, rest);

            if raw.is_empty() {
                continue;
            }
            match String::from_utf8(raw) {
                Ok(frame) => frames.push(frame),
                Err(e) => warn!(error = %e, "dropping non-UTF-8 frame"),
            }
        }
        frames
    }

    /// Bytes held back because their frame has not completed yet.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(DELIMITER.len()).position(|w| w == DELIMITER)
}
