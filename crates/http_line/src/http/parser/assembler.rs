use bytes::{Buf, Bytes, BytesMut};
use memchr::memchr;
use smallvec::SmallVec;

use super::LineError;

/// The lines completed by a single [`LineAssembler::feed`]
pub type CompletedLines = SmallVec<[Bytes; 4]>;

/// Rebuilds `\n` terminated lines out of arbitrarily split chunks.
///
/// Chunks are pushed in with [`feed`](Self::feed), which hands out every line they complete
/// (terminator excluded). Whatever follows the last terminator is kept as residue for the next
/// chunk, and [`flush`](Self::flush) releases it once the stream is over. The assembler does no
/// I/O of its own.
///
/// With a `max_line_len`, a line fails as soon as it is known to be longer than the limit,
/// whether or not its terminator has arrived. Every line completed before it is still handed
/// out, so the lines seen before [`LineError::TooLong`] do not depend on chunk boundaries.
/// Once `feed` has failed the residue is discarded and the assembler should be dropped.
#[derive(Debug, Default)]
pub struct LineAssembler {
    residue: BytesMut,
    /// Length of the residue prefix already known to hold no `\n`
    scanned: usize,
    max_line_len: Option<usize>,
}

static_assertions::assert_impl_all!(LineAssembler: Send, Sync);

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line_len(max_line_len: Option<usize>) -> Self {
        Self {
            max_line_len,
            ..Self::default()
        }
    }

    /// Appends `chunk` and pushes the lines it completes onto `lines`, in stream order.
    ///
    /// On error, `lines` still holds every line completed ahead of the one that was too long.
    pub fn feed(&mut self, chunk: &[u8], lines: &mut CompletedLines) -> Result<(), LineError> {
        self.residue.extend_from_slice(chunk);

        let before = lines.len();
        while let Some(nl_rel) = memchr(b'\n', &self.residue[self.scanned..]) {
            let nl = self.scanned + nl_rel;
            self.check_len(nl)?;
            lines.push(self.residue.split_to(nl).freeze());
            // Drop the terminator itself
            self.residue.advance(1);
            self.scanned = 0;
        }
        self.scanned = self.residue.len();
        self.check_len(self.residue.len())?;

        log::trace!(
            "completed {} line(s), {} byte(s) pending",
            lines.len() - before,
            self.residue.len()
        );
        Ok(())
    }

    /// Takes the unterminated residue as a final line, if there is any
    pub fn flush(&mut self) -> Option<Bytes> {
        if self.residue.is_empty() {
            return None;
        }
        self.scanned = 0;
        Some(self.residue.split().freeze())
    }

    /// Bytes received but not yet part of a complete line
    pub fn pending(&self) -> usize {
        self.residue.len()
    }

    fn check_len(&mut self, len: usize) -> Result<(), LineError> {
        match self.max_line_len {
            Some(limit) if len > limit => {
                self.residue.clear();
                self.scanned = 0;
                Err(LineError::TooLong { limit })
            }
            _ => Ok(()),
        }
    }
}
