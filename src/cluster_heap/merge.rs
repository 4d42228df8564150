// Line interleaving of two files

use alloc::vec::Vec;

use super::file::Chunks;
use crate::error::{AllocationError, Error};

/// Pulls whole lines out of a chunk stream, joining lines split across clusters
struct LineSource<'a> {
    chunks: Chunks<'a>,
    window: &'a [u8],
}

impl<'a> LineSource<'a> {
    fn new(chunks: Chunks<'a>) -> Self {
        Self { chunks, window: &[] }
    }

    fn take(&mut self, line: &mut Vec<u8>, length: usize) -> Result<(), AllocationError> {
        line.try_reserve(length).map_err(|_| AllocationError::OutOfMemory(line.len() + length))?;
        line.extend_from_slice(&self.window[..length]);
        self.window = &self.window[length..];
        Ok(())
    }

    /// Fill `line` with the next line including its terminator.
    /// The last line of a file may lack one. Returns false once exhausted.
    fn next_line<E>(&mut self, line: &mut Vec<u8>) -> Result<bool, Error<E>> {
        line.clear();
        loop {
            if let Some(index) = self.window.iter().position(|&byte| byte == b'\n') {
                self.take(line, index + 1)?;
                return Ok(true);
            }
            self.take(line, self.window.len())?;
            match self.chunks.next() {
                Some(chunk) => self.window = chunk?,
                None => return Ok(!line.is_empty()),
            }
        }
    }
}

/// Write lines alternately from `a` and `b`, draining whichever outlives the other
pub(crate) fn merge<E, F>(a: Chunks, b: Chunks, mut sink: F) -> Result<(), Error<E>>
where
    F: FnMut(&[u8]) -> Result<(), E>,
{
    let mut sources = [Some(LineSource::new(a)), Some(LineSource::new(b))];
    let mut line = Vec::new();
    let mut count = 0usize;
    while sources.iter().any(Option::is_some) {
        for slot in sources.iter_mut() {
            let source = match slot {
                Some(source) => source,
                None => continue,
            };
            if !source.next_line(&mut line)? {
                *slot = None;
                continue;
            }
            sink(&line).map_err(Error::IO)?;
            count += 1;
        }
    }
    debug!("Merged {} lines", count);
    Ok(())
}
