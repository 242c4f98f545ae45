//! Random-access storage behind a stream.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};

/// Seekable read/write storage that can also be cut to length.
///
/// Finalize truncates the storage at the write cursor so audio discarded by a
/// rewind never lingers after the data chunk.
pub trait Storage: Read + Write + Seek {
    /// Sets the total length, discarding or zero-extending the tail.
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl Storage for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

impl Storage for Cursor<Vec<u8>> {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length exceeds memory"))?;
        self.get_mut().resize(len, 0);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        (**self).truncate(len)
    }
}
