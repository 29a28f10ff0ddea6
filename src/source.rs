use crate::parser::{ParseError, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

/// A byte store of known length supporting positioned reads.
///
/// `read_at` takes `&self` so one source can back many decoded nodes at
/// once. Implementations must either be safe for concurrent `read_at` calls
/// at independent offsets or serialize internally; each impl documents which.
pub trait ReadAt {
    /// Total length of the underlying byte store.
    fn total_len(&self) -> u64;

    /// Read exactly `len` bytes starting at absolute `offset`.
    ///
    /// Fails with [`ParseError::ShortRead`] when `offset + len` exceeds
    /// [`ReadAt::total_len`], and with [`ParseError::Io`] on an underlying
    /// read failure.
    fn read_at(&self, offset: u64, len: u64) -> Result<Vec<u8>>;
}

/// In-memory source. Trivially safe for concurrent reads.
impl ReadAt for [u8] {
    fn total_len(&self) -> u64 {
        self.len() as u64
    }

    fn read_at(&self, offset: u64, len: u64) -> Result<Vec<u8>> {
        let total = self.len() as u64;
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= total)
            .ok_or(ParseError::ShortRead {
                offset,
                len,
                available: total.saturating_sub(offset),
            })?;
        Ok(self[offset as usize..end as usize].to_vec())
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn total_len(&self) -> u64 {
        (**self).total_len()
    }

    fn read_at(&self, offset: u64, len: u64) -> Result<Vec<u8>> {
        (**self).read_at(offset, len)
    }
}

/// File-backed source with the length captured at open time.
///
/// Reads seek the shared handle, so concurrent `read_at` calls are
/// serialized through an internal lock.
pub struct FileSource {
    file: Mutex<File>,
    len: u64,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(FileSource {
            file: Mutex::new(file),
            len,
        })
    }
}

impl ReadAt for FileSource {
    fn total_len(&self) -> u64 {
        self.len
    }

    fn read_at(&self, offset: u64, len: u64) -> Result<Vec<u8>> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= self.len)
            .ok_or(ParseError::ShortRead {
                offset,
                len,
                available: self.len.saturating_sub(offset),
            })?;
        debug_assert!(end <= self.len);

        let mut file = self
            .file
            .lock()
            .map_err(|_| ParseError::Io(io::Error::other("file source lock poisoned")))?;
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len as usize];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }
}
