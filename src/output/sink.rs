use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::writer::{Durable, LineWriter, Writer};
use crate::error::{ErrorKind, Result};

/// What happens to an existing output file on start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Truncate,
    Append,
}

impl Default for OpenMode {
    fn default() -> Self {
        OpenMode::Truncate
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpenMode::Truncate => write!(f, "truncate"),
            OpenMode::Append => write!(f, "append"),
        }
    }
}

/// Mirrors every record to an observation stream and persists it to a
/// durable store. The store is held for the sink's whole lifetime.
pub struct Sink<O, S> {
    observer: LineWriter<O>,
    store: LineWriter<S>,
}

impl Sink<io::Stdout, File> {
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        Ok(Self::new(io::stdout(), open_store(path, mode)?))
    }
}

/// Opens (creating if needed) the output file the sink persists to.
pub fn open_store<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<File> {
    let path = path.as_ref();

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        OpenMode::Truncate => options.write(true).truncate(true),
        OpenMode::Append => options.read(true).append(true),
    };

    let mut file = options
        .open(path)
        .map_err(|e| (ErrorKind::FileAcquisition, "couldn't open output file", e))?;

    if mode == OpenMode::Append {
        let dropped = drop_partial_record(&mut file)
            .map_err(|e| (ErrorKind::FileAcquisition, "couldn't repair output file", e))?;
        if dropped > 0 {
            log::warn!(
                "dropped {} trailing bytes of an unterminated record from {}",
                dropped,
                path.display()
            );
        }
    }

    log::info!("writing samples to {} (mode: {})", path.display(), mode);
    Ok(file)
}

// Cuts the file back to just past its last line delimiter. Returns the
// number of bytes removed.
fn drop_partial_record(file: &mut File) -> io::Result<u64> {
    let len = file.metadata()?.len();
    let mut chunk = [0u8; 4096];
    let mut end = len;

    while end > 0 {
        let start = end.saturating_sub(chunk.len() as u64);
        let n = (end - start) as usize;
        file.seek(SeekFrom::Start(start))?;
        file.read_exact(&mut chunk[..n])?;

        if let Some(pos) = chunk[..n].iter().rposition(|b| *b == b'\n') {
            let keep = start + pos as u64 + 1;
            if keep < len {
                file.set_len(keep)?;
            }
            return Ok(len - keep);
        }
        end = start;
    }

    if len > 0 {
        file.set_len(0)?;
    }
    Ok(len)
}

impl<O: Write, S: Durable> Sink<O, S> {
    pub fn new(observer: O, store: S) -> Self {
        Self {
            observer: LineWriter::new(observer),
            store: LineWriter::new(store),
        }
    }

    /// Writes one record: observation stream first, then the store, then
    /// syncs the store. Returns only once the record is durable. A record
    /// that only partly reached the store is cut back out of it.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.observer
            .write(buf)
            .and_then(|_| self.observer.get_mut().flush())
            .map_err(|e| (ErrorKind::Write, "couldn't write to observation stream", e))?;

        let mark = self
            .store
            .get_mut()
            .len()
            .map_err(|e| (ErrorKind::Write, "couldn't stat output file", e))?;

        if let Err(e) = self.store.write(buf) {
            // Don't leave a torn record behind for the next line to merge into.
            if let Err(rollback) = self.store.get_mut().truncate(mark) {
                log::error!("couldn't roll back partial record: {}", rollback);
            }
            return Err((ErrorKind::Write, "couldn't write to output file", e).into());
        }

        self.store
            .get_mut()
            .sync()
            .map_err(|e| (ErrorKind::Flush, "couldn't flush output file", e))?;

        Ok(())
    }

    pub fn into_inner(self) -> (O, S) {
        (self.observer.into_inner(), self.store.into_inner())
    }
}
