use std::fs::File;
use std::io::{self, Write};

pub trait Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;
}

/// A destination whose writes can be forced down to the storage medium,
/// and cut back to an earlier length when a write only partly lands.
pub trait Durable: Write {
    fn sync(&mut self) -> io::Result<()>;
    fn len(&mut self) -> io::Result<u64>;
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl Durable for File {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_data()
    }

    fn len(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

const DELIMITER: u8 = b'\n';

pub struct LineWriter<W> {
    inner: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Writer for LineWriter<W> {
    // Record and delimiter go out in a single write_all.
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut line = Vec::with_capacity(buf.len() + 1);
        line.extend_from_slice(buf);
        line.push(DELIMITER);
        self.inner.write_all(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_writer() -> io::Result<()> {
        let mut writer = LineWriter::new(Vec::new());
        writer.write(b"foo")?;
        writer.write(b"bar")?;

        assert_eq!(writer.into_inner(), b"foo\nbar\n".to_vec());
        Ok(())
    }
}
