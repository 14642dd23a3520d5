//! Fixed-size record codec
//!
//! Every structure in the map and vehicle formats is a fixed-size,
//! little-endian record with fields in declared order and no inter-field
//! padding. [`RecordReader`] and [`RecordWriter`] move whole records between
//! a byte stream and those types, tracking the stream position so that short
//! reads are reported with an exact offset instead of surfacing as a generic
//! end-of-file error.
//!
//! A read never consumes a partial record: the remaining length is checked
//! first, and a short stream fails with [`Error::TruncatedStream`] without
//! touching the underlying reader.

use crate::error::{Error, Result};
use binrw::{BinRead, BinWrite, Endian};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A fixed-size on-disk record
///
/// `SIZE` is the exact number of bytes the record occupies in the stream.
/// Implementations are `binrw` types read and written little-endian.
pub trait Record: for<'a> BinRead<Args<'a> = ()> + for<'a> BinWrite<Args<'a> = ()> {
    /// Encoded size in bytes
    const SIZE: usize;
}

/// Position-tracking record reader over a stream of known length
pub struct RecordReader<R> {
    inner: R,
    position: u64,
    stream_len: u64,
}

impl<R: Read + Seek> RecordReader<R> {
    /// Wrap a reader positioned at the start of a stream of `stream_len` bytes
    pub fn new(inner: R, stream_len: u64) -> Self {
        Self {
            inner,
            position: 0,
            stream_len,
        }
    }

    /// Current offset from the start of the stream
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total stream length
    pub fn stream_len(&self) -> u64 {
        self.stream_len
    }

    /// Bytes left between the current position and the end of the stream
    pub fn remaining(&self) -> u64 {
        self.stream_len.saturating_sub(self.position)
    }

    /// Whether the whole stream has been consumed
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: u64) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(Error::TruncatedStream {
                offset: self.position,
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        self.position += 1;
        Ok(buf[0])
    }

    /// Read `len` raw bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.ensure(len as u64)?;
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        self.position += len as u64;
        Ok(buf)
    }

    /// Read one record
    pub fn read_record<T: Record>(&mut self) -> Result<T> {
        self.ensure(T::SIZE as u64)?;
        let record = T::read_options(&mut self.inner, Endian::Little, ())?;
        self.position += T::SIZE as u64;
        Ok(record)
    }

    /// Read `count` consecutive records, in stream order
    ///
    /// The whole run is bounds-checked before the first record is read, so a
    /// corrupt count fails fast instead of allocating.
    pub fn read_records<T: Record>(&mut self, count: usize) -> Result<Vec<T>> {
        self.ensure((count as u64).saturating_mul(T::SIZE as u64))?;
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.read_record()?);
        }
        Ok(records)
    }
}

impl<'a> RecordReader<Cursor<&'a [u8]>> {
    /// Reader over an in-memory buffer
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self::new(Cursor::new(data), data.len() as u64)
    }
}

/// Position-tracking record writer
///
/// Tag bytes are remembered with their offsets so callers can report the
/// segment layout of what they wrote.
pub struct RecordWriter<W> {
    inner: W,
    position: u64,
    tags: Vec<(u8, u64)>,
}

impl<W: Write + Seek> RecordWriter<W> {
    /// Wrap a writer positioned at the start of the output
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            position: 0,
            tags: Vec::new(),
        }
    }

    /// Bytes written so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// `(tag, offset)` pairs in the order the tags were written
    pub fn tag_offsets(&self) -> &[(u8, u64)] {
        &self.tags
    }

    /// Write a positional segment tag
    pub fn write_tag(&mut self, tag: u8) -> Result<()> {
        self.tags.push((tag, self.position));
        self.write_bytes(&[tag])
    }

    /// Write raw bytes verbatim
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Write one record
    pub fn write_record<T: Record>(&mut self, record: &T) -> Result<()> {
        record.write_options(&mut self.inner, Endian::Little, ())?;
        self.position += T::SIZE as u64;
        Ok(())
    }

    /// Write every record in order
    pub fn write_records<T: Record>(&mut self, records: &[T]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Open `path` for record reading
///
/// A missing path fails with [`Error::FileNotFound`] before any handle is
/// opened.
pub(crate) fn open_reader(path: &Path) -> Result<RecordReader<BufReader<File>>> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let stream_len = file.metadata()?.len();
    debug!("Opened {} ({} bytes)", path.display(), stream_len);
    Ok(RecordReader::new(BufReader::new(file), stream_len))
}

/// Write a file through a sibling temp file and rename it over `path`
///
/// The destination is only replaced once every byte has been written and
/// synced, so a failed save leaves the previous file intact. An existing
/// destination keeps its permissions, and a symlinked destination has its
/// target replaced rather than the link. Returns the number of bytes written.
pub(crate) fn save_atomically<F>(path: &Path, write: F) -> Result<u64>
where
    F: FnOnce(&mut RecordWriter<BufWriter<&File>>) -> Result<()>,
{
    let target = resolve_save_target(path)?;
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(dir)?;

    let written = {
        let mut writer = RecordWriter::new(BufWriter::new(temp.as_file()));
        write(&mut writer)?;
        writer.flush()?;
        writer.position()
    };
    if let Ok(existing) = fs::metadata(&target) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(&target).map_err(|e| Error::Io(e.error))?;

    debug!("Wrote {} bytes to {}", written, target.display());
    Ok(written)
}

/// Follow a symlinked destination to the file it points at
fn resolve_save_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => Ok(fs::canonicalize(path)?),
        _ => Ok(path.to_path_buf()),
    }
}

/// Overwrite `list[index]`, failing without mutation when out of range
pub(crate) fn set_indexed<T>(list: &mut [T], index: usize, value: T) -> Result<()> {
    let len = list.len();
    let slot = list
        .get_mut(index)
        .ok_or(Error::IndexOutOfRange { index, len })?;
    *slot = value;
    Ok(())
}
