//! File access with transparent compression.
//!
//! Audit logs are usually rotated and compressed, and summary caches can
//! get large, so both directions pick a codec from the file extension.
//!
//! # Supported Formats
//!
//! - Plain text files
//! - Gzip compressed files (.gz)
//! - Zstandard compressed files (.zst)
//!
//! # Examples
//!
//! ```no_run
//! use kube_audit_tools::utils::reader::open_file;
//! use std::io::{BufRead, BufReader};
//!
//! let reader = open_file("kube-apiserver-audit.log.gz").unwrap();
//! for line in BufReader::new(reader).lines() {
//!     let line = line.unwrap();
//!     // Process line...
//! }
//! ```

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Compression codec chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Plain,
    Gzip,
    Zstd,
}

impl Codec {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "gz" => Self::Gzip,
            "zst" => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

/// Opens a file for reading with automatic decompression based on extension.
pub fn open_file(path: impl AsRef<Path>) -> io::Result<Box<dyn Read + Send>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    match Codec::from_path(path) {
        Codec::Gzip => Ok(Box::new(GzDecoder::new(file))),
        Codec::Zstd => Ok(Box::new(zstd::Decoder::new(file)?)),
        Codec::Plain => Ok(Box::new(file)),
    }
}

/// Writer returned by [`create_file`].
///
/// Compressed streams need an explicit trailer, so callers must call
/// [`CompressedWriter::finish`] instead of relying on drop.
pub enum CompressedWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Zstd(zstd::Encoder<'static, BufWriter<File>>),
}

impl CompressedWriter {
    /// Flushes buffered data and writes any compression trailer.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut w) => w.flush(),
            Self::Gzip(enc) => enc.finish()?.flush(),
            Self::Zstd(enc) => enc.finish()?.flush(),
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
            Self::Zstd(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
            Self::Zstd(w) => w.flush(),
        }
    }
}

/// Creates (or truncates) a file for writing, compressing by extension.
pub fn create_file(path: impl AsRef<Path>) -> io::Result<CompressedWriter> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);

    match Codec::from_path(path) {
        Codec::Gzip => Ok(CompressedWriter::Gzip(GzEncoder::new(
            file,
            Compression::default(),
        ))),
        Codec::Zstd => Ok(CompressedWriter::Zstd(zstd::Encoder::new(file, 3)?)),
        Codec::Plain => Ok(CompressedWriter::Plain(file)),
    }
}
