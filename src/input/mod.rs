//! Dump file input: compression detection and lenient decoding.
//!
//! Reading is deliberately lenient: invalid UTF-8 sequences are dropped,
//! not substituted, so a half-corrupted dump still converts. Output is
//! written as strict UTF-8; the asymmetry is intentional and means a
//! malformed input never round-trips byte-for-byte.

use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compression format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Detect compression format from file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("gz" | "gzip") => Compression::Gzip,
            Some("bz2" | "bzip2") => Compression::Bzip2,
            Some("xz" | "lzma") => Compression::Xz,
            Some("zst" | "zstd") => Compression::Zstd,
            _ => Compression::None,
        }
    }

    /// Wrap a reader with the appropriate decompressor
    pub fn wrap_reader<'a>(&self, reader: Box<dyn Read + 'a>) -> Box<dyn Read + 'a> {
        match self {
            Compression::None => reader,
            Compression::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
            Compression::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
            Compression::Zstd => Box::new(zstd::stream::read::Decoder::new(reader).unwrap()),
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Bzip2 => write!(f, "bzip2"),
            Compression::Xz => write!(f, "xz"),
            Compression::Zstd => write!(f, "zstd"),
        }
    }
}

/// A dump read fully into memory.
#[derive(Debug)]
pub struct DumpText {
    pub text: String,
    pub bytes_read: usize,
    pub bytes_dropped: usize,
}

/// Read a dump file into memory, decompressing by extension and dropping
/// invalid UTF-8 sequences.
pub fn read_dump(path: &Path) -> anyhow::Result<DumpText> {
    let file = File::open(path)
        .with_context(|| format!("failed to open input file: {}", path.display()))?;

    let compression = Compression::from_path(path);
    let mut reader = compression.wrap_reader(Box::new(file));

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;

    let (text, bytes_dropped) = decode_dropping_invalid(&bytes);
    Ok(DumpText {
        text,
        bytes_read: bytes.len(),
        bytes_dropped,
    })
}

/// Decode bytes as UTF-8, skipping invalid sequences entirely.
fn decode_dropping_invalid(bytes: &[u8]) -> (String, usize) {
    let mut out = String::with_capacity(bytes.len());
    let mut dropped = 0;
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(err) => {
                let valid_to = err.valid_up_to();
                // The prefix was just validated by from_utf8.
                out.push_str(std::str::from_utf8(&rest[..valid_to]).unwrap());
                let skip = err.error_len().unwrap_or(rest.len() - valid_to);
                dropped += skip;
                rest = &rest[valid_to + skip..];
            }
        }
    }

    (out, dropped)
}
