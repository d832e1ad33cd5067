//! Complete archives: dictionary, original size and payload.
//!
//! Encoding scans the source once to build the tree, then reads it a second time to encode it.
//! [`compress_stream`] rewinds a seekable source between the two passes, and [`create_archive`]
//! opens the source file twice, closing the scanning handle before the encoding one is opened.
//!
//! # Examples
//!
//! ```rust
//! use bee_compress::archive::{compress_slice, decompress_slice, CompressOptions};
//! use bee_compress::FormatVersion;
//!
//! let input = b"she sells sea shells by the sea shore";
//! let options = CompressOptions::new(FormatVersion::Frequency);
//! let archive = compress_slice(input, &options).unwrap();
//! assert_eq!(&archive[..2], &[0x00, 0x01]);
//! assert_eq!(decompress_slice(&archive).unwrap(), input);
//! ```

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::huffman::frequency::{scan, FrequencyTable, DEFAULT_BUFFER_SIZE};
use crate::huffman::{
    codec, read_dictionary, read_original_size, write_dictionary, write_original_size,
    FormatVersion, HuffmanTree,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Instant;

/// Trait for whole-buffer compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Settings for building an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Dictionary encoding to write.
    pub version: FormatVersion,
    /// Chunk size for reading the source. Has no effect on the output.
    pub buffer_size: usize,
}

impl CompressOptions {
    /// Options for `version` with the default read chunk size.
    pub fn new(version: FormatVersion) -> Self {
        CompressOptions {
            version,
            ..Default::default()
        }
    }

    /// Replaces the read chunk size.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

impl Default for CompressOptions {
    fn default() -> Self {
        CompressOptions {
            version: FormatVersion::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Summary of an encoded archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Bytes read from the source.
    pub original_size: u64,
    /// Bytes in the archive, headers included.
    pub archive_size: u64,
    /// Distinct byte values in the source.
    pub distinct_symbols: usize,
}

impl ArchiveStats {
    /// Archive size as a fraction of the original size.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.archive_size as f64 / self.original_size as f64
    }
}

/// Writes a full archive for `source`, whose byte counts were already gathered into `table`.
///
/// `source` must yield exactly the bytes that were scanned.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty table or when `source` does not match it.
pub fn encode<R: Read, W: Write>(
    table: &FrequencyTable,
    source: &mut R,
    sink: W,
    options: &CompressOptions,
) -> Result<ArchiveStats> {
    if table.is_empty() {
        return Err(Error::invalid("empty input cannot be archived"));
    }

    let tree = HuffmanTree::from_frequencies(table)?;
    let codes = tree.code_table();

    let mut out = BitWriter::new(sink);
    write_dictionary(&mut out, options.version, table, &codes)?;
    write_original_size(&mut out, table.total())?;
    let consumed = codec::compress(&codes, source, &mut out, options.buffer_size)?;
    if consumed != table.total() {
        return Err(Error::invalid(format!(
            "source changed after scanning: scanned {} bytes, encoded {}",
            table.total(),
            consumed
        )));
    }

    let stats = ArchiveStats {
        original_size: consumed,
        archive_size: out.bytes_written(),
        distinct_symbols: codes.len(),
    };
    out.close()?;
    Ok(stats)
}

/// Scans a seekable source, rewinds it to where it started and encodes it into `sink`.
pub fn compress_stream<R: Read + Seek, W: Write>(
    source: &mut R,
    sink: W,
    options: &CompressOptions,
) -> Result<ArchiveStats> {
    let start = source.stream_position()?;
    let table = scan(source, options.buffer_size)?;
    source.seek(SeekFrom::Start(start))?;
    encode(&table, source, sink, options)
}

/// Decodes an archive from `source` into `sink`, returning the number of bytes restored.
///
/// Bytes after the payload are left unread in `source`, so archives stored back to back can be
/// decoded one after another from the same stream.
pub fn decompress_stream<R: BufRead, W: Write>(source: R, sink: &mut W) -> Result<u64> {
    let mut input = BitReader::new(source);
    let (version, tree) = read_dictionary(&mut input)?;
    let size = read_original_size(&mut input)?;
    log::debug!("decoding {} archive of {} bytes", version, size);
    codec::decompress(&tree, size, &mut input, sink)
}

/// Compresses an in-memory buffer.
pub fn compress_slice(input: &[u8], options: &CompressOptions) -> Result<Vec<u8>> {
    let mut archive = Vec::new();
    compress_stream(&mut Cursor::new(input), &mut archive, options)?;
    Ok(archive)
}

/// Decompresses an in-memory archive.
pub fn decompress_slice(archive: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_stream(archive, &mut output)?;
    Ok(output)
}

/// Compresses the file at `source` into a new archive at `output`.
pub fn create_archive(
    source: &Path,
    output: &Path,
    options: &CompressOptions,
) -> Result<ArchiveStats> {
    let started = Instant::now();

    let table = {
        let mut file = File::open(source)?;
        scan(&mut file, options.buffer_size)?
    };
    log::debug!("scanned {} in {:?}", source.display(), started.elapsed());

    let mut input = File::open(source)?;
    let sink = File::create(output)?;
    let stats = encode(&table, &mut input, sink, options)?;

    log::info!(
        "created {} ({} -> {} bytes, {:.1}%, {} dictionary) in {:?}",
        output.display(),
        stats.original_size,
        stats.archive_size,
        stats.ratio() * 100.0,
        options.version,
        started.elapsed()
    );
    Ok(stats)
}

/// Restores the file archived at `source` into `output`, returning the restored size.
pub fn extract_archive(source: &Path, output: &Path) -> Result<u64> {
    let started = Instant::now();

    let input = BufReader::new(File::open(source)?);
    let mut sink = File::create(output)?;
    let size = decompress_stream(input, &mut sink)?;

    log::info!(
        "extracted {} ({} bytes) in {:?}",
        output.display(),
        size,
        started.elapsed()
    );
    Ok(size)
}

/// Whole-buffer Huffman codec.
///
/// # Example
///
/// ```
/// use bee_compress::archive::{Compression, HuffmanCodec};
///
/// let codec = HuffmanCodec::default();
/// let archive = codec.compress(b"hello huffman").unwrap();
/// assert_eq!(codec.decompress(&archive).unwrap(), b"hello huffman");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec {
    options: CompressOptions,
}

impl HuffmanCodec {
    /// Creates a codec that writes archives with `options`.
    pub fn new(options: CompressOptions) -> Self {
        HuffmanCodec { options }
    }

    /// Options used for compression.
    pub fn options(&self) -> &CompressOptions {
        &self.options
    }
}

impl Compression for HuffmanCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        compress_slice(data, &self.options)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress_slice(data)
    }
}
