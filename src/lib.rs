//! # bee-compress
//!
//! Huffman compression for byte streams. Every archive carries its own dictionary, so decoding
//! needs nothing but the archive itself.
//!
//! ```rust
//! use bee_compress::{compress_slice, decompress_slice, CompressOptions};
//!
//! let input = b"abaa";
//! let archive = compress_slice(input, &CompressOptions::default()).unwrap();
//! assert_eq!(decompress_slice(&archive).unwrap(), input);
//! ```
//!
//! Two dictionary formats are supported, see [`FormatVersion`].

pub mod archive;
pub mod bitio;
pub mod error;
pub mod huffman;

pub use archive::{
    compress_slice, compress_stream, create_archive, decompress_slice, decompress_stream,
    extract_archive, ArchiveStats, CompressOptions, Compression, HuffmanCodec,
};
pub use error::{Error, Result};
pub use huffman::FormatVersion;
