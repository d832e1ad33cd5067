//! Bit-level stream I/O.
//!
//! [`BitReader`] and [`BitWriter`] wrap a byte source or sink and let callers mix single-bit
//! operations with whole-byte ones. Bits are packed least-significant first: the first bit written
//! after an alignment lands in bit 0 of its byte, the eighth in bit 7.
//!
//! Neither side records how many bits are meaningful. A stream is terminated by its consumer (the
//! decoder knows how many symbols to produce), and [`BitWriter::align`] pads the final byte with
//! zeros.
//!
//! # Examples
//!
//! ```rust
//! use bee_compress::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! for bit in [true, false, true] {
//!     writer.write_bit(bit).unwrap();
//! }
//! let bytes = writer.close().unwrap();
//! assert_eq!(bytes, vec![0b0000_0101]);
//!
//! let mut reader = BitReader::new(bytes.as_slice());
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.align(), 5);
//! ```

use crate::error::Error;

/// Result type for bit stream operations
pub type Result<T> = std::result::Result<T, Error>;

pub mod reader;
pub mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;
