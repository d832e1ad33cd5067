//! Huffman coding with a self-describing dictionary.
//!
//! This module provides the stages of the codec, leaf dependencies first:
//! - [`frequency`]: one pass over the input producing per-byte counts
//! - [`tree`]: deterministic greedy tree construction
//! - [`code_table`]: root-to-leaf code paths for every symbol
//! - [`dictionary`]: the v1 (frequency) and v2 (canonical) dictionary encodings
//! - [`codec`]: payload compression and tree-walking decompression
//!
//! [`crate::archive`] strings these together into complete archives.
//!
//! # Examples
//!
//! ```rust
//! use bee_compress::bitio::{BitReader, BitWriter};
//! use bee_compress::huffman::{compress, decompress, FrequencyTable, HuffmanTree};
//!
//! let input = b"abracadabra";
//! let mut freq = FrequencyTable::new();
//! freq.update(input);
//! let tree = HuffmanTree::from_frequencies(&freq).unwrap();
//!
//! let mut out = BitWriter::new(Vec::new());
//! compress(&tree.code_table(), &mut &input[..], &mut out, 4096).unwrap();
//! let payload = out.close().unwrap();
//!
//! let mut decoded = Vec::new();
//! let mut reader = BitReader::new(payload.as_slice());
//! decompress(&tree, input.len() as u64, &mut reader, &mut decoded).unwrap();
//! assert_eq!(decoded, input);
//! ```

use crate::error::Error;

/// Result type for Huffman coding operations
pub type Result<T> = std::result::Result<T, Error>;

pub mod code_table;
pub mod codec;
pub mod dictionary;
pub mod frequency;
pub mod tree;

pub use code_table::{Code, CodeTable};
pub use codec::{compress, decompress};
pub use dictionary::{
    read_dictionary, read_original_size, write_dictionary, write_original_size, FormatVersion,
};
pub use frequency::{scan, FrequencyTable, DEFAULT_BUFFER_SIZE};
pub use tree::{build_tree, HuffmanTree, Node};
