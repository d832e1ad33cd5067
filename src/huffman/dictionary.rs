//! Dictionary serialization.
//!
//! Every archive starts with a big-endian `u16` format version and a `u32` symbol count, followed
//! by one of two dictionary bodies:
//!
//! - [`FormatVersion::Frequency`] (v1) stores `(value: u8, frequency: u32)` per symbol. The decoder
//!   reruns [`build_tree`](crate::huffman::tree::build_tree) on them, so it depends on tree
//!   construction being deterministic.
//! - [`FormatVersion::Canonical`] (v2) stores `(value: u8, length: u8)` per symbol, then the bits
//!   of every code back to back, padded to a byte boundary only at the very end. The decoder
//!   rebuilds a trie of the same shape directly from the code bits.
//!
//! Symbols appear in ascending value order in both bodies. The dictionary is followed by the
//! original input size as a big-endian `u64`.

use crate::bitio::{BitReader, BitWriter};
use crate::huffman::code_table::CodeTable;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::tree::{HuffmanTree, Node};
use crate::huffman::Result;
use crate::Error;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{BufRead, Write};

/// On-disk dictionary encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatVersion {
    /// Raw symbol frequencies (v1).
    Frequency,
    /// Code lengths plus packed code bits (v2).
    #[default]
    Canonical,
}

impl FormatVersion {
    /// The value stored in the archive header.
    pub fn as_u16(self) -> u16 {
        match self {
            FormatVersion::Frequency => 1,
            FormatVersion::Canonical => 2,
        }
    }
}

impl TryFrom<u16> for FormatVersion {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            1 => Ok(FormatVersion::Frequency),
            2 => Ok(FormatVersion::Canonical),
            other => Err(Error::UnsupportedFormatVersion(other)),
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatVersion::Frequency => write!(f, "v1 (frequency)"),
            FormatVersion::Canonical => write!(f, "v2 (canonical)"),
        }
    }
}

/// Writes the header and dictionary body for `version`.
///
/// `frequencies` feeds the v1 body and `codes` the v2 body; both must describe the same symbols.
/// The writer is left byte-aligned.
pub fn write_dictionary<W: Write>(
    out: &mut BitWriter<W>,
    version: FormatVersion,
    frequencies: &FrequencyTable,
    codes: &CodeTable,
) -> Result<()> {
    match version {
        FormatVersion::Frequency => write_frequency_dictionary(out, frequencies),
        FormatVersion::Canonical => write_canonical_dictionary(out, codes),
    }
}

fn write_header<W: Write>(out: &mut BitWriter<W>, version: FormatVersion, count: usize) -> Result<()> {
    let count = u32::try_from(count)
        .map_err(|_| Error::invalid(format!("too many symbols: {}", count)))?;
    out.write_u16::<BigEndian>(version.as_u16())?;
    out.write_u32::<BigEndian>(count)?;
    Ok(())
}

fn write_frequency_dictionary<W: Write>(
    out: &mut BitWriter<W>,
    frequencies: &FrequencyTable,
) -> Result<()> {
    let records = frequencies
        .symbols()
        .map(|(symbol, count)| {
            u32::try_from(count).map(|count| (symbol, count)).map_err(|_| {
                Error::invalid(format!(
                    "frequency {} of symbol {:#04x} does not fit the v1 dictionary",
                    count, symbol
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    write_header(out, FormatVersion::Frequency, records.len())?;
    for (symbol, count) in records {
        out.write_u8(symbol)?;
        out.write_u32::<BigEndian>(count)?;
    }
    Ok(())
}

fn write_canonical_dictionary<W: Write>(out: &mut BitWriter<W>, codes: &CodeTable) -> Result<()> {
    let lengths = codes
        .iter()
        .map(|(symbol, code)| {
            u8::try_from(code.len()).map(|len| (symbol, len)).map_err(|_| {
                Error::invalid(format!(
                    "code for {:#04x} is {} bits, longer than the v2 dictionary allows",
                    symbol,
                    code.len()
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    write_header(out, FormatVersion::Canonical, lengths.len())?;
    for &(symbol, len) in &lengths {
        out.write_u8(symbol)?;
        out.write_u8(len)?;
    }
    for (_, code) in codes.iter() {
        out.write_bits(code)?;
    }
    let padding = out.align()?;
    log::trace!(
        "packed {} code bits with {} bits of padding",
        codes.total_bits(),
        padding
    );
    Ok(())
}

/// Reads a header and dictionary body and rebuilds the code tree.
///
/// The reader is left byte-aligned.
///
/// # Errors
///
/// - [`Error::UnsupportedFormatVersion`] for an unknown version, before anything else is read.
/// - [`Error::CorruptDictionary`] when the body does not describe a usable code tree.
/// - [`Error::EndOfInput`] when the archive ends inside the dictionary. This includes a canonical
///   code region shorter than its code lengths add up to: the reader cannot tell such a region
///   apart from an archive cut off inside it, so it is reported as truncation rather than
///   [`Error::CorruptDictionary`].
pub fn read_dictionary<R: BufRead>(input: &mut BitReader<R>) -> Result<(FormatVersion, HuffmanTree)> {
    let version = FormatVersion::try_from(input.read_u16::<BigEndian>()?)?;
    let count = input.read_u32::<BigEndian>()?;
    if count == 0 || count > 256 {
        return Err(Error::corrupt(format!("invalid symbol count {}", count)));
    }

    let tree = match version {
        FormatVersion::Frequency => read_frequency_dictionary(input, count)?,
        FormatVersion::Canonical => read_canonical_dictionary(input, count)?,
    };
    log::debug!("read {} dictionary with {} symbols", version, count);
    Ok((version, tree))
}

fn read_frequency_dictionary<R: BufRead>(input: &mut BitReader<R>, count: u32) -> Result<HuffmanTree> {
    let mut seen = [false; 256];
    let mut leaves = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let symbol = input.read_u8()?;
        let frequency = input.read_u32::<BigEndian>()?;
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(Error::corrupt(format!("symbol {:#04x} listed twice", symbol)));
        }
        leaves.push(Node::leaf(symbol, frequency as u64));
    }
    HuffmanTree::build(leaves)
}

fn read_canonical_dictionary<R: BufRead>(input: &mut BitReader<R>, count: u32) -> Result<HuffmanTree> {
    let mut seen = [false; 256];
    let mut lengths = [0u8; 256];
    for _ in 0..count {
        let symbol = input.read_u8()?;
        let len = input.read_u8()?;
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(Error::corrupt(format!("symbol {:#04x} listed twice", symbol)));
        }
        lengths[symbol as usize] = len;
    }

    let mut root = Node::Vacant;
    for (symbol, &len) in lengths.iter().enumerate() {
        if len == 0 {
            continue;
        }
        let mut node = &mut root;
        for _ in 0..len {
            let bit = input.read_bit()?;
            node = descend(node, bit)?;
        }
        if !matches!(node, Node::Vacant) {
            return Err(Error::corrupt(format!(
                "code for {:#04x} collides with another code",
                symbol
            )));
        }
        *node = Node::leaf(symbol as u8, 0);
    }
    input.align();

    if matches!(root, Node::Vacant) {
        return Err(Error::corrupt("dictionary holds no codes"));
    }
    Ok(HuffmanTree::from_root(root))
}

/// Steps from `node` along `bit`, turning vacant nodes into branches on the way.
fn descend(node: &mut Node, bit: bool) -> Result<&mut Node> {
    if matches!(node, Node::Vacant) {
        *node = Node::internal(Node::Vacant, Node::Vacant);
    }
    match node {
        Node::Internal { zero, one, .. } => Ok(if bit { &mut **one } else { &mut **zero }),
        _ => Err(Error::corrupt("code runs through another symbol's leaf")),
    }
}

/// Writes the original input size that follows the dictionary.
pub fn write_original_size<W: Write>(out: &mut BitWriter<W>, size: u64) -> Result<()> {
    out.write_u64::<BigEndian>(size)?;
    Ok(())
}

/// Reads the original input size that follows the dictionary.
pub fn read_original_size<R: BufRead>(input: &mut BitReader<R>) -> Result<u64> {
    Ok(input.read_u64::<BigEndian>()?)
}
