//! Payload encoding and decoding.

use crate::bitio::{BitReader, BitWriter};
use crate::huffman::code_table::CodeTable;
use crate::huffman::tree::{HuffmanTree, Node};
use crate::huffman::Result;
use crate::Error;
use std::io::{BufRead, BufWriter, ErrorKind, Read, Write};

/// Encodes every byte of `source` with `codes` and aligns the writer at the end.
///
/// The source is read in chunks of `buffer_size` bytes until a read returns zero bytes. Returns the
/// number of source bytes consumed.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the source holds a byte with no code, which happens when the
/// source changed after it was scanned.
pub fn compress<R: Read, W: Write>(
    codes: &CodeTable,
    source: &mut R,
    out: &mut BitWriter<W>,
    buffer_size: usize,
) -> Result<u64> {
    if buffer_size == 0 {
        return Err(Error::invalid("buffer size must be positive"));
    }

    let mut buf = vec![0u8; buffer_size];
    let mut consumed = 0u64;
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Io(err)),
        };
        for &byte in &buf[..n] {
            let code = codes
                .get(byte)
                .ok_or_else(|| Error::invalid(format!("symbol {:#04x} has no code", byte)))?;
            out.write_bits(code)?;
        }
        consumed += n as u64;
    }

    out.align()?;
    Ok(consumed)
}

/// Decodes exactly `size` bytes from `input` by walking `tree`, writing them to `output`.
///
/// Returns the number of bytes written, which is always `size` on success.
///
/// # Errors
///
/// - [`Error::EndOfInput`] if the payload runs out first.
/// - [`Error::CorruptDictionary`] if the walk reaches a branch with no symbol.
pub fn decompress<R: BufRead, W: Write>(
    tree: &HuffmanTree,
    size: u64,
    input: &mut BitReader<R>,
    output: &mut W,
) -> Result<u64> {
    if size == 0 {
        return Ok(0);
    }

    let root = tree.root();
    if !matches!(root, Node::Internal { .. }) {
        return Err(Error::corrupt("tree has no branches"));
    }

    let mut out = BufWriter::new(output);
    let mut written = 0u64;
    let mut node = root;
    while written < size {
        let bit = input.read_bit()?;
        node = node
            .child(bit)
            .ok_or_else(|| Error::corrupt("walk left the tree"))?;
        match node {
            Node::Leaf { symbol, .. } => {
                out.write_all(&[*symbol])?;
                written += 1;
                node = root;
            }
            Node::Internal { .. } => {}
            Node::Vacant => return Err(Error::corrupt("code leads to no symbol")),
        }
    }

    out.flush()?;
    Ok(written)
}
