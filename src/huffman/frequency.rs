//! Frequency analysis for byte streams.
//!
//! Counts the occurrence of each byte value (0-255) in a source in one forward pass.

use crate::huffman::tree::Node;
use crate::huffman::Result;
use crate::Error;
use std::io::{ErrorKind, Read};

/// Default chunk size for scanning and compressing.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Occurrence counts for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; 256],
            total: 0,
        }
    }

    /// Counts every byte of `input` into the table.
    pub fn update(&mut self, input: &[u8]) {
        for &byte in input {
            self.counts[byte as usize] += 1;
        }
        self.total += input.len() as u64;
    }

    /// Count for a single byte value.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct byte values seen.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Returns true if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `(symbol, count)` for every symbol seen, in ascending symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// One leaf per symbol seen, in ascending symbol order.
    pub fn leaves(&self) -> Vec<Node> {
        self.symbols()
            .map(|(symbol, frequency)| Node::leaf(symbol, frequency))
            .collect()
    }

    /// Shannon entropy of the distribution in bits per symbol, 0.0 when empty.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.symbols()
            .map(|(_, count)| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans `source` to its end in chunks of `buffer_size` bytes.
///
/// A read returning zero bytes ends the scan normally. Interrupted reads are retried and any other
/// read error is returned.
pub fn scan<R: Read>(source: &mut R, buffer_size: usize) -> Result<FrequencyTable> {
    if buffer_size == 0 {
        return Err(Error::invalid("buffer size must be positive"));
    }

    let mut table = FrequencyTable::new();
    let mut buf = vec![0u8; buffer_size];
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Io(err)),
        };
        table.update(&buf[..n]);
    }

    log::debug!(
        "scanned {} bytes, {} distinct symbols, entropy {:.3} bits/symbol",
        table.total(),
        table.distinct(),
        table.entropy()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Hands out data in small pieces with an interruption in between.
    struct ChoppySource {
        chunks: Vec<io::Result<Vec<u8>>>,
    }

    impl Read for ChoppySource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0)?;
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_known_frequencies() {
        let table = scan(&mut &b"aaabbc"[..], DEFAULT_BUFFER_SIZE).unwrap();
        assert_eq!(table.get(b'a'), 3);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
    }

    #[test]
    fn test_symbols_ascending() {
        let table = scan(&mut &b"zyxzz"[..], 2).unwrap();
        let symbols: Vec<_> = table.symbols().collect();
        assert_eq!(symbols, vec![(b'x', 1), (b'y', 1), (b'z', 3)]);

        let leaves = table.leaves();
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[2].frequency(), 3);
    }

    #[test]
    fn test_empty_source() {
        let table = scan(&mut io::empty(), DEFAULT_BUFFER_SIZE).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_short_reads_and_interruptions() {
        let mut source = ChoppySource {
            chunks: vec![
                Ok(b"ab".to_vec()),
                Err(io::Error::from(io::ErrorKind::Interrupted)),
                Ok(b"a".to_vec()),
                Ok(b"a".to_vec()),
            ],
        };
        let table = scan(&mut source, 16).unwrap();
        assert_eq!(table.get(b'a'), 3);
        assert_eq!(table.get(b'b'), 1);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_hard_read_error() {
        let mut source = ChoppySource {
            chunks: vec![
                Ok(b"ab".to_vec()),
                Err(io::Error::new(io::ErrorKind::Other, "bad sector")),
            ],
        };
        assert!(matches!(scan(&mut source, 16), Err(Error::Io(_))));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        assert!(matches!(
            scan(&mut &b"a"[..], 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_entropy() {
        let mut input = vec![0u8; 50];
        input.extend(vec![1u8; 50]);
        let mut table = FrequencyTable::new();
        table.update(&input);
        assert!((table.entropy() - 1.0).abs() < 1e-9);

        let uniform: Vec<u8> = (0..=255).collect();
        let mut table = FrequencyTable::default();
        table.update(&uniform);
        assert_eq!(table.distinct(), 256);
        assert!((table.entropy() - 8.0).abs() < 1e-9);
    }
}
