//! Bit reader over a byte source.

use crate::bitio::Result;
use std::io::{self, BufRead, Read};

/// Reads individual bits, least-significant first, from a buffered byte source.
///
/// The reader pulls bytes from `inner` one at a time as bits are needed and never reads ahead, so
/// once the caller stops reading, everything past the last fetched byte is still in `inner`.
/// Buffering is left to the source: wrap unbuffered sources such as files in a
/// [`BufReader`](std::io::BufReader). The reader implements [`Read`], which makes it usable with
/// `read_exact` and with `byteorder` for fixed-width fields.
#[derive(Debug)]
pub struct BitReader<R: BufRead> {
    inner: R,
    /// Unconsumed bits of the last fetched byte, in the low positions.
    cache: u8,
    /// Number of unconsumed bits in `cache`.
    bits: u8,
}

impl<R: BufRead> BitReader<R> {
    /// Creates a reader positioned at the first bit of `inner`.
    pub fn new(inner: R) -> Self {
        BitReader {
            inner,
            cache: 0,
            bits: 0,
        }
    }

    /// Reads the next bit.
    ///
    /// Fails with [`Error::EndOfInput`](crate::Error::EndOfInput) when the source is exhausted.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits == 0 {
            self.cache = self.fetch()?;
            self.bits = 8;
        }

        self.bits -= 1;
        let bit = self.cache & 1 == 1;
        self.cache >>= 1;
        Ok(bit)
    }

    /// Reads the next eight bits as a byte, whether or not the stream is aligned.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.bits == 0 {
            return self.fetch();
        }
        self.read_unaligned_byte()
    }

    /// Drops any cached bits so the next read starts at a byte boundary.
    ///
    /// Returns the number of bits skipped.
    pub fn align(&mut self) -> u8 {
        let skipped = self.bits;
        self.bits = 0;
        self.cache = 0;
        skipped
    }

    /// Returns true when no bits are cached.
    pub fn is_aligned(&self) -> bool {
        self.bits == 0
    }

    fn fetch(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    // Only called with 1..=7 bits cached; `bits` is unchanged afterwards.
    fn read_unaligned_byte(&mut self) -> Result<u8> {
        let next = self.fetch()?;
        let byte = self.cache | (next << self.bits);
        self.cache = next >> (8 - self.bits);
        Ok(byte)
    }
}

impl<R: BufRead> Read for BitReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bits == 0 {
            return self.inner.read(buf);
        }

        for slot in buf.iter_mut() {
            *slot = self.read_unaligned_byte()?;
        }
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::BufReader;

    /// Hands out `good` bytes, then fails every read.
    struct FailingSource {
        good: Vec<u8>,
    }

    impl Read for FailingSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.good.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            buf[0] = self.good.remove(0);
            Ok(1)
        }
    }

    fn failing_after(good: &[u8]) -> BufReader<FailingSource> {
        BufReader::new(FailingSource {
            good: good.to_vec(),
        })
    }

    #[test]
    fn test_bits_are_lsb_first() {
        let mut reader = BitReader::new(&[0b1000_0001u8, 0b0000_0010][..]);
        let first: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(
            first,
            vec![true, false, false, false, false, false, false, true]
        );
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
    }

    #[test]
    fn test_read_bit_at_end_of_input() {
        let mut reader = BitReader::new(&[0xFFu8][..]);
        for _ in 0..8 {
            assert!(reader.read_bit().unwrap());
        }
        assert!(matches!(reader.read_bit(), Err(Error::EndOfInput)));
    }

    #[test]
    fn test_read_bit_source_failure() {
        let mut reader = BitReader::new(failing_after(&[]));
        assert!(matches!(reader.read_bit(), Err(Error::Io(_))));
    }

    #[test]
    fn test_unaligned_read_source_failure() {
        let mut reader = BitReader::new(failing_after(&[0xA5]));
        assert!(reader.read_bit().unwrap());
        let mut buf = [0u8; 2];
        let err = reader.read_exact(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_aligned_read_is_passthrough() {
        let mut source = &b"hello, world"[..];
        let mut reader = BitReader::new(&mut source);
        let mut buf = [0u8; 5];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
        assert_eq!(source, b", world");
    }

    #[test]
    fn test_unaligned_read_reassembles_bytes() {
        // Three bits consumed, then two bytes straddling three source bytes.
        let mut source = &[0b1010_1101u8, 0b0110_0011, 0b0000_0101, 0xEE][..];
        let mut reader = BitReader::new(&mut source);
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());

        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf).unwrap();
        // low 5 bits come from the cached remainder, high 3 from the next byte
        assert_eq!(buf[0], 0b0111_0101);
        assert_eq!(buf[1], 0b1010_1100);
        assert_eq!(reader.align(), 5);
        assert_eq!(source, &[0xEEu8]);
    }

    #[test]
    fn test_unaligned_read_runs_out() {
        let mut reader = BitReader::new(&[0xFFu8, 0x00][..]);
        reader.read_bit().unwrap();
        let mut buf = [0u8; 2];
        let err = reader.read_exact(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_align_discards_cached_bits() {
        let mut reader = BitReader::new(&[0b0000_0001u8, 0x42][..]);
        assert_eq!(reader.align(), 0);
        assert!(reader.read_bit().unwrap());
        assert!(!reader.is_aligned());
        assert_eq!(reader.align(), 7);
        assert_eq!(reader.read_byte().unwrap(), 0x42);
    }

    #[test]
    fn test_reader_does_not_read_ahead() {
        let mut source = &b"xyz"[..];
        let mut reader = BitReader::new(&mut source);
        assert_eq!(reader.read_byte().unwrap(), b'x');
        // low bit of 'y'
        assert!(reader.read_bit().unwrap());
        assert_eq!(source, b"z");
    }
}
