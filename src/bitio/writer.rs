//! Bit writer over a byte sink.

use crate::bitio::Result;
use bitvec::prelude::*;
use std::io::{self, BufWriter, Write};

/// Writes individual bits, least-significant first, to an underlying byte sink.
///
/// Output is buffered. Call [`align`](BitWriter::align) or [`close`](BitWriter::close) when done;
/// a partially filled byte is never emitted on its own. After any error the writer's state is
/// unspecified and it should be abandoned.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: BufWriter<W>,
    /// Pending bits, filled from bit 0 upwards.
    cache: u8,
    /// Number of pending bits in `cache`.
    bits: u8,
    /// Bytes handed to the buffer so far.
    written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Creates a writer that appends to `inner`.
    pub fn new(inner: W) -> Self {
        BitWriter {
            inner: BufWriter::new(inner),
            cache: 0,
            bits: 0,
            written: 0,
        }
    }

    /// Writes a single bit: 1 if `bit` is true, 0 otherwise.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.cache |= 1 << self.bits;
        }
        self.bits += 1;

        if self.bits == 8 {
            self.emit(self.cache)?;
            self.cache = 0;
            self.bits = 0;
        }
        Ok(())
    }

    /// Writes every bit of `bits` in order.
    pub fn write_bits(&mut self, bits: &BitSlice<u8, Lsb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Writes eight bits, whether or not the stream is aligned.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        if self.bits == 0 {
            return self.emit(byte);
        }
        self.write_unaligned_byte(byte)
    }

    /// Pads the pending byte with zero bits, emits it and flushes the buffer.
    ///
    /// Returns the number of padding bits, 0 if the stream was already aligned.
    pub fn align(&mut self) -> Result<u8> {
        let mut padding = 0;
        if self.bits > 0 {
            self.emit(self.cache)?;
            padding = 8 - self.bits;
            self.cache = 0;
            self.bits = 0;
        }
        self.inner.flush()?;
        Ok(padding)
    }

    /// Aligns the stream and hands back the sink. The sink itself is not closed.
    pub fn close(mut self) -> Result<W> {
        self.align()?;
        let inner = self.inner.into_inner().map_err(|err| err.into_error())?;
        Ok(inner)
    }

    /// Number of whole bytes produced so far, including header bytes and padding.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Returns true when no bits are pending.
    pub fn is_aligned(&self) -> bool {
        self.bits == 0
    }

    fn emit(&mut self, byte: u8) -> Result<()> {
        self.inner.write_all(&[byte])?;
        self.written += 1;
        Ok(())
    }

    // Only called with 1..=7 bits pending; `bits` is unchanged afterwards.
    fn write_unaligned_byte(&mut self, byte: u8) -> Result<()> {
        self.emit(self.cache | (byte << self.bits))?;
        self.cache = byte >> (8 - self.bits);
        Ok(())
    }
}

impl<W: Write> Write for BitWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.bits == 0 {
            let n = self.inner.write(buf)?;
            self.written += n as u64;
            return Ok(n);
        }

        for &byte in buf {
            self.write_unaligned_byte(byte)?;
        }
        Ok(buf.len())
    }

    /// Flushes whole bytes only; pending bits stay cached until [`BitWriter::align`].
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
