//! Byte sources feeding the gateway loop

use std::io::{self, ErrorKind, Read};
use std::time::Duration;

use anyhow::{Context, Result};
use serialport::SerialPort;
use tracing::info;

/// Trait for reading bytes from the node's channel
///
/// `Ok(Some(0))` means nothing was available this poll, `Ok(None)` means the
/// source is exhausted and will never produce more bytes.
pub trait ByteReader {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> io::Result<Option<usize>>;
}

/// Serial port byte reader wrapper
pub struct SerialReader {
    port: Box<dyn SerialPort>,
}

impl SerialReader {
    pub fn open(path: &str, baud: u32, timeout: Duration) -> Result<Self> {
        info!("Opening serial port: {path} at {baud} bps");

        let port = serialport::new(path, baud)
            .timeout(timeout)
            .open()
            .with_context(|| format!("Failed to open serial port {path}"))?;

        Ok(Self { port })
    }
}

impl ByteReader for SerialReader {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> io::Result<Option<usize>> {
        match self.port.read(buffer) {
            Ok(n) => Ok(Some(n)),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(Some(0)),
            Err(e) => Err(e),
        }
    }
}

/// Reader over any finite `Read`, such as a capture file
pub struct StreamReader<R> {
    inner: R,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> ByteReader for StreamReader<R> {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> io::Result<Option<usize>> {
        match self.inner.read(buffer) {
            Ok(0) if !buffer.is_empty() => Ok(None),
            Ok(n) => Ok(Some(n)),
            Err(e) if e.kind() == ErrorKind::Interrupted => Ok(Some(0)),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_reader_signals_end() {
        let mut reader = StreamReader::new(Cursor::new(b"abc".to_vec()));
        let mut buf = [0u8; 2];

        assert_eq!(reader.read_bytes(&mut buf).unwrap(), Some(2));
        assert_eq!(reader.read_bytes(&mut buf).unwrap(), Some(1));
        assert_eq!(reader.read_bytes(&mut buf).unwrap(), None);
    }
}
