//! Duplex byte stream to the printer
//!
//! Anything that is `Read + Write` is a transport: a `TcpStream` to port
//! 9100, a serial port, or a USB printer device file such as
//! `/dev/usb/lp0`. Opening and closing it is up to the caller, except for
//! raw TCP printers, which [`NetworkPrinter`](crate::NetworkPrinter) can
//! connect.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Byte stream the session prints through
pub trait Transport {
    /// Write a prefix of `data`, returning how many bytes the device took
    ///
    /// A short count is not an error; the caller sends the rest.
    fn send(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Push buffered bytes out to the device
    fn flush_sent(&mut self) -> io::Result<()>;

    /// Read into `buf`, returning the number of bytes read
    fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<T: Read + Write> Transport for T {
    fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        self.write(data)
    }

    fn flush_sent(&mut self) -> io::Result<()> {
        self.flush()
    }

    fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }
}

/// In-memory transport
///
/// Collects everything written into one job buffer, which can then be
/// written to a printer in one go. Reads are served from a queue of status
/// bytes.
#[derive(Debug, Default, Clone)]
pub struct JobBuffer {
    data: Vec<u8>,
    status: VecDeque<u8>,
}

impl JobBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer that answers status reads with `status`, in order
    pub fn with_status(status: &[u8]) -> Self {
        Self {
            data: Vec::new(),
            status: status.iter().copied().collect(),
        }
    }

    /// Queue one more status byte
    pub fn push_status(&mut self, byte: u8) {
        self.status.push_back(byte);
    }

    /// Bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop written bytes, keeping queued status bytes
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl Write for JobBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for JobBuffer {
    /// Returns 0 (end of stream) once the status queue is empty
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.status.len());
        for (slot, byte) in buf.iter_mut().zip(self.status.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_buffer_collects_writes() {
        let mut job = JobBuffer::new();
        assert_eq!(job.send(&[0x1B, 0x40]).unwrap(), 2);
        assert_eq!(job.send(b"hi\n").unwrap(), 3);
        job.flush_sent().unwrap();
        assert_eq!(job.as_slice(), b"\x1B\x40hi\n");
        assert_eq!(job.len(), 5);

        job.clear();
        assert!(job.is_empty());
    }

    #[test]
    fn test_job_buffer_status_queue() {
        let mut job = JobBuffer::with_status(&[0x12]);
        job.push_status(0x16);

        let mut byte = [0u8; 1];
        assert_eq!(job.receive(&mut byte).unwrap(), 1);
        assert_eq!(byte[0], 0x12);
        assert_eq!(job.receive(&mut byte).unwrap(), 1);
        assert_eq!(byte[0], 0x16);
        assert_eq!(job.receive(&mut byte).unwrap(), 0);
    }

    #[test]
    fn test_cursor_is_a_transport() {
        let mut cursor = io::Cursor::new(Vec::new());
        assert_eq!(cursor.send(b"abc").unwrap(), 3);
        assert_eq!(cursor.into_inner(), b"abc");
    }
}
