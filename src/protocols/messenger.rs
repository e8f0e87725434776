use std::io::{Read, Write};

use bytes::BytesMut;
use tracing::debug;

use super::{Transport, TransportError};

const CHUNK: usize = 1024;

/// Line-oriented SCPI messenger over a raw byte stream.
///
/// Every outgoing message gets the write termination appended; a query
/// reads until the read termination byte. Bytes left over from an earlier
/// response are discarded before the next query is sent.
pub struct Messenger<IO: Write + Read> {
    io: IO,
    buf: BytesMut,
    write_termination: String,
    read_termination: u8,
    description: String,
}

impl<IO: Write + Read> Messenger<IO> {
    pub fn new(io: IO) -> Self {
        Self {
            io,
            buf: BytesMut::with_capacity(CHUNK),
            write_termination: "\n".to_string(),
            read_termination: b'\n',
            description: "stream".to_string(),
        }
    }
    pub fn with_termination(mut self, write: &str, read: u8) -> Self {
        self.write_termination = write.to_string();
        self.read_termination = read;
        self
    }
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }
    pub fn get_ref(&self) -> &IO {
        &self.io
    }

    fn send(&mut self, command: &str) -> Result<(), TransportError> {
        self.io.write_all(command.as_bytes())?;
        self.io.write_all(self.write_termination.as_bytes())?;
        self.io.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, TransportError> {
        let mut chunk = [0u8; CHUNK];
        loop {
            if let Some(pos) = self.buf.iter().position(|b| *b == self.read_termination) {
                let line = self.buf.split_to(pos + 1);
                let text = std::str::from_utf8(&line[..pos])?;
                return Ok(text.trim_end().to_string());
            }
            let n = self.io.read(&mut chunk)?;
            if n == 0 {
                return Err(TransportError::Closed);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}

impl<IO: Write + Read> Transport for Messenger<IO> {
    fn write(&mut self, command: &str) -> Result<(), TransportError> {
        self.send(command)
    }

    fn query(&mut self, command: &str) -> Result<String, TransportError> {
        if !self.buf.is_empty() {
            debug!("discarding {} stale bytes before '{}'", self.buf.len(), command);
            self.buf.clear();
        }
        self.send(command)?;
        self.read_line()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.buf.clear();
        self.io.flush()?;
        Ok(())
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
