use std::collections::{HashMap, VecDeque};

use super::{Transport, TransportError};

/// In-memory instrument used for tests and offline scripting.
///
/// Every write and query is recorded in order. Query answers come from, in
/// priority order: scripted responses, the payload last written to the same
/// header (echo), and a few built-in defaults (`SYST:ERR?` reports an empty
/// queue, `*OPC?` reports `1`). Anything else fails with
/// [`TransportError::NoResponse`].
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Vec<String>,
    scripted: HashMap<String, VecDeque<String>>,
    echo: HashMap<String, String>,
    failure: Option<String>,
    closed: bool,
}

fn key(header: &str) -> String {
    header.trim().trim_start_matches(':').to_ascii_uppercase()
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `response` for `query`. The last queued response for a query
    /// is repeated once the earlier ones are consumed.
    pub fn respond<Q: AsRef<str>, R: Into<String>>(&mut self, query: Q, response: R) -> &mut Self {
        self.scripted
            .entry(key(query.as_ref()))
            .or_default()
            .push_back(response.into());
        self
    }

    /// Builder form of [`MockTransport::respond`].
    pub fn with_response<Q: AsRef<str>, R: Into<String>>(mut self, query: Q, response: R) -> Self {
        self.respond(query, response);
        self
    }

    /// Makes the next write or query fail with an I/O error carrying
    /// `message`.
    pub fn fail_next<S: Into<String>>(&mut self, message: S) {
        self.failure = Some(message.into());
    }

    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.sent.last().map(String::as_str)
    }

    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        match self.failure.take() {
            Some(message) => Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                message,
            ))),
            None => Ok(()),
        }
    }
}

impl Transport for MockTransport {
    fn write(&mut self, command: &str) -> Result<(), TransportError> {
        self.check()?;
        self.sent.push(command.to_string());
        if let Some((header, payload)) = command.trim().split_once(' ') {
            self.echo.insert(key(header), payload.trim().to_string());
        }
        Ok(())
    }

    fn query(&mut self, command: &str) -> Result<String, TransportError> {
        self.check()?;
        self.sent.push(command.to_string());
        let query = key(command);
        if let Some(queue) = self.scripted.get_mut(&query) {
            let response = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(response) = response {
                return Ok(response.trim_end().to_string());
            }
        }
        if let Some(header) = query.strip_suffix('?') {
            if let Some(payload) = self.echo.get(header) {
                return Ok(payload.clone());
            }
        }
        match query.as_str() {
            "SYST:ERR?" => Ok("+0,\"No error\"".to_string()),
            "*OPC?" => Ok("1".to_string()),
            _ => Err(TransportError::NoResponse(command.to_string())),
        }
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        Ok(())
    }

    fn description(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut mock = MockTransport::new();
        mock.write("*RST").unwrap();
        mock.query("*OPC?").unwrap();
        assert_eq!(mock.sent(), ["*RST", "*OPC?"]);
        assert_eq!(mock.last_sent(), Some("*OPC?"));
        mock.clear_sent();
        assert!(mock.sent().is_empty());
    }

    #[test]
    fn echoes_written_payload() {
        let mut mock = MockTransport::new();
        mock.write("CALC1:MARK2:X 500000000.0").unwrap();
        assert_eq!(mock.query("CALC1:MARK2:X?").unwrap(), "500000000.0");
        assert_eq!(mock.query(":calc1:mark2:x?").unwrap(), "500000000.0");
    }

    #[test]
    fn scripted_responses_drain_then_stick() {
        let mut mock = MockTransport::new()
            .with_response("SYST:ERR?", "-113,\"Undefined header\"")
            .with_response("SYST:ERR?", "+0,\"No error\"");
        assert_eq!(mock.query("SYST:ERR?").unwrap(), "-113,\"Undefined header\"");
        assert_eq!(mock.query("SYST:ERR?").unwrap(), "+0,\"No error\"");
        assert_eq!(mock.query("SYST:ERR?").unwrap(), "+0,\"No error\"");
    }

    #[test]
    fn unknown_query_has_no_response() {
        let mut mock = MockTransport::new();
        let err = mock.query("SENS1:FREQ:CENT?").unwrap_err();
        assert!(matches!(err, TransportError::NoResponse(_)));
        assert!(err.is_timeout());
    }

    #[test]
    fn failure_injection_is_one_shot() {
        let mut mock = MockTransport::new();
        mock.fail_next("link down");
        assert!(matches!(mock.write("*RST"), Err(TransportError::Io(_))));
        assert!(mock.write("*RST").is_ok());
        assert_eq!(mock.sent(), ["*RST"]);
    }

    #[test]
    fn closed_mock_refuses_io() {
        let mut mock = MockTransport::new();
        mock.close().unwrap();
        assert!(mock.is_closed());
        assert!(matches!(mock.write("*RST"), Err(TransportError::Closed)));
    }
}
