use thiserror::Error;

use super::FromResponse;

/// SCPI error classes, by error-queue code range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScpiError {
    #[error("command error")]
    CommandError,
    #[error("execution error")]
    ExecutionError,
    #[error("device-dependent error")]
    DevDependError,
    #[error("query error")]
    QueryError,
    #[error("instrument event")]
    Event,
    #[error("device-specific error")]
    DeviceSpecific,
}

impl ScpiError {
    /// `None` for code 0.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => None,
            -199..=-100 => Some(ScpiError::CommandError),
            -299..=-200 => Some(ScpiError::ExecutionError),
            -399..=-300 => Some(ScpiError::DevDependError),
            -499..=-400 => Some(ScpiError::QueryError),
            -899..=-500 => Some(ScpiError::Event),
            _ => Some(ScpiError::DeviceSpecific),
        }
    }
}

/// One entry of the instrument error queue (`SYST:ERR?`), e.g.
/// `-113,"Undefined header"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code},\"{message}\"")]
pub struct InstrumentError {
    pub code: i32,
    pub message: String,
}

impl InstrumentError {
    pub fn new<S: Into<String>>(code: i32, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The queue-empty sentinel: code 0 or a "No error" message.
    pub fn is_no_error(&self) -> bool {
        self.code == 0 || self.message.to_ascii_lowercase().contains("no error")
    }

    pub fn class(&self) -> Option<ScpiError> {
        ScpiError::from_code(self.code)
    }
}

impl FromResponse for InstrumentError {
    const EXPECTED: &'static str = "error queue entry <code>,\"<message>\"";
    fn from_response(response: &str) -> Option<Self> {
        let response = response.trim();
        let (code, message) = match response.split_once(',') {
            Some((code, message)) => (code, message.trim()),
            None => (response, ""),
        };
        let code = code.trim().parse().ok()?;
        let message = message
            .strip_prefix('"')
            .and_then(|m| m.strip_suffix('"'))
            .unwrap_or(message);
        Some(Self::new(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_queue_entries() {
        let entry = InstrumentError::from_response("-113,\"Undefined header\"").unwrap();
        assert_eq!(entry, InstrumentError::new(-113, "Undefined header"));
        assert_eq!(entry.class(), Some(ScpiError::CommandError));
        assert!(!entry.is_no_error());
        assert_eq!(entry.to_string(), "-113,\"Undefined header\"");

        let empty = InstrumentError::from_response("+0,\"No error\"").unwrap();
        assert!(empty.is_no_error());
        assert_eq!(empty.class(), None);

        assert_eq!(InstrumentError::from_response("0").unwrap().code, 0);
        assert!(InstrumentError::from_response("garbage").is_none());
    }

    #[test]
    fn classifies_codes() {
        assert_eq!(ScpiError::from_code(-222), Some(ScpiError::ExecutionError));
        assert_eq!(ScpiError::from_code(-350), Some(ScpiError::DevDependError));
        assert_eq!(ScpiError::from_code(-410), Some(ScpiError::QueryError));
        assert_eq!(ScpiError::from_code(-800), Some(ScpiError::Event));
        assert_eq!(ScpiError::from_code(12), Some(ScpiError::DeviceSpecific));
    }
}
