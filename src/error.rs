use thiserror::Error;

use crate::{
    instruments::vna::Field,
    protocols::TransportError,
    scpi::InstrumentError,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The link to the instrument failed; nothing was parsed.
    #[error("transfer layer error: {0}")]
    Transport(#[from] TransportError),

    /// A caller-supplied value was rejected before anything was sent.
    #[error("invalid {parameter} '{value}', expected {expected}")]
    InvalidArgument {
        parameter: String,
        value: String,
        expected: String,
    },

    /// A command needs an addressing field that has not been set.
    #[error("{0} is not set, set it on the driver before using this command")]
    ContextUnset(Field),

    #[error("cannot parse response '{response}' to '{command}' as {expected}")]
    Parse {
        command: String,
        response: String,
        expected: &'static str,
    },

    /// The instrument put an entry in its error queue.
    #[error("instrument error {0}")]
    Instrument(#[from] InstrumentError),

    /// The error queue never reported "No error" within `limit` reads.
    #[error("error queue not drained after {limit} reads")]
    ErrorQueueUnterminated {
        limit: usize,
        errors: Vec<InstrumentError>,
    },

    /// A `SYST:ERR?` reply could not be read as an error-queue entry.
    #[error("unreadable error queue entry '{response}' after {} entries", .errors.len())]
    ErrorQueueMalformed {
        response: String,
        errors: Vec<InstrumentError>,
    },

    #[error("unknown command path '{0}'")]
    UnknownCommand(String),

    #[error("'{path}' does not support {operation}")]
    Unsupported {
        path: String,
        operation: &'static str,
    },

    #[error("template error: {0}")]
    Template(String),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl Error {
    pub fn invalid_argument<P, V, E>(parameter: P, value: V, expected: E) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        E: Into<String>,
    {
        Error::InvalidArgument {
            parameter: parameter.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
