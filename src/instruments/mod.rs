use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    protocols::Transport,
    scpi::{parse, Command, FromResponse, InstrumentError, Scpi, Value},
};

use self::vna::{CommandDef, Context};

pub mod vna;

pub const DEFAULT_ERROR_QUEUE_LIMIT: usize = 64;

/// One open instrument: the transport plus the addressing context every
/// namespace reads from.
pub struct Session<T: Transport> {
    transport: T,
    context: Context,
    error_queue_limit: usize,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            context: Context::default(),
            error_queue_limit: DEFAULT_ERROR_QUEUE_LIMIT,
        }
    }
    pub fn with_error_queue_limit(mut self, limit: usize) -> Self {
        self.error_queue_limit = limit;
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
    pub fn transport(&self) -> &T {
        &self.transport
    }
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn write(&mut self, command: &str) -> Result<()> {
        debug!("write: {}", command);
        self.transport.write(command).map_err(|e| {
            warn!("write '{}' failed: {}", command, e);
            Error::from(e)
        })
    }

    pub fn query(&mut self, command: &str) -> Result<String> {
        let response = self.transport.query(command).map_err(|e| {
            warn!("query '{}' failed: {}", command, e);
            Error::from(e)
        })?;
        let response = response.trim_end().to_string();
        debug!("query: {} -> {}", command, response);
        Ok(response)
    }

    pub fn query_as<R: FromResponse>(&mut self, command: &str) -> Result<R> {
        let response = self.query(command)?;
        parse(command, &response)
    }

    /// Header of `def` with the current context filled in.
    pub fn render(&self, def: &CommandDef) -> Result<String> {
        self.context.render(def.header, &[])
    }

    pub fn get<R: FromResponse>(&mut self, def: &CommandDef) -> Result<R> {
        let command = self.query_command(def)?;
        self.query_as(&command)
    }

    /// Like [`Session::get`], decoded according to the definition's kind.
    pub fn get_value(&mut self, def: &CommandDef) -> Result<Value> {
        let command = self.query_command(def)?;
        let response = self.query(&command)?;
        def.decode(&command, &response)
    }

    pub fn set<V: Into<Value>>(&mut self, def: &CommandDef, value: V) -> Result<()> {
        if !def.is_writable() {
            return Err(Error::Unsupported {
                path: def.path.to_string(),
                operation: "set",
            });
        }
        let payload = def.encode(&value.into())?;
        let header = self.render(def)?;
        self.write(Command::new(header).para(payload).as_str())
    }

    /// Writes a payload the caller has already formatted, for tables whose
    /// layout mixes integers and floats.
    pub fn set_payload(&mut self, def: &CommandDef, payload: &str) -> Result<()> {
        if !def.is_writable() {
            return Err(Error::Unsupported {
                path: def.path.to_string(),
                operation: "set",
            });
        }
        let header = self.render(def)?;
        self.write(Command::new(header).para(payload).as_str())
    }

    pub fn fire(&mut self, def: &CommandDef, args: &[Value]) -> Result<()> {
        self.fire_with(def, &[], args)
    }

    /// Fires an event whose header has non-context placeholders, such as
    /// the calibration method.
    pub fn fire_with(&mut self, def: &CommandDef, extra: &[(&str, &str)], args: &[Value]) -> Result<()> {
        if !def.is_event() {
            return Err(Error::Unsupported {
                path: def.path.to_string(),
                operation: "execute",
            });
        }
        let payload = def.encode_args(args)?;
        let header = self.context.render(def.header, extra)?;
        let command = Command::new(header);
        let command = if payload.is_empty() {
            command
        } else {
            command.para(payload)
        };
        self.write(command.as_str())
    }

    fn query_command(&self, def: &CommandDef) -> Result<String> {
        if !def.is_readable() {
            return Err(Error::Unsupported {
                path: def.path.to_string(),
                operation: "query",
            });
        }
        Ok(Command::new(self.render(def)?)
            .query()
            .into_inner())
    }

    /// Drains the instrument error queue.
    ///
    /// Reads `SYST:ERR?` until the instrument reports code 0 or "No error".
    /// Gives up after the configured number of reads with
    /// [`Error::ErrorQueueUnterminated`], and on an unreadable reply with
    /// [`Error::ErrorQueueMalformed`]; both carry what was collected.
    pub fn get_error_list(&mut self) -> Result<Vec<InstrumentError>> {
        let command = Command::new(vna::commands::system::ERROR.header).query();
        let mut errors = Vec::new();
        for _ in 0..self.error_queue_limit {
            let response = self.query(command.as_str())?;
            let entry = match InstrumentError::from_response(&response) {
                Some(entry) => entry,
                None => {
                    warn!("unreadable error queue entry '{}'", response);
                    return Err(Error::ErrorQueueMalformed { response, errors });
                }
            };
            if entry.is_no_error() {
                return Ok(errors);
            }
            debug!("instrument error queue: {}", entry);
            errors.push(entry);
        }
        warn!(
            "error queue did not report \"No error\" after {} reads",
            self.error_queue_limit
        );
        Err(Error::ErrorQueueUnterminated {
            limit: self.error_queue_limit,
            errors,
        })
    }

    pub fn close(&mut self) -> Result<()> {
        info!("closing instrument session on {}", self.transport.description());
        self.transport.close().map_err(Error::from)
    }
}

impl<T: Transport> Scpi for Session<T> {
    fn scpi_write(&mut self, command: &Command) -> Result<()> {
        self.write(command.as_str())
    }
    fn scpi_query(&mut self, command: &Command) -> Result<String> {
        self.query(command.as_str())
    }
}
