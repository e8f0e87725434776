//! SCPI building blocks shared by every instrument: command strings,
//! IEEE-488.2 common commands, value formatting and response parsing,
//! error-queue entries and the status registers.

use crate::error::Result;

pub mod common;
pub mod mnemonic;
pub mod scpi_error;
pub mod value;

pub(crate) use self::mnemonic::scpi_enum;
pub use self::common::Common;
pub use self::mnemonic::{describe, Choice};
pub use self::scpi_error::{InstrumentError, ScpiError};
pub use self::value::{format_float, format_list, parse, FromResponse, Value};

/// Anything that can exchange SCPI messages. The IEEE-488.2 common
/// commands come for free.
pub trait Scpi {
    fn scpi_write(&mut self, command: &Command) -> Result<()>;
    fn scpi_query(&mut self, command: &Command) -> Result<String>;

    fn identify(&mut self) -> Result<String> {
        self.scpi_query(&Common::IDN.to_command().query())
    }
    fn reset(&mut self) -> Result<()> {
        self.scpi_write(&Common::RST.to_command())
    }
    fn clear_status(&mut self) -> Result<()> {
        self.scpi_write(&Common::CLS.to_command())
    }
    fn operation_complete(&mut self) -> Result<bool> {
        let command = Common::OPC.to_command().query();
        let response = self.scpi_query(&command)?;
        parse(command.as_str(), &response)
    }
}

/// A SCPI message under construction: header, optional `?`, parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    pub fn new<S: ToString>(s: S) -> Self {
        Self(s.to_string())
    }
    pub fn query(mut self) -> Self {
        self.0.push('?');
        self
    }
    pub fn para<P: AsRef<str>>(mut self, para: P) -> Self {
        self.0.push(' ');
        self.0.push_str(para.as_ref());
        self
    }
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait ToCommand {
    fn to_command(&self) -> Command;
}
impl<T> ToCommand for T
where
    T: ToString,
{
    fn to_command(&self) -> Command {
        Command(self.to_string())
    }
}

/// Status byte register (`*STB?`, `*SRE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusByte(u8);
impl StatusByte {
    pub fn new(b: u8) -> Self {
        Self(b)
    }
    pub fn byte(&self) -> u8 {
        self.0
    }

    pub fn is_error_available(&self) -> bool {
        self.0 & (1 << 2) != 0
    }
    pub fn error_available(&mut self) -> &mut Self {
        self.0 |= 1 << 2;
        self
    }
    pub fn is_message_available(&self) -> bool {
        self.0 & (1 << 4) != 0
    }
    pub fn message_available(&mut self) -> &mut Self {
        self.0 |= 1 << 4;
        self
    }
    pub fn is_event_happened(&self) -> bool {
        self.0 & (1 << 5) != 0
    }
    pub fn event_happened(&mut self) -> &mut Self {
        self.0 |= 1 << 5;
        self
    }
    pub fn is_requesting_service(&self) -> bool {
        self.0 & (1 << 6) != 0
    }
}

/// Standard event status register (`*ESR?`, `*ESE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStatusByte(u8);
impl EventStatusByte {
    pub fn new(b: u8) -> Self {
        Self(b)
    }
    pub fn byte(&self) -> u8 {
        self.0
    }
    pub fn is_command_err(&self) -> bool {
        self.0 & (1 << 5) != 0
    }
    pub fn command_err(&mut self) -> &mut Self {
        self.0 |= 1 << 5;
        self
    }
    pub fn is_execution_err(&self) -> bool {
        self.0 & (1 << 4) != 0
    }
    pub fn execution_err(&mut self) -> &mut Self {
        self.0 |= 1 << 4;
        self
    }
    pub fn is_device_dep_err(&self) -> bool {
        self.0 & (1 << 3) != 0
    }
    pub fn device_dep_err(&mut self) -> &mut Self {
        self.0 |= 1 << 3;
        self
    }
    pub fn is_query_err(&self) -> bool {
        self.0 & (1 << 2) != 0
    }
    pub fn query_err(&mut self) -> &mut Self {
        self.0 |= 1 << 2;
        self
    }
    pub fn is_opera_complete(&self) -> bool {
        self.0 & (1 << 0) != 0
    }
    pub fn opera_complete(&mut self) -> &mut Self {
        self.0 |= 1 << 0;
        self
    }
    /// Any of the four error bits.
    pub fn has_error(&self) -> bool {
        self.0 & 0b0011_1100 != 0
    }
}

impl std::fmt::Display for StatusByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for EventStatusByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn register_byte(response: &str) -> Option<u8> {
    let value: i64 = FromResponse::from_response(response)?;
    u8::try_from(value).ok()
}

impl FromResponse for StatusByte {
    const EXPECTED: &'static str = "status byte (0-255)";
    fn from_response(response: &str) -> Option<Self> {
        register_byte(response).map(StatusByte)
    }
}
impl FromResponse for EventStatusByte {
    const EXPECTED: &'static str = "event status byte (0-255)";
    fn from_response(response: &str) -> Option<Self> {
        register_byte(response).map(EventStatusByte)
    }
}
