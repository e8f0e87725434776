//! Instrument I/O transports.
//!
//! A [`Protocol`] knows how to connect to an address and hand back a raw
//! byte stream; a [`Messenger`] turns that stream into a line-oriented
//! [`Transport`] that the driver talks SCPI through. [`open`] picks the
//! right protocol from a VISA-style resource string.

use std::{
    io::{Read, Write},
    net::ToSocketAddrs,
    time::Duration,
};

use tracing::info;

use crate::config::DriverConfig;

pub mod messenger;
pub mod mock;
pub mod protocol_error;
pub mod resource;
pub mod serial;
pub mod tcp;
#[cfg(feature = "visa")]
pub mod visa;

pub use self::messenger::Messenger;
pub use self::mock::MockTransport;
pub use self::protocol_error::TransportError;
pub use self::resource::Resource;
pub use self::serial::Serial;
pub use self::tcp::Tcp;

/// Request/response channel to one instrument session.
///
/// `query` returns the response with trailing whitespace removed. A
/// transport failure is always an `Err`, never an empty string.
pub trait Transport {
    fn write(&mut self, command: &str) -> Result<(), TransportError>;
    fn query(&mut self, command: &str) -> Result<String, TransportError>;
    fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
    fn description(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, command: &str) -> Result<(), TransportError> {
        (**self).write(command)
    }
    fn query(&mut self, command: &str) -> Result<String, TransportError> {
        (**self).query(command)
    }
    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
    fn description(&self) -> String {
        (**self).description()
    }
}

pub trait Protocol {
    type Address;
    type IO: Read + Write;
    fn connect(self, address: Self::Address, time_out: Duration) -> Result<Self::IO, TransportError>;
}

/// Whole milliseconds of `timeout`, saturating at `u32::MAX`.
pub(crate) fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

/// Opens a transport for `resource` using the timeouts, terminations and
/// serial settings from `config`.
pub fn open(resource: &str, config: &DriverConfig) -> Result<Box<dyn Transport>, TransportError> {
    let read_termination = config.read_termination_byte()?;
    let transport: Box<dyn Transport> = match resource.parse::<Resource>()? {
        Resource::Socket { host, port } => {
            let address = (host.as_str(), port)
                .to_socket_addrs()?
                .next()
                .ok_or_else(|| TransportError::InvalidResource(resource.to_string()))?;
            let io = Tcp.connect(address, config.timeout)?;
            Box::new(
                Messenger::new(io)
                    .with_termination(&config.write_termination, read_termination)
                    .with_description(resource),
            )
        }
        Resource::Serial { port } => {
            let io = Serial::try_from(&config.serial)?.connect(port, config.timeout)?;
            Box::new(
                Messenger::new(io)
                    .with_termination(&config.write_termination, read_termination)
                    .with_description(resource),
            )
        }
        Resource::Visa(address) => open_visa(address, config, read_termination)?,
    };
    info!("opened instrument session on {}", transport.description());
    Ok(transport)
}

#[cfg(feature = "visa")]
fn open_visa(
    address: String,
    config: &DriverConfig,
    read_termination: u8,
) -> Result<Box<dyn Transport>, TransportError> {
    let description = address.clone();
    let io = visa::Visa.connect(address, config.timeout)?;
    Ok(Box::new(
        Messenger::new(io)
            .with_termination(&config.write_termination, read_termination)
            .with_description(description),
    ))
}

#[cfg(not(feature = "visa"))]
fn open_visa(
    _address: String,
    _config: &DriverConfig,
    _read_termination: u8,
) -> Result<Box<dyn Transport>, TransportError> {
    Err(TransportError::FeatureNotEnabled("VISA", "visa"))
}
