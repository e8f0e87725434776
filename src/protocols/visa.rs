use std::{
    ffi::CString,
    io::{Read, Write},
    time::Duration,
};

use tracing::debug;
use visa_rs::{attribute::AttrTmoValue, prelude::*, Instrument};

use super::{timeout_millis, Protocol, TransportError};

/// Any VISA `INSTR` resource, opened through the system VISA library.
pub struct Visa;

/// An open VISA session. The resource manager is kept alive for as long
/// as the instrument, and dropped after it.
pub struct VisaIo {
    instrument: Instrument,
    _rm: DefaultRM,
}

impl Read for VisaIo {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.instrument.read(buf)
    }
}

impl Write for VisaIo {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.instrument.write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.instrument.flush()
    }
}

impl Protocol for Visa {
    type Address = String;
    type IO = VisaIo;
    fn connect(self, address: Self::Address, time_out: Duration) -> Result<Self::IO, TransportError> {
        let rm = DefaultRM::new()?;
        let resource = CString::new(address.as_str())
            .map_err(|_| TransportError::InvalidResource(address.clone()))?
            .into();
        let instrument = rm.open(&resource, AccessMode::NO_LOCK, time_out)?;
        let millis = timeout_millis(time_out);
        let io_timeout = AttrTmoValue::new_checked(millis).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("VISA timeout of {} ms is out of range", millis),
            )
        })?;
        instrument.set_attr(io_timeout)?;
        debug!("VISA I/O timeout set to {} ms", millis);
        Ok(VisaIo {
            instrument,
            _rm: rm,
        })
    }
}
