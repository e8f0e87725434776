use super::{Protocol, TransportError};
use std::{
    net::{SocketAddr, TcpStream},
    time::Duration,
};

/// Raw SCPI socket, usually port 5025.
pub struct Tcp;

impl Default for Tcp {
    fn default() -> Self {
        Tcp
    }
}

impl Protocol for Tcp {
    type IO = TcpStream;
    type Address = SocketAddr;
    fn connect(self, address: Self::Address, time_out: Duration) -> Result<Self::IO, TransportError> {
        let stream = TcpStream::connect_timeout(&address, time_out)?;
        stream.set_read_timeout(Some(time_out))?;
        stream.set_write_timeout(Some(time_out))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}
