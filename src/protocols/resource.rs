use std::{fmt, str::FromStr};

use super::{Serial, TransportError};

/// Where an instrument session goes, decoded from a VISA-style resource
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// `TCPIP[n]::<host>::<port>::SOCKET` or plain `<host>:<port>`.
    Socket { host: String, port: u16 },
    /// `ASRL<n>::INSTR` or `ASRL<device path>::INSTR`.
    Serial { port: String },
    /// Every other `INSTR` resource, handed to the VISA library untouched.
    Visa(String),
}

impl FromStr for Resource {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TransportError::InvalidResource(s.to_string());
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split("::").collect();

        if parts.len() == 1 {
            let (host, port) = trimmed.rsplit_once(':').ok_or_else(invalid)?;
            if host.is_empty() {
                return Err(invalid());
            }
            let port = port.parse().map_err(|_| invalid())?;
            return Ok(Resource::Socket {
                host: host.to_string(),
                port,
            });
        }

        let interface = parts[0].to_ascii_uppercase();
        let class = parts[parts.len() - 1].to_ascii_uppercase();
        if interface.starts_with("TCPIP") && class == "SOCKET" {
            if parts.len() != 4 || parts[1].is_empty() {
                return Err(invalid());
            }
            let port = parts[2].parse().map_err(|_| invalid())?;
            return Ok(Resource::Socket {
                host: parts[1].to_string(),
                port,
            });
        }
        if class != "INSTR" {
            return Err(invalid());
        }
        if interface.starts_with("ASRL") {
            if parts.len() != 2 {
                return Err(invalid());
            }
            let board = &parts[0][4..];
            if board.is_empty() {
                return Err(invalid());
            }
            return Ok(Resource::Serial {
                port: Serial::port_name(board),
            });
        }
        const VISA_INTERFACES: [&str; 5] = ["TCPIP", "USB", "GPIB", "VXI", "PXI"];
        if VISA_INTERFACES.iter().any(|i| interface.starts_with(i)) {
            Ok(Resource::Visa(trimmed.to_string()))
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Socket { host, port } => write!(f, "TCPIP0::{}::{}::SOCKET", host, port),
            Resource::Serial { port } => write!(f, "ASRL{}::INSTR", port),
            Resource::Visa(resource) => f.write_str(resource),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_forms() {
        assert_eq!(
            "TCPIP0::192.168.1.20::5025::SOCKET".parse::<Resource>().unwrap(),
            Resource::Socket {
                host: "192.168.1.20".to_string(),
                port: 5025
            }
        );
        assert_eq!(
            "localhost:5025".parse::<Resource>().unwrap(),
            Resource::Socket {
                host: "localhost".to_string(),
                port: 5025
            }
        );
        assert_eq!(
            "tcpip::vna.lab::5025::socket".parse::<Resource>().unwrap(),
            Resource::Socket {
                host: "vna.lab".to_string(),
                port: 5025
            }
        );
    }

    #[test]
    fn serial_forms() {
        assert_eq!(
            "ASRL/dev/ttyUSB0::INSTR".parse::<Resource>().unwrap(),
            Resource::Serial {
                port: "/dev/ttyUSB0".to_string()
            }
        );
        let Resource::Serial { port } = "ASRL1::INSTR".parse::<Resource>().unwrap() else {
            panic!("expected a serial resource");
        };
        assert_eq!(port, Serial::port_name("1"));
    }

    #[test]
    fn visa_forms() {
        for s in [
            "TCPIP0::192.168.1.20::inst0::INSTR",
            "USB0::0x1234::0x5678::SN01::INSTR",
            "GPIB0::16::INSTR",
        ] {
            assert_eq!(s.parse::<Resource>().unwrap(), Resource::Visa(s.to_string()));
        }
    }

    #[test]
    fn rejects_garbage() {
        for s in [
            "",
            "nonsense",
            ":5025",
            "host:notaport",
            "TCPIP0::host::port::SOCKET",
            "TCPIP0::host::SOCKET",
            "ASRL::INSTR",
            "FOO0::1::INSTR",
            "GPIB0::16::BACKPLANE",
        ] {
            assert!(
                matches!(s.parse::<Resource>(), Err(TransportError::InvalidResource(_))),
                "{} should be rejected",
                s
            );
        }
    }
}
