//! Typed SCPI driver for Bird vector network analyzers.
//!
//! The analyzer's command set is exposed as a tree of namespaces rooted at
//! [`Vna`]: `vna.sense().frequency().set_center(433e6)`. Channel, trace,
//! marker and port indices are set once on the driver and filled into every
//! command that needs them.
//!
//! Transports: raw TCP sockets, serial ports, VISA (feature `visa`) and an
//! in-memory [`MockTransport`] for offline use.

pub mod config;
pub mod error;
pub mod instruments;
pub mod protocols;
pub mod scpi;

pub use config::DriverConfig;
pub use error::{Error, Result};
pub use instruments::vna::{self, Vna};
pub use instruments::Session;
pub use protocols::{MockTransport, Transport, TransportError};
