//! Driver for Bird vector network analyzers.
//!
//! [`Vna`] owns the session. Subsystems are borrowed views over it, so the
//! addressing context set on the root is what every namespace renders
//! with:
//!
//! ```no_run
//! # fn main() -> bird_vna::Result<()> {
//! use bird_vna::Vna;
//!
//! let mut vna = Vna::initialize("TCPIP0::192.168.1.20::5025::SOCKET")?;
//! vna.set_channel(1)?;
//! vna.sense().frequency().set_center(433e6)?;
//! vna.set_marker(2)?;
//! let y = vna.calculate().marker().y()?;
//! # Ok(())
//! # }
//! ```

use tracing::warn;

use crate::{
    config::DriverConfig,
    error::{Error, Result},
    protocols::{self, Transport},
    scpi::{InstrumentError, Scpi, Value},
};

use super::Session;

macro_rules! view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<'a, T: $crate::protocols::Transport> {
            session: &'a mut $crate::instruments::Session<T>,
        }

        impl<'a, T: $crate::protocols::Transport> $name<'a, T> {
            pub(crate) fn new(session: &'a mut $crate::instruments::Session<T>) -> Self {
                Self { session }
            }

            pub fn context(&self) -> &$crate::instruments::vna::Context {
                self.session.context()
            }
        }
    };
}

pub mod calculate;
pub mod commands;
pub mod context;
pub mod display;
pub mod enums;
pub mod initiate;
pub mod mmemory;
pub mod sense;
pub mod status;
pub mod system;
pub mod trigger;

pub use self::calculate::{BandwidthResult, Calculate, LimitLine, MarkerValue};
pub use self::commands::{lookup, Access, CommandDef, ValueKind};
pub use self::context::{Context, Field};
pub use self::display::Display;
pub use self::enums::*;
pub use self::initiate::Initiate;
pub use self::mmemory::Mmemory;
pub use self::sense::{Segment, SegmentTable, Sense};
pub use self::status::Status;
pub use self::system::System;
pub use self::trigger::Trigger;

pub struct Vna<T: Transport = Box<dyn Transport>> {
    session: Session<T>,
}

impl Vna<Box<dyn Transport>> {
    /// Opens `resource` with the default configuration.
    pub fn initialize(resource: &str) -> Result<Self> {
        Self::initialize_with(&DriverConfig::default().with_resource(resource))
    }

    /// Opens `config.resource` and applies the configured error-queue limit
    /// and initial context.
    pub fn initialize_with(config: &DriverConfig) -> Result<Self> {
        let resource = config.resource.as_deref().ok_or_else(|| {
            Error::invalid_argument("resource", "", "a VISA resource string")
        })?;
        let transport = protocols::open(resource, config)?;
        let mut vna = Vna::with_transport(transport).with_error_queue_limit(config.error_queue_limit);
        vna.session.context_mut().apply(&config.context);
        Ok(vna)
    }
}

fn check_index(field: Field, value: u32) -> Result<u32> {
    if value == 0 {
        Err(Error::invalid_argument(field.key(), "0", "an index starting at 1"))
    } else {
        Ok(value)
    }
}

impl<T: Transport> Vna<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            session: Session::new(transport),
        }
    }

    pub fn with_error_queue_limit(mut self, limit: usize) -> Self {
        self.session = self.session.with_error_queue_limit(limit);
        self
    }

    pub fn close(mut self) -> Result<()> {
        self.session.close()
    }

    pub fn write(&mut self, command: &str) -> Result<()> {
        self.session.write(command)
    }

    /// Raw query; the response has trailing whitespace removed.
    pub fn query(&mut self, command: &str) -> Result<String> {
        self.session.query(command)
    }

    pub fn abort(&mut self) -> Result<()> {
        self.session.fire(&commands::root::ABORT, &[])
    }

    /// `*OPC?`: blocks on the instrument until pending operations finish.
    pub fn opc(&mut self) -> Result<bool> {
        self.session.operation_complete()
    }

    pub fn reset(&mut self) -> Result<()> {
        Scpi::reset(&mut self.session)
    }

    pub fn identify(&mut self) -> Result<String> {
        self.session.identify()
    }

    pub fn clear_status(&mut self) -> Result<()> {
        self.session.clear_status()
    }

    pub fn get_error_list(&mut self) -> Result<Vec<InstrumentError>> {
        self.session.get_error_list()
    }

    /// Drains the error queue and fails with the first entry, if any.
    pub fn check_errors(&mut self) -> Result<()> {
        let errors = self.get_error_list()?;
        match errors.into_iter().next() {
            Some(first) => {
                warn!("instrument reported {}", first);
                Err(Error::Instrument(first))
            }
            None => Ok(()),
        }
    }

    pub fn context(&self) -> &Context {
        self.session.context()
    }
    pub fn context_mut(&mut self) -> &mut Context {
        self.session.context_mut()
    }

    pub fn set_channel(&mut self, channel: u32) -> Result<()> {
        self.context_mut().channel = Some(check_index(Field::Channel, channel)?);
        Ok(())
    }
    pub fn channel(&self) -> Option<u32> {
        self.context().channel
    }
    pub fn set_trace(&mut self, trace: u32) -> Result<()> {
        self.context_mut().trace = Some(check_index(Field::Trace, trace)?);
        Ok(())
    }
    pub fn trace(&self) -> Option<u32> {
        self.context().trace
    }
    pub fn set_marker(&mut self, marker: u32) -> Result<()> {
        self.context_mut().marker = Some(check_index(Field::Marker, marker)?);
        Ok(())
    }
    pub fn marker(&self) -> Option<u32> {
        self.context().marker
    }
    pub fn set_port(&mut self, port: u32) -> Result<()> {
        self.context_mut().port = Some(check_index(Field::Port, port)?);
        Ok(())
    }
    pub fn port(&self) -> Option<u32> {
        self.context().port
    }
    pub fn set_parameter(&mut self, parameter: SParameter) {
        self.context_mut().parameter = Some(parameter);
    }
    pub fn parameter(&self) -> Option<SParameter> {
        self.context().parameter
    }
    pub fn set_standard(&mut self, standard: CalStandard) {
        self.context_mut().standard = Some(standard);
    }
    pub fn standard(&self) -> Option<CalStandard> {
        self.context().standard
    }
    pub fn set_cal_kit(&mut self, kit: u32) -> Result<()> {
        self.context_mut().cal_kit = Some(check_index(Field::CalKit, kit)?);
        Ok(())
    }
    pub fn cal_kit(&self) -> Option<u32> {
        self.context().cal_kit
    }

    pub fn calculate(&mut self) -> Calculate<'_, T> {
        Calculate::new(&mut self.session)
    }
    pub fn display(&mut self) -> Display<'_, T> {
        Display::new(&mut self.session)
    }
    pub fn initiate(&mut self) -> Initiate<'_, T> {
        Initiate::new(&mut self.session)
    }
    pub fn mmemory(&mut self) -> Mmemory<'_, T> {
        Mmemory::new(&mut self.session)
    }
    pub fn sense(&mut self) -> Sense<'_, T> {
        Sense::new(&mut self.session)
    }
    pub fn status(&mut self) -> Status<'_, T> {
        Status::new(&mut self.session)
    }
    pub fn system(&mut self) -> System<'_, T> {
        System::new(&mut self.session)
    }
    pub fn trigger(&mut self) -> Trigger<'_, T> {
        Trigger::new(&mut self.session)
    }

    /// Queries any readable command by path, e.g. `sense.frequency.center`.
    pub fn get(&mut self, path: &str) -> Result<Value> {
        self.session.get_value(lookup(path)?)
    }

    /// Sets any writable command by path.
    pub fn set<V: Into<Value>>(&mut self, path: &str, value: V) -> Result<()> {
        self.session.set(lookup(path)?, value)
    }

    /// Fires any event by path. Events whose header carries a method or
    /// module placeholder are only reachable through their typed accessors.
    pub fn execute(&mut self, path: &str, args: &[Value]) -> Result<()> {
        self.session.fire(lookup(path)?, args)
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }
    pub fn session_mut(&mut self) -> &mut Session<T> {
        &mut self.session
    }
    pub fn transport(&self) -> &T {
        self.session.transport()
    }
    pub fn transport_mut(&mut self) -> &mut T {
        self.session.transport_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::{MockTransport, TransportError};

    fn vna() -> Vna<MockTransport> {
        Vna::with_transport(MockTransport::new())
    }

    #[test]
    fn root_commands() {
        let mut vna = vna();
        vna.abort().unwrap();
        assert!(vna.opc().unwrap());
        vna.reset().unwrap();
        vna.clear_status().unwrap();
        assert_eq!(vna.transport().sent(), ["ABOR", "*OPC?", "*RST", "*CLS"]);
    }

    #[test]
    fn zero_index_is_rejected() {
        let mut vna = vna();
        assert!(matches!(
            vna.set_channel(0),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(vna.channel(), None);
        vna.set_channel(2).unwrap();
        assert_eq!(vna.channel(), Some(2));
    }

    #[test]
    fn path_accessors() {
        let mut vna = vna();
        vna.set_channel(1).unwrap();
        vna.set_trace(1).unwrap();
        vna.set("calculate.format", "phase").unwrap();
        assert_eq!(vna.get("calculate.format").unwrap(), Value::Text("PHAS".into()));
        vna.execute("trigger.single", &[]).unwrap();
        assert_eq!(
            vna.transport().sent(),
            ["CALC1:TRAC1:FORM PHAS", "CALC1:TRAC1:FORM?", "TRIG:SING"]
        );
        assert!(matches!(
            vna.get("calculate.nothing"),
            Err(Error::UnknownCommand(_))
        ));
    }

    #[test]
    fn check_errors_reports_first_entry() {
        let mut vna = Vna::with_transport(
            MockTransport::new()
                .with_response("SYST:ERR?", "-113,\"Undefined header\"")
                .with_response("SYST:ERR?", "0,\"No error\""),
        );
        match vna.check_errors() {
            Err(Error::Instrument(e)) => assert_eq!(e.code, -113),
            other => panic!("unexpected {:?}", other),
        }
        assert!(vna.check_errors().is_ok());
    }

    #[test]
    fn close_releases_transport() {
        let mut vna = vna();
        vna.transport_mut().fail_next("gone");
        assert!(matches!(
            vna.write("*RST"),
            Err(Error::Transport(TransportError::Io(_)))
        ));
        vna.close().unwrap();
    }

    #[test]
    fn initialize_without_resource() {
        assert!(matches!(
            Vna::initialize_with(&DriverConfig::default()),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
