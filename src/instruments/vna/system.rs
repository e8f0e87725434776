use crate::{error::Result, protocols::Transport, scpi::InstrumentError};

use super::commands::system as cmd;

view!(System);

impl<'a, T: Transport> System<'a, T> {
    /// Restores the factory setup. Unlike `*RST`, continuous sweep stays on.
    pub fn preset(&mut self) -> Result<()> {
        self.session.fire(&cmd::PRESET, &[])
    }

    /// Pops one entry off the instrument error queue.
    pub fn error(&mut self) -> Result<InstrumentError> {
        self.session.get(&cmd::ERROR)
    }

    /// Drains the error queue, see [`Session::get_error_list`].
    ///
    /// [`Session::get_error_list`]: crate::instruments::Session::get_error_list
    pub fn error_list(&mut self) -> Result<Vec<InstrumentError>> {
        self.session.get_error_list()
    }
}

#[cfg(test)]
mod tests {
    use crate::{instruments::vna::Vna, protocols::MockTransport};

    #[test]
    fn preset_and_error() {
        let mut vna = Vna::with_transport(
            MockTransport::new().with_response("SYST:ERR?", "-221,\"Settings conflict\""),
        );
        vna.system().preset().unwrap();
        let error = vna.system().error().unwrap();
        assert_eq!(error.code, -221);
        assert_eq!(error.message, "Settings conflict");
        assert_eq!(vna.transport().sent(), ["SYST:PRES", "SYST:ERR?"]);
    }

    #[test]
    fn empty_error_list() {
        let mut vna = Vna::with_transport(MockTransport::new());
        assert!(vna.system().error_list().unwrap().is_empty());
    }
}
