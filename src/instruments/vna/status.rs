//! IEEE 488.2 status registers.

use crate::{
    error::Result,
    protocols::Transport,
    scpi::{EventStatusByte, StatusByte},
};

use super::commands::{root, status as cmd};

view!(Status);

impl<'a, T: Transport> Status<'a, T> {
    /// Reads and clears the standard event status register.
    pub fn event(&mut self) -> Result<EventStatusByte> {
        self.session.get(&cmd::EVENT)
    }
    pub fn byte(&mut self) -> Result<StatusByte> {
        self.session.get(&cmd::BYTE)
    }
    pub fn event_enable(&mut self) -> Result<EventStatusByte> {
        self.session.get(&cmd::EVENT_ENABLE)
    }
    pub fn set_event_enable(&mut self, mask: EventStatusByte) -> Result<()> {
        self.session.set(&cmd::EVENT_ENABLE, u32::from(mask.byte()))
    }
    pub fn service_enable(&mut self) -> Result<StatusByte> {
        self.session.get(&cmd::SERVICE_ENABLE)
    }
    pub fn set_service_enable(&mut self, mask: StatusByte) -> Result<()> {
        self.session.set(&cmd::SERVICE_ENABLE, u32::from(mask.byte()))
    }
    /// Clears the status registers and the error queue.
    pub fn clear(&mut self) -> Result<()> {
        self.session.fire(&root::CLEAR_STATUS, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instruments::vna::Vna, protocols::MockTransport};

    #[test]
    fn registers() {
        let mut vna = Vna::with_transport(
            MockTransport::new()
                .with_response("*ESR?", "+36")
                .with_response("*STB?", "4"),
        );
        let event = vna.status().event().unwrap();
        assert!(event.is_command_err() && event.is_query_err());
        assert!(event.has_error());
        assert!(vna.status().byte().unwrap().is_error_available());

        let mut mask = EventStatusByte::new(0);
        mask.command_err().execution_err();
        vna.status().set_event_enable(mask).unwrap();
        assert_eq!(vna.status().event_enable().unwrap().byte(), 0b0011_0000);
        vna.status().clear().unwrap();
        assert_eq!(
            vna.transport().sent(),
            ["*ESR?", "*STB?", "*ESE 48", "*ESE?", "*CLS"]
        );
    }
}
