use crate::{error::Result, protocols::Transport};

use super::{
    commands::trigger as cmd,
    enums::{TriggerScope, TriggerSource},
};

view!(Trigger);

impl<'a, T: Transport> Trigger<'a, T> {
    /// Triggers now, when the source is `BUS`.
    pub fn immediate(&mut self) -> Result<()> {
        self.session.fire(&cmd::IMMEDIATE, &[])
    }
    /// Triggers one sweep; `*OPC?` afterwards waits for it to finish.
    pub fn single(&mut self) -> Result<()> {
        self.session.fire(&cmd::SINGLE, &[])
    }
    pub fn source(&mut self) -> Result<TriggerSource> {
        self.session.get(&cmd::SOURCE)
    }
    pub fn set_source(&mut self, source: TriggerSource) -> Result<()> {
        self.session.set(&cmd::SOURCE, source)
    }
    pub fn scope(&mut self) -> Result<TriggerScope> {
        self.session.get(&cmd::SCOPE)
    }
    pub fn set_scope(&mut self, scope: TriggerScope) -> Result<()> {
        self.session.set(&cmd::SCOPE, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instruments::vna::Vna, protocols::MockTransport};

    #[test]
    fn bus_triggered_sweep() {
        let mut vna = Vna::with_transport(MockTransport::new());
        let mut trigger = vna.trigger();
        trigger.set_source(TriggerSource::Bus).unwrap();
        trigger.set_scope("active".parse().unwrap()).unwrap();
        trigger.single().unwrap();
        assert_eq!(trigger.source().unwrap(), TriggerSource::Bus);
        assert!(vna.opc().unwrap());
        assert_eq!(
            vna.transport().sent(),
            ["TRIG:SOUR BUS", "TRIG:SCOP ACT", "TRIG:SING", "TRIG:SOUR?", "*OPC?"]
        );
    }

    #[test]
    fn unexpected_source_is_a_parse_error() {
        let mut vna = Vna::with_transport(MockTransport::new().with_response("TRIG:SOUR?", "LAN"));
        assert!(matches!(
            vna.trigger().source(),
            Err(crate::error::Error::Parse { .. })
        ));
    }
}
