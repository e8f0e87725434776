use crate::{error::Result, protocols::Transport};

use super::commands::initiate as cmd;

view!(
    /// Sweep initiation of the context channel.
    Initiate
);

impl<'a, T: Transport> Initiate<'a, T> {
    /// Arms the trigger for one sweep.
    pub fn immediate(&mut self) -> Result<()> {
        self.session.fire(&cmd::IMMEDIATE, &[])
    }
    pub fn continuous(&mut self) -> Result<bool> {
        self.session.get(&cmd::CONTINUOUS)
    }
    pub fn set_continuous(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::CONTINUOUS, on)
    }
}
