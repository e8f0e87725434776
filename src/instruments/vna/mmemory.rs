//! Instrument-side mass memory. Files live on the analyzer; only their
//! names cross the wire.

use crate::{
    error::{Error, Result},
    protocols::Transport,
    scpi::Value,
};

use super::{
    commands::{mmemory as cmd, CommandDef},
    enums::StateType,
};

const STATE_EXTENSION: &str = ".sta";
const SEGMENT_EXTENSION: &str = ".seg";

view!(Mmemory);
view!(Load);
view!(Store);

/// `name` with `extension` appended unless it already ends in it, ignoring
/// case.
pub fn with_extension(path: &str, name: &str, extension: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid_argument(path, name, "a file name"));
    }
    let has_extension = name.len() >= extension.len()
        && name
            .get(name.len() - extension.len()..)
            .map_or(false, |tail| tail.eq_ignore_ascii_case(extension));
    if has_extension {
        Ok(name.to_string())
    } else {
        Ok(format!("{}{}", name, extension))
    }
}

fn transfer<T: Transport>(
    session: &mut crate::instruments::Session<T>,
    def: &CommandDef,
    name: &str,
    extension: &str,
) -> Result<String> {
    let file = with_extension(def.path, name, extension)?;
    session.fire(def, &[Value::Text(file.clone())])?;
    Ok(file)
}

impl<'a, T: Transport> Mmemory<'a, T> {
    pub fn load(self) -> Load<'a, T> {
        Load::new(self.session)
    }
    pub fn store(self) -> Store<'a, T> {
        Store::new(self.session)
    }
}

impl<'a, T: Transport> Load<'a, T> {
    /// Recalls an instrument state file, returning the name sent.
    pub fn state(&mut self, name: &str) -> Result<String> {
        transfer(self.session, &cmd::LOAD_STATE, name, STATE_EXTENSION)
    }
    pub fn segment_table(&mut self, name: &str) -> Result<String> {
        transfer(self.session, &cmd::LOAD_SEGMENT, name, SEGMENT_EXTENSION)
    }
}

impl<'a, T: Transport> Store<'a, T> {
    /// Saves the instrument state, returning the name sent.
    pub fn state(&mut self, name: &str) -> Result<String> {
        transfer(self.session, &cmd::STORE_STATE, name, STATE_EXTENSION)
    }
    pub fn segment_table(&mut self, name: &str) -> Result<String> {
        transfer(self.session, &cmd::STORE_SEGMENT, name, SEGMENT_EXTENSION)
    }
    /// What a state file carries besides the setup.
    pub fn state_type(&mut self) -> Result<StateType> {
        self.session.get(&cmd::STORE_STATE_TYPE)
    }
    pub fn set_state_type(&mut self, state_type: StateType) -> Result<()> {
        self.session.set(&cmd::STORE_STATE_TYPE, state_type)
    }
}
