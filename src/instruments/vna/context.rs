use std::{collections::HashMap, fmt};

use crate::{
    config::ContextSettings,
    error::{Error, Result},
};

use super::enums::{CalStandard, SParameter};

/// One addressing field, named the same as its template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Channel,
    Trace,
    Marker,
    Port,
    Parameter,
    Standard,
    CalKit,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Channel,
        Field::Trace,
        Field::Marker,
        Field::Port,
        Field::Parameter,
        Field::Standard,
        Field::CalKit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Channel => "channel",
            Field::Trace => "trace",
            Field::Marker => "marker",
            Field::Port => "port",
            Field::Parameter => "parameter",
            Field::Standard => "standard",
            Field::CalKit => "cal_kit",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Channel => "{channel}",
            Field::Trace => "{trace}",
            Field::Marker => "{marker}",
            Field::Port => "{port}",
            Field::Parameter => "{parameter}",
            Field::Standard => "{standard}",
            Field::CalKit => "{cal_kit}",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The addressing state shared by every namespace of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub channel: Option<u32>,
    pub trace: Option<u32>,
    pub marker: Option<u32>,
    pub port: Option<u32>,
    pub parameter: Option<SParameter>,
    pub standard: Option<CalStandard>,
    pub cal_kit: Option<u32>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered value of `field`, if set.
    pub fn value(&self, field: Field) -> Option<String> {
        match field {
            Field::Channel => self.channel.map(|v| v.to_string()),
            Field::Trace => self.trace.map(|v| v.to_string()),
            Field::Marker => self.marker.map(|v| v.to_string()),
            Field::Port => self.port.map(|v| v.to_string()),
            Field::Parameter => self.parameter.map(|v| v.mnemonic().to_string()),
            Field::Standard => self.standard.map(|v| v.mnemonic().to_string()),
            Field::CalKit => self.cal_kit.map(|v| v.to_string()),
        }
    }

    pub fn require(&self, field: Field) -> Result<String> {
        self.value(field).ok_or(Error::ContextUnset(field))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Fills the context placeholders of `template`, plus any `extra`
    /// placeholders. A placeholder naming an unset field fails with
    /// [`Error::ContextUnset`] without rendering anything.
    pub fn render(&self, template: &str, extra: &[(&str, &str)]) -> Result<String> {
        let mut vars = HashMap::new();
        for field in Field::ALL {
            if template.contains(field.placeholder()) {
                vars.insert(field.key().to_string(), self.require(field)?);
            }
        }
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }
        strfmt::strfmt(template, &vars).map_err(|e| Error::Template(e.to_string()))
    }

    pub fn apply(&mut self, settings: &ContextSettings) {
        if settings.channel.is_some() {
            self.channel = settings.channel;
        }
        if settings.trace.is_some() {
            self.trace = settings.trace;
        }
        if settings.marker.is_some() {
            self.marker = settings.marker;
        }
        if settings.port.is_some() {
            self.port = settings.port;
        }
    }
}
