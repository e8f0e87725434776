//! The analyzer's command table.
//!
//! Each [`CommandDef`] ties a dotted path (`sense.frequency.center`) to a
//! header template (`SENS{channel}:FREQ:CENT`), what can be done with it
//! and the kind of value it carries. The typed namespaces and the generic
//! `Vna::get`/`set`/`execute` accessors both go through this table.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    error::{Error, Result},
    scpi::{describe, format_float, format_list, mnemonic::find, parse, Choice, Value},
};

use super::{context::Field, enums::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Query,
    Write,
    QueryWrite,
    /// Fire-and-forget, taking between `min` and `max` arguments.
    Event { min: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    Float,
    Int,
    /// Sent as `1`/`0`.
    Bool,
    /// Sent as `ON`/`OFF`.
    Switch,
    Text,
    Choice(&'static [Choice]),
    FloatList,
}

impl ValueKind {
    pub fn describe(&self) -> String {
        match self {
            ValueKind::None => "no value".to_string(),
            ValueKind::Float => "a finite number".to_string(),
            ValueKind::Int => "an integer".to_string(),
            ValueKind::Bool => "a boolean (1/0)".to_string(),
            ValueKind::Switch => "a switch state (ON/OFF)".to_string(),
            ValueKind::Text => "text".to_string(),
            ValueKind::Choice(choices) => describe(choices),
            ValueKind::FloatList => "a list of finite numbers".to_string(),
        }
    }

    /// Canonical wire form of `value`, or `InvalidArgument` naming
    /// `parameter`.
    pub fn encode(&self, parameter: &str, value: &Value) -> Result<String> {
        let reject = || Error::invalid_argument(parameter, value.to_string(), self.describe());
        match self {
            ValueKind::Float => match value.as_f64() {
                Some(v) if v.is_finite() => Ok(format_float(v)),
                _ => Err(reject()),
            },
            ValueKind::Int => value.as_i64().map(|v| v.to_string()).ok_or_else(reject),
            ValueKind::Bool | ValueKind::Switch => {
                let state = match value {
                    Value::Text(s) => crate::scpi::FromResponse::from_response(s),
                    other => other.as_bool(),
                };
                match (self, state) {
                    (ValueKind::Bool, Some(true)) => Ok("1".to_string()),
                    (ValueKind::Bool, Some(false)) => Ok("0".to_string()),
                    (_, Some(true)) => Ok("ON".to_string()),
                    (_, Some(false)) => Ok("OFF".to_string()),
                    (_, None) => Err(reject()),
                }
            }
            ValueKind::Text => match value {
                Value::Text(s) if !s.is_empty() => Ok(s.clone()),
                _ => Err(reject()),
            },
            ValueKind::Choice(choices) => {
                let name = match value {
                    Value::Text(s) => s.clone(),
                    Value::Int(i) => i.to_string(),
                    _ => return Err(reject()),
                };
                find(choices, &name)
                    .map(|c| c.mnemonic.to_string())
                    .ok_or_else(reject)
            }
            ValueKind::FloatList => match value {
                Value::List(values) if values.iter().all(|v| v.is_finite()) => {
                    Ok(format_list(values))
                }
                Value::Float(v) if v.is_finite() => Ok(format_float(*v)),
                _ => Err(reject()),
            },
            ValueKind::None => Err(reject()),
        }
    }

    pub fn decode(&self, command: &str, response: &str) -> Result<Value> {
        match self {
            ValueKind::Float => parse(command, response).map(Value::Float),
            ValueKind::Int => parse(command, response).map(Value::Int),
            ValueKind::Bool | ValueKind::Switch => parse(command, response).map(Value::Bool),
            ValueKind::Text | ValueKind::None => parse(command, response).map(Value::Text),
            ValueKind::Choice(choices) => find(choices, response.trim().trim_matches('"'))
                .map(|c| Value::Text(c.mnemonic.to_string()))
                .ok_or_else(|| Error::Parse {
                    command: command.to_string(),
                    response: response.to_string(),
                    expected: "enumerated mnemonic",
                }),
            ValueKind::FloatList => parse(command, response).map(Value::List),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDef {
    pub path: &'static str,
    pub header: &'static str,
    pub access: Access,
    pub kind: ValueKind,
}

impl CommandDef {
    pub const fn query(path: &'static str, header: &'static str, kind: ValueKind) -> Self {
        Self {
            path,
            header,
            access: Access::Query,
            kind,
        }
    }
    pub const fn write(path: &'static str, header: &'static str, kind: ValueKind) -> Self {
        Self {
            path,
            header,
            access: Access::Write,
            kind,
        }
    }
    pub const fn query_write(path: &'static str, header: &'static str, kind: ValueKind) -> Self {
        Self {
            path,
            header,
            access: Access::QueryWrite,
            kind,
        }
    }
    pub const fn event(
        path: &'static str,
        header: &'static str,
        kind: ValueKind,
        min: usize,
        max: usize,
    ) -> Self {
        Self {
            path,
            header,
            access: Access::Event { min, max },
            kind,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self.access, Access::Query | Access::QueryWrite)
    }
    pub fn is_writable(&self) -> bool {
        matches!(self.access, Access::Write | Access::QueryWrite)
    }
    pub fn is_event(&self) -> bool {
        matches!(self.access, Access::Event { .. })
    }

    /// Context fields the header needs.
    pub fn fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.header.contains(f.placeholder()))
            .collect()
    }

    pub fn encode(&self, value: &Value) -> Result<String> {
        self.kind.encode(self.path, value)
    }

    /// Comma-joined event arguments, checked against the arity.
    pub fn encode_args(&self, args: &[Value]) -> Result<String> {
        let (min, max) = match self.access {
            Access::Event { min, max } => (min, max),
            _ => (1, 1),
        };
        if args.len() < min || args.len() > max {
            let expected = if min == max {
                format!("{} argument(s)", min)
            } else {
                format!("{} to {} arguments", min, max)
            };
            return Err(Error::invalid_argument(
                self.path,
                format!("{} argument(s)", args.len()),
                expected,
            ));
        }
        let encoded = args
            .iter()
            .map(|a| self.encode(a))
            .collect::<Result<Vec<_>>>()?;
        Ok(encoded.join(","))
    }

    pub fn decode(&self, command: &str, response: &str) -> Result<Value> {
        self.kind.decode(command, response)
    }
}

const fn choice(choices: &'static [Choice]) -> ValueKind {
    ValueKind::Choice(choices)
}

pub mod root {
    use super::*;

    pub const ABORT: CommandDef = CommandDef::event("abort", "ABOR", ValueKind::None, 0, 0);
    pub const OPC: CommandDef = CommandDef::query("opc", "*OPC", ValueKind::Bool);
    pub const RESET: CommandDef = CommandDef::event("reset", "*RST", ValueKind::None, 0, 0);
    pub const IDENTIFY: CommandDef = CommandDef::query("identify", "*IDN", ValueKind::Text);
    pub const CLEAR_STATUS: CommandDef =
        CommandDef::event("clear_status", "*CLS", ValueKind::None, 0, 0);
}

pub mod calculate {
    use super::*;

    pub const CONVERSION_STATE: CommandDef =
        CommandDef::query_write("calculate.conversion.state", "CALC{channel}:CONV", ValueKind::Bool);
    pub const CONVERSION_FUNCTION: CommandDef = CommandDef::query_write(
        "calculate.conversion.function",
        "CALC{channel}:CONV:FUNC",
        choice(ConversionFunction::CHOICES),
    );

    pub const EDELAY_TIME: CommandDef = CommandDef::query_write(
        "calculate.correction.edelay.time",
        "CALC{channel}:TRAC{trace}:CORR:EDEL:TIME",
        ValueKind::Float,
    );
    pub const EDELAY_MEDIA: CommandDef = CommandDef::query_write(
        "calculate.correction.edelay.media",
        "CALC{channel}:TRAC{trace}:CORR:EDEL:MED",
        choice(MediaType::CHOICES),
    );
    pub const EDELAY_DISTANCE: CommandDef = CommandDef::query_write(
        "calculate.correction.edelay.distance",
        "CALC{channel}:TRAC{trace}:CORR:EDEL:DIST",
        ValueKind::Float,
    );
    pub const EDELAY_DISTANCE_UNIT: CommandDef = CommandDef::query_write(
        "calculate.correction.edelay.distance_unit",
        "CALC{channel}:TRAC{trace}:CORR:EDEL:DIST:UNIT",
        choice(DistanceUnit::CHOICES),
    );
    pub const OFFSET_PHASE: CommandDef = CommandDef::query_write(
        "calculate.correction.offset.phase",
        "CALC{channel}:TRAC{trace}:CORR:OFFS:PHAS",
        ValueKind::Float,
    );

    pub const DATA_FDATA: CommandDef = CommandDef::query_write(
        "calculate.data.fdata",
        "CALC{channel}:TRAC{trace}:DATA:FDAT",
        ValueKind::FloatList,
    );
    pub const DATA_FMEMORY: CommandDef = CommandDef::query_write(
        "calculate.data.fmemory",
        "CALC{channel}:TRAC{trace}:DATA:FMEM",
        ValueKind::FloatList,
    );
    pub const DATA_SDATA: CommandDef = CommandDef::query_write(
        "calculate.data.sdata",
        "CALC{channel}:TRAC{trace}:DATA:SDAT",
        ValueKind::FloatList,
    );
    pub const DATA_SMEMORY: CommandDef = CommandDef::query_write(
        "calculate.data.smemory",
        "CALC{channel}:TRAC{trace}:DATA:SMEM",
        ValueKind::FloatList,
    );
    pub const DATA_XAXIS: CommandDef = CommandDef::query(
        "calculate.data.xaxis",
        "CALC{channel}:TRAC{trace}:DATA:XAX",
        ValueKind::FloatList,
    );
    pub const DATA_MULTI_FDATA: CommandDef = CommandDef::query(
        "calculate.data.multi_fdata",
        "CALC{channel}:DATA:MDAT",
        ValueKind::FloatList,
    );
    pub const DATA_MULTI_SDATA: CommandDef = CommandDef::query(
        "calculate.data.multi_sdata",
        "CALC{channel}:DATA:SDAT",
        ValueKind::FloatList,
    );

    pub const GATE_TYPE: CommandDef = CommandDef::query_write(
        "calculate.filter.gate.type",
        "CALC{channel}:TRAC{trace}:FILT:TIME:TYPE",
        choice(GateType::CHOICES),
    );
    pub const GATE_SHAPE: CommandDef = CommandDef::query_write(
        "calculate.filter.gate.shape",
        "CALC{channel}:TRAC{trace}:FILT:TIME:SHAP",
        choice(GateShape::CHOICES),
    );
    pub const GATE_CENTER: CommandDef = CommandDef::query_write(
        "calculate.filter.gate.center",
        "CALC{channel}:TRAC{trace}:FILT:TIME:CENT",
        ValueKind::Float,
    );
    pub const GATE_START: CommandDef = CommandDef::query_write(
        "calculate.filter.gate.start",
        "CALC{channel}:TRAC{trace}:FILT:TIME:STAR",
        ValueKind::Float,
    );
    pub const GATE_STOP: CommandDef = CommandDef::query_write(
        "calculate.filter.gate.stop",
        "CALC{channel}:TRAC{trace}:FILT:TIME:STOP",
        ValueKind::Float,
    );
    pub const GATE_STATE: CommandDef = CommandDef::query_write(
        "calculate.filter.gate.state",
        "CALC{channel}:TRAC{trace}:FILT:TIME:STAT",
        ValueKind::Switch,
    );

    pub const FORMAT: CommandDef = CommandDef::query_write(
        "calculate.format",
        "CALC{channel}:TRAC{trace}:FORM",
        choice(DataFormat::CHOICES),
    );

    pub const LIMIT_DATA: CommandDef =
        CommandDef::query_write("calculate.limit.data", "CALC{channel}:LIM:DATA", ValueKind::FloatList);
    pub const LIMIT_DISPLAY: CommandDef =
        CommandDef::query_write("calculate.limit.display", "CALC{channel}:LIM:DISP", ValueKind::Bool);
    pub const LIMIT_STATE: CommandDef =
        CommandDef::query_write("calculate.limit.state", "CALC{channel}:LIM", ValueKind::Bool);
    pub const LIMIT_FAIL: CommandDef =
        CommandDef::query("calculate.limit.fail", "CALC{channel}:LIM:FAIL", ValueKind::Bool);

    pub const MARKER_STATE: CommandDef =
        CommandDef::query_write("calculate.marker.state", "CALC{channel}:MARK{marker}", ValueKind::Bool);
    pub const MARKER_X: CommandDef =
        CommandDef::query_write("calculate.marker.x", "CALC{channel}:MARK{marker}:X", ValueKind::Float);
    pub const MARKER_Y: CommandDef =
        CommandDef::query("calculate.marker.y", "CALC{channel}:MARK{marker}:Y", ValueKind::FloatList);
    pub const MARKER_SET: CommandDef = CommandDef::write(
        "calculate.marker.set",
        "CALC{channel}:MARK{marker}:SET",
        choice(MarkerLocation::CHOICES),
    );
    pub const MARKER_FUNCTION_EXECUTE: CommandDef = CommandDef::event(
        "calculate.marker.function.execute",
        "CALC{channel}:MARK{marker}:FUNC:EXEC",
        ValueKind::None,
        0,
        0,
    );
    pub const MARKER_FUNCTION_TARGET: CommandDef = CommandDef::query_write(
        "calculate.marker.function.target",
        "CALC{channel}:MARK{marker}:FUNC:TARG",
        ValueKind::Float,
    );
    pub const MARKER_FUNCTION_TYPE: CommandDef = CommandDef::query_write(
        "calculate.marker.function.type",
        "CALC{channel}:MARK{marker}:FUNC:TYPE",
        choice(SearchType::CHOICES),
    );
    pub const BANDWIDTH_DATA: CommandDef = CommandDef::query(
        "calculate.marker.bandwidth.data",
        "CALC{channel}:MARK{marker}:BWID:DATA",
        ValueKind::FloatList,
    );
    pub const BANDWIDTH_REFERENCE: CommandDef = CommandDef::query_write(
        "calculate.marker.bandwidth.reference",
        "CALC{channel}:MARK:BWID:REF",
        choice(BandwidthReference::CHOICES),
    );
    pub const BANDWIDTH_STATE: CommandDef = CommandDef::query_write(
        "calculate.marker.bandwidth.state",
        "CALC{channel}:MARK:BWID",
        ValueKind::Bool,
    );
    pub const BANDWIDTH_TYPE: CommandDef = CommandDef::query_write(
        "calculate.marker.bandwidth.type",
        "CALC{channel}:MARK{marker}:BWID:TYPE",
        choice(BandwidthType::CHOICES),
    );
    pub const BANDWIDTH_THRESHOLD: CommandDef = CommandDef::query_write(
        "calculate.marker.bandwidth.threshold",
        "CALC{channel}:MARK{marker}:BWID:THR",
        ValueKind::Float,
    );

    pub const PARAMETER_COUNT: CommandDef =
        CommandDef::query_write("calculate.parameter.count", "CALC{channel}:PAR:COUN", ValueKind::Int);
    pub const PARAMETER_SELECT: CommandDef = CommandDef::event(
        "calculate.parameter.select",
        "CALC{channel}:PAR{trace}:SEL",
        ValueKind::None,
        0,
        0,
    );
    pub const PARAMETER_DEFINE: CommandDef = CommandDef::query_write(
        "calculate.parameter.define",
        "CALC{channel}:PAR{trace}:DEF",
        choice(SParameter::CHOICES),
    );
}

pub mod display {
    use super::*;

    pub const ENABLE: CommandDef = CommandDef::query_write("display.enable", "DISP:ENAB", ValueKind::Bool);
    pub const FAIL_SIGN: CommandDef =
        CommandDef::query_write("display.fail_sign", "DISP:FSIG", ValueKind::Bool);
    pub const COLOR_RESET: CommandDef =
        CommandDef::event("display.color.reset", "DISP:COL:RES", ValueKind::None, 0, 0);
    pub const COLOR_TRACE_DATA: CommandDef =
        CommandDef::event("display.color.trace.data", "DISP:COL:TRAC:DATA", ValueKind::Int, 3, 3);
    pub const COLOR_TRACE_MEMORY: CommandDef =
        CommandDef::event("display.color.trace.memory", "DISP:COL:TRAC:MEM", ValueKind::Int, 3, 3);
    pub const WINDOW_LAYOUT: CommandDef = CommandDef::query_write(
        "display.window.layout",
        "DISP:WIND{channel}:SPL",
        choice(WindowLayout::CHOICES),
    );
    pub const WINDOW_MAXIMIZE: CommandDef =
        CommandDef::query_write("display.window.maximize", "DISP:WIND{channel}:MAX", ValueKind::Bool);
    pub const Y_AUTOSCALE: CommandDef = CommandDef::event(
        "display.window.trace.y.autoscale",
        "DISP:WIND{channel}:TRAC{trace}:Y:AUTO",
        ValueKind::None,
        0,
        0,
    );
    pub const Y_PER_DIVISION: CommandDef = CommandDef::query_write(
        "display.window.trace.y.per_division",
        "DISP:WIND{channel}:TRAC{trace}:Y:PDIV",
        ValueKind::Float,
    );
}

pub mod initiate {
    use super::*;

    pub const IMMEDIATE: CommandDef =
        CommandDef::event("initiate.immediate", "INIT{channel}", ValueKind::None, 0, 0);
    pub const CONTINUOUS: CommandDef =
        CommandDef::query_write("initiate.continuous", "INIT{channel}:CONT", ValueKind::Bool);
}

pub mod mmemory {
    use super::*;

    pub const LOAD_STATE: CommandDef =
        CommandDef::event("mmemory.load.state", "MMEM:LOAD", ValueKind::Text, 1, 1);
    pub const STORE_STATE: CommandDef =
        CommandDef::event("mmemory.store.state", "MMEM:STOR", ValueKind::Text, 1, 1);
    pub const STORE_STATE_TYPE: CommandDef = CommandDef::query_write(
        "mmemory.store.state_type",
        "MMEM:STOR:STYP",
        choice(StateType::CHOICES),
    );
    pub const LOAD_SEGMENT: CommandDef =
        CommandDef::event("mmemory.load.segment", "MMEM:LOAD:SEGM", ValueKind::Text, 1, 1);
    pub const STORE_SEGMENT: CommandDef =
        CommandDef::event("mmemory.store.segment", "MMEM:STOR:SEGM", ValueKind::Text, 1, 1);
}

pub mod sense {
    use super::*;

    pub const FREQUENCY_CW: CommandDef =
        CommandDef::query_write("sense.frequency.cw", "SENS{channel}:FREQ", ValueKind::Float);
    pub const FREQUENCY_CENTER: CommandDef =
        CommandDef::query_write("sense.frequency.center", "SENS{channel}:FREQ:CENT", ValueKind::Float);
    pub const FREQUENCY_SPAN: CommandDef =
        CommandDef::query_write("sense.frequency.span", "SENS{channel}:FREQ:SPAN", ValueKind::Float);
    pub const FREQUENCY_START: CommandDef =
        CommandDef::query_write("sense.frequency.start", "SENS{channel}:FREQ:STAR", ValueKind::Float);
    pub const FREQUENCY_STOP: CommandDef =
        CommandDef::query_write("sense.frequency.stop", "SENS{channel}:FREQ:STOP", ValueKind::Float);
    pub const FREQUENCY_DATA: CommandDef =
        CommandDef::query("sense.frequency.data", "SENS{channel}:FREQ:DATA", ValueKind::FloatList);

    pub const SWEEP_POINTS: CommandDef =
        CommandDef::query_write("sense.sweep.points", "SENS{channel}:SWE:POIN", ValueKind::Int);
    pub const SWEEP_POINT_TIME: CommandDef = CommandDef::query_write(
        "sense.sweep.point_time",
        "SENS{channel}:SWE:POIN:TIME",
        ValueKind::Float,
    );
    pub const SWEEP_TYPE: CommandDef = CommandDef::query_write(
        "sense.sweep.type",
        "SENS{channel}:SWE:TYPE",
        choice(SweepType::CHOICES),
    );

    pub const CORRECTION_IMPEDANCE: CommandDef = CommandDef::query_write(
        "sense.correction.impedance",
        "SENS{channel}:CORR:IMP",
        ValueKind::Float,
    );
    pub const CORRECTION_STATE: CommandDef =
        CommandDef::query_write("sense.correction.state", "SENS{channel}:CORR:STAT", ValueKind::Bool);
    pub const COLLECT_OPEN: CommandDef = CommandDef::event(
        "sense.correction.collection.open",
        "SENS{channel}:CORR:COLL:OPEN",
        ValueKind::Int,
        1,
        1,
    );
    pub const COLLECT_SHORT: CommandDef = CommandDef::event(
        "sense.correction.collection.short",
        "SENS{channel}:CORR:COLL:SHOR",
        ValueKind::Int,
        1,
        1,
    );
    pub const COLLECT_LOAD: CommandDef = CommandDef::event(
        "sense.correction.collection.load",
        "SENS{channel}:CORR:COLL:LOAD",
        ValueKind::Int,
        1,
        1,
    );
    pub const COLLECT_THRU: CommandDef = CommandDef::event(
        "sense.correction.collection.thru",
        "SENS{channel}:CORR:COLL:THRU",
        ValueKind::Int,
        2,
        2,
    );
    pub const COLLECT_SAVE: CommandDef = CommandDef::event(
        "sense.correction.collection.save",
        "SENS{channel}:CORR:COLL:SAVE",
        ValueKind::None,
        0,
        0,
    );
    pub const COLLECT_CAL_KIT: CommandDef = CommandDef::query_write(
        "sense.correction.collection.cal_kit",
        "SENS{channel}:CORR:COLL:CKIT",
        ValueKind::Int,
    );
    /// `{method}` is a [`CalibrationMethod`] mnemonic.
    pub const COLLECT_METHOD: CommandDef = CommandDef::event(
        "sense.correction.collection.method",
        "SENS{channel}:CORR:COLL:METH:{method}",
        ValueKind::Int,
        1,
        4,
    );
    /// `{kind}` is an [`EcalType`] mnemonic.
    pub const COLLECT_ECAL: CommandDef = CommandDef::event(
        "sense.correction.collection.ecal",
        "SENS{channel}:CORR:COLL:ECAL:{kind}",
        ValueKind::Int,
        1,
        4,
    );
    pub const EXTENSION_AUTO_MEASURE: CommandDef = CommandDef::write(
        "sense.correction.extension.auto.measure",
        "SENS{channel}:CORR:EXT:AUTO:MEAS",
        choice(ExtensionStandard::CHOICES),
    );
    pub const EXTENSION_AUTO_PORT: CommandDef = CommandDef::query_write(
        "sense.correction.extension.auto.port",
        "SENS{channel}:CORR:EXT:AUTO:PORT{port}",
        ValueKind::Switch,
    );

    pub const SEGMENT_DATA: CommandDef =
        CommandDef::query_write("sense.segment.data", "SENS{channel}:SEGM:DATA", ValueKind::FloatList);
    pub const SEGMENT_SWEEP_POINTS: CommandDef = CommandDef::query(
        "sense.segment.sweep.points",
        "SENS{channel}:SEGM:SWE:POIN",
        ValueKind::Int,
    );
    pub const SEGMENT_SWEEP_TIME: CommandDef = CommandDef::query(
        "sense.segment.sweep.time",
        "SENS{channel}:SEGM:SWE:TIME",
        ValueKind::Float,
    );
    pub const SEGMENT_LIST_CONTROL: CommandDef = CommandDef::query_write(
        "sense.segment.list.control",
        "SENS{channel}:SEGM:LIST:CONT:DATA",
        ValueKind::FloatList,
    );
}

pub mod status {
    use super::*;

    pub const EVENT: CommandDef = CommandDef::query("status.event", "*ESR", ValueKind::Int);
    pub const BYTE: CommandDef = CommandDef::query("status.byte", "*STB", ValueKind::Int);
    pub const EVENT_ENABLE: CommandDef =
        CommandDef::query_write("status.event_enable", "*ESE", ValueKind::Int);
    pub const SERVICE_ENABLE: CommandDef =
        CommandDef::query_write("status.service_enable", "*SRE", ValueKind::Int);
}

pub mod system {
    use super::*;

    pub const PRESET: CommandDef = CommandDef::event("system.preset", "SYST:PRES", ValueKind::None, 0, 0);
    pub const ERROR: CommandDef = CommandDef::query("system.error", "SYST:ERR", ValueKind::Text);
}

pub mod trigger {
    use super::*;

    pub const IMMEDIATE: CommandDef = CommandDef::event("trigger.immediate", "TRIG", ValueKind::None, 0, 0);
    pub const SINGLE: CommandDef = CommandDef::event("trigger.single", "TRIG:SING", ValueKind::None, 0, 0);
    pub const SOURCE: CommandDef =
        CommandDef::query_write("trigger.source", "TRIG:SOUR", choice(TriggerSource::CHOICES));
    pub const SCOPE: CommandDef =
        CommandDef::query_write("trigger.scope", "TRIG:SCOP", choice(TriggerScope::CHOICES));
}

pub static COMMANDS: &[CommandDef] = &[
    root::ABORT,
    root::OPC,
    root::RESET,
    root::IDENTIFY,
    root::CLEAR_STATUS,
    calculate::CONVERSION_STATE,
    calculate::CONVERSION_FUNCTION,
    calculate::EDELAY_TIME,
    calculate::EDELAY_MEDIA,
    calculate::EDELAY_DISTANCE,
    calculate::EDELAY_DISTANCE_UNIT,
    calculate::OFFSET_PHASE,
    calculate::DATA_FDATA,
    calculate::DATA_FMEMORY,
    calculate::DATA_SDATA,
    calculate::DATA_SMEMORY,
    calculate::DATA_XAXIS,
    calculate::DATA_MULTI_FDATA,
    calculate::DATA_MULTI_SDATA,
    calculate::GATE_TYPE,
    calculate::GATE_SHAPE,
    calculate::GATE_CENTER,
    calculate::GATE_START,
    calculate::GATE_STOP,
    calculate::GATE_STATE,
    calculate::FORMAT,
    calculate::LIMIT_DATA,
    calculate::LIMIT_DISPLAY,
    calculate::LIMIT_STATE,
    calculate::LIMIT_FAIL,
    calculate::MARKER_STATE,
    calculate::MARKER_X,
    calculate::MARKER_Y,
    calculate::MARKER_SET,
    calculate::MARKER_FUNCTION_EXECUTE,
    calculate::MARKER_FUNCTION_TARGET,
    calculate::MARKER_FUNCTION_TYPE,
    calculate::BANDWIDTH_DATA,
    calculate::BANDWIDTH_REFERENCE,
    calculate::BANDWIDTH_STATE,
    calculate::BANDWIDTH_TYPE,
    calculate::BANDWIDTH_THRESHOLD,
    calculate::PARAMETER_COUNT,
    calculate::PARAMETER_SELECT,
    calculate::PARAMETER_DEFINE,
    display::ENABLE,
    display::FAIL_SIGN,
    display::COLOR_RESET,
    display::COLOR_TRACE_DATA,
    display::COLOR_TRACE_MEMORY,
    display::WINDOW_LAYOUT,
    display::WINDOW_MAXIMIZE,
    display::Y_AUTOSCALE,
    display::Y_PER_DIVISION,
    initiate::IMMEDIATE,
    initiate::CONTINUOUS,
    mmemory::LOAD_STATE,
    mmemory::STORE_STATE,
    mmemory::STORE_STATE_TYPE,
    mmemory::LOAD_SEGMENT,
    mmemory::STORE_SEGMENT,
    sense::FREQUENCY_CW,
    sense::FREQUENCY_CENTER,
    sense::FREQUENCY_SPAN,
    sense::FREQUENCY_START,
    sense::FREQUENCY_STOP,
    sense::FREQUENCY_DATA,
    sense::SWEEP_POINTS,
    sense::SWEEP_POINT_TIME,
    sense::SWEEP_TYPE,
    sense::CORRECTION_IMPEDANCE,
    sense::CORRECTION_STATE,
    sense::COLLECT_OPEN,
    sense::COLLECT_SHORT,
    sense::COLLECT_LOAD,
    sense::COLLECT_THRU,
    sense::COLLECT_SAVE,
    sense::COLLECT_CAL_KIT,
    sense::COLLECT_METHOD,
    sense::COLLECT_ECAL,
    sense::EXTENSION_AUTO_MEASURE,
    sense::EXTENSION_AUTO_PORT,
    sense::SEGMENT_DATA,
    sense::SEGMENT_SWEEP_POINTS,
    sense::SEGMENT_SWEEP_TIME,
    sense::SEGMENT_LIST_CONTROL,
    status::EVENT,
    status::BYTE,
    status::EVENT_ENABLE,
    status::SERVICE_ENABLE,
    system::PRESET,
    system::ERROR,
    trigger::IMMEDIATE,
    trigger::SINGLE,
    trigger::SOURCE,
    trigger::SCOPE,
];

static REGISTRY: Lazy<HashMap<&'static str, &'static CommandDef>> =
    Lazy::new(|| COMMANDS.iter().map(|def| (def.path, def)).collect());

pub fn lookup(path: &str) -> Result<&'static CommandDef> {
    REGISTRY
        .get(path.trim())
        .copied()
        .ok_or_else(|| Error::UnknownCommand(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<_> = COMMANDS.iter().map(|d| d.path).collect();
        assert_eq!(paths.len(), COMMANDS.len());
    }

    #[test]
    fn headers_are_canonical() {
        for def in COMMANDS {
            assert!(!def.header.starts_with(':'), "{}", def.path);
            assert!(!def.header.ends_with('?'), "{}", def.path);
            if let Access::Event { min, max } = def.access {
                assert!(min <= max, "{}", def.path);
                assert_eq!(max == 0, def.kind == ValueKind::None, "{}", def.path);
            }
        }
    }

    #[test]
    fn lookup_by_path() {
        let def = lookup("sense.frequency.center").unwrap();
        assert_eq!(def.header, "SENS{channel}:FREQ:CENT");
        assert_eq!(def.fields(), vec![Field::Channel]);
        assert!(def.is_readable() && def.is_writable());
        assert!(matches!(lookup("sense.nope"), Err(Error::UnknownCommand(_))));
    }

    #[test]
    fn encodes_by_kind() {
        let center = sense::FREQUENCY_CENTER;
        assert_eq!(center.encode(&Value::Float(433e6)).unwrap(), "433000000.0");
        assert_eq!(center.encode(&Value::Int(50)).unwrap(), "50.0");
        assert!(center.encode(&Value::Float(f64::NAN)).is_err());
        assert!(center.encode(&Value::from("433e6")).is_err());

        assert_eq!(sense::SWEEP_POINTS.encode(&Value::Int(1001)).unwrap(), "1001");
        assert!(sense::SWEEP_POINTS.encode(&Value::Float(1.5)).is_err());

        assert_eq!(initiate::CONTINUOUS.encode(&Value::Bool(false)).unwrap(), "0");
        assert_eq!(
            sense::EXTENSION_AUTO_PORT.encode(&Value::Bool(true)).unwrap(),
            "ON"
        );
        assert_eq!(
            calculate::GATE_STATE.encode(&Value::from("off")).unwrap(),
            "OFF"
        );
        assert_eq!(
            calculate::FORMAT.encode(&Value::from("mlog")).unwrap(),
            "MLOG"
        );
        assert_eq!(display::WINDOW_LAYOUT.encode(&Value::Int(3)).unwrap(), "D1_2");
        assert_eq!(
            calculate::DATA_FMEMORY
                .encode(&Value::List(vec![1.0, -2.5]))
                .unwrap(),
            "1.0,-2.5"
        );
    }

    #[test]
    fn invalid_choice_lists_mnemonics() {
        match trigger::SCOPE.encode(&Value::from("everything")) {
            Err(Error::InvalidArgument {
                parameter,
                value,
                expected,
            }) => {
                assert_eq!(parameter, "trigger.scope");
                assert_eq!(value, "everything");
                assert_eq!(expected, "one of ACT, ALL");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn event_arity() {
        let thru = sense::COLLECT_THRU;
        assert_eq!(
            thru.encode_args(&[Value::Int(1), Value::Int(2)]).unwrap(),
            "1,2"
        );
        assert!(matches!(
            thru.encode_args(&[Value::Int(1)]),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(trigger::IMMEDIATE.encode_args(&[]).unwrap(), "");
        assert!(trigger::IMMEDIATE.encode_args(&[Value::Int(1)]).is_err());
    }

    #[test]
    fn decodes_by_kind() {
        assert_eq!(
            calculate::FORMAT.decode("q", "MLOG").unwrap(),
            Value::Text("MLOG".into())
        );
        assert_eq!(
            calculate::GATE_STATE.decode("q", "ON").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            calculate::MARKER_Y.decode("q", "-12.3,0.0").unwrap(),
            Value::List(vec![-12.3, 0.0])
        );
        assert!(matches!(
            calculate::FORMAT.decode("q", "BOGUS"),
            Err(Error::Parse { .. })
        ));
    }
}
