//! `CALCulate` subsystem: trace math, formats, limits, markers and
//! measurement parameters.

use crate::{
    error::{Error, Result},
    scpi::{format_float, FromResponse},
};

use super::{commands::calculate as cmd, enums::*, Field};

view!(Calculate);
view!(Conversion);
view!(Correction);
view!(ElectricalDelay);
view!(Offset);
view!(Data);
view!(Filter);
view!(Gate);
view!(Limit);
view!(Marker);
view!(MarkerFunction);
view!(Bandwidth);
view!(Parameter);

impl<'a, T: crate::protocols::Transport> Calculate<'a, T> {
    pub fn conversion(self) -> Conversion<'a, T> {
        Conversion::new(self.session)
    }
    pub fn correction(self) -> Correction<'a, T> {
        Correction::new(self.session)
    }
    pub fn data(self) -> Data<'a, T> {
        Data::new(self.session)
    }
    pub fn filter(self) -> Filter<'a, T> {
        Filter::new(self.session)
    }
    pub fn limit(self) -> Limit<'a, T> {
        Limit::new(self.session)
    }
    pub fn marker(self) -> Marker<'a, T> {
        Marker::new(self.session)
    }
    pub fn parameter(self) -> Parameter<'a, T> {
        Parameter::new(self.session)
    }

    /// Display format of the active trace.
    pub fn format(&mut self) -> Result<DataFormat> {
        self.session.get(&cmd::FORMAT)
    }
    pub fn set_format(&mut self, format: DataFormat) -> Result<()> {
        self.session.set(&cmd::FORMAT, format)
    }
}

impl<'a, T: crate::protocols::Transport> Conversion<'a, T> {
    pub fn state(&mut self) -> Result<bool> {
        self.session.get(&cmd::CONVERSION_STATE)
    }
    pub fn set_state(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::CONVERSION_STATE, on)
    }
    pub fn function(&mut self) -> Result<ConversionFunction> {
        self.session.get(&cmd::CONVERSION_FUNCTION)
    }
    pub fn set_function(&mut self, function: ConversionFunction) -> Result<()> {
        self.session.set(&cmd::CONVERSION_FUNCTION, function)
    }
}

impl<'a, T: crate::protocols::Transport> Correction<'a, T> {
    pub fn edelay(self) -> ElectricalDelay<'a, T> {
        ElectricalDelay::new(self.session)
    }
    pub fn offset(self) -> Offset<'a, T> {
        Offset::new(self.session)
    }
}

impl<'a, T: crate::protocols::Transport> ElectricalDelay<'a, T> {
    /// Delay in seconds.
    pub fn time(&mut self) -> Result<f64> {
        self.session.get(&cmd::EDELAY_TIME)
    }
    pub fn set_time(&mut self, seconds: f64) -> Result<()> {
        self.session.set(&cmd::EDELAY_TIME, seconds)
    }
    pub fn media(&mut self) -> Result<MediaType> {
        self.session.get(&cmd::EDELAY_MEDIA)
    }
    pub fn set_media(&mut self, media: MediaType) -> Result<()> {
        self.session.set(&cmd::EDELAY_MEDIA, media)
    }
    pub fn distance(&mut self) -> Result<f64> {
        self.session.get(&cmd::EDELAY_DISTANCE)
    }
    pub fn set_distance(&mut self, distance: f64) -> Result<()> {
        self.session.set(&cmd::EDELAY_DISTANCE, distance)
    }
    pub fn distance_unit(&mut self) -> Result<DistanceUnit> {
        self.session.get(&cmd::EDELAY_DISTANCE_UNIT)
    }
    pub fn set_distance_unit(&mut self, unit: DistanceUnit) -> Result<()> {
        self.session.set(&cmd::EDELAY_DISTANCE_UNIT, unit)
    }
}

impl<'a, T: crate::protocols::Transport> Offset<'a, T> {
    /// Phase offset in degrees.
    pub fn phase(&mut self) -> Result<f64> {
        self.session.get(&cmd::OFFSET_PHASE)
    }
    pub fn set_phase(&mut self, degrees: f64) -> Result<()> {
        self.session.set(&cmd::OFFSET_PHASE, degrees)
    }
}

impl<'a, T: crate::protocols::Transport> Data<'a, T> {
    /// Formatted data of the active trace.
    pub fn fdata(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::DATA_FDATA)
    }
    pub fn set_fdata(&mut self, data: &[f64]) -> Result<()> {
        self.session.set(&cmd::DATA_FDATA, data)
    }
    pub fn fmemory(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::DATA_FMEMORY)
    }
    pub fn set_fmemory(&mut self, data: &[f64]) -> Result<()> {
        self.session.set(&cmd::DATA_FMEMORY, data)
    }
    /// Corrected complex data, real/imaginary interleaved.
    pub fn sdata(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::DATA_SDATA)
    }
    pub fn set_sdata(&mut self, data: &[f64]) -> Result<()> {
        self.session.set(&cmd::DATA_SDATA, data)
    }
    pub fn smemory(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::DATA_SMEMORY)
    }
    pub fn set_smemory(&mut self, data: &[f64]) -> Result<()> {
        self.session.set(&cmd::DATA_SMEMORY, data)
    }
    pub fn xaxis(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::DATA_XAXIS)
    }
    /// Formatted data of every trace in the channel.
    pub fn multi_fdata(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::DATA_MULTI_FDATA)
    }
    pub fn multi_sdata(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::DATA_MULTI_SDATA)
    }
}

impl<'a, T: crate::protocols::Transport> Filter<'a, T> {
    pub fn gate(self) -> Gate<'a, T> {
        Gate::new(self.session)
    }
}

/// Time-domain gate of the active trace.
impl<'a, T: crate::protocols::Transport> Gate<'a, T> {
    pub fn gate_type(&mut self) -> Result<GateType> {
        self.session.get(&cmd::GATE_TYPE)
    }
    pub fn set_gate_type(&mut self, gate_type: GateType) -> Result<()> {
        self.session.set(&cmd::GATE_TYPE, gate_type)
    }
    pub fn shape(&mut self) -> Result<GateShape> {
        self.session.get(&cmd::GATE_SHAPE)
    }
    pub fn set_shape(&mut self, shape: GateShape) -> Result<()> {
        self.session.set(&cmd::GATE_SHAPE, shape)
    }
    pub fn center(&mut self) -> Result<f64> {
        self.session.get(&cmd::GATE_CENTER)
    }
    pub fn set_center(&mut self, seconds: f64) -> Result<()> {
        self.session.set(&cmd::GATE_CENTER, seconds)
    }
    pub fn start(&mut self) -> Result<f64> {
        self.session.get(&cmd::GATE_START)
    }
    pub fn set_start(&mut self, seconds: f64) -> Result<()> {
        self.session.set(&cmd::GATE_START, seconds)
    }
    pub fn stop(&mut self) -> Result<f64> {
        self.session.get(&cmd::GATE_STOP)
    }
    pub fn set_stop(&mut self, seconds: f64) -> Result<()> {
        self.session.set(&cmd::GATE_STOP, seconds)
    }
    pub fn state(&mut self) -> Result<bool> {
        self.session.get(&cmd::GATE_STATE)
    }
    pub fn set_state(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::GATE_STATE, on)
    }
}

/// One row of the limit table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitLine {
    pub kind: LimitType,
    pub start_stimulus: f64,
    pub stop_stimulus: f64,
    pub start_response: f64,
    pub stop_response: f64,
}

impl LimitLine {
    pub fn new(kind: LimitType, start_stimulus: f64, stop_stimulus: f64, start_response: f64, stop_response: f64) -> Self {
        Self {
            kind,
            start_stimulus,
            stop_stimulus,
            start_response,
            stop_response,
        }
    }

    /// Flat limit from `start` to `stop` at `level`.
    pub fn flat(kind: LimitType, start: f64, stop: f64, level: f64) -> Self {
        Self::new(kind, start, stop, level, level)
    }

    fn values(&self) -> [f64; 4] {
        [
            self.start_stimulus,
            self.stop_stimulus,
            self.start_response,
            self.stop_response,
        ]
    }
}

fn encode_limit_table(lines: &[LimitLine]) -> Result<String> {
    let mut fields = vec![lines.len().to_string()];
    for line in lines {
        if let Some(bad) = line.values().iter().find(|v| !v.is_finite()) {
            return Err(Error::invalid_argument(
                cmd::LIMIT_DATA.path,
                bad.to_string(),
                "finite limit values",
            ));
        }
        fields.push(line.kind.mnemonic().to_string());
        fields.extend(line.values().iter().map(|v| format_float(*v)));
    }
    Ok(fields.join(","))
}

fn decode_limit_table(values: &[f64]) -> Option<Vec<LimitLine>> {
    let (count, rows) = values.split_first()?;
    if count.fract() != 0.0 || *count < 0.0 || rows.len() != *count as usize * 5 {
        return None;
    }
    rows.chunks(5)
        .map(|row| {
            if row[0].fract() != 0.0 || row[0] < 0.0 {
                return None;
            }
            let kind = *LimitType::ALL.get(row[0] as usize)?;
            Some(LimitLine::new(kind, row[1], row[2], row[3], row[4]))
        })
        .collect()
}

impl<'a, T: crate::protocols::Transport> Limit<'a, T> {
    /// Current limit table of the active trace.
    pub fn lines(&mut self) -> Result<Vec<LimitLine>> {
        let command = format!("{}?", self.session.render(&cmd::LIMIT_DATA)?);
        let response = self.session.query(&command)?;
        let values: Vec<f64> = crate::scpi::parse(&command, &response)?;
        decode_limit_table(&values).ok_or_else(|| Error::Parse {
            command,
            response,
            expected: "limit table <count>,{<type>,<start>,<stop>,<start level>,<stop level>}",
        })
    }

    /// Replaces the whole limit table.
    pub fn set_lines(&mut self, lines: &[LimitLine]) -> Result<()> {
        let payload = encode_limit_table(lines)?;
        self.session.set_payload(&cmd::LIMIT_DATA, &payload)
    }

    /// Appends `line` to the table read back from the instrument.
    pub fn add_line(&mut self, line: LimitLine) -> Result<()> {
        let mut lines = self.lines()?;
        lines.push(line);
        self.set_lines(&lines)
    }

    pub fn clear_lines(&mut self) -> Result<()> {
        self.set_lines(&[])
    }

    /// Whether limit lines are drawn.
    pub fn display(&mut self) -> Result<bool> {
        self.session.get(&cmd::LIMIT_DISPLAY)
    }
    pub fn set_display(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::LIMIT_DISPLAY, on)
    }
    /// Whether the limit test runs.
    pub fn state(&mut self) -> Result<bool> {
        self.session.get(&cmd::LIMIT_STATE)
    }
    pub fn set_state(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::LIMIT_STATE, on)
    }
    /// `true` when the last sweep failed the limit test.
    pub fn fail(&mut self) -> Result<bool> {
        self.session.get(&cmd::LIMIT_FAIL)
    }
}

/// Marker response value. `secondary` is 0 for scalar formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerValue {
    pub primary: f64,
    pub secondary: f64,
}

impl MarkerValue {
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.primary, self.secondary)
    }
}

impl From<MarkerValue> for (f64, f64) {
    fn from(v: MarkerValue) -> Self {
        v.as_tuple()
    }
}

impl FromResponse for MarkerValue {
    const EXPECTED: &'static str = "two comma-separated numbers";
    fn from_response(response: &str) -> Option<Self> {
        match Vec::<f64>::from_response(response)?.as_slice() {
            [primary, secondary] => Some(Self {
                primary: *primary,
                secondary: *secondary,
            }),
            _ => None,
        }
    }
}

/// Result of a marker bandwidth search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthResult {
    pub bandwidth: f64,
    pub center: f64,
    pub low: f64,
    pub high: f64,
    pub q: f64,
    pub loss: f64,
}

impl FromResponse for BandwidthResult {
    const EXPECTED: &'static str = "six comma-separated numbers";
    fn from_response(response: &str) -> Option<Self> {
        match Vec::<f64>::from_response(response)?.as_slice() {
            [bandwidth, center, low, high, q, loss] => Some(Self {
                bandwidth: *bandwidth,
                center: *center,
                low: *low,
                high: *high,
                q: *q,
                loss: *loss,
            }),
            _ => None,
        }
    }
}

impl<'a, T: crate::protocols::Transport> Marker<'a, T> {
    pub fn function(self) -> MarkerFunction<'a, T> {
        MarkerFunction::new(self.session)
    }
    pub fn bandwidth(self) -> Bandwidth<'a, T> {
        Bandwidth::new(self.session)
    }

    pub fn state(&mut self) -> Result<bool> {
        self.session.get(&cmd::MARKER_STATE)
    }
    pub fn set_state(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::MARKER_STATE, on)
    }
    /// Stimulus position.
    pub fn x(&mut self) -> Result<f64> {
        self.session.get(&cmd::MARKER_X)
    }
    pub fn set_x(&mut self, stimulus: f64) -> Result<()> {
        self.session.set(&cmd::MARKER_X, stimulus)
    }
    /// Response at the marker position.
    pub fn y(&mut self) -> Result<MarkerValue> {
        self.session.get(&cmd::MARKER_Y)
    }
    /// Moves the marker to a named position.
    pub fn set_position(&mut self, location: MarkerLocation) -> Result<()> {
        self.session.set(&cmd::MARKER_SET, location)
    }
}

impl<'a, T: crate::protocols::Transport> MarkerFunction<'a, T> {
    /// Runs the configured search once.
    pub fn execute(&mut self) -> Result<()> {
        self.session.fire(&cmd::MARKER_FUNCTION_EXECUTE, &[])
    }
    pub fn target(&mut self) -> Result<f64> {
        self.session.get(&cmd::MARKER_FUNCTION_TARGET)
    }
    pub fn set_target(&mut self, value: f64) -> Result<()> {
        self.session.set(&cmd::MARKER_FUNCTION_TARGET, value)
    }
    pub fn search_type(&mut self) -> Result<SearchType> {
        self.session.get(&cmd::MARKER_FUNCTION_TYPE)
    }
    pub fn set_search_type(&mut self, search: SearchType) -> Result<()> {
        self.session.set(&cmd::MARKER_FUNCTION_TYPE, search)
    }
}

impl<'a, T: crate::protocols::Transport> Bandwidth<'a, T> {
    pub fn data(&mut self) -> Result<BandwidthResult> {
        self.session.get(&cmd::BANDWIDTH_DATA)
    }
    pub fn reference(&mut self) -> Result<BandwidthReference> {
        self.session.get(&cmd::BANDWIDTH_REFERENCE)
    }
    pub fn set_reference(&mut self, reference: BandwidthReference) -> Result<()> {
        self.session.set(&cmd::BANDWIDTH_REFERENCE, reference)
    }
    pub fn state(&mut self) -> Result<bool> {
        self.session.get(&cmd::BANDWIDTH_STATE)
    }
    pub fn set_state(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::BANDWIDTH_STATE, on)
    }
    pub fn bandwidth_type(&mut self) -> Result<BandwidthType> {
        self.session.get(&cmd::BANDWIDTH_TYPE)
    }
    pub fn set_bandwidth_type(&mut self, bandwidth_type: BandwidthType) -> Result<()> {
        self.session.set(&cmd::BANDWIDTH_TYPE, bandwidth_type)
    }
    /// Level below the reference that defines the band edges, in dB.
    pub fn threshold(&mut self) -> Result<f64> {
        self.session.get(&cmd::BANDWIDTH_THRESHOLD)
    }
    pub fn set_threshold(&mut self, db: f64) -> Result<()> {
        self.session.set(&cmd::BANDWIDTH_THRESHOLD, db)
    }
}

impl<'a, T: crate::protocols::Transport> Parameter<'a, T> {
    /// Number of traces in the channel.
    pub fn count(&mut self) -> Result<u32> {
        self.session.get(&cmd::PARAMETER_COUNT)
    }
    pub fn set_count(&mut self, count: u32) -> Result<()> {
        self.session.set(&cmd::PARAMETER_COUNT, count)
    }
    /// Makes the context trace the active trace.
    pub fn select(&mut self) -> Result<()> {
        self.session.fire(&cmd::PARAMETER_SELECT, &[])
    }
    /// Sets the context trace to `trace`, then selects it.
    pub fn select_trace(&mut self, trace: u32) -> Result<()> {
        if trace == 0 {
            return Err(Error::invalid_argument(Field::Trace.key(), "0", "an index starting at 1"));
        }
        self.session.context_mut().trace = Some(trace);
        self.select()
    }
    /// Measurement parameter of the context trace.
    pub fn definition(&mut self) -> Result<SParameter> {
        self.session.get(&cmd::PARAMETER_DEFINE)
    }
    pub fn define(&mut self, parameter: SParameter) -> Result<()> {
        self.session.set(&cmd::PARAMETER_DEFINE, parameter)
    }
    /// Defines the context trace with the context parameter.
    pub fn define_from_context(&mut self) -> Result<()> {
        let parameter = self
            .session
            .context()
            .parameter
            .ok_or(Error::ContextUnset(Field::Parameter))?;
        self.define(parameter)
    }
}
